//! Parse error types.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is invalid.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Line and column where the error occurred.
        location: Option<(usize, usize)>,
    },
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            location: None,
        }
    }

    /// Creates a new invalid source error with a line/column location.
    pub fn invalid_source_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            location: Some((line, column)),
        }
    }
}
