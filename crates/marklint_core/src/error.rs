//! Linter error types.

use thiserror::Error;

/// Errors that refuse a lint pass or a configuration.
///
/// None of these is a finding about the document: a pass that fails with a
/// `LinterError` produced no diagnostics at all.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same qualified rule id was registered or configured twice.
    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    /// A configured rule id is not registered.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// A rule rejected its options while the rule set was being built.
    #[error("Invalid options for rule '{rule_id}': {message}")]
    InvalidOptions {
        /// Qualified id of the rule.
        rule_id: String,
        /// Reason given by the rule.
        message: String,
    },

    /// The document tree is deeper than the configured bound.
    #[error("Document tree exceeds the maximum depth of {limit}")]
    TreeTooDeep {
        /// The configured depth bound.
        limit: usize,
    },

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true for errors caused by the rule configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::DuplicateRule(_)
                | Self::UnknownRule(_)
                | Self::InvalidOptions { .. }
                | Self::TreeTooDeep { .. }
        )
    }
}
