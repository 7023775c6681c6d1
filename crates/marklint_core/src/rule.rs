//! The contract every lint rule implements.

use marklint_ast::{Document, Node};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::RuleSink;

/// Errors a rule may return instead of completing.
///
/// The engine never propagates these: a rule returning an error produces a
/// single error diagnostic for that rule and the pass continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule's options could not be understood.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The rule could not finish.
    #[error("{0}")]
    Failed(String),
}

impl RuleError {
    /// Creates a [`RuleError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A lint rule.
///
/// Rules are stateless with respect to a pass: everything a rule needs
/// arrives as arguments, and everything it finds goes through the sink.
/// Because rule sets are shared across worker threads, implementations must
/// be `Send + Sync`.
pub trait Rule: Send + Sync {
    /// One-line human readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Checks options when a rule set is built.
    ///
    /// The default accepts anything. Rules that reject an options value here
    /// make the whole rule set invalid instead of failing on every document.
    fn validate_options(&self, _options: &Value) -> Result<(), RuleError> {
        Ok(())
    }

    /// Runs the rule over one document.
    ///
    /// `tree` is the document's root node.
    fn apply(
        &self,
        tree: &Node<'_>,
        document: &Document<'_>,
        options: &Value,
        sink: &mut RuleSink<'_>,
    ) -> Result<(), RuleError>;
}

/// Deserializes rule options, treating `null` as the default.
pub fn parse_options<T>(options: &Value) -> Result<T, RuleError>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    T::deserialize(options).map_err(|e| RuleError::InvalidOptions(e.to_string()))
}
