//! Diagnostic types for lint results.

use std::fmt;
use std::str::FromStr;

use marklint_ast::Position;
use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

impl Severity {
    /// Returns the lowercase name used in output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// A single finding reported by a lint rule.
///
/// Diagnostics are created by the engine on behalf of a rule (through its
/// [`RuleSink`](crate::RuleSink)) and are never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    /// Qualified id (`namespace:name`) of the rule that reported this.
    pub rule_id: String,

    /// The diagnostic message.
    pub message: String,

    /// Source range, absent for document-level findings and rule faults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Severity level.
    pub severity: Severity,

    /// Name of the tool that produced the diagnostic.
    pub source: String,
}

impl Diagnostic {
    pub(crate) fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        source: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            position: None,
            severity,
            source: source.into(),
        }
    }

    pub(crate) fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Key used to order diagnostics by position, position-less last.
    ///
    /// Only offsets are compared, so diagnostics sharing a span keep their
    /// report order under a stable sort.
    pub(crate) fn position_key(&self) -> (bool, Option<(u32, u32)>) {
        (
            self.position.is_none(),
            self.position.map(|p| (p.start.offset, p.end.offset)),
        )
    }
}
