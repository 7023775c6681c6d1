//! Linter configuration.

use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{LinterError, Severity};

/// File names searched by [`LinterConfig::discover`], in priority order.
pub const CONFIG_FILES: &[&str] = &[".marklint.jsonc", ".marklint.json"];

/// Default bound on document tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration for the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinterConfig {
    /// Rules to run, in order.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,

    /// Maximum tree depth accepted. `null` disables the check.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,

    /// Whether to record per-rule timings.
    #[serde(default)]
    pub timings: bool,
}

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

/// One entry of the `rules` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleDefinition {
    /// String shorthand: `"namespace:name"`.
    Simple(String),
    /// Detailed definition object.
    Detail(RuleDefinitionDetail),
}

/// Object form of a rule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinitionDetail {
    /// Qualified rule id.
    pub id: String,

    /// Severity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeveritySetting>,

    /// Options handed to the rule.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

/// Configured severity for a rule, including `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeveritySetting {
    Off,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl SeveritySetting {
    /// The severity to force, or `None` when the rule is turned off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            SeveritySetting::Off => None,
            SeveritySetting::Info => Some(Severity::Info),
            SeveritySetting::Warning => Some(Severity::Warning),
            SeveritySetting::Error => Some(Severity::Error),
        }
    }
}

impl RuleDefinition {
    /// The qualified rule id this entry names.
    pub fn id(&self) -> &str {
        match self {
            RuleDefinition::Simple(id) => id,
            RuleDefinition::Detail(detail) => &detail.id,
        }
    }

    /// Returns false if the entry turns the rule off.
    pub fn is_enabled(&self) -> bool {
        !matches!(
            self,
            RuleDefinition::Detail(RuleDefinitionDetail {
                severity: Some(SeveritySetting::Off),
                ..
            })
        )
    }

    /// Severity override, if any.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleDefinition::Simple(_) => None,
            RuleDefinition::Detail(detail) => detail.severity.and_then(SeveritySetting::severity),
        }
    }

    /// Options for the rule; `null` when none were given.
    pub fn options(&self) -> serde_json::Value {
        match self {
            RuleDefinition::Simple(_) => serde_json::Value::Null,
            RuleDefinition::Detail(detail) => detail.options.clone(),
        }
    }
}

impl LinterConfig {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            max_depth: default_max_depth(),
            timings: false,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.marklint.jsonc` and `.marklint.json`. Comments and trailing
    /// commas are accepted in both.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON (or JSONC) string.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Looks for a configuration file in `dir`.
    ///
    /// Returns `Ok(None)` when none of [`CONFIG_FILES`] exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>, LinterError> {
        let dir = dir.as_ref();
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("Using config file {}", candidate.display());
                return Self::from_file(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Returns the entries that are not turned off.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().filter(|rule| rule.is_enabled())
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
