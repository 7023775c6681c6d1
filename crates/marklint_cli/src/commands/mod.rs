//! Subcommand implementations

pub mod ast;
pub mod lint;
pub mod rules;

use std::fs;
use std::path::Path;

use marklint_core::{LinterConfig, LinterError, RuleRegistry, RuleSet};
use miette::{IntoDiagnostic, Result};
use tracing::info;

/// Largest file the CLI will read.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Loads the configuration named on the command line, or the one found in
/// the current directory.
///
/// Returns `None` when no configuration file exists.
pub fn load_config(path: Option<&Path>) -> Result<Option<LinterConfig>> {
    if let Some(path) = path {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(path).into_diagnostic().map(Some);
    }

    let config = LinterConfig::discover(".").into_diagnostic()?;
    if config.is_none() {
        info!("No config file found, running all built-in rules");
    }
    Ok(config)
}

/// Builds the rule set for a run.
///
/// Without a configuration file every registered rule runs with default
/// options.
pub fn build_rule_set(
    registry: &RuleRegistry,
    config: Option<&LinterConfig>,
) -> Result<RuleSet, LinterError> {
    match config {
        Some(config) => registry.resolve(config),
        None => RuleSet::configure(
            registry
                .iter()
                .map(|rule| (rule.clone(), serde_json::Value::Null)),
        ),
    }
}

/// Reads a source file, refusing anything that is not a regular file or is
/// larger than [`MAX_FILE_SIZE`].
pub fn read_source(path: &Path) -> Result<String, LinterError> {
    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklint_core::RuleDefinition;
    use tempfile::tempdir;

    #[test]
    fn test_rule_set_without_config_runs_everything() {
        let registry = marklint_rules::builtin_registry().unwrap();
        let rules = build_rule_set(&registry, None).unwrap();
        assert_eq!(rules.len(), registry.len());
    }

    #[test]
    fn test_rule_set_with_empty_config_runs_nothing() {
        let registry = marklint_rules::builtin_registry().unwrap();
        let rules = build_rule_set(&registry, Some(&LinterConfig::new())).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_rule_set_unknown_rule() {
        let registry = marklint_rules::builtin_registry().unwrap();
        let mut config = LinterConfig::new();
        config.rules = vec![RuleDefinition::Simple("marklint:nope".into())];
        assert!(build_rule_set(&registry, Some(&config)).is_err());
    }

    #[test]
    fn test_read_source() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "# Hi\n").unwrap();

        assert_eq!(read_source(&file).unwrap(), "# Hi\n");
        assert!(matches!(read_source(dir.path()), Err(LinterError::File(_))));
        assert!(matches!(
            read_source(&dir.path().join("missing.md")),
            Err(LinterError::File(_))
        ));
    }

    #[test]
    fn test_read_source_size_limit() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("big.md");
        let handle = fs::File::create(&file).unwrap();
        handle.set_len(MAX_FILE_SIZE + 1).unwrap();

        let err = read_source(&file).unwrap_err();
        assert!(err.to_string().contains("exceeds limit"));
    }
}
