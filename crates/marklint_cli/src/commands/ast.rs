//! Ast command implementation

use std::path::Path;

use marklint_ast::AstArena;
use marklint_core::{LintOptions, LinterError};
use marklint_parser::{MarkdownParser, Parser};
use miette::{IntoDiagnostic, Result};

use super::{load_config, read_source};
use crate::cli::Cli;

pub fn run_ast(cli: &Cli, file: &Path) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?.unwrap_or_default();
    let max_depth = LintOptions::from_config(&config).max_depth;

    let source = read_source(file).into_diagnostic()?;
    let arena = AstArena::new();
    let document = MarkdownParser::new()
        .parse_document(&arena, &source)
        .map_err(|e| LinterError::parse(e.to_string()))
        .into_diagnostic()?;

    // Serialization recurses once per level.
    if let Some(limit) = max_depth
        && document.root().exceeds_depth(limit)
    {
        return Err(LinterError::TreeTooDeep { limit }).into_diagnostic();
    }

    println!(
        "{}",
        serde_json::to_string_pretty(document.root()).into_diagnostic()?
    );
    Ok(false)
}
