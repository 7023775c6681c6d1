//! Lint command implementation

use std::path::Path;

use marklint_ast::AstArena;
use marklint_core::{LintResult, Linter, LinterError, RuleSet};
use marklint_parser::{MarkdownParser, Parser};
use miette::{IntoDiagnostic, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::{build_rule_set, load_config, read_source};
use crate::cli::{Cli, OutputFormat};
use crate::files::discover_files;
use crate::output::{Failure, output_results};

pub fn run_lint(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    timings: bool,
) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let registry = marklint_rules::builtin_registry().into_diagnostic()?;
    let rules = build_rule_set(&registry, config.as_ref()).into_diagnostic()?;

    let mut linter_config = config.unwrap_or_default();
    if timings {
        linter_config.timings = true;
    }
    let linter = Linter::from_config(&linter_config);

    let parser = MarkdownParser::new();
    let files = discover_files(patterns, parser.extensions(), Path::new(".")).into_diagnostic()?;

    let outcomes: Vec<Result<LintResult, Failure>> = files
        .par_iter()
        .map(|path| {
            lint_file(path, &parser, &linter, &rules).map_err(|error| Failure {
                path: path.clone(),
                error,
            })
        })
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => {
                warn!("Failed to lint {}: {}", failure.path.display(), failure.error);
                failures.push(failure);
            }
        }
    }

    output_results(&results, &failures, format, linter_config.timings)
}

fn lint_file(
    path: &Path,
    parser: &MarkdownParser,
    linter: &Linter,
    rules: &RuleSet,
) -> Result<LintResult, LinterError> {
    debug!("Linting {}", path.display());

    let source = read_source(path)?;
    let arena = AstArena::new();
    let document = parser
        .parse_document(&arena, &source)
        .map_err(|e| LinterError::parse(format!("{}: {}", path.display(), e)))?
        .with_path(path);

    linter.lint(&document, rules)
}
