//! Output formatting module

mod json;
mod text;

use std::path::PathBuf;

use marklint_core::{LintResult, LintSummary, LinterError};
use miette::Result;

use crate::cli::OutputFormat;

/// A file that could not be linted.
pub struct Failure {
    pub path: PathBuf,
    pub error: LinterError,
}

/// Writes results to stdout. Returns true if anything should fail the run.
pub fn output_results(
    results: &[LintResult],
    failures: &[Failure],
    format: OutputFormat,
    timings: bool,
) -> Result<bool> {
    let mut summary = LintSummary::from_results(results);
    summary.files_failed = failures.len();

    match format {
        OutputFormat::Json => json::output_json(results, failures)?,
        OutputFormat::Text => text::output_text(results, failures, &summary, timings),
    }

    Ok(summary.has_failures())
}
