//! Lint result types.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Diagnostic, Severity};

/// Result of one completed lint pass.
#[derive(Debug, Clone, Default)]
pub struct LintResult {
    /// Path of the linted document, if it has one.
    pub path: Option<PathBuf>,

    /// Diagnostics in final order: rule order first, position second.
    pub diagnostics: Vec<Diagnostic>,

    /// Time spent in each rule, keyed by qualified id. Empty unless timings
    /// were enabled.
    pub timings: HashMap<String, Duration>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(path: Option<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            diagnostics,
            timings: HashMap::new(),
        }
    }

    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns true if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the diagnostics ordered by position alone, position-less last.
    pub fn sorted_by_position(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by_key(|d| d.position_key());
        sorted
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Summary of linting multiple documents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintSummary {
    /// Documents whose pass completed.
    pub files_checked: usize,

    /// Documents whose pass failed.
    pub files_failed: usize,

    /// Total diagnostics found.
    pub total_diagnostics: usize,

    /// Total error diagnostics.
    pub errors: usize,

    /// Total warning diagnostics.
    pub warnings: usize,

    /// Documents with at least one error diagnostic.
    pub files_with_errors: usize,
}

impl LintSummary {
    /// Creates a summary from completed results.
    pub fn from_results(results: &[LintResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            summary.total_diagnostics += result.diagnostics.len();
            summary.errors += result.error_count();
            summary.warnings += result.warning_count();
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
        }

        summary
    }

    /// Returns true if anything should make the run fail.
    pub fn has_failures(&self) -> bool {
        self.files_with_errors > 0 || self.files_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklint_ast::{Point, Position};
    use pretty_assertions::assert_eq;

    fn diag(severity: Severity, offset: Option<u32>) -> Diagnostic {
        let position =
            offset.map(|o| Position::new(Point::new(1, o + 1, o), Point::new(1, o + 2, o + 1)));
        Diagnostic::new("ns:rule", "msg", severity, "marklint").with_position(position)
    }

    #[test]
    fn test_lint_result_new() {
        let result = LintResult::new(Some(PathBuf::from("test.md")), vec![]);
        assert!(!result.has_errors());
        assert!(result.is_clean());
        assert!(result.timings.is_empty());
        assert_eq!(result.path, Some(PathBuf::from("test.md")));
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let result = LintResult::new(None, vec![diag(Severity::Warning, Some(0))]);
        assert!(!result.has_errors());
        assert!(!result.is_clean());
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_counts() {
        let result = LintResult::new(
            None,
            vec![
                diag(Severity::Error, Some(0)),
                diag(Severity::Warning, Some(4)),
                diag(Severity::Error, None),
                diag(Severity::Info, None),
            ],
        );
        assert!(result.has_errors());
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_sorted_by_position() {
        let result = LintResult::new(
            None,
            vec![
                diag(Severity::Error, None),
                diag(Severity::Warning, Some(9)),
                diag(Severity::Info, Some(2)),
            ],
        );
        let severities: Vec<_> = result
            .sorted_by_position()
            .iter()
            .map(|d| d.severity)
            .collect();
        assert_eq!(
            severities,
            vec![Severity::Info, Severity::Warning, Severity::Error]
        );
    }

    #[test]
    fn test_lint_summary() {
        let results = vec![
            LintResult::new(Some(PathBuf::from("a.md")), vec![]),
            LintResult::new(
                Some(PathBuf::from("b.md")),
                vec![diag(Severity::Error, Some(0)), diag(Severity::Warning, Some(3))],
            ),
            LintResult::new(
                Some(PathBuf::from("c.md")),
                vec![diag(Severity::Warning, Some(1))],
            ),
        ];

        let summary = LintSummary::from_results(&results);

        assert_eq!(summary.files_checked, 3);
        assert_eq!(summary.total_diagnostics, 3);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 2);
        assert_eq!(summary.files_with_errors, 1);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_lint_summary_empty() {
        let summary = LintSummary::from_results(&[]);
        assert_eq!(summary, LintSummary::default());
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_lint_summary_failed_files() {
        let summary = LintSummary {
            files_failed: 1,
            ..LintSummary::default()
        };
        assert!(summary.has_failures());
    }
}
