//! The lint pass orchestrator.

use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use marklint_ast::Document;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::SOURCE_NAME;
use crate::collector::{DiagnosticCollector, RuleSink};
use crate::config::{DEFAULT_MAX_DEPTH, LinterConfig};
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::LinterError;
use crate::registry::{RuleDescriptor, RuleSet};
use crate::result::LintResult;

thread_local! {
    static RUNNING_RULE: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Options for a [`Linter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    /// Reject trees deeper than this before any rule runs. `None` disables
    /// the check.
    pub max_depth: Option<usize>,

    /// Record how long each rule takes.
    pub timings: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            timings: false,
        }
    }
}

impl LintOptions {
    /// Takes the pass options from a configuration.
    pub fn from_config(config: &LinterConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            timings: config.timings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Runs rule sets over documents.
///
/// A `Linter` holds no per-pass state, so one instance can serve any number
/// of passes, including concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    options: LintOptions,
}

impl Linter {
    /// Creates a linter with the given options.
    pub fn new(options: LintOptions) -> Self {
        Self { options }
    }

    /// Creates a linter configured from a [`LinterConfig`].
    pub fn from_config(config: &LinterConfig) -> Self {
        Self::new(LintOptions::from_config(config))
    }

    /// Returns the options.
    pub fn options(&self) -> &LintOptions {
        &self.options
    }

    /// Runs every rule of `rules`, in order, over `document`.
    ///
    /// A rule that returns an error or panics is reported as a single
    /// error diagnostic without a position, attributed to that rule, and
    /// the pass moves on to the next rule. Anything the rule reported before
    /// failing is kept.
    ///
    /// The pass itself fails only before the first rule runs, when the
    /// document tree is deeper than [`LintOptions::max_depth`].
    ///
    /// Diagnostics in the result are grouped by rule in run order and
    /// sorted by position within each rule.
    pub fn lint(
        &self,
        document: &Document<'_>,
        rules: &RuleSet,
    ) -> Result<LintResult, LinterError> {
        let mut state = PassState::Idle;
        advance(&mut state, PassState::Running, document);

        if let Some(limit) = self.options.max_depth
            && document.root().exceeds_depth(limit)
        {
            advance(&mut state, PassState::Failed, document);
            return Err(LinterError::TreeTooDeep { limit });
        }

        let mut collector = DiagnosticCollector::new();
        let mut segments: Vec<Range<usize>> = Vec::with_capacity(rules.len());
        let mut timings = HashMap::new();

        for descriptor in rules.iter() {
            let first = collector.len();
            let start = Instant::now();

            run_rule(descriptor, document, &mut collector);

            if self.options.timings {
                timings.insert(descriptor.qualified_id().to_string(), start.elapsed());
            }
            segments.push(first..collector.len());
        }

        let mut diagnostics = collector.into_diagnostics();
        for segment in segments {
            diagnostics[segment].sort_by_key(Diagnostic::position_key);
        }

        advance(&mut state, PassState::Completed, document);

        let mut result = LintResult::new(document.path().map(|p| p.to_path_buf()), diagnostics);
        result.timings = timings;
        Ok(result)
    }

    /// Lints independent documents in parallel.
    ///
    /// Results are returned in the order of `documents`. Each document gets
    /// its own pass; rules inside a pass still run in order.
    pub fn lint_documents(
        &self,
        documents: &[Document<'_>],
        rules: &RuleSet,
    ) -> Vec<Result<LintResult, LinterError>> {
        info!(
            "Linting {} documents with {} rules",
            documents.len(),
            rules.len()
        );

        documents
            .par_iter()
            .map(|document| self.lint(document, rules))
            .collect()
    }
}

fn advance(state: &mut PassState, next: PassState, document: &Document<'_>) {
    debug!(
        "Lint pass {:?} -> {:?} ({})",
        state,
        next,
        document
            .path()
            .map_or_else(|| "<memory>".into(), |p| p.display().to_string())
    );
    *state = next;
}

/// Keeps the panic hook quiet for panics raised inside a rule.
///
/// Those panics are reported as diagnostics and logged, so the default
/// message on stderr is suppressed. Panics anywhere else still reach the
/// previously installed hook.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !RUNNING_RULE.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn run_rule(
    descriptor: &RuleDescriptor,
    document: &Document<'_>,
    collector: &mut DiagnosticCollector,
) {
    let rule_id = descriptor.qualified_id();
    debug!("Running rule {}", rule_id);
    install_quiet_panic_hook();

    let outcome = {
        let mut sink = RuleSink::new(collector, rule_id, SOURCE_NAME, descriptor.severity());
        RUNNING_RULE.with(|running| running.set(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            descriptor
                .rule()
                .apply(document.root(), document, descriptor.options(), &mut sink)
        }));
        RUNNING_RULE.with(|running| running.set(false));
        outcome
    };

    let message = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(e)) => {
            warn!("Rule '{}' failed: {}", rule_id, e);
            format!("Rule '{}' failed: {}", rule_id, e)
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!("Rule '{}' panicked: {}", rule_id, reason);
            format!("Rule '{}' panicked: {}", rule_id, reason)
        }
    };

    collector.report(Diagnostic::new(rule_id, message, Severity::Error, SOURCE_NAME));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
