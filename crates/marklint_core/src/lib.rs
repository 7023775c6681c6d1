//! # marklint_core
//!
//! Rule execution engine for marklint.
//!
//! This crate provides:
//! - The [`Rule`] contract every lint rule implements
//! - The [`RuleRegistry`] that namespaces rules and builds [`RuleSet`]s
//! - The [`Linter`] orchestrator that runs a rule set over one parsed
//!   document with fault isolation, or over many documents in parallel
//! - Diagnostic collection and the [`LintResult`] handed to reporters
//! - Configuration loading ([`LinterConfig`])
//!
//! Parsing and reporting are not part of this crate: the engine consumes an
//! already-parsed [`Document`](marklint_ast::Document) and returns plain
//! diagnostic records.
//!
//! ## Example
//!
//! ```rust
//! use marklint_ast::{AstArena, Document, Node};
//! use marklint_core::{Linter, RuleSet};
//!
//! let arena = AstArena::new();
//! let root = Node::parent("root", arena.alloc_children([]));
//! let document = Document::new("", root);
//!
//! let linter = Linter::default();
//! let result = linter.lint(&document, &RuleSet::empty()).unwrap();
//! assert!(result.diagnostics.is_empty());
//! ```

mod collector;
mod config;
mod diagnostic;
mod error;
mod linter;
mod registry;
mod result;
mod rule;

pub use collector::{DiagnosticCollector, RuleSink};
pub use config::{
    CONFIG_FILES, DEFAULT_MAX_DEPTH, LinterConfig, RuleDefinition, RuleDefinitionDetail,
    SeveritySetting,
};
pub use diagnostic::{Diagnostic, Severity};
pub use error::LinterError;
pub use linter::{LintOptions, Linter};
pub use registry::{RegisteredRule, RuleDescriptor, RuleId, RuleRegistry, RuleSet};
pub use result::{LintResult, LintSummary};
pub use rule::{Rule, RuleError, parse_options};

/// Name stamped as the `source` of every diagnostic produced by the engine.
pub const SOURCE_NAME: &str = "marklint";
