//! Diagnostic collection.
//!
//! One [`DiagnosticCollector`] exists per lint pass. Rules never see it
//! directly; each rule invocation gets a [`RuleSink`] that stamps the rule's
//! id, the tool name and any configured severity override onto what it
//! reports.

use marklint_ast::{Node, Position};

use crate::{Diagnostic, Severity};

/// Append-only, insertion-ordered store of diagnostics for one document.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns every diagnostic in report order.
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the diagnostics ordered by position.
    ///
    /// Diagnostics without a position come last. The sort is stable, so
    /// diagnostics at equal positions keep their report order.
    pub fn sorted_by_position(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by_key(|diag| diag.position_key());
        sorted
    }

    /// Returns the number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consumes the collector, returning the diagnostics in report order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A rule's view onto the pass's collector.
///
/// Everything reported through a sink is attributed to the rule it was
/// handed to.
pub struct RuleSink<'c> {
    collector: &'c mut DiagnosticCollector,
    rule_id: &'c str,
    source: &'c str,
    severity_override: Option<Severity>,
    first: usize,
}

impl<'c> RuleSink<'c> {
    pub(crate) fn new(
        collector: &'c mut DiagnosticCollector,
        rule_id: &'c str,
        source: &'c str,
        severity_override: Option<Severity>,
    ) -> Self {
        let first = collector.len();
        Self {
            collector,
            rule_id,
            source,
            severity_override,
            first,
        }
    }

    /// Returns the qualified id of the rule this sink belongs to.
    pub fn rule_id(&self) -> &str {
        self.rule_id
    }

    /// Reports a finding.
    pub fn report(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        position: Option<Position>,
    ) {
        let severity = self.severity_override.unwrap_or(severity);
        self.collector.report(
            Diagnostic::new(self.rule_id, message, severity, self.source).with_position(position),
        );
    }

    /// Reports a finding about a node.
    ///
    /// Generated nodes have no source text, so the diagnostic is reported
    /// without a position.
    pub fn report_node(&mut self, severity: Severity, message: impl Into<String>, node: &Node<'_>) {
        self.report(severity, message, node.reportable_position());
    }

    /// Reports an error.
    pub fn error(&mut self, message: impl Into<String>, position: Option<Position>) {
        self.report(Severity::Error, message, position);
    }

    /// Reports a warning.
    pub fn warning(&mut self, message: impl Into<String>, position: Option<Position>) {
        self.report(Severity::Warning, message, position);
    }

    /// Reports an informational message.
    pub fn info(&mut self, message: impl Into<String>, position: Option<Position>) {
        self.report(Severity::Info, message, position);
    }

    /// Diagnostics reported by rules that ran earlier in this pass.
    pub fn earlier(&self) -> &[Diagnostic] {
        &self.collector.all()[..self.first]
    }

    /// Diagnostics this rule has reported so far.
    pub fn reported(&self) -> &[Diagnostic] {
        &self.collector.all()[self.first..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklint_ast::Point;
    use pretty_assertions::assert_eq;

    fn at(offset: u32) -> Option<Position> {
        Some(Position::new(
            Point::new(1, offset + 1, offset),
            Point::new(1, offset + 2, offset + 1),
        ))
    }

    fn diag(message: &str, position: Option<Position>) -> Diagnostic {
        Diagnostic::new("ns:rule", message, Severity::Warning, "marklint").with_position(position)
    }

    #[test]
    fn test_report_preserves_insertion_order() {
        let mut collector = DiagnosticCollector::new();
        collector.report(diag("second", at(50)));
        collector.report(diag("first", at(10)));

        let messages: Vec<_> = collector.all().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_sorted_by_position_puts_unpositioned_last() {
        let mut collector = DiagnosticCollector::new();
        collector.report(diag("at 50", at(50)));
        collector.report(diag("at 10", at(10)));
        collector.report(diag("nowhere", None));

        let messages: Vec<_> = collector
            .sorted_by_position()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["at 10", "at 50", "nowhere"]);
    }

    #[test]
    fn test_sorted_by_position_is_stable() {
        let mut collector = DiagnosticCollector::new();
        collector.report(diag("nowhere a", None));
        collector.report(diag("x", at(5)));
        collector.report(diag("nowhere b", None));
        collector.report(diag("y", at(5)));

        let messages: Vec<_> = collector
            .sorted_by_position()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["x", "y", "nowhere a", "nowhere b"]);

        // The underlying order is untouched.
        assert_eq!(collector.all()[0].message, "nowhere a");
    }

    #[test]
    fn test_sorted_by_position_ties_on_offsets_only() {
        let same_span =
            |line: u32| Some(Position::new(Point::new(line, 1, 5), Point::new(line, 2, 6)));
        let mut collector = DiagnosticCollector::new();
        collector.report(diag("later line", same_span(9)));
        collector.report(diag("earlier line", same_span(1)));

        let messages: Vec<_> = collector
            .sorted_by_position()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["later line", "earlier line"]);
    }

    #[test]
    fn test_sink_stamps_rule_id_and_source() {
        let mut collector = DiagnosticCollector::new();
        {
            let mut sink = RuleSink::new(&mut collector, "ns:one", "marklint", None);
            sink.warning("found", at(3));
            sink.info("note", None);
            assert_eq!(sink.rule_id(), "ns:one");
            assert_eq!(sink.reported().len(), 2);
        }

        let diags = collector.all();
        assert_eq!(diags[0].rule_id, "ns:one");
        assert_eq!(diags[0].source, "marklint");
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[1].severity, Severity::Info);
    }

    #[test]
    fn test_sink_severity_override() {
        let mut collector = DiagnosticCollector::new();
        let mut sink = RuleSink::new(&mut collector, "ns:one", "marklint", Some(Severity::Error));
        sink.warning("found", None);

        assert_eq!(collector.all()[0].severity, Severity::Error);
    }

    #[test]
    fn test_sink_sees_earlier_rules() {
        let mut collector = DiagnosticCollector::new();
        RuleSink::new(&mut collector, "ns:first", "marklint", None).error("boom", None);

        let mut sink = RuleSink::new(&mut collector, "ns:second", "marklint", None);
        assert_eq!(sink.earlier().len(), 1);
        assert!(sink.reported().is_empty());
        sink.info("after", None);
        assert_eq!(sink.earlier()[0].rule_id, "ns:first");
        assert_eq!(sink.reported()[0].rule_id, "ns:second");
    }

    #[test]
    fn test_report_node_drops_position_for_generated_nodes() {
        let node = Node::leaf("image").with_position(Position::new(
            Point::new(1, 1, 0),
            Point::new(1, 4, 3),
        ));
        let mut collector = DiagnosticCollector::new();
        let mut sink = RuleSink::new(&mut collector, "ns:one", "marklint", None);
        sink.report_node(Severity::Warning, "real", &node);
        sink.report_node(Severity::Warning, "synthetic", &node.into_generated());

        assert!(collector.all()[0].position.is_some());
        assert!(collector.all()[1].position.is_none());
    }
}
