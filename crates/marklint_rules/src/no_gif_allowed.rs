//! no-gif-allowed rule: Disallow GIF image references.
//!
//! Reports every `image` node whose `url` ends with `.gif`. The comparison
//! is a case-sensitive suffix match on the url as written: `a.GIF` and
//! `a.gif?raw=1` are not reported. Generated images are never reported.
//!
//! The rule takes no options.

use marklint_ast::{Document, Node, VisitControl, visit};
use marklint_core::{Rule, RuleError, RuleSink, Severity};
use serde_json::Value;

const MESSAGE: &str = "GIF images are not allowed; use a video or a static image instead";

/// The `no-gif-allowed` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGifAllowed;

impl NoGifAllowed {
    /// Rule name within its namespace.
    pub const NAME: &'static str = "no-gif-allowed";
}

fn is_gif(url: &str) -> bool {
    url.ends_with(".gif")
}

impl Rule for NoGifAllowed {
    fn description(&self) -> &str {
        "Disallow GIF images"
    }

    fn apply(
        &self,
        tree: &Node<'_>,
        _document: &Document<'_>,
        _options: &Value,
        sink: &mut RuleSink<'_>,
    ) -> Result<(), RuleError> {
        visit(tree, "image", |image| {
            if image.is_generated() {
                return VisitControl::SkipChildren;
            }
            if image.attr_text("url").is_some_and(is_gif) {
                sink.report_node(Severity::Warning, MESSAGE, image);
            }
            VisitControl::SkipChildren
        });
        Ok(())
    }
}
