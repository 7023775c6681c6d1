//! Visitor trait and traversal signals.

use crate::Node;

/// Signal returned by a visitor callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitControl {
    /// Keep going, descending into the node's children.
    #[default]
    Continue,
    /// Do not descend into this node's children. Siblings are still visited.
    SkipChildren,
    /// Terminate the whole traversal immediately.
    Stop,
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Every reachable node was visited.
    Completed,
    /// A callback returned [`VisitControl::Stop`].
    Stopped,
}

/// Selects the nodes a visitor callback is invoked for.
#[derive(Debug, Clone, Copy, Default)]
pub enum TypeFilter<'f> {
    /// Every node.
    #[default]
    All,
    /// Nodes with exactly this type tag.
    One(&'f str),
    /// Nodes whose type tag is in the set.
    Any(&'f [&'f str]),
}

impl TypeFilter<'_> {
    /// Returns true if a node with the given type tag passes the filter.
    #[inline]
    pub fn matches(&self, node_type: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::One(expected) => *expected == node_type,
            TypeFilter::Any(set) => set.iter().any(|t| *t == node_type),
        }
    }
}

impl<'f> From<&'f str> for TypeFilter<'f> {
    fn from(node_type: &'f str) -> Self {
        TypeFilter::One(node_type)
    }
}

impl<'f> From<&'f [&'f str]> for TypeFilter<'f> {
    fn from(set: &'f [&'f str]) -> Self {
        TypeFilter::Any(set)
    }
}

/// Visitor with enter/exit hooks.
///
/// `enter` is called before a node's children, `exit` after them. Both are
/// only called for nodes accepted by [`Visitor::filter`]. A node whose
/// `enter` returned [`VisitControl::SkipChildren`] still gets its `exit`.
/// Returning `SkipChildren` from `exit` has the same effect as `Continue`.
///
/// # Lifetimes
///
/// `'n` is the borrow of the tree being walked, `'a` the arena lifetime.
/// Visitors may keep `&'n Node<'a>` references after the walk.
pub trait Visitor<'n, 'a> {
    /// Nodes the hooks are invoked for. Defaults to all nodes.
    fn filter(&self) -> TypeFilter<'_> {
        TypeFilter::All
    }

    /// Called when a matching node is reached, before its children.
    fn enter(&mut self, _node: &'n Node<'a>) -> VisitControl {
        VisitControl::Continue
    }

    /// Called after a matching node's children have been visited.
    fn exit(&mut self, _node: &'n Node<'a>) -> VisitControl {
        VisitControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all() {
        assert!(TypeFilter::All.matches("anything"));
    }

    #[test]
    fn test_filter_one() {
        let filter = TypeFilter::from("image");
        assert!(filter.matches("image"));
        assert!(!filter.matches("imageReference"));
    }

    #[test]
    fn test_filter_any() {
        let set: &[&str] = &["image", "link"];
        let filter = TypeFilter::from(set);
        assert!(filter.matches("link"));
        assert!(!filter.matches("text"));
    }

    #[test]
    fn test_default_control_is_continue() {
        assert_eq!(VisitControl::default(), VisitControl::Continue);
    }
}
