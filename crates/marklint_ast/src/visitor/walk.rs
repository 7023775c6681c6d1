//! Walk functions for tree traversal.

use crate::Node;

use super::visit::{TypeFilter, VisitControl, VisitOutcome, Visitor};

enum Frame<'n, 'a> {
    Enter(&'n Node<'a>),
    Exit(&'n Node<'a>),
}

/// Walks the tree rooted at `root`, driving the visitor's hooks.
///
/// Nodes are entered in pre-order (parent first, siblings in order). The
/// visitor's filter is consulted for every node; non-matching nodes are
/// still descended into.
///
/// # Returns
///
/// [`VisitOutcome::Stopped`] if a hook returned [`VisitControl::Stop`],
/// otherwise [`VisitOutcome::Completed`].
pub fn walk<'n, 'a, V>(root: &'n Node<'a>, visitor: &mut V) -> VisitOutcome
where
    'a: 'n,
    V: Visitor<'n, 'a> + ?Sized,
{
    let mut stack = vec![Frame::Enter(root)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => {
                let matched = visitor.filter().matches(node.node_type());
                let control = if matched {
                    visitor.enter(node)
                } else {
                    VisitControl::Continue
                };

                if control == VisitControl::Stop {
                    return VisitOutcome::Stopped;
                }
                if matched {
                    stack.push(Frame::Exit(node));
                }
                if control == VisitControl::Continue {
                    // Reversed so the first child is popped first.
                    stack.extend(node.children().iter().rev().map(Frame::Enter));
                }
            }
            Frame::Exit(node) => {
                if visitor.exit(node) == VisitControl::Stop {
                    return VisitOutcome::Stopped;
                }
            }
        }
    }

    VisitOutcome::Completed
}

struct FnVisitor<'f, F> {
    filter: TypeFilter<'f>,
    callback: F,
}

impl<'n, 'a, F> Visitor<'n, 'a> for FnVisitor<'_, F>
where
    'a: 'n,
    F: FnMut(&'n Node<'a>) -> VisitControl,
{
    fn filter(&self) -> TypeFilter<'_> {
        self.filter
    }

    fn enter(&mut self, node: &'n Node<'a>) -> VisitControl {
        (self.callback)(node)
    }
}

/// Calls `callback` for every node matching `filter`, in document order.
///
/// # Example
///
/// ```rust
/// use marklint_ast::{AstArena, Node, VisitControl, VisitOutcome, visit};
///
/// let arena = AstArena::new();
/// let root = Node::parent("root", arena.alloc_children([Node::leaf("text"), Node::leaf("text")]));
///
/// let mut count = 0;
/// let outcome = visit(&root, "text", |_| {
///     count += 1;
///     VisitControl::Stop
/// });
/// assert_eq!(count, 1);
/// assert_eq!(outcome, VisitOutcome::Stopped);
/// ```
pub fn visit<'n, 'a, 'f, F>(
    root: &'n Node<'a>,
    filter: impl Into<TypeFilter<'f>>,
    callback: F,
) -> VisitOutcome
where
    'a: 'n,
    F: FnMut(&'n Node<'a>) -> VisitControl,
{
    let mut visitor = FnVisitor {
        filter: filter.into(),
        callback,
    };
    walk(root, &mut visitor)
}
