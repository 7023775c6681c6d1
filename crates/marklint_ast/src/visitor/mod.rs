//! Depth-first traversal over the syntax tree.
//!
//! # Overview
//!
//! - [`visit`] - call a closure for every node matching a [`TypeFilter`]
//! - [`Visitor`] - trait with `enter`/`exit` hooks, driven by [`walk`]
//! - [`VisitControl`] - `Continue`, `SkipChildren` or `Stop`
//!
//! Traversal is pre-order: a parent is entered before its children, and
//! siblings are visited in their stored order. It uses an explicit stack, so
//! arbitrarily deep trees cannot overflow the call stack, and it keeps no
//! state between calls.
//!
//! # Examples
//!
//! ## Collecting image URLs
//!
//! ```rust
//! use marklint_ast::{AstArena, AttrValue, Attribute, Node, TypeFilter, VisitControl, visit};
//!
//! let arena = AstArena::new();
//! let image = Node::leaf("image").with_attributes(arena.alloc_attributes(&[
//!     Attribute::new("url", AttrValue::Url("cat.gif")),
//! ]));
//! let paragraph = Node::parent("paragraph", arena.alloc_children([image]));
//! let root = Node::parent("root", arena.alloc_children([paragraph]));
//!
//! let mut urls = Vec::new();
//! visit(&root, TypeFilter::One("image"), |node| {
//!     urls.extend(node.attr_text("url"));
//!     VisitControl::Continue
//! });
//! assert_eq!(urls, vec!["cat.gif"]);
//! ```
//!
//! ## Enter and exit hooks
//!
//! ```rust
//! use marklint_ast::{AstArena, Node, VisitControl, Visitor, walk};
//!
//! struct Depth {
//!     current: usize,
//!     max: usize,
//! }
//!
//! impl<'n, 'a> Visitor<'n, 'a> for Depth {
//!     fn enter(&mut self, _node: &'n Node<'a>) -> VisitControl {
//!         self.current += 1;
//!         self.max = self.max.max(self.current);
//!         VisitControl::Continue
//!     }
//!
//!     fn exit(&mut self, _node: &'n Node<'a>) -> VisitControl {
//!         self.current -= 1;
//!         VisitControl::Continue
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let list = Node::parent("list", arena.alloc_children([Node::leaf("listItem")]));
//! let root = Node::parent("root", arena.alloc_children([list]));
//!
//! let mut depth = Depth { current: 0, max: 0 };
//! walk(&root, &mut depth);
//! assert_eq!(depth.max, 3);
//! ```

mod visit;
mod walk;

pub use visit::{TypeFilter, VisitControl, VisitOutcome, Visitor};
pub use walk::{visit, walk};
