//! # marklint_ast
//!
//! Syntax tree definitions for marklint.
//!
//! This crate provides the tree model every lint rule reads:
//!
//! - [`Position`] / [`Point`]: source locations attached to nodes
//! - [`Node`]: a generic unist-style node (type tag, attributes, children,
//!   optional position, `generated` flag)
//! - [`Document`]: the source text, optional path, and root node of one file
//! - [`visitor`]: depth-first traversal with type filters and control signals
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation; every node of a document lives in
//!   one [`AstArena`] and is freed together with it
//! - Nodes are `Copy` values and children are stored by value in arena
//!   slices, so a tree cannot contain a cycle
//! - Rules only ever receive shared references, so a tree is immutable for
//!   the duration of a lint pass
//!
//! ## Example
//!
//! ```rust
//! use marklint_ast::{AstArena, AttrValue, Attribute, Node, Point, Position};
//!
//! let arena = AstArena::new();
//!
//! let image = Node::leaf("image")
//!     .with_attributes(arena.alloc_attributes(&[Attribute::new(
//!         "url",
//!         AttrValue::Url("funny-cat.gif"),
//!     )]))
//!     .with_position(Position::new(Point::new(1, 1, 0), Point::new(1, 20, 19)));
//!
//! let root = Node::parent("root", arena.alloc_children([image]));
//! assert_eq!(root.children()[0].attr_text("url"), Some("funny-cat.gif"));
//! ```

mod arena;
mod document;
mod node;
mod position;
pub mod visitor;

pub use arena::AstArena;
pub use document::Document;
pub use node::{AttrValue, Attribute, Node};
pub use position::{Point, Position};

// Re-export commonly used visitor items for convenience
pub use visitor::{TypeFilter, VisitControl, VisitOutcome, Visitor, visit, walk};
