//! Node definition.
//!
//! The generic syntax tree node shared by the parser, the engine and every
//! lint rule.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::Position;

/// An attribute value carried by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue<'a> {
    /// Free text (`alt`, `title`, `value`, ...).
    Text(&'a str),
    /// A link destination (`url`).
    Url(&'a str),
    /// An integer (`depth`, `start`, ...).
    Integer(i64),
    /// A flag (`ordered`, `spread`, ...).
    Bool(bool),
}

impl<'a> AttrValue<'a> {
    /// Returns the textual content for `Text` and `Url` values.
    #[inline]
    pub const fn as_text(&self) -> Option<&'a str> {
        match self {
            AttrValue::Text(s) | AttrValue::Url(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns the integer content for `Integer` values.
    #[inline]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag content for `Bool` values.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A named attribute of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name.
    pub name: &'a str,
    /// Attribute value.
    pub value: AttrValue<'a>,
}

impl<'a> Attribute<'a> {
    /// Creates a new attribute.
    #[inline]
    pub const fn new(name: &'a str, value: AttrValue<'a>) -> Self {
        Self { name, value }
    }
}

/// A node in the syntax tree.
///
/// Nodes are plain `Copy` values allocated in an [`AstArena`](crate::AstArena).
/// Children are stored by value, so a node can never appear as its own
/// descendant. All accessors are read-only; a tree cannot be changed once it
/// has been built.
///
/// # Lifetime
///
/// The `'a` lifetime ties a node to the arena (and source text) it borrows
/// from.
///
/// # Example
///
/// ```rust
/// use marklint_ast::{AstArena, AttrValue, Attribute, Node};
///
/// let arena = AstArena::new();
/// let heading = Node::parent("heading", arena.alloc_children([Node::leaf("text")]))
///     .with_attributes(arena.alloc_attributes(&[Attribute::new(
///         "depth",
///         AttrValue::Integer(2),
///     )]));
///
/// assert!(heading.is("heading"));
/// assert_eq!(heading.attr("depth").and_then(|v| v.as_integer()), Some(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    node_type: &'a str,
    children: &'a [Node<'a>],
    attributes: &'a [Attribute<'a>],
    position: Option<Position>,
    generated: bool,
}

impl<'a> Node<'a> {
    /// Creates a node with children.
    #[inline]
    pub const fn parent(node_type: &'a str, children: &'a [Node<'a>]) -> Self {
        Self {
            node_type,
            children,
            attributes: &[],
            position: None,
            generated: false,
        }
    }

    /// Creates a node without children.
    #[inline]
    pub const fn leaf(node_type: &'a str) -> Self {
        Self::parent(node_type, &[])
    }

    /// Sets the attribute list.
    #[inline]
    pub const fn with_attributes(mut self, attributes: &'a [Attribute<'a>]) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the source position.
    #[inline]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Marks the node as synthesized by a transform.
    ///
    /// Generated nodes have no source text behind them, so any position is
    /// dropped.
    #[inline]
    pub const fn into_generated(mut self) -> Self {
        self.generated = true;
        self.position = None;
        self
    }

    /// Returns the type tag (`"image"`, `"paragraph"`, ...).
    #[inline]
    pub const fn node_type(&self) -> &'a str {
        self.node_type
    }

    /// Returns true if the node has the given type tag.
    #[inline]
    pub fn is(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }

    /// Returns the children in document order.
    #[inline]
    pub const fn children(&self) -> &'a [Node<'a>] {
        self.children
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns all attributes.
    #[inline]
    pub const fn attributes(&self) -> &'a [Attribute<'a>] {
        self.attributes
    }

    /// Looks up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<AttrValue<'a>> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value)
    }

    /// Looks up a textual attribute by name.
    ///
    /// Returns `None` when the attribute is missing or is not text.
    pub fn attr_text(&self, name: &str) -> Option<&'a str> {
        self.attr(name).and_then(|value| value.as_text())
    }

    /// Returns the source position, if the node was parsed from source.
    #[inline]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns true if the node was synthesized by a transform.
    #[inline]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }

    /// Returns the position a rule may report for this node.
    ///
    /// Always `None` for generated nodes.
    #[inline]
    pub const fn reportable_position(&self) -> Option<Position> {
        if self.generated { None } else { self.position }
    }

    /// Returns the depth of the tree rooted at this node.
    ///
    /// A leaf has depth 1. Computed without recursion.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        max
    }

    /// Returns true if the tree rooted at this node is deeper than `limit`.
    ///
    /// Stops as soon as the limit is crossed.
    pub fn exceeds_depth(&self, limit: usize) -> bool {
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > limit {
                return true;
            }
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        false
    }
}

impl<'a> Serialize for Node<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("type", self.node_type)?;
        for attr in self.attributes {
            map.serialize_entry(attr.name, &attr.value)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", self.children)?;
        }
        if let Some(position) = &self.position {
            map.serialize_entry("position", position)?;
        }
        if self.generated {
            map.serialize_entry("generated", &true)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AstArena, Point};
    use pretty_assertions::assert_eq;

    fn position(start: u32, end: u32) -> Position {
        Position::new(Point::new(1, start + 1, start), Point::new(1, end + 1, end))
    }

    #[test]
    fn test_leaf_node() {
        let node = Node::leaf("thematicBreak");
        assert_eq!(node.node_type(), "thematicBreak");
        assert!(!node.has_children());
        assert!(node.attributes().is_empty());
        assert!(node.position().is_none());
        assert!(!node.is_generated());
    }

    #[test]
    fn test_parent_node() {
        let arena = AstArena::new();
        let children = arena.alloc_children([Node::leaf("text"), Node::leaf("emphasis")]);
        let node = Node::parent("paragraph", children);

        assert!(node.has_children());
        assert_eq!(node.children().len(), 2);
        assert!(node.children()[1].is("emphasis"));
    }

    #[test]
    fn test_attr_lookup() {
        let arena = AstArena::new();
        let node = Node::leaf("image").with_attributes(arena.alloc_attributes(&[
            Attribute::new("url", AttrValue::Url("cat.gif")),
            Attribute::new("alt", AttrValue::Text("A cat")),
            Attribute::new("width", AttrValue::Integer(300)),
        ]));

        assert_eq!(node.attr_text("url"), Some("cat.gif"));
        assert_eq!(node.attr_text("alt"), Some("A cat"));
        assert_eq!(node.attr_text("width"), None);
        assert_eq!(node.attr("width"), Some(AttrValue::Integer(300)));
        assert_eq!(node.attr("title"), None);
    }

    #[test]
    fn test_attr_value_accessors() {
        assert_eq!(AttrValue::Url("a").as_text(), Some("a"));
        assert_eq!(AttrValue::Text("b").as_text(), Some("b"));
        assert_eq!(AttrValue::Bool(true).as_text(), None);
        assert_eq!(AttrValue::Integer(3).as_integer(), Some(3));
        assert_eq!(AttrValue::Bool(false).as_bool(), Some(false));
        assert_eq!(AttrValue::Text("x").as_bool(), None);
    }

    #[test]
    fn test_generated_node_drops_position() {
        let node = Node::leaf("image")
            .with_position(position(0, 10))
            .into_generated();

        assert!(node.is_generated());
        assert!(node.position().is_none());
        assert!(node.reportable_position().is_none());
    }

    #[test]
    fn test_reportable_position() {
        let node = Node::leaf("image").with_position(position(3, 9));
        assert_eq!(node.reportable_position(), Some(position(3, 9)));
    }

    #[test]
    fn test_depth() {
        let arena = AstArena::new();
        let leaf = Node::leaf("text");
        let para = Node::parent("paragraph", arena.alloc_children([leaf]));
        let root = Node::parent("root", arena.alloc_children([para, Node::leaf("html")]));

        assert_eq!(leaf.depth(), 1);
        assert_eq!(root.depth(), 3);
        assert!(!root.exceeds_depth(3));
        assert!(root.exceeds_depth(2));
    }

    #[test]
    fn test_deep_chain_depth() {
        let arena = AstArena::new();
        let mut node = Node::leaf("text");
        for _ in 0..10_000 {
            node = Node::parent("blockquote", arena.alloc_children([node]));
        }

        assert_eq!(node.depth(), 10_001);
        assert!(node.exceeds_depth(1024));
    }

    #[test]
    fn test_serialize_node() {
        let arena = AstArena::new();
        let image = Node::leaf("image")
            .with_attributes(arena.alloc_attributes(&[Attribute::new(
                "url",
                AttrValue::Url("dog.png"),
            )]))
            .with_position(position(0, 14));
        let root = Node::parent("root", arena.alloc_children([image]));

        let json = serde_json::to_value(root).unwrap();
        assert_eq!(json["type"], "root");
        assert_eq!(json["children"][0]["type"], "image");
        assert_eq!(json["children"][0]["url"], "dog.png");
        assert_eq!(json["children"][0]["position"]["end"]["offset"], 14);
        assert!(json.get("position").is_none());
        assert!(json.get("generated").is_none());
    }

    #[test]
    fn test_serialize_generated_node() {
        let node = Node::leaf("image").into_generated();
        let json = serde_json::to_value(node).unwrap();
        assert_eq!(json["generated"], true);
        assert!(json.get("children").is_none());
    }
}
