//! Parsed document.

use std::path::{Path, PathBuf};

use crate::Node;

/// One parsed source file: its text, optional path and syntax tree.
///
/// A document is immutable once built. The tree borrows from the arena the
/// parser allocated it in, so the arena must outlive the document.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    source: &'a str,
    path: Option<PathBuf>,
    root: Node<'a>,
}

impl<'a> Document<'a> {
    /// Creates a document without a path.
    pub fn new(source: &'a str, root: Node<'a>) -> Self {
        Self {
            source,
            path: None,
            root,
        }
    }

    /// Sets the path the source was read from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the source text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the path, if known.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node<'a> {
        &self.root
    }

    /// Returns the source text covered by a node, if it has a position.
    pub fn text_of(&self, node: &Node<'_>) -> Option<&'a str> {
        let position = node.reportable_position()?;
        self.source
            .get(position.start.offset as usize..position.end.offset as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, Position};

    #[test]
    fn test_document_accessors() {
        let root = Node::leaf("root");
        let doc = Document::new("# Title", root).with_path("docs/readme.md");

        assert_eq!(doc.source(), "# Title");
        assert_eq!(doc.path(), Some(Path::new("docs/readme.md")));
        assert!(doc.root().is("root"));
    }

    #[test]
    fn test_document_without_path() {
        let doc = Document::new("", Node::leaf("root"));
        assert!(doc.path().is_none());
    }

    #[test]
    fn test_text_of() {
        let source = "see ![x](a.gif)";
        let image = Node::leaf("image")
            .with_position(Position::new(Point::new(1, 5, 4), Point::new(1, 16, 15)));
        let doc = Document::new(source, Node::leaf("root"));

        assert_eq!(doc.text_of(&image), Some("![x](a.gif)"));
        assert_eq!(doc.text_of(&image.into_generated()), None);
    }
}
