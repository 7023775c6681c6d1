//! Parser trait definition.

use marklint_ast::{AstArena, Document, Node};

use crate::ParseError;

/// Trait for parsing source text into a marklint tree.
///
/// Implementations allocate every node in the supplied arena. The resulting
/// tree is handed to the lint engine read-only.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree and returns its root node.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Node<'a>, ParseError>;

    /// Parses the source text into a [`Document`].
    fn parse_document<'a>(
        &self,
        arena: &'a AstArena,
        source: &'a str,
    ) -> Result<Document<'a>, ParseError> {
        let root = self.parse(arena, source)?;
        Ok(Document::new(source, root))
    }

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
