//! Arena allocator for AST nodes.
//!
//! All nodes, attribute slices and strings of a single document are bump
//! allocated in one arena and released together once the document has been
//! linted.

use bumpalo::Bump;

use crate::{Attribute, Node};

/// Arena allocator backing one parsed document.
///
/// # Example
///
/// ```rust
/// use marklint_ast::{AstArena, Node};
///
/// let arena = AstArena::new();
///
/// let text = Node::leaf("text");
/// let paragraph = Node::parent("paragraph", arena.alloc_children([text]));
/// assert_eq!(paragraph.children().len(), 1);
///
/// let s = arena.alloc_str("hello");
/// assert_eq!(s, "hello");
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity in bytes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates the children of a node.
    #[inline]
    pub fn alloc_children<'a, I>(&'a self, children: I) -> &'a [Node<'a>]
    where
        I: IntoIterator<Item = Node<'a>>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(children)
    }

    /// Allocates the attribute list of a node.
    #[inline]
    pub fn alloc_attributes<'a>(&'a self, attributes: &[Attribute<'a>]) -> &'a [Attribute<'a>] {
        self.bump.alloc_slice_copy(attributes)
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}
