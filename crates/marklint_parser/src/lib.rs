//! # marklint_parser
//!
//! Parser front-end for marklint.
//!
//! This crate provides:
//! - A `Parser` trait for turning source text into a marklint tree
//! - A Markdown parser built on `markdown-rs` that emits mdast-style nodes
//!
//! ## Example
//!
//! ```rust
//! use marklint_ast::AstArena;
//! use marklint_parser::{MarkdownParser, Parser};
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::new();
//! let source = "![cat](funny-cat.gif)";
//!
//! let document = parser.parse_document(&arena, source).unwrap();
//! let image = &document.root().children()[0].children()[0];
//! assert_eq!(image.node_type(), "image");
//! assert_eq!(image.attr_text("url"), Some("funny-cat.gif"));
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
