//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! mdast nodes are mapped one to one onto marklint nodes: the type tag is the
//! mdast `type` (`"heading"`, `"image"`, ...), node-specific fields become
//! attributes, and unist positions are carried over unchanged.

use markdown::mdast::Node as MdNode;
use markdown::message::{Message, Place};
use markdown::unist::Position as MdPosition;
use markdown::{ParseOptions, to_mdast};
use marklint_ast::{AstArena, AttrValue, Attribute, Node, Point, Position};

use crate::{ParseError, Parser};

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with GitHub Flavored Markdown enabled (tables,
/// strikethrough, footnotes, task lists, autolinks).
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    fn default_options() -> ParseOptions {
        ParseOptions::gfm()
    }

    /// Converts an mdast tree without recursing.
    ///
    /// The mdast tree is taken apart while it is converted, so that dropping
    /// it does not recurse either.
    fn convert_tree<'a>(&self, arena: &'a AstArena, root: MdNode) -> Node<'a> {
        let mut stack = vec![Pending::new(root)];
        let mut tree = Node::leaf("root");

        while let Some(mut pending) = stack.pop() {
            if let Some(child) = pending.remaining.next() {
                stack.push(pending);
                stack.push(Pending::new(child));
                continue;
            }

            let children = arena.alloc_children(pending.converted);
            let node = self.convert_node(arena, &pending.node, children);
            match stack.last_mut() {
                Some(parent) => parent.converted.push(node),
                None => tree = node,
            }
        }

        tree
    }

    fn convert_node<'a>(
        &self,
        arena: &'a AstArena,
        node: &MdNode,
        children: &'a [Node<'a>],
    ) -> Node<'a> {
        let mut attrs = Attrs::new(arena);

        let node_type = match node {
            MdNode::Root(_) => "root",
            MdNode::Paragraph(_) => "paragraph",
            MdNode::Heading(heading) => {
                attrs.integer("depth", i64::from(heading.depth));
                "heading"
            }
            MdNode::Text(text) => {
                attrs.text("value", &text.value);
                "text"
            }
            MdNode::Emphasis(_) => "emphasis",
            MdNode::Strong(_) => "strong",
            MdNode::Delete(_) => "delete",
            MdNode::InlineCode(code) => {
                attrs.text("value", &code.value);
                "inlineCode"
            }
            MdNode::Code(code) => {
                attrs.text("value", &code.value);
                attrs.optional_text("lang", code.lang.as_deref());
                attrs.optional_text("meta", code.meta.as_deref());
                "code"
            }
            MdNode::Link(link) => {
                attrs.url(&link.url);
                attrs.optional_text("title", link.title.as_deref());
                "link"
            }
            MdNode::Image(image) => {
                attrs.url(&image.url);
                attrs.text("alt", &image.alt);
                attrs.optional_text("title", image.title.as_deref());
                "image"
            }
            MdNode::LinkReference(reference) => {
                attrs.text("identifier", &reference.identifier);
                attrs.optional_text("label", reference.label.as_deref());
                "linkReference"
            }
            MdNode::ImageReference(reference) => {
                attrs.text("identifier", &reference.identifier);
                attrs.optional_text("label", reference.label.as_deref());
                attrs.text("alt", &reference.alt);
                "imageReference"
            }
            MdNode::Definition(definition) => {
                attrs.text("identifier", &definition.identifier);
                attrs.optional_text("label", definition.label.as_deref());
                attrs.url(&definition.url);
                attrs.optional_text("title", definition.title.as_deref());
                "definition"
            }
            MdNode::List(list) => {
                attrs.flag("ordered", list.ordered);
                attrs.flag("spread", list.spread);
                if let Some(start) = list.start {
                    attrs.integer("start", i64::from(start));
                }
                "list"
            }
            MdNode::ListItem(item) => {
                attrs.flag("spread", item.spread);
                if let Some(checked) = item.checked {
                    attrs.flag("checked", checked);
                }
                "listItem"
            }
            MdNode::Blockquote(_) => "blockquote",
            MdNode::ThematicBreak(_) => "thematicBreak",
            MdNode::Break(_) => "break",
            MdNode::Html(html) => {
                attrs.text("value", &html.value);
                "html"
            }
            MdNode::Table(_) => "table",
            MdNode::TableRow(_) => "tableRow",
            MdNode::TableCell(_) => "tableCell",
            MdNode::FootnoteDefinition(definition) => {
                attrs.text("identifier", &definition.identifier);
                attrs.optional_text("label", definition.label.as_deref());
                "footnoteDefinition"
            }
            MdNode::FootnoteReference(reference) => {
                attrs.text("identifier", &reference.identifier);
                attrs.optional_text("label", reference.label.as_deref());
                "footnoteReference"
            }
            MdNode::Math(math) => {
                attrs.text("value", &math.value);
                "math"
            }
            MdNode::InlineMath(math) => {
                attrs.text("value", &math.value);
                "inlineMath"
            }
            MdNode::Yaml(yaml) => {
                attrs.text("value", &yaml.value);
                "yaml"
            }
            MdNode::Toml(toml) => {
                attrs.text("value", &toml.value);
                "toml"
            }
            // MDX constructs are not enabled by the default options.
            _ => "unknown",
        };

        let converted = Node::parent(node_type, children).with_attributes(attrs.finish());
        match node.position() {
            Some(position) => converted.with_position(convert_position(position)),
            None => converted,
        }
    }
}

/// An mdast node whose children are still being converted.
struct Pending<'a> {
    node: MdNode,
    remaining: std::vec::IntoIter<MdNode>,
    converted: Vec<Node<'a>>,
}

impl Pending<'_> {
    fn new(mut node: MdNode) -> Self {
        let children = node.children_mut().map(std::mem::take).unwrap_or_default();
        Self {
            node,
            converted: Vec::with_capacity(children.len()),
            remaining: children.into_iter(),
        }
    }
}

fn convert_message(message: Message) -> ParseError {
    let start = message.place.as_deref().map(|place| match place {
        Place::Point(point) => point,
        Place::Position(position) => &position.start,
    });
    match start {
        Some(point) => ParseError::invalid_source_at(message.reason, point.line, point.column),
        None => ParseError::invalid_source(message.reason),
    }
}

fn convert_position(position: &MdPosition) -> Position {
    Position::new(
        Point::new(
            position.start.line as u32,
            position.start.column as u32,
            position.start.offset as u32,
        ),
        Point::new(
            position.end.line as u32,
            position.end.column as u32,
            position.end.offset as u32,
        ),
    )
}

/// Attribute list under construction for one node.
struct Attrs<'a> {
    arena: &'a AstArena,
    items: Vec<Attribute<'a>>,
}

impl<'a> Attrs<'a> {
    fn new(arena: &'a AstArena) -> Self {
        Self {
            arena,
            items: Vec::new(),
        }
    }

    fn text(&mut self, name: &'static str, value: &str) {
        let value = self.arena.alloc_str(value);
        self.items.push(Attribute::new(name, AttrValue::Text(value)));
    }

    fn optional_text(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.text(name, value);
        }
    }

    fn url(&mut self, value: &str) {
        let value = self.arena.alloc_str(value);
        self.items.push(Attribute::new("url", AttrValue::Url(value)));
    }

    fn integer(&mut self, name: &'static str, value: i64) {
        self.items.push(Attribute::new(name, AttrValue::Integer(value)));
    }

    fn flag(&mut self, name: &'static str, value: bool) {
        self.items.push(Attribute::new(name, AttrValue::Bool(value)));
    }

    fn finish(self) -> &'a [Attribute<'a>] {
        if self.items.is_empty() {
            &[]
        } else {
            self.arena.alloc_attributes(&self.items)
        }
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<Node<'a>, ParseError> {
        let options = Self::default_options();
        let mdast = to_mdast(source, &options).map_err(convert_message)?;

        Ok(self.convert_tree(arena, mdast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse<'a>(arena: &'a AstArena, source: &str) -> Node<'a> {
        MarkdownParser::new().parse(arena, source).unwrap()
    }

    #[test]
    fn test_parse_simple_markdown() {
        let arena = AstArena::new();
        let ast = parse(&arena, "# Hello\n\nThis is a paragraph.");

        assert_eq!(ast.node_type(), "root");
        assert_eq!(ast.children().len(), 2);
        assert!(ast.children()[0].is("heading"));
        assert!(ast.children()[1].is("paragraph"));
    }

    #[test]
    fn test_parse_heading_depth() {
        let arena = AstArena::new();
        let ast = parse(&arena, "# H1\n## H2\n### H3");

        for (i, child) in ast.children().iter().enumerate() {
            assert!(child.is("heading"));
            assert_eq!(child.attr("depth"), Some(AttrValue::Integer(i as i64 + 1)));
        }
    }

    #[test]
    fn test_parse_image() {
        let arena = AstArena::new();
        let ast = parse(&arena, "![Alt text](funny-cat.gif \"Title\")");

        let image = &ast.children()[0].children()[0];
        assert!(image.is("image"));
        assert_eq!(image.attr("url"), Some(AttrValue::Url("funny-cat.gif")));
        assert_eq!(image.attr_text("alt"), Some("Alt text"));
        assert_eq!(image.attr_text("title"), Some("Title"));
        assert!(!image.is_generated());
    }

    #[test]
    fn test_image_position() {
        let arena = AstArena::new();
        let source = "Intro\n\n![dog](lovely-dog.png)";
        let ast = parse(&arena, source);

        let image = &ast.children()[1].children()[0];
        let position = image.position().unwrap();
        assert_eq!(position.start.line, 3);
        assert_eq!(position.start.column, 1);
        assert_eq!(position.start.offset, 7);
        assert_eq!(
            &source[position.start.offset as usize..position.end.offset as usize],
            "![dog](lovely-dog.png)"
        );
    }

    #[test]
    fn test_parse_link() {
        let arena = AstArena::new();
        let ast = parse(&arena, "[Example](https://example.com \"Example Title\")");

        let link = &ast.children()[0].children()[0];
        assert!(link.is("link"));
        assert_eq!(link.attr_text("url"), Some("https://example.com"));
        assert_eq!(link.attr_text("title"), Some("Example Title"));
        assert!(link.children()[0].is("text"));
    }

    #[test]
    fn test_parse_code_block() {
        let arena = AstArena::new();
        let ast = parse(&arena, "```rust\nfn main() {}\n```");

        let code = &ast.children()[0];
        assert!(code.is("code"));
        assert_eq!(code.attr_text("lang"), Some("rust"));
        assert_eq!(code.attr_text("value"), Some("fn main() {}"));
    }

    #[test]
    fn test_parse_code_block_no_language() {
        let arena = AstArena::new();
        let ast = parse(&arena, "```\nplain code\n```");

        assert_eq!(ast.children()[0].attr("lang"), None);
    }

    #[test]
    fn test_parse_lists() {
        let arena = AstArena::new();
        let ast = parse(&arena, "- a\n- b\n\n1. one\n2. two");

        let bullets = &ast.children()[0];
        assert!(bullets.is("list"));
        assert_eq!(bullets.attr("ordered"), Some(AttrValue::Bool(false)));
        assert_eq!(bullets.children().len(), 2);
        assert!(bullets.children().iter().all(|item| item.is("listItem")));

        let ordered = &ast.children()[1];
        assert_eq!(ordered.attr("ordered"), Some(AttrValue::Bool(true)));
        assert_eq!(ordered.attr("start"), Some(AttrValue::Integer(1)));
    }

    #[test]
    fn test_parse_gfm_table_and_delete() {
        let arena = AstArena::new();
        let ast = parse(&arena, "| a | b |\n|---|---|\n| ~~x~~ | y |");

        let table = &ast.children()[0];
        assert!(table.is("table"));
        assert!(table.children()[0].is("tableRow"));

        let cell = &table.children()[1].children()[0];
        assert!(cell.is("tableCell"));
        assert!(cell.children()[0].is("delete"));
    }

    #[test]
    fn test_parse_image_reference_and_definition() {
        let arena = AstArena::new();
        let ast = parse(&arena, "![cat][c]\n\n[c]: cat.gif");

        let reference = &ast.children()[0].children()[0];
        assert!(reference.is("imageReference"));
        assert_eq!(reference.attr_text("identifier"), Some("c"));
        assert_eq!(reference.attr("url"), None);

        let definition = &ast.children()[1];
        assert!(definition.is("definition"));
        assert_eq!(definition.attr_text("url"), Some("cat.gif"));
    }

    #[test]
    fn test_parse_empty_document() {
        let arena = AstArena::new();
        let ast = parse(&arena, "");

        assert_eq!(ast.node_type(), "root");
        assert!(!ast.has_children());
    }

    #[test]
    fn test_parse_document_keeps_source() {
        let arena = AstArena::new();
        let parser = MarkdownParser::new();
        let doc = parser.parse_document(&arena, "Hello").unwrap();

        assert_eq!(doc.source(), "Hello");
        assert!(doc.path().is_none());
        let position = doc.root().position().unwrap();
        assert_eq!(position.start.offset, 0);
        assert_eq!(position.end.offset, 5);
    }

    #[test]
    fn test_parse_deeply_nested_list() {
        let source = format!("{}![a](x.gif)\n", "- ".repeat(2000));

        // The markdown tokenizer runs on a stack the size of a main thread.
        let (depth, url) = std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(move || {
                let arena = AstArena::new();
                let ast = parse(&arena, &source);
                let mut url = None;
                marklint_ast::visit(&ast, "image", |image| {
                    url = image.attr_text("url").map(str::to_string);
                    marklint_ast::VisitControl::Stop
                });
                (ast.depth(), url)
            })
            .unwrap()
            .join()
            .unwrap();

        // A list and a list item per level.
        assert!(depth > 4000);
        assert_eq!(url.as_deref(), Some("x.gif"));
    }

    #[test]
    fn test_convert_message_location() {
        use markdown::unist::Point as MdPoint;

        let message = Message {
            place: Some(Box::new(Place::Point(MdPoint::new(3, 7, 20)))),
            reason: "Unexpected end of file".into(),
            rule_id: Box::new("unexpected-eof".into()),
            source: Box::new("markdown-rs".into()),
        };
        let err = convert_message(message);
        assert_eq!(err.to_string(), "Invalid source: Unexpected end of file");
        assert!(matches!(
            err,
            ParseError::InvalidSource {
                location: Some((3, 7)),
                ..
            }
        ));
    }

    #[test]
    fn test_extensions() {
        let parser = MarkdownParser::new();

        assert_eq!(parser.name(), "markdown");
        assert!(parser.can_parse("md"));
        assert!(parser.can_parse("markdown"));
        assert!(parser.can_parse("MD"));
        assert!(!parser.can_parse("txt"));
    }
}
