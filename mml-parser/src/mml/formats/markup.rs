//! Markup serializer
//!
//!     Emits the mml wire format. Every marker sits on a line of its own and
//!     content text is written verbatim between its markers, so the serialized
//!     form re-parses into the same tree:
//!
//!         <!-- @c id="root" type="root" -->
//!         <!-- @n id="n1" type="x" -->
//!         hello
//!         <!-- /@n -->
//!         <!-- /@c -->
//!
//!     Marker lines can be indented per depth. Content lines never are; the text
//!     belongs to the node and is not reflowed.

use super::registry::Formatter;
use crate::mml::ast::{Document, Node, NodeBody};
use crate::mml::error::MmlResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Prefix repeated once per depth level before each marker line
    pub indent: String,
    pub trailing_newline: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            indent: String::new(),
            trailing_newline: true,
        }
    }
}

pub fn serialize_document(doc: &Document, options: &SerializeOptions) -> String {
    let mut lines = Vec::new();
    emit(doc, doc.root(), 0, options, &mut lines);
    let mut out = lines.join("\n");
    if options.trailing_newline {
        out.push('\n');
    }
    out
}

fn open_marker(node: &Node) -> String {
    format!(
        "<!-- {} id=\"{}\"{} -->",
        node.kind().tag(),
        node.id(),
        node.attributes().to_markup()
    )
}

fn close_marker(node: &Node) -> String {
    format!("<!-- /{} -->", node.kind().tag())
}

fn emit(doc: &Document, node: &Node, depth: usize, options: &SerializeOptions, lines: &mut Vec<String>) {
    let pad = options.indent.repeat(depth);
    lines.push(format!("{pad}{}", open_marker(node)));
    match node.body() {
        NodeBody::Container { children } => {
            for child in children.iter().filter_map(|id| doc.get(id)) {
                emit(doc, child, depth + 1, options, lines);
            }
        }
        NodeBody::Content { text } => {
            let rendered = text.render();
            if !rendered.is_empty() {
                lines.push(rendered);
            }
        }
    }
    lines.push(format!("{pad}{}", close_marker(node)));
}

/// The wire format as a registry formatter
#[derive(Debug, Clone, Default)]
pub struct MarkupFormatter {
    options: SerializeOptions,
}

impl MarkupFormatter {
    pub fn new(options: SerializeOptions) -> Self {
        MarkupFormatter { options }
    }
}

impl Formatter for MarkupFormatter {
    fn name(&self) -> &str {
        "markup"
    }

    fn serialize(&self, doc: &Document) -> MmlResult<String> {
        Ok(serialize_document(doc, &self.options))
    }

    fn description(&self) -> &str {
        "mml markup: markdown with structural comment markers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_example() {
        let doc = Document::parse(
            r#"<!-- @c id="root" --><!-- @n id="n1" type="x" -->hello<!-- /@n --><!-- /@c -->"#,
        )
        .unwrap();
        let options = SerializeOptions {
            trailing_newline: false,
            ..SerializeOptions::default()
        };
        insta::assert_snapshot!(doc.serialize_with(&options), @r#"
        <!-- @c id="root" -->
        <!-- @n id="n1" type="x" -->
        hello
        <!-- /@n -->
        <!-- /@c -->
        "#);
    }

    #[test]
    fn test_indent_applies_to_markers_only() {
        let doc = Document::parse(concat!(
            r#"<!-- @c id="r" --><!-- @c id="s" -->"#,
            r#"<!-- @n id="a" -->line one"#,
            "\n",
            r#"line two<!-- /@n --><!-- /@c --><!-- /@c -->"#,
        ))
        .unwrap();
        let options = SerializeOptions {
            indent: "  ".to_string(),
            trailing_newline: false,
        };
        assert_eq!(
            doc.serialize_with(&options),
            concat!(
                "<!-- @c id=\"r\" -->\n",
                "  <!-- @c id=\"s\" -->\n",
                "    <!-- @n id=\"a\" -->\n",
                "line one\n",
                "line two\n",
                "    <!-- /@n -->\n",
                "  <!-- /@c -->\n",
                "<!-- /@c -->",
            )
        );
    }

    #[test]
    fn test_empty_content_has_no_text_line() {
        let doc = Document::parse(r#"<!-- @c id="r" --><!-- @n id="a" k="v" --><!-- /@n --><!-- /@c -->"#)
            .unwrap();
        assert_eq!(
            doc.serialize(),
            "<!-- @c id=\"r\" -->\n<!-- @n id=\"a\" k=\"v\" -->\n<!-- /@n -->\n<!-- /@c -->\n"
        );
    }
}
