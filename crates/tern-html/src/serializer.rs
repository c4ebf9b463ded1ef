//! Serialization back to markup text.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! A pure fold over the tree. For trees the parser produced, the output is
//! the input modulo the documented normalizations: the doctype is already
//! canonical text, self-closing slashes on void/foreign tags are dropped,
//! and end tags the source omitted are written out.

use tern_dom::{ElementKind, NodeId, NodeKind, Tree};

/// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
///
/// "If the attribute is present, its value must either be the empty string
/// or a value that is an ASCII case-insensitive match for the attribute's
/// canonical name." These serialize as the bare name.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Serialization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Drop comment nodes from the output.
    pub remove_comments: bool,
}

/// Serialize a single node (and, for elements, its subtree).
#[must_use]
pub fn serialize_node(tree: &Tree, id: NodeId, options: SerializeOptions) -> String {
    let mut out = String::new();
    write_node(tree, id, options, &mut out);
    out
}

/// Serialize the parsed fragment list: the document container's children in
/// order. The inverse of `parse_fragments` (and of `parse_html`, whose
/// doctype lives in the list as a text node).
#[must_use]
pub fn serialize_fragments(tree: &Tree, options: SerializeOptions) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        write_node(tree, child, options, &mut out);
    }
    out
}

fn write_node(tree: &Tree, id: NodeId, options: SerializeOptions, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    match &node.kind {
        NodeKind::Document => {
            for &child in &node.children {
                write_node(tree, child, options, out);
            }
        }
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Comment(text) => {
            if !options.remove_comments {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
        NodeKind::Cdata(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        NodeKind::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for attr in &data.attributes {
                write_attribute(&attr.name, &attr.value, out);
            }
            out.push('>');
            // Self-closing and void elements end here; the slash itself is
            // never written back, so `<br/>` and `<circle/>` both come out
            // bare.
            if data.self_closing || data.kind == ElementKind::Void {
                return;
            }
            for &child in &node.children {
                write_node(tree, child, options, out);
            }
            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
    }
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    if BOOLEAN_ATTRIBUTES.contains(&name) {
        return;
    }
    // Values are verbatim source bytes; switch quote style rather than
    // escape.
    let quote = if value.contains('"') { '\'' } else { '"' };
    out.push('=');
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}
