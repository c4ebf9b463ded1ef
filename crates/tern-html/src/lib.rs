//! HTML parser and serializer producing [`tern_dom`] trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Parsing** for the practical subset of the
//!   [HTML living standard](https://html.spec.whatwg.org/multipage/syntax.html)
//!   a tree round-tripper needs: normal, void, raw-text, escapable-raw-text,
//!   foreign (SVG/MathML) and template elements; end-tag omission with
//!   one-token lookahead; comments, doctypes, and CDATA sections in foreign
//!   content.
//! - **Serialization** back to text, preserving the source bytes of valid
//!   input modulo three normalizations: the doctype is canonicalized,
//!   self-closing slashes on void/foreign tags are dropped, and omitted end
//!   tags are written out.
//!
//! # Not implemented
//!
//! - Character reference decoding (entities stay verbatim in text)
//! - HTML5 error recovery (the adoption agency algorithm); malformed input
//!   fails with a positioned [`ParseError`] instead
//! - Content-model validation and start-tag omission
//! - Scripting, DOM mutation, streaming input
//!
//! # Example
//!
//! ```
//! use tern_html::{SerializeOptions, parse_element, serialize_node};
//!
//! let tree = parse_element("<ul><li>A<li>B</ul>").unwrap();
//! let root = tree.document_element().unwrap();
//! let html = serialize_node(&tree, root, SerializeOptions::default());
//! assert_eq!(html, "<ul><li>A</li><li>B</li></ul>");
//! ```

use log::debug;

mod error;
mod lexer;
mod parser;
mod serializer;

pub use error::ParseError;
pub use serializer::{SerializeOptions, serialize_fragments, serialize_node};
pub use tern_dom::{Attribute, ElementData, ElementKind, Node, NodeId, NodeKind, Tree};

use parser::Parser;

/// Parse exactly one element spanning the whole input.
///
/// The returned tree's document node has the element as its only child;
/// [`Tree::document_element`] retrieves it.
///
/// # Errors
///
/// Fails on malformed markup, on a self-closing non-void HTML element, on an
/// end tag after a void element, and on input remaining after the element.
pub fn parse_element(input: &str) -> Result<Tree, ParseError> {
    debug!("parse_element: {} bytes", input.len());
    finish(Parser::new(input).parse_element())
}

/// Parse a sequence of text, element, and comment nodes.
///
/// The parsed nodes are the children of the returned tree's document node,
/// in source order. Empty input yields an empty list.
///
/// # Errors
///
/// Fails on any malformed node; no partial list is returned.
pub fn parse_fragments(input: &str) -> Result<Tree, ParseError> {
    debug!("parse_fragments: {} bytes", input.len());
    finish(Parser::new(input).parse_fragments())
}

/// Parse a complete HTML document: an optional byte-order mark (preserved
/// as a text node), optional whitespace and comments, a required doctype
/// (normalized to the text node `<!DOCTYPE html>`), exactly one root
/// element, and optional trailing whitespace and comments.
///
/// # Errors
///
/// Fails on a missing or non-HTML doctype, on a malformed root element, and
/// on trailing content that is not whitespace or comments.
pub fn parse_html(input: &str) -> Result<Tree, ParseError> {
    debug!("parse_html: {} bytes", input.len());
    finish(Parser::new(input).parse_html())
}

/// Parse a declarative shadow root: a fragment whose last element is a
/// `<template>` with `shadowrootmode="open"`.
///
/// # Errors
///
/// Fails like [`parse_fragments`], plus when the last element is missing or
/// not a template (`Expected a template element`) or lacks the open shadow
/// root mode (`Expected a declarative shadow root`).
pub fn parse_shadow_root(input: &str) -> Result<Tree, ParseError> {
    debug!("parse_shadow_root: {} bytes", input.len());
    finish(Parser::new(input).parse_shadow_root())
}

fn finish(result: Result<Tree, ParseError>) -> Result<Tree, ParseError> {
    if let Ok(tree) = &result {
        debug_assert!(
            tree.check_invariants(),
            "parser produced a malformed tree"
        );
    }
    result
}
