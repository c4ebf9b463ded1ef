//! The recursive-descent parser.
//!
//! One [`Parser`] instance serves one invocation: it owns the scanner, the
//! tree being built, and the foreign-namespace stack, so no state survives
//! across parses or leaks on failure. Any failure aborts the whole parse;
//! no partial trees escape.

use log::trace;

use tern_dom::{Attribute, ElementData, ElementKind, NodeId, NodeKind, Tree};

use crate::error::ParseError;
use crate::lexer::names;
use crate::lexer::scanner::{Scanner, is_whitespace};
use crate::parser::classify::{classify, is_foreign_root};
use crate::parser::omission::omission_rule;

/// A tag-name character for lookahead boundary purposes. `<li` must not be
/// treated as the start tag `<link`.
const fn is_name_continuation(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    tree: Tree,
    /// Stack of open `svg`/`math` roots. Non-empty means foreign content:
    /// tag casing is preserved, CDATA is allowed, self-closing is legal on
    /// any tag. Owned by this instance (never process-wide).
    foreign_stack: Vec<String>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(input),
            tree: Tree::new(),
            foreign_stack: Vec::new(),
        }
    }

    /// Parse exactly one element spanning the whole input.
    pub(crate) fn parse_element(mut self) -> Result<Tree, ParseError> {
        let id = self.element()?;
        self.tree.append_child(NodeId::ROOT, id);
        self.expect_end("Unexpected trailing input")?;
        Ok(self.tree)
    }

    /// Parse a sequence of text / element / comment nodes up to end of
    /// input. Empty input is a valid, empty fragment list.
    pub(crate) fn parse_fragments(mut self) -> Result<Tree, ParseError> {
        self.fragments()?;
        Ok(self.tree)
    }

    /// Parse a whole HTML document: optional BOM, leading whitespace and
    /// comments, the doctype, one root element, trailing whitespace and
    /// comments.
    ///
    /// The byte-order mark is preserved as a text node so documents
    /// round-trip; every accepted doctype spelling becomes the canonical
    /// `<!DOCTYPE html>` text node.
    pub(crate) fn parse_html(mut self) -> Result<Tree, ParseError> {
        if self.scanner.eat("\u{FEFF}") {
            self.append_root(NodeKind::Text("\u{FEFF}".to_string()));
        }
        self.blank_run()?;
        names::doctype(&mut self.scanner)?;
        self.append_root(NodeKind::Text(names::CANONICAL_DOCTYPE.to_string()));
        self.blank_run()?;
        let root = self.element()?;
        self.tree.append_child(NodeId::ROOT, root);
        self.blank_run()?;
        self.expect_end("Expected end of input")?;
        Ok(self.tree)
    }

    /// Parse a declarative shadow root: a fragment whose last element is
    /// `<template shadowrootmode="open">`.
    ///
    /// [§ 4.12.2 Declarative shadow roots](https://html.spec.whatwg.org/multipage/scripting.html#attr-template-shadowrootmode)
    pub(crate) fn parse_shadow_root(mut self) -> Result<Tree, ParseError> {
        let last_element = self.fragments()?;
        let Some((pos, id)) = last_element else {
            return Err(self.scanner.error("Expected a template element"));
        };
        match self.tree.as_element(id) {
            Some(data) if data.tag_name == "template" => {
                if data.attribute("shadowrootmode") == Some("open") {
                    Ok(self.tree)
                } else {
                    Err(self
                        .scanner
                        .error_at("Expected a declarative shadow root", pos))
                }
            }
            _ => Err(self.scanner.error_at("Expected a template element", pos)),
        }
    }

    fn in_foreign(&self) -> bool {
        !self.foreign_stack.is_empty()
    }

    fn append_root(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.alloc(kind);
        self.tree.append_child(NodeId::ROOT, id);
        id
    }

    fn expect_end(&self, message: &str) -> Result<(), ParseError> {
        if self.scanner.at_end() {
            Ok(())
        } else {
            Err(self.scanner.error(message))
        }
    }

    /// The top-level node loop shared by the fragment-shaped entry points.
    /// Returns the start offset and id of the last element seen, which the
    /// shadow-root validation needs.
    fn fragments(&mut self) -> Result<Option<(usize, NodeId)>, ParseError> {
        let mut last_element = None;
        loop {
            if self.scanner.at_end() {
                return Ok(last_element);
            }
            let start = self.scanner.pos();
            if !self.scanner.starts_with("<") {
                if let Some(run) = names::text_run(&mut self.scanner) {
                    let text = NodeKind::Text(run.to_string());
                    self.append_root(text);
                }
                continue;
            }
            if self.scanner.starts_with("<!--") {
                let body = names::comment(&mut self.scanner)?;
                self.append_root(NodeKind::Comment(body));
                continue;
            }
            let id = self.element()?;
            self.tree.append_child(NodeId::ROOT, id);
            last_element = Some((start, id));
        }
    }

    /// Whitespace and comments between document-level constructs, each kept
    /// as its own node.
    fn blank_run(&mut self) -> Result<(), ParseError> {
        loop {
            let ws = self.scanner.skip_whitespace();
            if !ws.is_empty() {
                self.append_root(NodeKind::Text(ws.to_string()));
                continue;
            }
            if self.scanner.starts_with("<!--") {
                let body = names::comment(&mut self.scanner)?;
                self.append_root(NodeKind::Comment(body));
                continue;
            }
            return Ok(());
        }
    }

    /// Parse one element: start tag, content per the element's kind, end
    /// tag (explicit or implied by the omission rules).
    fn element(&mut self) -> Result<NodeId, ParseError> {
        let start = self.scanner.pos();
        if !self.scanner.eat("<") {
            return Err(self.scanner.error("Invalid start tag"));
        }
        let in_foreign = self.in_foreign();
        let tag = names::tag_name(&mut self.scanner, in_foreign)?;
        let attributes = self.attributes()?;
        let explicit_self_close = self.scanner.eat("/");
        if !self.scanner.eat(">") {
            return Err(self.scanner.error("Invalid start tag"));
        }
        trace!("start tag <{tag}> at byte {start}");

        let kind = classify(&tag, self.foreign_stack.len());
        // Void elements are self-closing whether or not the slash was
        // written; an explicit slash is only legal on void and foreign tags.
        let self_closing = explicit_self_close || kind == ElementKind::Void;
        if explicit_self_close && !matches!(kind, ElementKind::Void | ElementKind::Foreign) {
            return Err(self
                .scanner
                .error_at("Unexpected self-closing tag on a non-void element", start));
        }

        let pushed = is_foreign_root(&tag);
        if pushed {
            self.foreign_stack.push(tag.clone());
        }

        let id = self.tree.alloc(NodeKind::Element(ElementData {
            tag_name: tag.clone(),
            kind,
            attributes,
            self_closing,
        }));

        if self_closing {
            if pushed {
                self.foreign_stack.pop();
            }
            self.reject_void_end_tag(&tag)?;
            return Ok(id);
        }

        let last_failure = match kind {
            ElementKind::RawText | ElementKind::EscapableRawText => {
                self.raw_text_child(id, &tag);
                None
            }
            _ => self.children(id, &tag),
        };
        self.end_tag(&tag, last_failure)?;
        if pushed {
            self.foreign_stack.pop();
        }
        Ok(id)
    }

    /// The attribute list of a start tag. Present only when at least one
    /// whitespace character follows the tag name; each attribute consumes
    /// its own trailing whitespace.
    fn attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();
        if self.scanner.skip_whitespace().is_empty() {
            return Ok(attributes);
        }
        while !self.scanner.at_end() && !matches!(self.scanner.peek(), Some('>' | '/')) {
            attributes.push(names::attribute(&mut self.scanner)?);
        }
        Ok(attributes)
    }

    /// A void or self-closing element must not be followed by its own end
    /// tag (`<input></input>` is an error, not an empty element).
    fn reject_void_end_tag(&mut self, tag: &str) -> Result<(), ParseError> {
        let checkpoint = self.scanner.pos();
        self.scanner.skip_whitespace();
        let at = self.scanner.pos();
        let matched = self.close_tag_len(tag).is_some();
        self.scanner.set_pos(checkpoint);
        if matched {
            Err(self
                .scanner
                .error_at("Unexpected end tag on a void element", at))
        } else {
            Ok(())
        }
    }

    /// Raw-text content: everything up to the first `</tag` followed by
    /// whitespace, `/`, or `>` (case-insensitive). At most one text child.
    fn raw_text_child(&mut self, parent: NodeId, tag: &str) {
        let body_len = self.raw_text_end(tag);
        if body_len > 0 {
            let body = self.scanner.rest()[..body_len].to_string();
            self.scanner.advance(body_len);
            let text = self.tree.alloc(NodeKind::Text(body));
            self.tree.append_child(parent, text);
        }
    }

    fn raw_text_end(&self, tag: &str) -> usize {
        let rest = self.scanner.rest();
        let mut from = 0;
        while let Some(offset) = rest[from..].find("</") {
            let cand = from + offset;
            let after = &rest[cand + 2..];
            if after.len() >= tag.len()
                && after.is_char_boundary(tag.len())
                && after[..tag.len()].eq_ignore_ascii_case(tag)
                && matches!(
                    after[tag.len()..].chars().next(),
                    Some(' ' | '\t' | '\n' | '\x0C' | '\r' | '/' | '>')
                )
            {
                return cand;
            }
            from = cand + 2;
        }
        rest.len()
    }

    /// Collect child nodes until the end-tag region. Returns the deepest
    /// failure from the alternation, which the end-tag error competes
    /// against so messages point near the true problem.
    fn children(&mut self, parent: NodeId, tag: &str) -> Option<ParseError> {
        loop {
            if self.scanner.at_end() || self.closed_by_follow_token(tag) {
                return None;
            }
            if !self.scanner.starts_with("<") {
                if let Some(run) = names::text_run(&mut self.scanner) {
                    let text = self.tree.alloc(NodeKind::Text(run.to_string()));
                    self.tree.append_child(parent, text);
                }
                continue;
            }
            let checkpoint = self.scanner.pos();
            if self.scanner.starts_with("<!--") {
                match names::comment(&mut self.scanner) {
                    Ok(body) => {
                        let comment = self.tree.alloc(NodeKind::Comment(body));
                        self.tree.append_child(parent, comment);
                        continue;
                    }
                    Err(err) => {
                        self.scanner.set_pos(checkpoint);
                        return Some(err);
                    }
                }
            }
            if self.in_foreign() && self.scanner.starts_with("<![CDATA[") {
                match names::cdata_section(&mut self.scanner) {
                    Ok(body) => {
                        let cdata = self.tree.alloc(NodeKind::Cdata(body));
                        self.tree.append_child(parent, cdata);
                        continue;
                    }
                    Err(err) => {
                        self.scanner.set_pos(checkpoint);
                        return Some(err);
                    }
                }
            }
            if self.scanner.starts_with("</") {
                return None;
            }
            match self.element() {
                Ok(child) => self.tree.append_child(parent, child),
                Err(err) => {
                    self.scanner.set_pos(checkpoint);
                    return Some(err);
                }
            }
        }
    }

    /// True when the current element has an omission rule and the next
    /// token is in one of its follow sets, which closes the element without
    /// consuming anything.
    fn closed_by_follow_token(&self, tag: &str) -> bool {
        let Some(rule) = omission_rule(tag) else {
            return false;
        };
        rule.open.iter().any(|t| self.at_open_tag(t))
            || rule.closed.iter().any(|t| self.close_tag_len(t).is_some())
    }

    /// Lookahead for a start tag `<name` with a proper name boundary.
    fn at_open_tag(&self, tag: &str) -> bool {
        let rest = self.scanner.rest();
        let Some(after) = rest.strip_prefix('<') else {
            return false;
        };
        if after.len() < tag.len()
            || !after.is_char_boundary(tag.len())
            || !after[..tag.len()].eq_ignore_ascii_case(tag)
        {
            return false;
        }
        !after[tag.len()..]
            .chars()
            .next()
            .is_some_and(is_name_continuation)
    }

    /// Lookahead for an end tag `</name` ws* `>` (case-insensitive).
    /// Returns the total byte length so a match can also be consumed.
    fn close_tag_len(&self, tag: &str) -> Option<usize> {
        let rest = self.scanner.rest();
        let after = rest.strip_prefix("</")?;
        if after.len() < tag.len()
            || !after.is_char_boundary(tag.len())
            || !after[..tag.len()].eq_ignore_ascii_case(tag)
        {
            return None;
        }
        let tail = &after[tag.len()..];
        let ws = tail
            .char_indices()
            .find(|&(_, c)| !is_whitespace(c))
            .map_or(tail.len(), |(i, _)| i);
        tail[ws..]
            .starts_with('>')
            .then_some("</".len() + tag.len() + ws + 1)
    }

    /// Accept the element's end tag: any alternative from its omission rule
    /// (nothing consumed), or the literal end tag (consumed).
    fn end_tag(&mut self, tag: &str, last_failure: Option<ParseError>) -> Result<(), ParseError> {
        if let Some(rule) = omission_rule(tag)
            && ((rule.at_end_of_input && self.scanner.at_end())
                || rule.open.iter().any(|t| self.at_open_tag(t))
                || rule.closed.iter().any(|t| self.close_tag_len(t).is_some()))
        {
            return Ok(());
        }
        if let Some(len) = self.close_tag_len(tag) {
            self.scanner.advance(len);
            return Ok(());
        }
        let err = self.scanner.error(format!("Expected a '</{tag}>' end tag"));
        Err(match last_failure {
            Some(prev) => ParseError::furthest(err, prev),
            None => err,
        })
    }
}
