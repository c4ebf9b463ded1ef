//! Element-kind classification.
//!
//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//!
//! The kind decides everything downstream: whether an end tag exists, how
//! the body is lexed, whether CDATA and self-closing are legal, and how the
//! serializer closes the element.

use tern_dom::ElementKind;

/// [§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// "Raw text elements: script, style"
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// "Escapable raw text elements: textarea, title"
pub(crate) const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Classify a just-lexed tag name.
///
/// The checks run in a fixed order; notably `template` and the void /
/// raw-text tables win over foreign-content membership, so `<svg><script>`
/// still lexes a raw-text body.
///
/// `foreign_depth` is the current depth of the parser's SVG/MathML stack.
/// Pushing and popping that stack stays with the parser, which owns the
/// element's whole lifetime; this function only reads the depth.
pub(crate) fn classify(tag: &str, foreign_depth: usize) -> ElementKind {
    if tag == "template" {
        ElementKind::Template
    } else if VOID_ELEMENTS.contains(&tag) {
        ElementKind::Void
    } else if RAW_TEXT_ELEMENTS.contains(&tag) {
        ElementKind::RawText
    } else if ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag) {
        ElementKind::EscapableRawText
    } else if is_foreign_root(tag) || foreign_depth > 0 {
        ElementKind::Foreign
    } else {
        ElementKind::Normal
    }
}

/// An element that starts a foreign (SVG or MathML) subtree.
pub(crate) fn is_foreign_root(tag: &str) -> bool {
    tag == "svg" || tag == "math"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order() {
        assert_eq!(classify("template", 0), ElementKind::Template);
        assert_eq!(classify("br", 0), ElementKind::Void);
        assert_eq!(classify("script", 0), ElementKind::RawText);
        assert_eq!(classify("title", 0), ElementKind::EscapableRawText);
        assert_eq!(classify("svg", 0), ElementKind::Foreign);
        assert_eq!(classify("math", 0), ElementKind::Foreign);
        assert_eq!(classify("div", 0), ElementKind::Normal);
    }

    #[test]
    fn foreign_depth_captures_descendants() {
        assert_eq!(classify("circle", 1), ElementKind::Foreign);
        assert_eq!(classify("circle", 0), ElementKind::Normal);
        // Tables still win inside foreign subtrees.
        assert_eq!(classify("script", 1), ElementKind::RawText);
        assert_eq!(classify("input", 1), ElementKind::Void);
    }
}
