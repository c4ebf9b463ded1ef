//! Token-level productions: text runs, comments, doctypes, tag names,
//! attributes, and CDATA bodies.
//!
//! Each production takes the scanner at the position where the construct is
//! expected and either consumes it fully or fails without a committed
//! half-parse (failed alternatives rewind at the call site).

use tern_dom::Attribute;

use crate::error::ParseError;
use super::scanner::{Scanner, is_whitespace};

/// [§ 4.13.3 Valid custom element names](https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name)
///
/// "name must not be any of the following: annotation-xml, color-profile,
/// font-face, font-face-src, font-face-uri, font-face-format,
/// font-face-name, missing-glyph": hyphenated names already claimed by SVG
/// and MathML.
const FORBIDDEN_CUSTOM_ELEMENT_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// [§ 4.13.3](https://html.spec.whatwg.org/multipage/custom-elements.html#prod-pcenchar)
///
/// The PCENChar production: the characters allowed in a potential custom
/// element name after the leading ASCII lowercase letter.
const fn is_pcen_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '_'
        | '0'..='9'
        | 'a'..='z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// Characters a tag-name run may consume: the PCEN class plus the ASCII
/// alphanumerics HTML tag names use (uppercase included, lowercased later
/// outside foreign content).
const fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_pcen_char(c)
}

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// "Attribute names must consist of one or more characters other than
/// controls, U+0020 SPACE, U+0022 ("), U+0027 ('), U+003E (>), U+002F (/),
/// U+003D (=), and noncharacters."
const fn is_attr_name_char(c: char) -> bool {
    !(is_whitespace(c)
        || matches!(c, '\u{7F}'..='\u{9F}')
        || matches!(c, '"' | '\'' | '>' | '/' | '=')
        || is_noncharacter(c))
}

/// [Unicode noncharacters](https://infra.spec.whatwg.org/#noncharacter):
/// U+FDD0..U+FDEF and the last two code points of every plane.
const fn is_noncharacter(c: char) -> bool {
    let v = c as u32;
    (v >= 0xFDD0 && v <= 0xFDEF) || (v & 0xFFFF) >= 0xFFFE
}

/// Characters allowed in an unquoted attribute value. `/` is deliberately
/// permitted, which is what makes `<input type=text/>` parse the `/` into
/// the value rather than as a self-closing token.
const fn is_unquoted_value_char(c: char) -> bool {
    !matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r' | '\u{0B}' | '=' | '\'' | '"' | '<' | '>' | '`')
}

/// Longest non-empty run of text up to the next `<`, or `None` at a tag
/// boundary or end of input.
pub(crate) fn text_run<'a>(s: &mut Scanner<'a>) -> Option<&'a str> {
    let run = s.take_while(|c| c != '<');
    (!run.is_empty()).then_some(run)
}

/// [§ 13.1.6 Comments](https://html.spec.whatwg.org/multipage/syntax.html#comments)
///
/// "the text must not start with the string `>`, nor start with the string
/// `->`, nor contain the strings `<!--`, `-->`, or `--!>`, nor end with the
/// string `<!-`."
///
/// The body runs to the first `-->`; contents are kept verbatim (`<` and
/// entities included). The scanner must be positioned at `<!--`.
pub(crate) fn comment(s: &mut Scanner<'_>) -> Result<String, ParseError> {
    let start = s.pos();
    if !s.eat("<!--") {
        return Err(s.error_at("Invalid comment", start));
    }
    let rest = s.rest();
    let Some(len) = rest.find("-->") else {
        return Err(s.error_at("Invalid comment", start));
    };
    let body = &rest[..len];
    if body.starts_with('>')
        || body.starts_with("->")
        || body.contains("<!--")
        || body.contains("--!>")
        || body.ends_with("<!-")
    {
        return Err(s.error_at("Invalid comment", start));
    }
    s.advance(len + "-->".len());
    Ok(body.to_string())
}

/// [§ 13.1.1 The DOCTYPE](https://html.spec.whatwg.org/multipage/syntax.html#the-doctype)
///
/// Accepts `<!DOCTYPE html>` case-insensitively with optional whitespace
/// before `>`; every accepted spelling is normalized to the canonical
/// `<!DOCTYPE html>` text by the caller.
pub(crate) fn doctype(s: &mut Scanner<'_>) -> Result<(), ParseError> {
    let start = s.pos();
    if !s.eat_ignore_ascii_case("<!DOCTYPE")
        || s.skip_whitespace().is_empty()
        || !s.eat_ignore_ascii_case("html")
    {
        return Err(s.error_at("Expected a valid doctype", start));
    }
    s.skip_whitespace();
    if !s.eat(">") {
        return Err(s.error_at("Expected a valid doctype", start));
    }
    Ok(())
}

/// The canonical doctype text produced for every accepted doctype spelling.
pub(crate) const CANONICAL_DOCTYPE: &str = "<!DOCTYPE html>";

/// [§ 13.1.5 CDATA sections](https://html.spec.whatwg.org/multipage/syntax.html#cdata-sections)
///
/// "CDATA sections consist of the string `<![CDATA[`, followed by text,
/// followed by the string `]]>`." The body is everything up to the first
/// `]]>`. The scanner must be positioned at `<![CDATA[`.
pub(crate) fn cdata_section(s: &mut Scanner<'_>) -> Result<String, ParseError> {
    let start = s.pos();
    if !s.eat("<![CDATA[") {
        return Err(s.error_at("Invalid CDATA section", start));
    }
    let rest = s.rest();
    let Some(len) = rest.find("]]>") else {
        return Err(s.error_at("Invalid CDATA section", start));
    };
    let body = rest[..len].to_string();
    s.advance(len + "]]>".len());
    Ok(body)
}

/// Lex a tag name: either an HTML tag name (`[A-Za-z][A-Za-z0-9]*`) or a
/// potential custom element name.
///
/// HTML names are lowercased unless the parser is inside foreign content,
/// where casing survives verbatim (`<svg><animateTransform>`). A run that
/// picked up characters outside the plain-alphanumeric class is validated as
/// a custom element name: it must contain a dash, must not be one of the
/// SVG/MathML names the custom-element spec forbids, and every character
/// must belong to the PCEN class.
pub(crate) fn tag_name(s: &mut Scanner<'_>, in_foreign: bool) -> Result<String, ParseError> {
    let start = s.pos();
    if !s.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(s.error_at("Invalid html tag name", start));
    }
    let raw = s.take_while(is_tag_name_char);

    if raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        let name = if in_foreign {
            raw.to_string()
        } else {
            raw.to_ascii_lowercase()
        };
        return Ok(name);
    }

    let name = if in_foreign {
        raw.to_string()
    } else {
        raw.to_ascii_lowercase()
    };
    if !name.contains('-') {
        return Err(s.error_at(
            "Invalid custom element name (should include a dash)",
            start,
        ));
    }
    if FORBIDDEN_CUSTOM_ELEMENT_NAMES.contains(&name.as_str()) {
        return Err(s.error_at("Forbidden custom element name", start));
    }
    let mut chars = name.chars();
    let first_is_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    if !first_is_lower || !chars.all(is_pcen_char) {
        return Err(s.error_at("Invalid custom element name", start));
    }
    Ok(name)
}

/// [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
///
/// `name`, optionally `= value` in one of the three value forms. A bare name
/// carries the empty string. Trailing whitespace is consumed, which is what
/// lets the caller chain attributes without re-skipping.
///
/// A failed value alternative falls back to the bare-name form without
/// consuming the `=`, so `<div foo=>` surfaces "Expected a valid attribute
/// name" at the equals sign on the next iteration.
pub(crate) fn attribute(s: &mut Scanner<'_>) -> Result<Attribute, ParseError> {
    let start = s.pos();
    let name = s.take_while(is_attr_name_char);
    if name.is_empty() {
        return Err(s.error_at("Expected a valid attribute name", start));
    }
    let name = name.to_string();
    s.skip_whitespace();

    let bare = s.pos();
    if s.eat("=") {
        s.skip_whitespace();
        match attribute_value(s) {
            Ok(value) => {
                s.skip_whitespace();
                return Ok(Attribute::new(name, value));
            }
            Err(_) => s.set_pos(bare),
        }
    }
    Ok(Attribute::new(name, String::new()))
}

/// The three value forms, first match wins: single-quoted, double-quoted,
/// unquoted (greedy, `/` included).
fn attribute_value(s: &mut Scanner<'_>) -> Result<String, ParseError> {
    for quote in ['\'', '"'] {
        let cp = s.pos();
        if s.bump() == Some(quote) {
            let value = s.take_while(|c| c != quote).to_string();
            if s.bump() == Some(quote) {
                return Ok(value);
            }
            return Err(s.error("Unterminated quoted attribute value"));
        }
        s.set_pos(cp);
    }
    let value = s.take_while(is_unquoted_value_char);
    if value.is_empty() {
        return Err(s.error("Expected an attribute value"));
    }
    Ok(value.to_string())
}
