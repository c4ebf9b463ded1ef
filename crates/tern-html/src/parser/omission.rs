//! End-tag-omission rules.
//!
//! [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
//!
//! "Certain tags can be omitted." For each such element this table lists the
//! follow sets that imply its end tag: start tags that open a sibling
//! (`open`), end tags of an ancestor (`closed`), and whether running out of
//! input closes it (`body`, `html`).
//!
//! The parser consults the table in two places: while collecting children
//! (a matching follow token terminates the child list without being
//! consumed) and when accepting the end tag itself.

/// Follow sets implying the end tag of one element.
pub(crate) struct OmissionRule {
    /// Start tags that implicitly close the element:
    /// "An li element's end tag can be omitted if the li element is
    /// immediately followed by another li element..."
    pub(crate) open: &'static [&'static str],
    /// End tags of enclosing elements that implicitly close it:
    /// "...or if there is no more content in the parent element."
    pub(crate) closed: &'static [&'static str],
    /// Whether end of input closes the element (body, html).
    pub(crate) at_end_of_input: bool,
}

/// Start tags that implicitly close an open `p` element.
///
/// "A p element's end tag can be omitted if the p element is immediately
/// followed by an address, article, aside, blockquote, details, div, dl,
/// fieldset, figcaption, figure, footer, form, h1..h6, header, hgroup, hr,
/// main, menu, nav, ol, p, pre, section, table, or ul element..."
const P_OPEN: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup",
    "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Parent end tags that implicitly close an open `p` element.
const P_CLOSED: &[&str] = &[
    "address", "article", "aside", "body", "blockquote", "caption", "details", "dialog",
    "div", "dd", "dt", "fieldset", "figure", "figcaption", "footer", "form", "header",
    "hgroup", "li", "main", "nav", "object", "search", "section", "td", "th", "template",
];

/// Look up the omission rule for an element, if it has one.
///
/// Elements absent from this table require their literal end tag.
pub(crate) fn omission_rule(tag: &str) -> Option<&'static OmissionRule> {
    macro_rules! rule {
        ($open:expr, $closed:expr, $at_end:expr) => {{
            const RULE: OmissionRule = OmissionRule {
                open: $open,
                closed: $closed,
                at_end_of_input: $at_end,
            };
            Some(&RULE)
        }};
    }

    match tag {
        "body" => rule!(&[], &["html"], true),
        "caption" => rule!(&["colgroup", "col", "thead", "tbody", "tfoot", "tr", "th", "td"], &[], false),
        "colgroup" => rule!(&["thead", "tbody", "tfoot", "tr"], &[], false),
        "head" => rule!(&["body"], &[], false),
        "html" => rule!(&[], &[], true),
        "li" => rule!(&["li"], &["ul", "ol", "menu"], false),
        "dd" => rule!(&["dd", "dt"], &["dl", "div"], false),
        "dt" => rule!(&["dd", "dt"], &[], false),
        "option" => rule!(&["option", "optgroup", "hr"], &["select", "datalist", "optgroup"], false),
        "optgroup" => rule!(&["optgroup", "hr"], &["select"], false),
        "p" => rule!(P_OPEN, P_CLOSED, false),
        "rt" => rule!(&["rt", "rp"], &["ruby"], false),
        "rp" => rule!(&["rt", "rp"], &["ruby"], false),
        "thead" => rule!(&["tbody", "tfoot"], &[], false),
        "tbody" => rule!(&["tbody", "tfoot"], &["table"], false),
        "tfoot" => rule!(&[], &["table"], false),
        "td" => rule!(&["td", "th", "tr"], &["tr", "table"], false),
        "th" => rule!(&["td", "th", "tbody"], &["tr", "thead"], false),
        "tr" => rule!(&["tr", "tbody"], &["table", "thead"], false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabled_elements_resolve() {
        let li = omission_rule("li").unwrap();
        assert_eq!(li.open, &["li"]);
        assert_eq!(li.closed, &["ul", "ol", "menu"]);
        assert!(!li.at_end_of_input);

        assert!(omission_rule("html").unwrap().at_end_of_input);
        assert!(omission_rule("body").unwrap().at_end_of_input);
        assert!(omission_rule("div").is_none());
        assert!(omission_rule("span").is_none());
    }

    #[test]
    fn paragraph_follow_sets() {
        let p = omission_rule("p").unwrap();
        assert!(p.open.contains(&"table"));
        assert!(p.open.contains(&"h6"));
        assert!(!p.open.contains(&"span"));
        assert!(p.closed.contains(&"body"));
        assert!(p.closed.contains(&"template"));
        assert!(!p.closed.contains(&"html"));
    }
}
