//! Integration tests for the serializer and the parse/serialize round trip.

use tern_html::{
    SerializeOptions, parse_element, parse_fragments, parse_html, serialize_fragments,
    serialize_node,
};

/// Helper to parse one element and serialize it back with default options.
fn through_element(input: &str) -> String {
    let tree = parse_element(input).expect("input should parse");
    let root = tree.document_element().expect("tree should have an element");
    serialize_node(&tree, root, SerializeOptions::default())
}

/// Helper to parse a fragment list and serialize it back with default
/// options.
fn through_fragments(input: &str) -> String {
    let tree = parse_fragments(input).expect("input should parse");
    serialize_fragments(&tree, SerializeOptions::default())
}

/// Helper asserting byte-for-byte round-tripping of canonical input.
fn assert_round_trip(input: &str) {
    assert_eq!(through_fragments(input), input);
}

#[test]
fn omitted_end_tags_are_written_out() {
    assert_eq!(
        through_element("<ul><li>A<li>B</ul>"),
        "<ul><li>A</li><li>B</li></ul>"
    );
    assert_eq!(
        through_element("<dl><dt>a<dd>b</dl>"),
        "<dl><dt>a</dt><dd>b</dd></dl>"
    );
}

#[test]
fn foreign_self_closing_drops_the_slash() {
    // The self-closing flag survives in the tree but serializes without a
    // slash and without an end tag.
    assert_eq!(
        through_element("<svg><animateTransform/></svg>"),
        "<svg><animateTransform></svg>"
    );
}

#[test]
fn cdata_round_trips_exactly() {
    assert_eq!(
        through_element("<math><ms><![CDATA[x<y]]></ms></math>"),
        "<math><ms><![CDATA[x<y]]></ms></math>"
    );
}

#[test]
fn duplicate_attributes_round_trip_in_order() {
    assert_round_trip("<input on:click=\"h\" on:click=\"l\">");
}

#[test]
fn raw_text_round_trips_exactly() {
    assert_round_trip("<script>a</s a</script>");
    assert_round_trip("<style>p > span { color: red; }</style>");
    assert_round_trip("<textarea>a < b</textarea>");
}

#[test]
fn html_document_round_trips_with_bom() {
    let input = "\u{FEFF}<!DOCTYPE html><html><body></body></html>";
    let tree = parse_html(input).unwrap();
    assert_eq!(serialize_fragments(&tree, SerializeOptions::default()), input);
}

#[test]
fn doctype_is_canonicalized() {
    let tree = parse_html("<!doctype html><html></html>").unwrap();
    assert_eq!(
        serialize_fragments(&tree, SerializeOptions::default()),
        "<!DOCTYPE html><html></html>"
    );
}

#[test]
fn void_self_closing_slash_is_dropped() {
    assert_eq!(through_element("<br/>"), "<br>");
    assert_eq!(through_element("<img src=\"x\"/>"), "<img src=\"x\">");
    // The void spelling without a slash is already canonical.
    assert_round_trip("<br>");
}

#[test]
fn boolean_attributes_collapse_to_bare_names() {
    assert_eq!(
        through_element("<input disabled=\"\" checked=\"checked\">"),
        "<input disabled checked>"
    );
    // The bare spelling round-trips.
    assert_round_trip("<input disabled required>");
}

#[test]
fn attribute_quoting_switches_on_embedded_double_quote() {
    assert_round_trip("<div data-say='he said \"hi\"'></div>");
    assert_round_trip("<div title=\"plain\"></div>");
    // Unquoted and single-quoted values normalize to double quotes.
    assert_eq!(
        through_element("<div class=a id='b'></div>"),
        "<div class=\"a\" id=\"b\"></div>"
    );
}

#[test]
fn comments_can_be_removed() {
    let tree = parse_fragments("a<!--x-->b<div><!--y--></div>").unwrap();
    assert_eq!(
        serialize_fragments(&tree, SerializeOptions::default()),
        "a<!--x-->b<div><!--y--></div>"
    );
    assert_eq!(
        serialize_fragments(&tree, SerializeOptions { remove_comments: true }),
        "ab<div></div>"
    );
}

#[test]
fn canonical_fragments_round_trip() {
    for input in [
        "",
        "just text",
        "  <span>x</span>  ",
        "<div class=\"a\"><em>x</em></div>",
        "<p>one</p><p>two</p>",
        "<!-- note --><section></section>",
        "<template shadowrootmode=\"open\"><style>p{}</style></template>",
        "<svg viewBox=\"0 0 1 1\"><circle cx=\"1\"></circle></svg>",
        "<my-widget aria-label=\"w\">x</my-widget>",
        "<title>My <test> Title</title>",
    ] {
        assert_round_trip(input);
    }
}

#[test]
fn serialize_parse_serialize_is_stable() {
    // Idempotence: once serialized, reparsing and reserializing changes
    // nothing further, including for inputs that needed normalization.
    for input in [
        "<ul><li>A<li>B</ul>",
        "<div CLASS=x><p>a<p>b</div>",
        "<html><head><title>t</title><body>hi",
        "<input type=text/>",
        "<math><ms><![CDATA[x<y]]></ms></math>",
    ] {
        let first = through_fragments(input);
        assert_eq!(through_fragments(&first), first, "input: {input}");
    }
}

#[test]
fn serialize_single_nodes() {
    let tree = parse_fragments("text<!--c--><b>x</b>").unwrap();
    let roots: Vec<_> = tree.children(tree.root()).to_vec();
    let options = SerializeOptions::default();
    assert_eq!(serialize_node(&tree, roots[0], options), "text");
    assert_eq!(serialize_node(&tree, roots[1], options), "<!--c-->");
    assert_eq!(serialize_node(&tree, roots[2], options), "<b>x</b>");
}

#[test]
fn body_and_html_expansion_at_end_of_input() {
    assert_eq!(
        through_element("<html><body>hi"),
        "<html><body>hi</body></html>"
    );
}
