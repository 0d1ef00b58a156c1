//! Integration tests for HTML tree construction.

use wombat_common::ParseErrorKind;
use wombat_common::warning::was_warned;
use wombat_dom::{NodeId, NodeType};
use wombat_html::{
    Document, OutputSettings, ParserOptions, parse, parse_body_fragment, parse_with_options,
};

/// Helper to parse HTML with pretty printing off, so serializations show
/// the exact tree shape.
fn parse_compact(html: &str) -> Document {
    let mut doc = parse(html);
    *doc.output_settings_mut() = OutputSettings::default().with_pretty_print(false);
    doc
}

/// Helper returning the body's children as compact HTML
fn body_html(html: &str) -> String {
    parse_compact(html).body().html()
}

/// Helper to parse with error tracking and return the error kinds
fn error_kinds(html: &str) -> Vec<ParseErrorKind> {
    parse_with_options(html, ParserOptions::tracking(100))
        .errors()
        .iter()
        .map(|e| e.kind.clone())
        .collect()
}

#[test]
fn test_readme_example() {
    let doc = parse("<b>jsoup");
    assert_eq!(doc.body().html(), "<b>jsoup</b>");
}

#[test]
fn test_document_structure() {
    let doc = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    let tree = doc.tree();

    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 2);
    assert!(matches!(
        tree.get(children[0]).map(|n| &n.node_type),
        Some(NodeType::Doctype(d)) if d.name == "html"
    ));
    assert_eq!(tree.tag_name(children[1]), Some("html"));
    assert!(doc.head().is_some());
    assert_eq!(doc.body().tag_name(), Some("body"));
}

#[test]
fn test_implied_html_head_body() {
    let doc = parse_compact("Hello");
    assert_eq!(
        doc.html(),
        "<html><head></head><body>Hello</body></html>"
    );
}

#[test]
fn test_head_elements_go_to_head() {
    let doc = parse_compact("<title>T</title><meta charset=utf-8><p>x");
    assert_eq!(
        doc.html(),
        "<html><head><title>T</title><meta charset=\"utf-8\"></head><body><p>x</p></body></html>"
    );
    assert_eq!(doc.title(), "T");
}

#[test]
fn test_whitespace_before_html_is_dropped() {
    let doc = parse_compact("  \n<html><body>x</body></html>");
    assert_eq!(doc.html(), "<html><head></head><body>x</body></html>");
}

#[test]
fn test_comment_before_html_stays_on_document() {
    let doc = parse_compact("<!-- top --><p>x");
    assert_eq!(
        doc.html(),
        "<!-- top --><html><head></head><body><p>x</p></body></html>"
    );
}

#[test]
fn test_multiple_text_nodes_merged() {
    let doc = parse("<p>a&amp;b</p>");
    let p = doc.get_elements_by_tag("p")[0];
    let children: Vec<_> = p.children().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].data(), Some("a&b"));
}

#[test]
fn test_attributes_on_repeated_html_and_body_are_merged() {
    let doc = parse("<html lang=en><body class=x><html lang=fr data-a=1><body id=b>");
    let html = doc.document_element().map(|e| (e.attr("lang"), e.attr("data-a")));
    assert_eq!(html, Some((Some("en"), Some("1"))));
    assert_eq!(doc.body().attr("class"), Some("x"));
    assert_eq!(doc.body().attr("id"), Some("b"));
}

// ========== Implied end tags ==========

#[test]
fn test_paragraphs_close_each_other() {
    assert_eq!(body_html("<p>One<p>Two"), "<p>One</p><p>Two</p>");
}

#[test]
fn test_block_start_closes_paragraph() {
    assert_eq!(body_html("<p>a<div>b</div>"), "<p>a</p><div>b</div>");
}

#[test]
fn test_stray_p_end_tag_inserts_empty_paragraph() {
    assert_eq!(body_html("a</p>b"), "a<p></p>b");
}

#[test]
fn test_li_implicit_close() {
    assert_eq!(
        body_html("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_dd_dt_implicit_close() {
    assert_eq!(
        body_html("<dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        body_html("<ul><li>a<ul><li>b</ul><li>c</ul>"),
        "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
    );
}

#[test]
fn test_heading_closes_heading() {
    assert_eq!(body_html("<h1>a<h2>b"), "<h1>a</h1><h2>b</h2>");
}

// ========== Formatting elements ==========

#[test]
fn test_formatting_reconstruction_across_blocks() {
    assert_eq!(
        body_html("<p><b><i>x</p>y"),
        "<p><b><i>x</i></b></p><b><i>y</i></b>"
    );
}

#[test]
fn test_nested_anchor_tags() {
    assert_eq!(
        body_html("<a href=x>1<a href=y>2</a>"),
        "<a href=\"x\">1</a><a href=\"y\">2</a>"
    );
}

#[test]
fn test_adoption_agency_moves_block() {
    assert_eq!(
        body_html("<b>1<p>2</b>3</p>"),
        "<b>1</b><p><b>2</b>3</p>"
    );
}

#[test]
fn test_noahs_ark_limits_duplicates() {
    let doc = parse("<p><b><b><b><b>x</p>y");
    // Only three identical entries survive to be reconstructed around "y".
    let mut depth = 0;
    let mut node = doc.body().children().last();
    while let Some(child) = node.filter(|c| c.tag_name() == Some("b")) {
        depth += 1;
        node = child.children().next();
    }
    assert_eq!(depth, 3);
}

// ========== Special start and end tags ==========

#[test]
fn test_br_end_tag_becomes_br() {
    assert_eq!(body_html("a</br>b"), "a<br>b");
}

#[test]
fn test_image_becomes_img() {
    assert_eq!(body_html("<image src=a>"), "<img src=\"a\">");
}

#[test]
fn test_self_closing_non_void_is_ignored() {
    assert_eq!(body_html("<div/>x"), "<div>x</div>");
    assert!(
        error_kinds("<!doctype html><div/>")
            .contains(&ParseErrorKind::NonVoidSelfClosingTag("div".to_string()))
    );
}

#[test]
fn test_textarea_drops_leading_newline() {
    let doc = parse("<textarea>\nline</textarea>");
    assert_eq!(doc.get_elements_by_tag("textarea")[0].text(), "line");
}

#[test]
fn test_raw_text_elements() {
    let doc = parse("<style>p > a { }</style><script>if (a<b) x()</script>");
    let style = doc.get_elements_by_tag("style")[0];
    assert_eq!(style.children().next().and_then(|c| c.data()), Some("p > a { }"));
    // Both end up in the head.
    assert_eq!(
        doc.head().map(|h| h.children().filter(|c| c.is_element()).count()),
        Some(2)
    );
}

#[test]
fn test_plaintext_swallows_rest() {
    assert_eq!(
        body_html("<plaintext><b>x</b>"),
        "<plaintext><b>x</b></plaintext>"
    );
}

// ========== Tables ==========

#[test]
fn test_table_implied_tbody() {
    assert_eq!(
        body_html("<table><tr><td>1<td>2</table>"),
        "<table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_text_is_foster_parented() {
    assert_eq!(
        body_html("<table>oops<tr><td>cell</table>"),
        "oops<table><tbody><tr><td>cell</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_caption_and_colgroup() {
    assert_eq!(
        body_html("<table><caption>c<col><tr><td>x</table>"),
        "<table><caption>c</caption><colgroup><col></colgroup><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        body_html("<select><option>a<option>b</select>"),
        "<select><option>a</option><option>b</option></select>"
    );
}

// ========== Fragments and errors ==========

#[test]
fn test_body_fragment_keeps_content_in_body() {
    let mut doc = parse_body_fragment("<title>x</title><p>y");
    *doc.output_settings_mut() = OutputSettings::default().with_pretty_print(false);
    assert_eq!(doc.body().html(), "<title>x</title><p>y</p>");
    assert_eq!(doc.head().map(|h| h.html()), Some(String::new()));
}

#[test]
fn test_errors_not_tracked_by_default() {
    assert!(parse("<p><b>x</p>").errors().is_empty());
}

#[test]
fn test_missing_doctype_is_reported() {
    assert_eq!(error_kinds("<p>x").first(), Some(&ParseErrorKind::MissingDoctype));
    assert!(error_kinds("<!DOCTYPE html><p>x").is_empty());
}

#[test]
fn test_error_tracking_is_capped() {
    let doc = parse_with_options("</a></b></c></d>", ParserOptions::tracking(2));
    assert_eq!(doc.errors().len(), 2);
}

#[test]
fn test_unclosed_elements_are_reported() {
    let kinds = error_kinds("<!DOCTYPE html><div><span>x");
    assert!(kinds.iter().any(|k| matches!(k, ParseErrorKind::UnclosedElement(_))));
}

// ========== Template, foreign content and noscript ==========

#[test]
fn test_template_contents_are_ordinary_children() {
    let doc = parse_compact("<template><p>x</p></template><title>T</title>");
    assert_eq!(
        doc.head().map(|h| h.html()),
        Some("<template><p>x</p></template><title>T</title>".to_string())
    );
    assert_eq!(doc.title(), "T");
    assert!(doc.body().html().is_empty());
    assert!(was_warned(
        "HTML Parser",
        "template contents are parsed as ordinary child elements"
    ));
}

#[test]
fn test_select_closed_inside_head_template_stays_in_template() {
    let doc = parse_compact("<template><select><option>a</select><b>x</b></template>");
    assert_eq!(
        doc.head().map(|h| h.html()),
        Some("<template><select><option>a</option></select><b>x</b></template>".to_string())
    );
    assert!(doc.body().html().is_empty());
}

#[test]
fn test_svg_and_math_are_ordinary_elements() {
    assert_eq!(
        body_html("<svg><circle/><rect/></svg><p>x"),
        "<svg><circle /><rect /></svg><p>x</p>"
    );
    assert_eq!(body_html("<math><mi/>x</math>"), "<math><mi />x</math>");
    assert!(was_warned(
        "HTML Parser",
        "SVG and MathML content is parsed as ordinary elements"
    ));
}

#[test]
fn test_self_closed_svg_is_empty() {
    assert_eq!(body_html("<svg/><p>x"), "<svg></svg><p>x</p>");
}

#[test]
fn test_self_closing_honoured_in_foreign_content_without_error() {
    let kinds = error_kinds("<!doctype html><svg><path/></svg>");
    assert!(!kinds.iter().any(|k| matches!(k, ParseErrorKind::NonVoidSelfClosingTag(_))));
}

#[test]
fn test_unknown_self_closing_tag_is_closed() {
    assert_eq!(body_html("<foo/>x"), "<foo />x");
    assert!(
        !error_kinds("<!doctype html><foo/>x")
            .contains(&ParseErrorKind::NonVoidSelfClosingTag("foo".to_string()))
    );
}

#[test]
fn test_noscript_in_head_keeps_head_content() {
    let doc = parse_compact("<noscript><link rel=x></noscript><title>T</title>");
    assert_eq!(
        doc.head().map(|h| h.html()),
        Some("<noscript><link rel=\"x\"></noscript><title>T</title>".to_string())
    );
    assert!(doc.body().html().is_empty());
}

#[test]
fn test_body_content_in_head_noscript_closes_it() {
    let doc = parse_compact("<noscript><p>x</p></noscript>");
    assert_eq!(doc.head().map(|h| h.html()), Some("<noscript></noscript>".to_string()));
    assert_eq!(doc.body().html(), "<p>x</p>");
}
