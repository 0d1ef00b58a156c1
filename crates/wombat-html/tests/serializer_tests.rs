//! Integration tests for HTML serialization.

use wombat_html::{Charset, Document, EscapeMode, OutputSettings, Syntax, parse};

/// Helper to parse and apply output settings
fn parse_with_settings(html: &str, settings: OutputSettings) -> Document {
    let mut doc = parse(html);
    *doc.output_settings_mut() = settings;
    doc
}

#[test]
fn test_pretty_printed_document() {
    let doc = parse("<b>jsoup");
    assert_eq!(
        doc.html(),
        "<html>\n <head></head>\n <body>\n  <b>jsoup</b>\n </body>\n</html>"
    );
    assert_eq!(doc.outer_html(), doc.html());
}

#[test]
fn test_custom_indent_amount() {
    let doc = parse_with_settings("<p>x", OutputSettings::default().with_indent_amount(2));
    assert_eq!(
        doc.html(),
        "<html>\n  <head></head>\n  <body>\n    <p>x</p>\n  </body>\n</html>"
    );
}

#[test]
fn test_compact_output_keeps_whitespace() {
    let doc = parse_with_settings(
        "<p>  a   b </p>",
        OutputSettings::default().with_pretty_print(false),
    );
    assert_eq!(doc.body().html(), "<p>  a   b </p>");
    assert_eq!(parse("<p>  a   b </p>").body().html(), "<p>a b</p>");
}

#[test]
fn test_blocks_get_their_own_lines() {
    let doc = parse("<div><p>a</p><p>b</p></div>");
    assert_eq!(doc.body().html(), "<div>\n <p>a</p>\n <p>b</p>\n</div>");
}

#[test]
fn test_inline_content_stays_on_one_line() {
    let doc = parse("<p>Hello <b>there</b> now</p>");
    assert_eq!(doc.body().html(), "<p>Hello <b>there</b> now</p>");
}

#[test]
fn test_comment_is_indented_among_blocks() {
    let doc = parse("<div><!-- c --><p>x</p></div>");
    assert_eq!(doc.body().html(), "<div>\n <!-- c -->\n <p>x</p>\n</div>");
}

#[test]
fn test_unknown_tag_with_blocks_is_block() {
    let doc = parse("<foo><p>x</p></foo>");
    assert_eq!(doc.body().html(), "<foo>\n <p>x</p>\n</foo>");
}

#[test]
fn test_outer_html_includes_own_tags() {
    let doc = parse("<div><p>x</p></div>");
    let div = doc.get_elements_by_tag("div")[0];
    assert_eq!(div.outer_html(), "<div>\n <p>x</p>\n</div>");
    assert_eq!(div.html(), "<p>x</p>");
}

#[test]
fn test_pre_keeps_whitespace() {
    let doc = parse("<pre>  a\n  b</pre>");
    assert_eq!(doc.body().html(), "<pre>  a\n  b</pre>");
}

#[test]
fn test_raw_text_is_not_escaped() {
    let doc = parse("<script>a<b && c</script>");
    assert_eq!(
        doc.head().map(|h| h.html()),
        Some("<script>a<b && c</script>".to_string())
    );
}

#[test]
fn test_text_is_escaped() {
    let doc = parse("<p>a &lt; b &amp; c &gt; d</p>");
    assert_eq!(doc.body().html(), "<p>a &lt; b &amp; c &gt; d</p>");
}

#[test]
fn test_attribute_values_are_escaped() {
    let doc = parse(r#"<a title='x"y&z<'>t</a>"#);
    assert_eq!(doc.body().html(), r#"<a title="x&quot;y&amp;z<">t</a>"#);
}

#[test]
fn test_boolean_attributes() {
    let doc = parse("<input checked=checked disabled=false>");
    assert_eq!(doc.body().html(), r#"<input checked disabled="false">"#);
}

#[test]
fn test_xml_syntax_closes_void_elements() {
    let doc = parse_with_settings(
        "<p>a<br>b</p>",
        OutputSettings::default().with_syntax(Syntax::Xml),
    );
    assert_eq!(doc.body().html(), "<p>a<br />b</p>");
}

#[test]
fn test_escape_modes_and_charsets() {
    let html = "<p>\u{A9} \u{20AC} \u{A0}</p>";

    assert_eq!(parse(html).body().html(), "<p>\u{A9} \u{20AC} &nbsp;</p>");

    let ascii = parse_with_settings(html, OutputSettings::default().with_charset(Charset::Ascii));
    assert_eq!(ascii.body().html(), "<p>&copy; &#8364; &nbsp;</p>");

    let extended = parse_with_settings(
        html,
        OutputSettings::default().with_escape_mode(EscapeMode::Extended),
    );
    assert_eq!(extended.body().html(), "<p>&copy; &euro; &nbsp;</p>");

    let xhtml = parse_with_settings(
        html,
        OutputSettings::default().with_escape_mode(EscapeMode::Xhtml),
    );
    assert_eq!(xhtml.body().html(), "<p>\u{A9} \u{20AC} &#xa0;</p>");
}

#[test]
fn test_self_closed_unknown_elements_keep_their_form() {
    assert_eq!(parse("<svg><path/></svg>").body().html(), "<svg>\n <path />\n</svg>");
    let doc = parse_with_settings(
        "<svg><g/><g></g></svg>",
        OutputSettings::default().with_pretty_print(false),
    );
    assert_eq!(doc.body().html(), "<svg><g /><g></g></svg>");
}

// ========== Doctypes ==========

#[test]
fn test_html5_doctype() {
    let doc = parse("<!DOCTYPE html><p>x");
    assert!(doc.html().starts_with("<!doctype html>\n<html>"));
}

#[test]
fn test_public_doctype() {
    let doc = parse(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
    );
    assert!(doc.html().starts_with(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
    ));
}

#[test]
fn test_system_doctype() {
    let doc = parse(r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#);
    assert!(
        doc.html()
            .starts_with(r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#)
    );
}

// ========== Deep trees ==========

#[test]
fn test_deeply_nested_elements() {
    let depth = 20_000;
    let html = format!("{}x", "<div>".repeat(depth));
    let doc = parse_with_settings(&html, OutputSettings::default().with_pretty_print(false));

    let expected = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    assert_eq!(doc.body().html(), expected);
    assert_eq!(doc.body().text(), "x");

    // Pretty printing caps the indent, so every line stays short.
    let pretty = parse(&html).body().html();
    assert!(pretty.starts_with("<div>\n <div>\n  <div>"));
    assert!(pretty.lines().all(|line| line.len() <= 30 + "<div>x</div>".len()));
    assert!(pretty.contains(&format!("\n{}<div>x</div>\n", " ".repeat(30))));
}
