//! Integration tests for character reference lookup, decoding and escaping.

use wombat_html::OutputSettings;
use wombat_html::entities::{EscapeContext, any_entity_has_prefix, escape, lookup, unescape, unescape_attribute};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup("amp"), Some("&"));
    assert_eq!(lookup("lt"), Some("<"));
    assert_eq!(lookup("gt"), Some(">"));
    assert_eq!(lookup("quot"), Some("\""));
    assert_eq!(lookup("nbsp"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup("notarealentity"), None);
    assert_eq!(lookup(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a")); // amp, apos, alpha, etc.
    assert!(any_entity_has_prefix("am")); // amp
    assert!(any_entity_has_prefix("amp"));
    assert!(!any_entity_has_prefix("ampx"));
    assert!(!any_entity_has_prefix("xyz"));
}

#[test]
fn test_unescape_text() {
    assert_eq!(unescape("a &amp; b &lt;c&gt;"), "a & b <c>");
    assert_eq!(unescape("&#65;&#x42;"), "AB");
    assert_eq!(unescape("&copy 2024"), "\u{A9} 2024");
    assert_eq!(unescape("&bogus; & done"), "&bogus; & done");
    assert_eq!(unescape("&notreal; &not x"), "&notreal; \u{AC} x");
}

#[test]
fn test_unescape_attribute_keeps_ambiguous_references() {
    assert_eq!(unescape_attribute("?a=1&copy=2"), "?a=1&copy=2");
    assert_eq!(unescape_attribute("?a=1&copy;=2"), "?a=1\u{A9}=2");
    assert_eq!(unescape_attribute("a&amp-b"), "a&amp-b");
}

#[test]
fn test_escape_round_trips_through_unescape() {
    let settings = OutputSettings::default();
    let text = "5 < 6 & \"quoted\"";
    let escaped = escape(text, &settings, EscapeContext::Text);
    assert_eq!(escaped, "5 &lt; 6 &amp; \"quoted\"");
    assert_eq!(unescape(&escaped), text);

    let attr = escape(text, &settings, EscapeContext::Attribute);
    assert_eq!(attr, "5 < 6 &amp; &quot;quoted&quot;");
}
