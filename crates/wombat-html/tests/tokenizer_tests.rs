//! Integration tests for the HTML tokenizer.

use wombat_common::{ParseErrorKind, ParseErrorList};
use wombat_html::{HTMLTokenizer, Token, TokenizerState};

/// Helper to tokenize a string and return every token, EOF included
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).collect()
}

/// Helper that reads the first (start tag) token, then switches the
/// tokenizer the way the tree builder would for a raw text element.
fn tokenize_raw(input: &str, state: TokenizerState) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let mut tokens: Vec<Token> = tokenizer.next().into_iter().collect();
    tokenizer.set_state(state);
    tokens.extend(tokenizer);
    tokens
}

/// Helper to concatenate the character tokens
fn characters(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_iterator_ends_after_eof() {
    let mut tokenizer = HTMLTokenizer::new("");
    assert!(matches!(tokenizer.next(), Some(Token::EndOfFile)));
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(characters(&tokens), "a\nb\nc");
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<DIV>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_processing_instruction_is_bogus_comment() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, "?xml version=\"1.0\"?");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_cdata_in_html_is_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, "[CDATA[x]]");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_quoting_styles() {
    let tokens = tokenize(r#"<div a="foo" b='bar' c=baz>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes.get("a"), Some("foo"));
            assert_eq!(attributes.get("b"), Some("bar"));
            assert_eq!(attributes.get("c"), Some("baz"));
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attributes_keep_source_order() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, ["type", "id", "disabled"]);
            assert_eq!(attributes.get("disabled"), Some(""));
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let mut tokenizer = HTMLTokenizer::with_errors("<p id=a ID=b>", ParseErrorList::tracking(10));
    match tokenizer.next() {
        Some(Token::StartTag { attributes, .. }) => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes.get("id"), Some("a"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(
        tokenizer
            .errors()
            .iter()
            .any(|e| e.kind == ParseErrorKind::DuplicateAttribute("id".to_string()))
    );
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>";
    let tokens = tokenize(html);

    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();

    assert_eq!(start_tags, 4); // html, head, title, body
    assert_eq!(end_tags, 4); // /title, /head, /body, /html
}

#[test]
fn test_less_than_without_tag_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(characters(&tokens), "a < b");
}

// ========== Raw text states ==========

#[test]
fn test_rawtext_ignores_markup() {
    let tokens = tokenize_raw("<style><div>not a tag</div></style>", TokenizerState::RAWTEXT);
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert_eq!(characters(&tokens), "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name } if name == "style"));
}

#[test]
fn test_rawtext_needs_appropriate_end_tag() {
    let tokens = tokenize_raw("<style>a</notastyle>b</style>", TokenizerState::RAWTEXT);
    assert_eq!(characters(&tokens), "a</notastyle>b");
}

#[test]
fn test_rcdata_decodes_references() {
    let tokens = tokenize_raw("<title>a &lt; <b></title>", TokenizerState::RCDATA);
    assert_eq!(characters(&tokens), "a < <b>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name } if name == "title"));
}

#[test]
fn test_rawtext_keeps_references() {
    let tokens = tokenize_raw("<xmp>&amp;</xmp>", TokenizerState::RAWTEXT);
    assert_eq!(characters(&tokens), "&amp;");
}

#[test]
fn test_script_data() {
    let tokens = tokenize_raw("<script>if (a<b) {}</script>", TokenizerState::ScriptData);
    assert_eq!(characters(&tokens), "if (a<b) {}");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name } if name == "script"));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_raw("<plaintext></plaintext><b>", TokenizerState::PLAINTEXT);
    assert_eq!(characters(&tokens), "</plaintext><b>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert_eq!(characters(&tokens), "a & b");
}

#[test]
fn test_named_character_references() {
    assert_eq!(characters(&tokenize("a &amp; b")), "a & b");
    assert_eq!(characters(&tokenize("&lt;div&gt;")), "<div>");
    assert_eq!(characters(&tokenize("&copy;&nbsp;")), "\u{A9}\u{A0}");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon should still work
    assert_eq!(characters(&tokenize("&amp is ok")), "& is ok");
}

#[test]
fn test_named_character_reference_unknown() {
    // Unknown entities should be passed through as-is
    assert_eq!(characters(&tokenize("&notreal;")), "&notreal;");
}

#[test]
fn test_named_character_reference_needs_whole_name() {
    // A legacy name that only prefixes a longer word is not decoded
    assert_eq!(characters(&tokenize("&notreal; &amp x")), "&notreal; & x");
    assert_eq!(characters(&tokenize("&copyright")), "&copyright");
    assert_eq!(characters(&tokenize("&not x")), "\u{AC} x");
}

#[test]
fn test_unknown_named_reference_is_reported() {
    let mut tokenizer = HTMLTokenizer::with_errors("&bogus;", ParseErrorList::tracking(10));
    assert_eq!(characters(&tokenizer.by_ref().collect::<Vec<_>>()), "&bogus;");
    assert!(
        tokenizer
            .errors()
            .iter()
            .any(|e| e.kind == ParseErrorKind::UnknownNamedCharacterReference)
    );
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(characters(&tokenize("&#65;&#x42;&#X43;")), "ABC");
    // Windows-1252 replacements and out-of-range values
    assert_eq!(characters(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(characters(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(characters(&tokenize("&#x110000;")), "\u{FFFD}");
}

#[test]
fn test_numeric_character_reference_without_digits() {
    assert_eq!(characters(&tokenize("&#;")), "&#;");
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2&copy=3">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            // A legacy reference followed by '=' stays literal in attributes
            assert_eq!(attributes.get("href"), Some("?a=1&b=2&copy=3"));
        }
        _ => panic!("Expected StartTag token"),
    }
}

// ========== Errors ==========

#[test]
fn test_errors_are_not_tracked_by_default() {
    let mut tokenizer = HTMLTokenizer::new("<p id=a id=b>&#0;");
    for _ in tokenizer.by_ref() {}
    assert!(tokenizer.errors().is_empty());
}

#[test]
fn test_error_list_is_capped() {
    let mut tokenizer = HTMLTokenizer::with_errors("</a x></b y></c z>", ParseErrorList::tracking(2));
    for _ in tokenizer.by_ref() {}
    assert_eq!(tokenizer.errors().len(), 2);
    assert_eq!(tokenizer.errors().iter().next().map(|e| &e.kind), Some(&ParseErrorKind::EndTagWithAttributes));
}
