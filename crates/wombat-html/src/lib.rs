//! Tolerant HTML parsing and serialization.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data, PLAINTEXT and tag states
//!   - DOCTYPE, comment, CDATA and character reference handling
//! - **HTML Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Every insertion mode except "in template"
//!   - Implied tags, foster parenting and the adoption agency algorithm
//! - **Serializer** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!   with optional pretty printing
//!
//! # Not Implemented
//!
//! - Scripting: `<noscript>` content is parsed as markup
//! - Template contents: parsed as ordinary children of `<template>`
//! - SVG and MathML namespaces: foreign elements are ordinary elements
//!
//! # Example
//!
//! ```
//! let doc = wombat_html::parse("<b>jsoup");
//! assert_eq!(doc.body().html(), "<b>jsoup</b>");
//! ```

/// The parsed document and node handles.
pub mod document;
/// Character reference tables, decoding and escaping.
pub mod entities;
/// HTML tree construction.
pub mod parser;
/// HTML serialization and output settings.
pub mod serializer;
/// Parser configuration.
pub mod settings;
/// Element categories.
pub mod tags;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use document::{Document, NodeRef};
pub use parser::{HtmlTreeBuilder, InsertionMode};
pub use serializer::{Charset, EscapeMode, OutputSettings, Syntax};
pub use settings::ParserOptions;
pub use tokenizer::{HTMLTokenizer, Token, TokenizerState};

/// Parse a complete HTML document.
///
/// Never fails: malformed markup is repaired the way browsers repair it.
/// Parse errors are not recorded; use [`parse_with_options`] to keep them.
#[must_use]
pub fn parse(html: &str) -> Document {
    parse_with_options(html, ParserOptions::default())
}

/// Parse a complete HTML document with the given options.
#[must_use]
pub fn parse_with_options(html: &str, options: ParserOptions) -> Document {
    let builder = HtmlTreeBuilder::new(HTMLTokenizer::new(html), options);
    let (tree, errors) = builder.run();
    tracing::debug!(nodes = tree.len(), errors = errors.len(), "parsed document");
    Document::new(tree, errors)
}

/// Parse a fragment of HTML as the content of `<body>`.
///
/// The `html`, `head` and `body` elements are created first and the input
/// is read in the "in body" insertion mode, so body-level content never
/// ends up in the head.
#[must_use]
pub fn parse_body_fragment(html: &str) -> Document {
    parse_body_fragment_with_options(html, ParserOptions::default())
}

/// Parse a body fragment with the given options.
#[must_use]
pub fn parse_body_fragment_with_options(html: &str, options: ParserOptions) -> Document {
    let builder = HtmlTreeBuilder::for_body_fragment(HTMLTokenizer::new(html), options);
    let (tree, errors) = builder.run();
    tracing::debug!(nodes = tree.len(), errors = errors.len(), "parsed body fragment");
    Document::new(tree, errors)
}
