//! Parse errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors. The error handling for parse errors
//! is well-defined."
//!
//! Parse errors never abort parsing. They are collected in a [`ParseErrorList`]
//! whose capacity is chosen by the caller; a list with a capacity of zero
//! tracks nothing.

use std::slice;

use thiserror::Error;

/// The kind of a parse error.
///
/// Tokenizer errors use the names from the
/// [error table](https://html.spec.whatwg.org/multipage/parsing.html#parse-error-abrupt-closing-of-empty-comment).
/// Tree construction errors carry the offending tag or token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// "unexpected-null-character"
    #[error("unexpected null character")]
    UnexpectedNullCharacter,
    /// "unexpected-question-mark-instead-of-tag-name"
    #[error("unexpected question mark instead of tag name")]
    UnexpectedQuestionMarkInsteadOfTagName,
    /// "invalid-first-character-of-tag-name"
    #[error("invalid first character of tag name")]
    InvalidFirstCharacterOfTagName,
    /// "missing-end-tag-name"
    #[error("missing end tag name")]
    MissingEndTagName,
    /// "eof-before-tag-name"
    #[error("end of file before tag name")]
    EofBeforeTagName,
    /// "eof-in-tag"
    #[error("end of file in tag")]
    EofInTag,
    /// "unexpected-equals-sign-before-attribute-name"
    #[error("unexpected equals sign before attribute name")]
    UnexpectedEqualsSignBeforeAttributeName,
    /// "unexpected-character-in-attribute-name"
    #[error("unexpected character {0:?} in attribute name")]
    UnexpectedCharacterInAttributeName(char),
    /// "missing-attribute-value"
    #[error("missing attribute value")]
    MissingAttributeValue,
    /// "unexpected-character-in-unquoted-attribute-value"
    #[error("unexpected character {0:?} in unquoted attribute value")]
    UnexpectedCharacterInUnquotedAttributeValue(char),
    /// "missing-whitespace-between-attributes"
    #[error("missing whitespace between attributes")]
    MissingWhitespaceBetweenAttributes,
    /// "unexpected-solidus-in-tag"
    #[error("unexpected solidus in tag")]
    UnexpectedSolidusInTag,
    /// "duplicate-attribute"
    #[error("duplicate attribute {0:?}")]
    DuplicateAttribute(String),
    /// "end-tag-with-attributes"
    #[error("end tag with attributes")]
    EndTagWithAttributes,
    /// "end-tag-with-trailing-solidus"
    #[error("end tag with trailing solidus")]
    EndTagWithTrailingSolidus,
    /// "incorrectly-opened-comment"
    #[error("incorrectly opened comment")]
    IncorrectlyOpenedComment,
    /// "abrupt-closing-of-empty-comment"
    #[error("abrupt closing of empty comment")]
    AbruptClosingOfEmptyComment,
    /// "eof-in-comment"
    #[error("end of file in comment")]
    EofInComment,
    /// "nested-comment"
    #[error("nested comment")]
    NestedComment,
    /// "incorrectly-closed-comment"
    #[error("incorrectly closed comment")]
    IncorrectlyClosedComment,
    /// "cdata-in-html-content"
    #[error("CDATA section in HTML content")]
    CdataInHtmlContent,
    /// "eof-in-doctype"
    #[error("end of file in DOCTYPE")]
    EofInDoctype,
    /// "missing-whitespace-before-doctype-name"
    #[error("missing whitespace before DOCTYPE name")]
    MissingWhitespaceBeforeDoctypeName,
    /// "missing-doctype-name"
    #[error("missing DOCTYPE name")]
    MissingDoctypeName,
    /// "invalid-character-sequence-after-doctype-name"
    #[error("invalid character sequence after DOCTYPE name")]
    InvalidCharacterSequenceAfterDoctypeName,
    /// "missing-whitespace-after-doctype-public-keyword" and its system twin
    #[error("missing whitespace after DOCTYPE keyword")]
    MissingWhitespaceAfterDoctypeKeyword,
    /// "missing-doctype-public-identifier" and its system twin
    #[error("missing DOCTYPE identifier")]
    MissingDoctypeIdentifier,
    /// "missing-quote-before-doctype-public-identifier" and its system twin
    #[error("missing quote before DOCTYPE identifier")]
    MissingQuoteBeforeDoctypeIdentifier,
    /// "abrupt-doctype-public-identifier" and its system twin
    #[error("abrupt DOCTYPE identifier")]
    AbruptDoctypeIdentifier,
    /// "missing-whitespace-between-doctype-public-and-system-identifiers"
    #[error("missing whitespace between DOCTYPE public and system identifiers")]
    MissingWhitespaceBetweenDoctypeIdentifiers,
    /// "unexpected-character-after-doctype-system-identifier"
    #[error("unexpected character after DOCTYPE system identifier")]
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// "missing-semicolon-after-character-reference"
    #[error("missing semicolon after character reference")]
    MissingSemicolonAfterCharacterReference,
    /// "unknown-named-character-reference"
    #[error("unknown named character reference")]
    UnknownNamedCharacterReference,
    /// "absence-of-digits-in-numeric-character-reference"
    #[error("absence of digits in numeric character reference")]
    AbsenceOfDigitsInNumericCharacterReference,
    /// "null-character-reference", "character-reference-outside-unicode-range",
    /// "surrogate-character-reference", "noncharacter-character-reference",
    /// "control-character-reference"
    #[error("invalid numeric character reference 0x{0:X}")]
    InvalidNumericCharacterReference(u32),
    /// A token that the current insertion mode does not accept.
    #[error("unexpected {token} in insertion mode {mode}")]
    UnexpectedToken {
        /// Short description of the token (e.g. `<table>` or `DOCTYPE`).
        token: String,
        /// Name of the insertion mode that rejected it.
        mode: String,
    },
    /// An end tag with no matching open element in scope.
    #[error("unexpected end tag </{0}>")]
    UnexpectedEndTag(String),
    /// A self-closing flag on a start tag for a non-void HTML element.
    #[error("self-closing flag on non-void element <{0}>")]
    NonVoidSelfClosingTag(String),
    /// An element still open when it was implicitly closed.
    #[error("element <{0}> was not closed")]
    UnclosedElement(String),
    /// The document did not start with a DOCTYPE.
    #[error("missing DOCTYPE")]
    MissingDoctype,
}

/// A single parse error with the input offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {kind}")]
pub struct ParseError {
    /// Byte offset into the (newline-normalized) input.
    pub position: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a parse error at the given offset.
    #[must_use]
    pub const fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// A capped list of parse errors.
///
/// Errors past the configured maximum are dropped. The default list tracks
/// nothing, so parsing pays no cost for error bookkeeping unless asked to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrorList {
    errors: Vec<ParseError>,
    max_size: usize,
}

impl ParseErrorList {
    /// A list that records no errors.
    #[must_use]
    pub const fn no_tracking() -> Self {
        Self {
            errors: Vec::new(),
            max_size: 0,
        }
    }

    /// A list that records up to `max_size` errors.
    #[must_use]
    pub fn tracking(max_size: usize) -> Self {
        Self {
            errors: Vec::with_capacity(max_size.min(16)),
            max_size,
        }
    }

    /// An empty list with the same limit as `self`.
    #[must_use]
    pub fn empty_copy(&self) -> Self {
        Self::tracking(self.max_size)
    }

    /// Returns true if another error would be recorded.
    #[must_use]
    pub fn can_add_error(&self) -> bool {
        self.errors.len() < self.max_size
    }

    /// Record an error if there is room. Returns true if it was kept.
    pub fn push(&mut self, error: ParseError) -> bool {
        if !self.can_add_error() {
            return false;
        }
        tracing::debug!(position = error.position, "parse error: {}", error.kind);
        self.errors.push(error);
        true
    }

    /// The maximum number of errors this list keeps.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the recorded errors in the order they were found.
    pub fn iter(&self) -> slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    /// The recorded errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }
}

impl<'a> IntoIterator for &'a ParseErrorList {
    type Item = &'a ParseError;
    type IntoIter = slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tracking_drops_everything() {
        let mut list = ParseErrorList::no_tracking();
        assert!(!list.can_add_error());
        assert!(!list.push(ParseError::new(0, ParseErrorKind::EofInTag)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_tracking_caps_at_max_size() {
        let mut list = ParseErrorList::tracking(2);
        assert!(list.push(ParseError::new(1, ParseErrorKind::EofInTag)));
        assert!(list.push(ParseError::new(2, ParseErrorKind::EofInComment)));
        assert!(!list.push(ParseError::new(3, ParseErrorKind::EofInDoctype)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[1].position, 2);
    }

    #[test]
    fn test_empty_copy_keeps_limit() {
        let mut list = ParseErrorList::tracking(5);
        let _ = list.push(ParseError::new(0, ParseErrorKind::MissingDoctype));
        let copy = list.empty_copy();
        assert!(copy.is_empty());
        assert_eq!(copy.max_size(), 5);
    }

    #[test]
    fn test_display_includes_position_and_kind() {
        let error = ParseError::new(
            7,
            ParseErrorKind::UnexpectedToken {
                token: "<table>".to_string(),
                mode: "InSelect".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "7: unexpected <table> in insertion mode InSelect"
        );
        assert_eq!(
            ParseErrorKind::DuplicateAttribute("id".to_string()).to_string(),
            "duplicate attribute \"id\""
        );
    }
}
