//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Raw text end tag helpers
//! - Attribute helpers for duplicate detection

use wombat_common::ParseErrorKind;
use wombat_dom::Attribute;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{DoctypeBuilder, TagBuilder, TagKind, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Set the return state to the X state"
    pub(super) const fn set_return_state(&mut self, state: TokenizerState) {
        self.return_state = Some(state);
    }

    /// The return state, defaulting to the data state if none was set.
    pub(super) fn take_return_state(&mut self) -> TokenizerState {
        self.return_state.take().unwrap_or(TokenizerState::Data)
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at the codepoint `offset` characters past the current position
    /// without consuming it.
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    ///
    /// Callers check the characters with `next_few_characters_are*` first;
    /// targets are ASCII so the byte length equals the character count.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// The tokenizer's whitespace set. CR never reaches it after newline
    /// normalization.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Create a new start tag token" / "Create a new end tag token"
    pub(super) fn create_tag(&mut self, kind: TagKind) {
        self.current_tag = Some(TagBuilder::new(kind));
    }

    /// "Create a new DOCTYPE token"
    pub(super) fn create_doctype(&mut self) {
        self.current_doctype = DoctypeBuilder::default();
    }

    /// Append to the current tag token's tag name.
    pub(super) fn push_tag_name(&mut self, c: char) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.name.push(c);
        }
    }

    /// "Emit the current tag token"
    ///
    /// Emitting a start tag records its name for appropriate end tag checks.
    /// End tags lose any attributes and self-closing flag with a parse error.
    pub(super) fn emit_current_tag(&mut self) {
        self.finish_attribute();
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        match tag.kind {
            TagKind::Start => {
                self.last_start_tag_name = Some(tag.name.clone());
            }
            TagKind::End => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !tag.attributes.is_empty() {
                    self.log_parse_error(ParseErrorKind::EndTagWithAttributes);
                }
                // "When an end tag token is emitted with its self-closing flag
                // set, that is an end-tag-with-trailing-solidus parse error."
                if tag.self_closing {
                    self.log_parse_error(ParseErrorKind::EndTagWithTrailingSolidus);
                }
            }
        }
        self.pending.push_back(tag.into_token());
    }

    /// "Emit the current comment token"
    pub(super) fn emit_current_comment(&mut self) {
        let data = std::mem::take(&mut self.current_comment);
        self.pending.push_back(Token::Comment { data });
    }

    /// "Emit the current DOCTYPE token"
    pub(super) fn emit_current_doctype(&mut self) {
        let doctype = std::mem::take(&mut self.current_doctype);
        self.pending.push_back(doctype.into_token());
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending.push_back(Token::new_character(c));
    }

    /// Emit one character token per character of `s`.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.pending.extend(s.chars().map(Token::new_character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.pending.push_back(Token::EndOfFile);
        self.eof_emitted = true;
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_tag) {
            (Some(last), Some(tag)) => tag.kind == TagKind::End && &tag.name == last,
            _ => false,
        }
    }

    /// The "anything else" branch shared by the RCDATA, RAWTEXT and script
    /// data end tag states:
    ///
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// X state."
    pub(super) fn flush_raw_end_tag(&mut self, text_state: TokenizerState) {
        self.emit_str("</");
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_str(&buffer);
        self.current_tag = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token. Set that attribute's
    /// name and value to the empty string."
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_attribute();
        if let Some(tag) = self.current_tag.as_mut() {
            tag.current_attribute = Some(Attribute::new("", ""));
        }
    }

    /// Append to the current attribute's name.
    pub(super) fn push_attribute_name(&mut self, c: char) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.current_attribute.as_mut())
        {
            attr.name.push(c);
        }
    }

    /// Append to the current attribute's value.
    pub(super) fn push_attribute_value(&mut self, s: &str) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.current_attribute.as_mut())
        {
            attr.value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// The comparison runs when the attribute is committed, which gives the
    /// same result: the first occurrence wins.
    pub(super) fn finish_attribute(&mut self) {
        let duplicate = self.current_tag.as_mut().and_then(TagBuilder::finish_attribute);
        if let Some(name) = duplicate {
            self.log_parse_error(ParseErrorKind::DuplicateAttribute(name));
        }
    }

    /// "If the character reference was consumed as part of an attribute"
    pub(super) const fn charref_in_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.charref_in_attribute() {
            self.push_attribute_value(&buffer);
        } else {
            self.emit_str(&buffer);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors in HTML are not fatal; the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, kind: ParseErrorKind) {
        self.record_error(kind);
    }
}
