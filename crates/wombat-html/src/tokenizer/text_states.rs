//! Text content states.
//!
//! [§ 13.2.5.1](https://html.spec.whatwg.org/multipage/parsing.html#data-state) through
//! [§ 13.2.5.17](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
//!
//! The RCDATA, RAWTEXT and script data states differ only in which state they
//! return to and whether character references are recognised, so their
//! less-than sign and end tag states share one implementation each.

use wombat_common::ParseErrorKind;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::TagKind;

/// The less-than sign, end tag open and end tag name states belonging to a
/// raw text state.
const fn raw_states(text_state: TokenizerState) -> (TokenizerState, TokenizerState, TokenizerState) {
    match text_state {
        TokenizerState::RCDATA => (
            TokenizerState::RCDATALessThanSign,
            TokenizerState::RCDATAEndTagOpen,
            TokenizerState::RCDATAEndTagName,
        ),
        TokenizerState::ScriptData => (
            TokenizerState::ScriptDataLessThanSign,
            TokenizerState::ScriptDataEndTagOpen,
            TokenizerState::ScriptDataEndTagName,
        ),
        _ => (
            TokenizerState::RAWTEXTLessThanSign,
            TokenizerState::RAWTEXTEndTagOpen,
            TokenizerState::RAWTEXTEndTagName,
        ),
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.set_return_state(TokenizerState::Data);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.emit_character_token('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof_token(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the RCDATA state.
            // Switch to the character reference state."
            Some('&') => {
                self.set_return_state(TokenizerState::RCDATA);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the RCDATA less-than sign state."
            Some('<') => self.switch_to(TokenizerState::RCDATALessThanSign),
            _ => self.handle_raw_character(),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state(&mut self) {
        if self.current_input_character == Some('<') {
            // "Switch to the RAWTEXT less-than sign state."
            self.switch_to(TokenizerState::RAWTEXTLessThanSign);
        } else {
            self.handle_raw_character();
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn handle_script_data_state(&mut self) {
        if self.current_input_character == Some('<') {
            // "Switch to the script data less-than sign state."
            self.switch_to(TokenizerState::ScriptDataLessThanSign);
        } else {
            self.handle_raw_character();
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// There is no way out of this state other than the end of the input.
    pub(super) fn handle_plaintext_state(&mut self) {
        self.handle_raw_character();
    }

    /// The NULL, EOF and "anything else" entries common to the text states.
    fn handle_raw_character(&mut self) {
        match self.current_input_character {
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit a U+FFFD REPLACEMENT CHARACTER character token."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof_token(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_raw_less_than_sign_state(&mut self, text_state: TokenizerState) {
        let (_, end_tag_open, _) = raw_states(text_state);
        match self.current_input_character {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty string.
            // Switch to the X end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(end_tag_open);
            }
            // Script data: "U+0021 EXCLAMATION MARK (!) - Emit a U+003C LESS-THAN
            // SIGN character token and a U+0021 EXCLAMATION MARK character token."
            //
            // Escaped script text is treated as ordinary script data, so
            // `<!--` never hides a closing `</script>`.
            Some('!') if text_state == TokenizerState::ScriptData => {
                self.emit_str("<!");
                self.switch_to(TokenizerState::ScriptData);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the X state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    pub(super) fn handle_raw_end_tag_open_state(&mut self, text_state: TokenizerState) {
        let (_, _, end_tag_name) = raw_states(text_state);
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to the
            // empty string. Reconsume in the X end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::End);
                self.reconsume_in(end_tag_name);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token and a
            // U+002F SOLIDUS character token. Reconsume in the X state."
            _ => {
                self.emit_str("</");
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    pub(super) fn handle_raw_end_tag_name_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED, U+0020 SPACE
            // If the current end tag token is an appropriate end tag token, then
            // switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - If the current end tag token is an appropriate
            // end tag token, then switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>) - If the current end tag token is an
            // appropriate end tag token, then switch to the data state and emit
            // the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current tag token's tag name. Append the current
            // input character to the temporary buffer."
            // "ASCII lower alpha - Append the current input character to the current
            // tag token's tag name. Append the current input character to the
            // temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                self.push_tag_name(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            // "Anything else"
            _ => self.flush_raw_end_tag(text_state),
        }
    }
}
