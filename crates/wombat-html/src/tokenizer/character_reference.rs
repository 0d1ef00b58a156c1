//! Character reference states.
//!
//! [§ 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state) through
//! [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)

use wombat_common::ParseErrorKind;

use super::core::{HTMLTokenizer, TokenizerState};
use crate::entities::{match_named, numeric_replacement};

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026 AMPERSAND (&)
        // character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// Entered by reconsuming, so the current input character is the first
    /// character of the candidate name. The name is read by looking ahead in
    /// the input rather than one character per step, and only a complete
    /// name is decoded (see [`match_named`]).
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let first_len = self.current_input_character.map_or(0, char::len_utf8);
        let start = self.current_pos - first_len;

        // An unknown name, or a legacy name inside an attribute value that is
        // followed by more name characters, is not a reference. Nothing past
        // the ampersand was consumed, so the ambiguous ampersand state passes
        // the name through as written.
        let Some(found) = match_named(&self.input[start..], self.charref_in_attribute()) else {
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };
        self.current_pos = start + found.len;

        // "If the last character matched is not a U+003B SEMICOLON character (;), then
        // this is a missing-semicolon-after-character-reference parse error."
        if !found.has_semicolon {
            self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two characters
        // corresponding to the character reference name (as given by the second column
        // of the named character references table) to the temporary buffer. Flush code
        // points consumed as a character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(found.value);
        self.flush_code_points_consumed_as_character_reference();
        let return_state = self.take_return_state();
        self.switch_to(return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric - If the character reference was consumed as part of an
            // attribute, then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.charref_in_attribute() {
                    let mut buf = [0; 4];
                    self.push_attribute_value(c.encode_utf8(&mut buf));
                } else {
                    self.emit_character_token(c);
                }
            }
            // "U+003B SEMICOLON (;) - This is an unknown-named-character-reference parse
            // error. Reconsume in the return state."
            Some(';') => {
                self.log_parse_error(ParseErrorKind::UnknownNamedCharacterReference);
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
            // "Anything else - Reconsume in the return state."
            _ => {
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Append the
            // current input character to the temporary buffer. Switch to the hexadecimal
            // character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else - Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_hexdigit())
        {
            // "ASCII hex digit - Reconsume in the hexadecimal character reference state."
            self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_ascii_digit())
        {
            // "ASCII digit - Reconsume in the decimal character reference state."
            self.reconsume_in(TokenizerState::DecimalCharacterReference);
        } else {
            self.absence_of_digits();
        }
    }

    /// "Anything else - This is an absence-of-digits-in-numeric-character-reference
    /// parse error. Flush code points consumed as a character reference. Reconsume
    /// in the return state."
    fn absence_of_digits(&mut self) {
        self.log_parse_error(ParseErrorKind::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference();
        let return_state = self.take_return_state();
        self.reconsume_in(return_state);
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.handle_digits(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.handle_digits(10);
    }

    fn handle_digits(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII digit - Multiply the character reference code by 10. Add a numeric
            // version of the current input character (subtract 0x0030 from the character's
            // code point) to the character reference code."
            //
            // The code saturates; anything above 0x10FFFF is replaced the same way.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            // "U+003B SEMICOLON - Switch to the numeric character reference end state."
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else - This is a missing-semicolon-after-character-reference parse
            // error. Reconsume in the numeric character reference end state."
            _ => {
                self.log_parse_error(ParseErrorKind::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// This state consumes nothing. If it was entered by reconsuming, the
    /// reconsume flag is still set and the return state sees the same character.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let (c, error) = numeric_replacement(self.character_reference_code);
        if let Some(kind) = error {
            self.log_parse_error(kind);
        }

        // "Set the temporary buffer to the empty string. Append a code point equal to
        // the character reference code to the temporary buffer. Flush code points
        // consumed as a character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push(c);
        self.flush_code_points_consumed_as_character_reference();
        let return_state = self.take_return_state();
        self.switch_to(return_state);
    }
}
