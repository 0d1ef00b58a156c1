//! DOCTYPE states.
//!
//! [§ 13.2.5.53](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state) through
//! [§ 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
//!
//! The public and system identifier states mirror each other exactly, so each
//! pair is implemented once and parameterised by [`IdentifierKind`].

use wombat_common::ParseErrorKind;

use super::core::{HTMLTokenizer, IdentifierKind, TokenizerState};

impl IdentifierKind {
    const fn before_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::BeforeDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::BeforeDOCTYPESystemIdentifier,
        }
    }

    const fn quoted_state(self, quote: char) -> TokenizerState {
        match (self, quote) {
            (Self::Public, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (Self::Public, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (Self::System, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (Self::System, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        }
    }

    const fn after_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::AfterDOCTYPESystemIdentifier,
        }
    }
}

impl HTMLTokenizer {
    fn doctype_identifier_mut(&mut self, kind: IdentifierKind) -> &mut Option<String> {
        match kind {
            IdentifierKind::Public => &mut self.current_doctype.public_identifier,
            IdentifierKind::System => &mut self.current_doctype.system_identifier,
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    const fn force_quirks(&mut self) {
        self.current_doctype.force_quirks = true;
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInDoctype);
        self.force_quirks();
        self.emit_current_doctype();
        self.emit_eof_token();
    }

    /// "Switch to the data state. Emit the current DOCTYPE token."
    fn finish_doctype(&mut self) {
        self.switch_to(TokenizerState::Data);
        self.emit_current_doctype();
    }

    /// Force quirks and reconsume in the bogus DOCTYPE state, recording `kind`.
    fn bogus_doctype(&mut self, kind: ParseErrorKind) {
        self.log_parse_error(kind);
        self.force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        self.create_doctype();
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Reconsume in the before DOCTYPE name state."
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0000 NULL - This is an unexpected-null-character parse error. Create a new
            // DOCTYPE token. Set the token's name to a U+FFFD REPLACEMENT CHARACTER character.
            // Switch to the DOCTYPE name state."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.current_doctype.name = Some(String::from('\u{FFFD}'));
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse error.
            // Create a new DOCTYPE token. Set its force-quirks flag to on. Switch to the data
            // state. Emit the current token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingDoctypeName);
                self.force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the token's name to the
            // lowercase version of the current input character. Switch to the DOCTYPE name state."
            // "Anything else - Create a new DOCTYPE token. Set the token's name to the
            // current input character. Switch to the DOCTYPE name state."
            Some(c) => {
                self.current_doctype.name = Some(String::from(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        let c = match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Switch to the after DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
                return;
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // DOCTYPE token."
            Some('>') => {
                self.finish_doctype();
                return;
            }
            None => {
                self.eof_in_doctype();
                return;
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER character to the current DOCTYPE token's name."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                '\u{FFFD}'
            }
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current DOCTYPE token's name."
            Some(c) => c.to_ascii_lowercase(),
        };
        self.current_doctype.name.get_or_insert_with(String::new).push(c);
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            // "Anything else - If the six characters starting from the current input
            // character are an ASCII case-insensitive match for the word 'PUBLIC', then
            // consume those characters and switch to the after DOCTYPE public keyword state.
            // Otherwise, if the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word 'SYSTEM', then consume those
            // characters and switch to the after DOCTYPE system keyword state."
            Some(c) => {
                let start = self.current_pos - c.len_utf8();
                let word = self.input.get(start..start + 6).unwrap_or_default();
                if word.eq_ignore_ascii_case("PUBLIC") {
                    self.current_pos = start + 6;
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if word.eq_ignore_ascii_case("SYSTEM") {
                    self.current_pos = start + 6;
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    // "Otherwise, this is an invalid-character-sequence-after-doctype-name
                    // parse error. Set the current DOCTYPE token's force-quirks flag to on.
                    // Reconsume in the bogus DOCTYPE state."
                    self.bogus_doctype(ParseErrorKind::InvalidCharacterSequenceAfterDoctypeName);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, kind: IdentifierKind) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Switch to the before DOCTYPE public identifier state."
            Some(c) if Self::is_whitespace_char(c) => self.switch_to(kind.before_state()),
            // "U+0022 QUOTATION MARK (\") - This is a missing-whitespace-after-doctype-public-keyword
            // parse error. Set the current DOCTYPE token's public identifier to the empty string
            // (not missing), then switch to the DOCTYPE public identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceAfterDoctypeKeyword);
                *self.doctype_identifier_mut(kind) = Some(String::new());
                self.switch_to(kind.quoted_state(quote));
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-public-identifier
            // parse error. Set the current DOCTYPE token's force-quirks flag to on. Switch to
            // the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingDoctypeIdentifier);
                self.force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-quote-before-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume in the
            // bogus DOCTYPE state."
            Some(_) => self.bogus_doctype(ParseErrorKind::MissingQuoteBeforeDoctypeIdentifier),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, kind: IdentifierKind) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0022 QUOTATION MARK (\") - Set the current DOCTYPE token's public identifier
            // to the empty string (not missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                *self.doctype_identifier_mut(kind) = Some(String::new());
                self.switch_to(kind.quoted_state(quote));
            }
            Some('>') => {
                self.log_parse_error(ParseErrorKind::MissingDoctypeIdentifier);
                self.force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ParseErrorKind::MissingQuoteBeforeDoctypeIdentifier),
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and its single-quoted and system identifier counterparts.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, kind: IdentifierKind, quote: char) {
        let c = match self.current_input_character {
            // "U+0022 QUOTATION MARK (\") - Switch to the after DOCTYPE public identifier state."
            Some(c) if c == quote => {
                self.switch_to(kind.after_state());
                return;
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-doctype-public-identifier
            // parse error. Set the current DOCTYPE token's force-quirks flag to on. Switch to
            // the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::AbruptDoctypeIdentifier);
                self.force_quirks();
                self.finish_doctype();
                return;
            }
            None => {
                self.eof_in_doctype();
                return;
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER character to the current DOCTYPE token's
            // public identifier."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                '\u{FFFD}'
            }
            // "Anything else - Append the current input character to the current DOCTYPE
            // token's public identifier."
            Some(c) => c,
        };
        self.doctype_identifier_mut(kind)
            .get_or_insert_with(String::new)
            .push(c);
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM FEED,
            // U+0020 SPACE - Switch to the between DOCTYPE public and system identifiers state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => self.finish_doctype(),
            // "U+0022 QUOTATION MARK (\") - This is a
            // missing-whitespace-between-doctype-public-and-system-identifiers parse error.
            // Set the current DOCTYPE token's system identifier to the empty string (not
            // missing), then switch to the DOCTYPE system identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(ParseErrorKind::MissingWhitespaceBetweenDoctypeIdentifiers);
                self.current_doctype.system_identifier = Some(String::new());
                self.switch_to(IdentifierKind::System.quoted_state(quote));
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ParseErrorKind::MissingQuoteBeforeDoctypeIdentifier),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            Some(quote @ ('"' | '\'')) => {
                self.current_doctype.system_identifier = Some(String::new());
                self.switch_to(IdentifierKind::System.quoted_state(quote));
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ParseErrorKind::MissingQuoteBeforeDoctypeIdentifier),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            // "Anything else - This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.log_parse_error(ParseErrorKind::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the DOCTYPE token."
            Some('>') => self.finish_doctype(),
            // "U+0000 NULL - This is an unexpected-null-character parse error. Ignore the character."
            Some('\0') => self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_current_doctype();
                self.emit_eof_token();
            }
            // "Anything else - Ignore the character."
            Some(_) => {}
        }
    }
}
