//! Markup declaration and comment states.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state) through
//! [§ 13.2.5.52](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)

use wombat_common::ParseErrorKind;

use super::core::{HTMLTokenizer, TokenizerState};

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "EOF - Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_comment();
                self.emit_eof_token();
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER character to the comment token's data."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            // "Anything else - Append the current input character to the comment token's data."
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// This state looks ahead instead of consuming a current input character.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
        // consume those two characters, create a comment token whose data is the empty
        // string, and switch to the comment start state."
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.current_comment.clear();
            self.switch_to(TokenizerState::CommentStart);
        }
        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word 'DOCTYPE', consume those characters and switch to the
        // DOCTYPE state."
        else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.switch_to(TokenizerState::DOCTYPE);
        }
        // "Otherwise, if [...] the next seven characters are a case-sensitive match
        // for the string '[CDATA[' [...] Otherwise, this is a cdata-in-html-content
        // parse error. Create a comment token whose data is the '[CDATA[' string.
        // Switch to the bogus comment state."
        //
        // Foreign content is not parsed, so CDATA sections always take this branch.
        else if self.next_few_characters_are("[CDATA[") {
            self.consume_string("[CDATA[");
            self.log_parse_error(ParseErrorKind::CdataInHtmlContent);
            self.current_comment = String::from("[CDATA[");
            self.switch_to(TokenizerState::BogusComment);
        }
        // "Otherwise, this is an incorrectly-opened-comment parse error. Create a
        // comment token whose data is the empty string. Switch to the bogus comment state
        // (don't consume anything in the current state)."
        else {
            self.log_parse_error(ParseErrorKind::IncorrectlyOpenedComment);
            self.current_comment.clear();
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment start dash state."
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
            // parse error. Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "Anything else - Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-closing-of-empty-comment
            // parse error. Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "EOF - This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            None => self.eof_in_comment(),
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Append the current input character to the
            // comment token's data. Switch to the comment less-than sign state."
            Some('<') => {
                self.current_comment.push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end dash state."
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            // "U+0000 NULL - This is an unexpected-null-character parse error. Append a
            // U+FFFD REPLACEMENT CHARACTER character to the comment token's data."
            Some('\0') => {
                self.log_parse_error(ParseErrorKind::UnexpectedNullCharacter);
                self.current_comment.push('\u{FFFD}');
            }
            // "EOF - This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            None => self.eof_in_comment(),
            // "Anything else - Append the current input character to the comment token's data."
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Append the current input character to the
            // comment token's data. Switch to the comment less-than sign bang state."
            Some('!') => {
                self.current_comment.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            // "U+003C LESS-THAN SIGN (<) - Append the current input character to the
            // comment token's data."
            Some('<') => self.current_comment.push('<'),
            // "Anything else - Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            // "Switch to the comment less-than sign bang dash state."
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            // "Reconsume in the comment state."
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            // "Switch to the comment less-than sign bang dash dash state."
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            // "Reconsume in the comment end dash state."
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>), EOF - Reconsume in the comment end state."
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "Anything else - This is a nested-comment parse error. Reconsume in the
            // comment end state."
            Some(_) => {
                self.log_parse_error(ParseErrorKind::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            // "EOF - This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            None => self.eof_in_comment(),
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit the current
            // comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "U+0021 EXCLAMATION MARK (!) - Switch to the comment end bang state."
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data."
            Some('-') => self.current_comment.push('-'),
            // "EOF - This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            None => self.eof_in_comment(),
            // "Anything else - Append two U+002D HYPHEN-MINUS characters (-) to the
            // comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_comment.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Append two U+002D HYPHEN-MINUS characters (-) and
            // a U+0021 EXCLAMATION MARK character (!) to the comment token's data. Switch
            // to the comment end dash state."
            Some('-') => {
                self.current_comment.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an incorrectly-closed-comment parse
            // error. Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error(ParseErrorKind::IncorrectlyClosedComment);
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            // "EOF - This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            None => self.eof_in_comment(),
            // "Anything else - Append two U+002D HYPHEN-MINUS characters (-) and a U+0021
            // EXCLAMATION MARK character (!) to the comment token's data. Reconsume in the
            // comment state."
            Some(_) => {
                self.current_comment.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn eof_in_comment(&mut self) {
        self.log_parse_error(ParseErrorKind::EofInComment);
        self.emit_current_comment();
        self.emit_eof_token();
    }
}
