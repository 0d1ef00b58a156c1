//! Insertion modes after the body or frameset has been closed, and the
//! frameset modes themselves.

use wombat_dom::NodeId;

use super::core::{HtmlTreeBuilder, InsertionMode};
use crate::tokenizer::Token;

impl HtmlTreeBuilder {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // "Process the token using the rules for the "in body" insertion mode."
            t if t.is_whitespace_character() => self.handle_in_body_mode(token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment_in(html, data);
            }

            Token::Doctype { .. } => self.parse_error(token),

            t if t.is_start_tag_named(&["html"]) => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "If the parser was created as part of the HTML fragment parsing
            // algorithm, this is a parse error; ignore the token. Otherwise,
            // switch the insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                if self.fragment {
                    self.end_tag_error(name);
                } else {
                    self.switch_to(InsertionMode::AfterAfterBody);
                }
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stopped = true,

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                self.parse_error(token);
                self.switch_to(InsertionMode::InBody);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name, attributes, ..
            } => match name.as_str() {
                "html" => self.handle_in_body_mode(token),
                // "Insert an HTML element for the token."
                "frameset" => {
                    let _ = self.insert_html_element(name, attributes);
                }
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                "frame" => {
                    let _ = self.insert_void_element(name, attributes);
                }
                "noframes" => self.handle_in_head_mode(token),
                _ => self.parse_error(token),
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token."
                if self.stack_of_open_elements.len() <= 1 {
                    self.end_tag_error(name);
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. If the parser was not created as part of the HTML
                // fragment parsing algorithm (fragment case), and the current
                // node is no longer a frameset element, then switch the
                // insertion mode to "after frameset"."
                let _ = self.stack_of_open_elements.pop();
                if !self.fragment && !self.current_node_is("frameset") {
                    self.switch_to(InsertionMode::AfterFrameset);
                }
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is
            // a parse error. Stop parsing."
            Token::EndOfFile => {
                if self.stack_of_open_elements.len() > 1
                    && let Some(current) = self.current_node()
                {
                    self.unclosed_element_error(current);
                }
                self.stopped = true;
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error(token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            t if t.is_start_tag_named(&["html"]) => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            t if t.is_end_tag_named(&["html"]) => {
                self.switch_to(InsertionMode::AfterAfterFrameset);
            }

            t if t.is_start_tag_named(&["noframes"]) => self.handle_in_head_mode(token),

            Token::EndOfFile => self.stopped = true,

            _ => self.parse_error(token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),

            // "A DOCTYPE token, a character token that is one of U+0009
            // CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED
            // (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE, a start tag
            // whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            t if matches!(t, Token::Doctype { .. })
                || t.is_whitespace_character()
                || t.is_start_tag_named(&["html"]) =>
            {
                self.handle_in_body_mode(token);
            }

            Token::EndOfFile => self.stopped = true,

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.parse_error(token);
                self.switch_to(InsertionMode::InBody);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),

            t if matches!(t, Token::Doctype { .. })
                || t.is_whitespace_character()
                || t.is_start_tag_named(&["html"]) =>
            {
                self.handle_in_body_mode(token);
            }

            Token::EndOfFile => self.stopped = true,

            t if t.is_start_tag_named(&["noframes"]) => self.handle_in_head_mode(token),

            _ => self.parse_error(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_comment_after_html_goes_to_document() {
        let doc = parse("<p>x</p></body></html><!-- end -->");
        assert!(doc.outer_html().ends_with("</html>\n<!-- end -->"));
    }

    #[test]
    fn test_content_after_body_is_reparented() {
        let doc = parse("<p>a</p></body><p>b</p>");
        assert_eq!(doc.body().html(), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_frameset_replaces_body() {
        let doc = parse("<frameset><frame src=a></frameset>");
        assert_eq!(doc.get_elements_by_tag("frame").len(), 1);
        assert!(doc.get_elements_by_tag("body").is_empty());
    }
}
