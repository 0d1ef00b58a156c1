//! [§ 13.2.6.4.16](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
//! and [§ 13.2.6.4.17](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)

use super::core::HtmlTreeBuilder;
use crate::tokenizer::Token;

const TABLE_PARTS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl HtmlTreeBuilder {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.parse_error(token),

            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name, attributes, ..
            } => match name.as_str() {
                "html" => self.handle_in_body_mode(token),

                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node from
                // the stack of open elements. Insert an HTML element for the token."
                "option" => {
                    self.pop_if_current_is("option");
                    let _ = self.insert_html_element(name, attributes);
                }

                // "A start tag whose tag name is "optgroup""
                "optgroup" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_html_element(name, attributes);
                }

                // "A start tag whose tag name is "hr""
                "hr" => {
                    self.pop_if_current_is("option");
                    self.pop_if_current_is("optgroup");
                    let _ = self.insert_void_element(name, attributes);
                }

                // "A start tag whose tag name is "select""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. Otherwise:
                // Pop elements from the stack of open elements until a select
                // element has been popped from the stack. Reset the insertion
                // mode appropriately."
                "select" => {
                    self.parse_error(token);
                    if self.has_element_in_select_scope("select") {
                        self.close_select();
                    }
                }

                // "A start tag whose tag name is one of: "input", "keygen", "textarea""
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. Otherwise:
                // ... Reprocess the token."
                "input" | "keygen" | "textarea" => {
                    self.parse_error(token);
                    if self.has_element_in_select_scope("select") {
                        self.close_select();
                        self.process_token(token);
                    }
                }

                "script" | "template" => self.handle_in_head_mode(token),

                // "Anything else"
                // "Parse error. Ignore the token."
                _ => self.parse_error(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // "First, if the current node is an option element, and the
                    // node immediately before it in the stack of open elements
                    // is an optgroup element, then pop the current node from
                    // the stack of open elements."
                    let len = self.stack_of_open_elements.len();
                    if self.current_node_is("option")
                        && len >= 2
                        && self.get_tag_name(self.stack_of_open_elements[len - 2])
                            == Some("optgroup")
                    {
                        let _ = self.stack_of_open_elements.pop();
                    }
                    // "If the current node is an optgroup element, then pop that
                    // node from the stack of open elements. Otherwise, this is a
                    // parse error; ignore the token."
                    if self.current_node_is("optgroup") {
                        let _ = self.stack_of_open_elements.pop();
                    } else {
                        self.end_tag_error(name);
                    }
                }

                // "An end tag whose tag name is "option""
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.stack_of_open_elements.pop();
                    } else {
                        self.end_tag_error(name);
                    }
                }

                // "An end tag whose tag name is "select""
                "select" => {
                    if self.has_element_in_select_scope("select") {
                        self.close_select();
                    } else {
                        self.end_tag_error(name);
                    }
                }

                "template" => self.handle_in_head_mode(token),

                _ => self.end_tag_error(name),
            },

            Token::EndOfFile => self.handle_in_body_mode(token),
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. Pop elements from the stack of open elements until
            // a select element has been popped from the stack. Reset the
            // insertion mode appropriately. Reprocess the token."
            t if t.is_start_tag_named(TABLE_PARTS) => {
                self.parse_error(token);
                self.close_select();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token. Otherwise: ...
            // Reprocess the token."
            Token::EndTag { name } if TABLE_PARTS.contains(&name.as_str()) => {
                self.end_tag_error(name);
                if self.has_element_in_table_scope(name) {
                    self.close_select();
                    self.process_token(token);
                }
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.handle_in_select_mode(token),
        }
    }

    /// Pop until a select element has been popped, then reset the insertion mode.
    fn close_select(&mut self) {
        self.pop_until_tag("select");
        self.reset_insertion_mode_appropriately();
    }

    fn pop_if_current_is(&mut self, tag_name: &str) {
        if self.current_node_is(tag_name) {
            let _ = self.stack_of_open_elements.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_options_close_each_other() {
        let doc = parse("<select><option>a<option>b</select>");
        assert_eq!(doc.get_elements_by_tag("option").len(), 2);
        assert_eq!(doc.body().html(), "<select><option>a</option><option>b</option></select>");
    }

    #[test]
    fn test_stray_tags_in_select_are_dropped() {
        let doc = parse("<select><div>x</div></select>");
        assert!(doc.get_elements_by_tag("div").is_empty());
        assert_eq!(doc.body().text(), "x");
    }
}
