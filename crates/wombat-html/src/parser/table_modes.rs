//! Table insertion modes: "in table" through "in cell".

use wombat_dom::Attributes;

use super::core::{HtmlTreeBuilder, InsertionMode};
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl HtmlTreeBuilder {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "in table text" and reprocess
            // the token."
            Token::Character { .. }
                if matches!(
                    self.current_tag(),
                    Some("table" | "tbody" | "template" | "tfoot" | "thead" | "tr")
                ) =>
            {
                self.pending_table_characters.clear();
                self.switch_with_return(InsertionMode::InTableText);
                self.process_token(token);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name, attributes, ..
            } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                // "Clear the stack back to a table context. Insert a marker at
                // the end of the list of active formatting elements. Insert an
                // HTML element for the token, then switch the insertion mode to
                // "in caption"."
                "caption" => {
                    self.clear_stack_back_to_table_context();
                    self.push_active_formatting_marker();
                    let _ = self.insert_html_element(name, attributes);
                    self.switch_to(InsertionMode::InCaption);
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(name, attributes);
                    self.switch_to(InsertionMode::InColumnGroup);
                }

                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "colgroup" start tag token with no attributes,
                // then switch the insertion mode to "in column group".
                // Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element("colgroup", &Attributes::new());
                    self.switch_to(InsertionMode::InColumnGroup);
                    self.process_token(token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(name, attributes);
                    self.switch_to(InsertionMode::InTableBody);
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                // "Clear the stack back to a table context. Insert an HTML
                // element for a "tbody" start tag token with no attributes,
                // then switch the insertion mode to "in table body". Reprocess
                // the current token."
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element("tbody", &Attributes::new());
                    self.switch_to(InsertionMode::InTableBody);
                    self.process_token(token);
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    // "Parse error."
                    self.parse_error(token);
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token."
                    if !self.has_element_in_table_scope("table") {
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately. Reprocess the token."
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                    self.process_token(token);
                }

                // "A start tag whose tag name is one of: "style", "script", "template""
                // "Process the token using the rules for the "in head" insertion mode."
                "style" | "script" | "template" => self.handle_in_head_mode(token),

                // "A start tag whose tag name is "input""
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // act as described in the "anything else" entry below.
                // Otherwise: Parse error. Insert an HTML element for the token.
                // Pop that input element off the stack of open elements."
                "input"
                    if attributes
                        .get("type")
                        .is_some_and(|value| value.eq_ignore_ascii_case("hidden")) =>
                {
                    self.parse_error(token);
                    let _ = self.insert_void_element(name, attributes);
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    // "Parse error."
                    self.parse_error(token);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token."
                    if self.has_open_element("template") || self.form_element_pointer.is_some() {
                        return;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set
                    // the form element pointer to point to the element created.
                    // Pop that form element off the stack of open elements."
                    let form = self.insert_void_element(name, attributes);
                    self.form_element_pointer = Some(form);
                }

                _ => self.foster_parent_token(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    // "If the stack of open elements does not have a table
                    // element in table scope, this is a parse error; ignore the
                    // token."
                    if !self.has_element_in_table_scope("table") {
                        self.end_tag_error(name);
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately."
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                // "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.end_tag_error(name),

                "template" => self.handle_in_head_mode(token),

                _ => self.foster_parent_token(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            Token::Character { .. } => self.foster_parent_token(token),
        }
    }

    /// "Anything else" in the "in table" insertion mode.
    ///
    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn foster_parent_token(&mut self, token: &Token) {
        self.parse_error(token);
        self.foster_parenting = true;
        self.handle_in_body_mode(token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.parse_error(token),

            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character { data } => self.pending_table_characters.push(*data),

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_characters);
                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace, then
                // this is a parse error: reprocess the character tokens in the
                // pending table character tokens list using the rules given in
                // the "anything else" entry in the "in table" insertion mode."
                if pending.iter().any(|&c| !Self::is_whitespace(c)) {
                    for c in pending {
                        self.foster_parent_token(&Token::new_character(c));
                    }
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    for c in pending {
                        self.insert_character(c);
                    }
                }
                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                self.return_to_original_mode();
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            t if t.is_end_tag_named(&["caption"]) => {
                let _ = self.close_caption();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a caption element
            // in table scope, this is a parse error; ignore the token.
            // Otherwise: ... Reprocess the token."
            t if t.is_start_tag_named(&[
                "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
            ]) || t.is_end_tag_named(&["table"]) =>
            {
                if self.close_caption() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.end_tag_error(name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// Close the open caption. Returns false if there was none in table scope.
    ///
    /// "Generate implied end tags. Now, if the current node is not a caption
    /// element, then this is a parse error. Pop elements from this stack until
    /// a caption element has been popped from the stack. Clear the list of
    /// active formatting elements up to the last marker. Switch the insertion
    /// mode to "in table"."
    fn close_caption(&mut self) -> bool {
        if !self.has_element_in_table_scope("caption") {
            self.end_tag_error("caption");
            return false;
        }
        self.generate_implied_end_tags();
        if let Some(current) = self.current_node()
            && !self.current_node_is("caption")
        {
            self.unclosed_element_error(current);
        }
        self.pop_until_tag("caption");
        self.clear_active_formatting_elements_to_last_marker();
        self.switch_to(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            t if t.is_start_tag_named(&["html"]) => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            Token::StartTag {
                name, attributes, ..
            } if name == "col" => {
                let _ = self.insert_void_element(name, attributes);
            }

            // "An end tag whose tag name is "colgroup""
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table"."
            Token::EndTag { name } if name == "colgroup" => {
                if !self.current_node_is("colgroup") {
                    self.end_tag_error(name);
                    return;
                }
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InTable);
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag { name } if name == "col" => self.end_tag_error(name),

            t if t.is_start_tag_named(&["template"]) || t.is_end_tag_named(&["template"]) => {
                self.handle_in_head_mode(token);
            }

            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table". Reprocess the token."
            _ => {
                if !self.current_node_is("colgroup") {
                    self.parse_error(token);
                    return;
                }
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context. Insert an HTML
            // element for the token, then switch the insertion mode to "in row"."
            Token::StartTag {
                name, attributes, ..
            } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error. Clear the stack back to a table body context.
            // Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row".
            // Reprocess the current token."
            t if t.is_start_tag_named(&["th", "td"]) => {
                self.parse_error(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element("tr", &Attributes::new());
                self.switch_to(InsertionMode::InRow);
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name } if TABLE_SECTIONS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // the token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                // "Otherwise: Clear the stack back to a table body context. Pop
                // the current node from the stack of open elements. Switch the
                // insertion mode to "in table"."
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            t if t.is_start_tag_named(&["caption", "col", "colgroup", "tbody", "tfoot", "thead"])
                || t.is_end_tag_named(&["table"]) =>
            {
                // "If the stack of open elements does not have a tbody, thead,
                // or tfoot element in table scope, this is a parse error;
                // ignore the token."
                if !self.has_one_of_in_table_scope(TABLE_SECTIONS) {
                    self.parse_error(token);
                    return;
                }
                // "Otherwise: Clear the stack back to a table body context. Pop
                // the current node from the stack of open elements. Switch the
                // insertion mode to "in table". Reprocess the token."
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.end_tag_error(name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            Token::StartTag {
                name, attributes, ..
            } if matches!(name.as_str(), "th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InCell);
                self.push_active_formatting_marker();
            }

            // "An end tag whose tag name is "tr""
            t if t.is_end_tag_named(&["tr"]) => {
                let _ = self.close_row();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            t if t.is_start_tag_named(&[
                "caption", "col", "colgroup", "tbody", "tfoot", "thead", "tr",
            ]) || t.is_end_tag_named(&["table"]) =>
            {
                if self.close_row() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name } if TABLE_SECTIONS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // the token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if !self.has_element_in_table_scope("tr") {
                    return;
                }
                // "Otherwise: Clear the stack back to a table row context. Pop
                // the current node (which will be a tr element) from the stack
                // of open elements. Switch the insertion mode to "in table
                // body". Reprocess the token."
                self.clear_stack_back_to_table_row_context();
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InTableBody);
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.end_tag_error(name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// Close the open row. Returns false if there was none in table scope.
    ///
    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token. Otherwise: Clear the
    /// stack back to a table row context. Pop the current node (which will be
    /// a tr element) from the stack of open elements. Switch the insertion mode
    /// to "in table body"."
    fn close_row(&mut self) -> bool {
        if !self.has_element_in_table_scope("tr") {
            self.end_tag_error("tr");
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.stack_of_open_elements.pop();
        self.switch_to(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name } if matches!(name.as_str(), "td" | "th") => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name as
                // that of the token, then this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                // "Generate implied end tags. Now, if the current node is not
                // an HTML element with the same tag name as the token, then
                // this is a parse error. Pop elements from the stack of open
                // elements until an HTML element with the same tag name as the
                // token has been popped from the stack. Clear the list of
                // active formatting elements up to the last marker. Switch the
                // insertion mode to "in row"."
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.end_tag_error(name);
                }
                self.pop_until_tag(name);
                self.clear_active_formatting_elements_to_last_marker();
                self.switch_to(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Assert: The stack of open elements has a td or th element in
            // table scope. Close the cell and reprocess the token."
            t if t.is_start_tag_named(&[
                "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
            ]) =>
            {
                if !self.has_one_of_in_table_scope(&["td", "th"]) {
                    self.parse_error(token);
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html"
                ) =>
            {
                self.end_tag_error(name);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then this is a parse error; ignore the token.
            // Otherwise, close the cell and reprocess the token."
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "table" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if !self.has_element_in_table_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_implied_table_body_and_row() {
        let doc = parse("<table><td>x</table>");
        let body = doc.body();
        let table = body.children().next();
        assert_eq!(table.and_then(|t| t.tag_name()), Some("table"));
        assert_eq!(doc.get_elements_by_tag("tbody").len(), 1);
        assert_eq!(doc.get_elements_by_tag("tr").len(), 1);
    }

    #[test]
    fn test_text_in_table_is_foster_parented() {
        let doc = parse("<table>oops<tr><td>cell</td></tr></table>");
        assert_eq!(doc.body().text(), "oops cell");
        let first = doc.body().children().next();
        assert!(first.is_some_and(|node| !node.is_element()));
    }
}
