//! Insertion modes up to the start of the body, plus the "text" mode used by
//! every element whose content the tokenizer reads as raw text or RCDATA.

use wombat_common::ParseErrorKind;
use wombat_common::warning::warn_once;
use wombat_dom::{Attributes, DoctypeData, NodeId, NodeType};

use super::core::{HtmlTreeBuilder, InsertionMode};
use crate::tokenizer::{Token, TokenizerState};

impl HtmlTreeBuilder {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing; its public ID set to the
                // public identifier given in the DOCTYPE token, or the empty
                // string if the public identifier was missing; and its system
                // ID set to the system identifier given in the DOCTYPE token,
                // or the empty string if the system identifier was missing."
                let doctype = self.tree.alloc(NodeType::Doctype(DoctypeData {
                    name: name.clone().unwrap_or_default(),
                    public_id: public_identifier.clone().unwrap_or_default(),
                    system_id: system_identifier.clone().unwrap_or_default(),
                }));
                self.tree.append_child(NodeId::ROOT, doctype);

                // Quirks mode is decided by the force-quirks flag alone; the
                // public identifier tables are not consulted.
                if *force_quirks {
                    self.quirks_mode = true;
                }

                // "Then, switch the insertion mode to "before html"."
                self.switch_to(InsertionMode::BeforeHtml);
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error... In any case, switch the insertion mode to "before
            // html", then reprocess the token."
            _ => {
                self.tokenizer.record_error(ParseErrorKind::MissingDoctype);
                self.switch_to(InsertionMode::BeforeHtml);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(token),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_in(NodeId::ROOT, data),

            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document
            // object. Put this element in the stack of open elements."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let html = self.create_element(name, attributes);
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html);
                // "Switch the insertion mode to "before head"."
                self.switch_to(InsertionMode::BeforeHead);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.end_tag_error(name);
            }

            // "Anything else"
            // "Create an html element whose node document is the Document
            // object. Append it to the Document object. Put this element in the
            // stack of open elements. Switch the insertion mode to "before
            // head", then reprocess the token."
            _ => {
                let html = self.create_element("html", &Attributes::new());
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html);
                self.switch_to(InsertionMode::BeforeHead);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data),

            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(token),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            t if t.is_start_tag_named(&["html"]) => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token. Set the head element
            // pointer to the newly created head element. Switch the insertion
            // mode to "in head"."
            Token::StartTag {
                name, attributes, ..
            } if name == "head" => {
                let head = self.insert_html_element(name, attributes);
                self.head_element_pointer = Some(head);
                self.switch_to(InsertionMode::InHead);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { name } if !matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.end_tag_error(name);
            }

            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no
            // attributes. Set the head element pointer to the newly created
            // head element. Switch the insertion mode to "in head". Reprocess
            // the current token."
            _ => {
                let head = self.insert_html_element("head", &Attributes::new());
                self.head_element_pointer = Some(head);
                self.switch_to(InsertionMode::InHead);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),

            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data),

            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name, attributes, ..
            } => match name.as_str() {
                // "Process the token using the rules for the "in body"
                // insertion mode."
                "html" => self.handle_in_body_mode(token),

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge the
                // token's self-closing flag, if it is set."
                // "A start tag whose tag name is "meta"": the same, and the
                // encoding is already decided.
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_void_element(name, attributes);
                }

                // "Follow the generic RCDATA element parsing algorithm."
                "title" => self.parse_text_element(name, attributes, TokenizerState::RCDATA),

                // "A start tag whose tag name is "noscript", if the scripting
                // flag is disabled"
                // "Insert an HTML element for the token. Switch the insertion
                // mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.switch_to(InsertionMode::InHeadNoscript);
                }

                // "Follow the generic raw text element parsing algorithm."
                "noframes" | "style" => {
                    self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
                }

                // "A start tag whose tag name is "script""
                // "Insert the newly created element at the adjusted insertion
                // location. Switch the tokenizer to the script data state. Let
                // the original insertion mode be the current insertion mode.
                // Switch the insertion mode to "text"."
                "script" => {
                    self.parse_text_element(name, attributes, TokenizerState::ScriptData);
                }

                // "A start tag whose tag name is "template""
                "template" => self.insert_template(attributes),

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => self.parse_error(token),

                _ => self.leave_head(token),
            },

            Token::EndTag { name } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off
                // the stack of open elements. Switch the insertion mode to
                // "after head"."
                "head" => {
                    let _ = self.stack_of_open_elements.pop();
                    self.switch_to(InsertionMode::AfterHead);
                }

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.leave_head(token),

                // "An end tag whose tag name is "template""
                "template" => self.close_template(),

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => self.end_tag_error(name),
            },

            _ => self.leave_head(token),
        }
    }

    /// "Anything else" in the "in head" insertion mode.
    ///
    /// "Pop the current node (which will be the head element) off the stack of
    /// open elements. Switch the insertion mode to "after head". Reprocess the
    /// token."
    fn leave_head(&mut self, token: &Token) {
        let _ = self.stack_of_open_elements.pop();
        self.switch_to(InsertionMode::AfterHead);
        self.process_token(token);
    }

    /// "A start tag whose tag name is "template"".
    ///
    /// Template contents are parsed as ordinary children of the element
    /// rather than into a separate document fragment.
    fn insert_template(&mut self, attributes: &Attributes) {
        warn_once(
            "HTML Parser",
            "template contents are parsed as ordinary child elements",
        );
        // "Insert an HTML element for the token."
        let _ = self.insert_html_element("template", attributes);
        // "Insert a marker at the end of the list of active formatting elements."
        self.push_active_formatting_marker();
        // "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;
        // Without an "in template" mode, contents are read with the "in body" rules.
        self.switch_to(InsertionMode::InBody);
    }

    /// "An end tag whose tag name is "template"".
    pub(super) fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.has_open_element("template") {
            self.end_tag_error("template");
            return;
        }
        // "Generate all implied end tags thoroughly."
        self.generate_all_implied_end_tags_thoroughly();
        // "If the current node is not a template element, then this is a parse error."
        if let Some(current) = self.current_node()
            && !self.current_node_is("template")
        {
            self.unclosed_element_error(current);
        }
        // "Pop elements from the stack of open elements until a template
        // element has been popped from the stack."
        self.pop_until_tag("template");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.parse_error(token),

            t if t.is_start_tag_named(&["html"]) => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head
            // element. Switch the insertion mode to "in head"."
            t if t.is_end_tag_named(&["noscript"]) => {
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InHead);
            }

            // "Process the token using the rules for the "in head" insertion mode."
            t if t.is_whitespace_character()
                || matches!(t, Token::Comment { .. })
                || t.is_start_tag_named(&[
                    "basefont", "bgsound", "link", "meta", "noframes", "style",
                ]) =>
            {
                self.handle_in_head_mode(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            t if t.is_start_tag_named(&["head", "noscript"]) => self.parse_error(token),
            Token::EndTag { name } if name != "br" => self.end_tag_error(name),

            // "Anything else"
            // "Parse error. Pop the current node (which will be a noscript
            // element) from the stack of open elements; the new current node
            // will be a head element. Switch the insertion mode to "in head".
            // Reprocess the token."
            _ => {
                self.parse_error(token);
                let _ = self.stack_of_open_elements.pop();
                self.switch_to(InsertionMode::InHead);
                self.process_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name, attributes, ..
            } => match name.as_str() {
                "html" => self.handle_in_body_mode(token),

                // "Insert an HTML element for the token. Set the frameset-ok
                // flag to "not ok". Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.frameset_ok = false;
                    self.switch_to(InsertionMode::InBody);
                }

                // "Insert an HTML element for the token. Switch the insertion
                // mode to "in frameset"."
                "frameset" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.switch_to(InsertionMode::InFrameset);
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                // "Parse error. Push the node pointed to by the head element
                // pointer onto the stack of open elements. Process the token
                // using the rules for the "in head" insertion mode. Remove the
                // node pointed to by the head element pointer from the stack of
                // open elements."
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
                | "style" | "template" | "title" => {
                    self.parse_error(token);
                    let Some(head) = self.head_element_pointer else {
                        self.handle_in_head_mode(token);
                        return;
                    };
                    self.stack_of_open_elements.push(head);
                    self.handle_in_head_mode(token);
                    // Raw text elements leave the head on the stack until
                    // their end tag; it is removed wherever it sits.
                    self.remove_from_stack(head);
                }

                "head" => self.parse_error(token),

                _ => self.enter_body(token),
            },

            Token::EndTag { name } => match name.as_str() {
                "template" => self.handle_in_head_mode(token),
                "body" | "html" | "br" => self.enter_body(token),
                _ => self.end_tag_error(name),
            },

            _ => self.enter_body(token),
        }
    }

    /// "Anything else" in the "after head" insertion mode.
    ///
    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes. Switch the insertion mode to "in body". Reprocess the
    /// current token."
    fn enter_body(&mut self, token: &Token) {
        let _ = self.insert_html_element("body", &Attributes::new());
        self.switch_to(InsertionMode::InBody);
        self.process_token(token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data } => self.insert_character(*data),

            // "An end-of-file token"
            // "Parse error. Pop the current node off the stack of open
            // elements. Switch the insertion mode to the original insertion
            // mode and reprocess the token."
            Token::EndOfFile => {
                if let Some(current) = self.current_node() {
                    self.unclosed_element_error(current);
                }
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_mode();
                self.process_token(token);
            }

            // "An end tag whose tag name is "script"" and "Any other end tag"
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_mode();
            }

            // The tokenizer emits only characters and end tags here.
            _ => self.parse_error(token),
        }
    }
}
