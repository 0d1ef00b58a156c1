//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use wombat_common::warning::warn_once;
use wombat_dom::{Attributes, NodeId};

use super::core::{HtmlTreeBuilder, InsertionMode};
use crate::tags;
use crate::tokenizer::{Token, TokenizerState};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Start tags that close an open `p` and then insert themselves.
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// End tags closed by "generate implied end tags, then pop until".
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

const FORMATTING_TAGS: &[&str] = &[
    "b", "big", "code", "em", "font", "i", "s", "small", "strike", "strong", "tt", "u",
];

impl HtmlTreeBuilder {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } => self.in_body_character(*data),

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(token),

            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => self.in_body_start_tag(token, name, *self_closing, attributes),

            Token::EndTag { name } => self.in_body_end_tag(token, name),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode." Open templates are simply left open.
                //
                // "Otherwise, follow these steps: If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, an li element, an optgroup element, an option
                // element, a p element, an rb element, an rp element, an rt
                // element, an rtc element, a tbody element, a td element, a
                // tfoot element, a th element, a thead element, a tr element,
                // the body element, or the html element, then this is a parse
                // error. Stop parsing."
                self.check_open_elements_at_end();
                self.stopped = true;
            }
        }
    }

    fn in_body_character(&mut self, c: char) {
        match c {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            '\0' => self.parse_error(&Token::new_character(c)),

            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character."
            c if Self::is_whitespace(c) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(c);
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character. Set the frameset-ok flag to "not ok"."
            c => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(c);
                self.frameset_ok = false;
            }
        }
    }

    fn in_body_start_tag(
        &mut self,
        token: &Token,
        name: &str,
        self_closing: bool,
        attributes: &Attributes,
    ) {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.parse_error(token);
                // "If there is a template element on the stack of open
                // elements, then ignore the token."
                if self.has_open_element("template") {
                    return;
                }
                // "Otherwise, for each attribute on the token, check to see if
                // the attribute is already present on the top element of the
                // stack of open elements. If it is not, add the attribute and
                // its corresponding value to that element."
                if let Some(&html) = self.stack_of_open_elements.first() {
                    self.merge_attributes(html, attributes);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
            | "style" | "template" | "title" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.parse_error(token);
                // "If the second element on the stack of open elements is not a
                // body element, if the stack of open elements has only one node
                // on it, or if there is a template element on the stack of open
                // elements, then ignore the token."
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if self.has_open_element("template") {
                    return;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                // each attribute on the token, check to see if the attribute is
                // already present on the body element. If it is not, add the
                // attribute and its corresponding value to that element."
                self.frameset_ok = false;
                self.merge_attributes(body, attributes);
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.parse_error(token);
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a
                // body element, then ignore the token."
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if !self.frameset_ok {
                    return;
                }
                // "Otherwise, run the following steps:
                // 1. Remove the second element on the stack of open elements
                //    from its parent node, if it has one.
                // 2. Pop all the nodes from the bottom of the stack of open
                //    elements, from the current node up to, but not including,
                //    the root html element.
                // 3. Insert an HTML element for the token.
                // 4. Switch the insertion mode to "in frameset"."
                if let Some(parent) = self.tree.parent(body) {
                    self.tree.remove_child(parent, body);
                }
                self.stack_of_open_elements.truncate(1);
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InFrameset);
            }

            // "A start tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "center", "details", "dialog", "dir",
            // "div", "dl", "fieldset", "figcaption", "figure", "footer",
            // "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            // "section", "summary", "ul""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token."
            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements has a p element in button
                // scope, then close a p element."
                self.close_p_element_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                // parse error; pop the current node off the stack of open
                // elements."
                if self.current_tag().is_some_and(|tag| HEADINGS.contains(&tag)) {
                    self.parse_error(token);
                    let _ = self.stack_of_open_elements.pop();
                }
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one.
                // (Newlines at the start of pre blocks are ignored as an
                // authoring convenience.)"
                self.ignore_next_line_feed = true;
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                let in_template = self.has_open_element("template");
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is
                // a parse error; ignore the token."
                if self.form_element_pointer.is_some() && !in_template {
                    self.parse_error(token);
                    return;
                }
                // "Otherwise: If the stack of open elements has a p element in
                // button scope, then close a p element. Insert an HTML element
                // for the token, and, if there is no template element on the
                // stack of open elements, set the form element pointer to point
                // to the element created."
                self.close_p_element_if_in_button_scope();
                let form = self.insert_html_element(name, attributes);
                if !in_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.start_list_item(name, attributes, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.start_list_item(name, attributes, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token.
            // Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                self.tokenizer.set_state(TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps: Parse error. Generate implied end
                // tags. Pop elements from the stack of open elements until a
                // button element has been popped from the stack."
                if self.has_element_in_scope("button") {
                    self.parse_error(token);
                    self.generate_implied_end_tags();
                    self.pop_until_tag("button");
                }
                // "Reconstruct the active formatting elements, if any. Insert
                // an HTML element for the token. Set the frameset-ok flag to
                // "not ok"."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption
                // agency algorithm for the token, then remove that element from
                // the list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                if let Some((_, existing)) = self.active_formatting_element_named("a") {
                    self.parse_error(token);
                    self.run_adoption_agency("a");
                    self.remove_from_active_formatting_elements(existing);
                    self.remove_from_stack(existing);
                }
                // "Reconstruct the active formatting elements, if any. Insert
                // an HTML element for the token. Push onto the list of active
                // formatting elements that element."
                self.insert_formatting_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            _ if FORMATTING_TAGS.contains(&name) => self.insert_formatting_element(name, attributes),

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                // "Reconstruct the active formatting elements, if any. If the
                // stack of open elements has a nobr element in scope, then this
                // is a parse error; run the adoption agency algorithm for the
                // token, then once again reconstruct the active formatting
                // elements, if any."
                self.reconstruct_active_formatting_elements();
                if self.has_element_in_scope("nobr") {
                    self.parse_error(token);
                    self.run_adoption_agency("nobr");
                }
                self.insert_formatting_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Insert a marker at the end of the
            // list of active formatting elements. Set the frameset-ok flag to
            // "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.push_active_formatting_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if !self.quirks_mode {
                    self.close_p_element_if_in_button_scope();
                }
                // "Insert an HTML element for the token. Set the frameset-ok
                // flag to "not ok". Switch the insertion mode to "in table"."
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Immediately pop the current node off
            // the stack of open elements. Acknowledge the token's self-closing
            // flag, if it is set. Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_void_element(name, attributes);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_void_element(name, attributes);
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                let hidden = attributes
                    .get("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            "param" | "source" | "track" => {
                let _ = self.insert_void_element(name, attributes);
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_void_element(name, attributes);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            "image" => {
                self.parse_error(token);
                self.in_body_start_tag(token, "img", self_closing, attributes);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(name, attributes);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one."
                self.ignore_next_line_feed = true;
                // "Switch the tokenizer to the RCDATA state. Let the original
                // insertion mode be the current insertion mode. Set the
                // frameset-ok flag to "not ok". Switch the insertion mode to "text"."
                self.tokenizer.set_state(TokenizerState::RCDATA);
                self.frameset_ok = false;
                self.switch_with_return(InsertionMode::Text);
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_element_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed""
            // "Follow the generic raw text element parsing algorithm."
            "noembed" => self.parse_text_element(name, attributes, TokenizerState::RAWTEXT),

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                // "in table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch the
                // insertion mode to "in select"."
                let in_table = matches!(
                    self.insertion_mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                );
                self.switch_to(if in_table {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                });
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current
            // node off the stack of open elements. Reconstruct the active
            // formatting elements, if any. Insert an HTML element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags. If the current node is not now a ruby
            // element, this is a parse error."
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags();
                    if !self.current_node_is("ruby") {
                        self.parse_error(token);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags, except for rtc elements. If the
            // current node is not now a rtc element or a ruby element, this is
            // a parse error."
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags_excluding(Some("rtc"));
                    if !self.current_node_is("rtc") && !self.current_node_is("ruby") {
                        self.parse_error(token);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }

            // "A start tag whose tag name is "math"" / "svg""
            // Foreign elements are kept as ordinary elements. "If the token has
            // its self-closing flag set, pop the current node off the stack of
            // open elements and acknowledge the token's self-closing flag."
            "math" | "svg" => {
                warn_once(
                    "HTML Parser",
                    "SVG and MathML content is parsed as ordinary elements",
                );
                self.reconstruct_active_formatting_elements();
                if self_closing {
                    self.insert_self_closed_element(name, attributes);
                } else {
                    let _ = self.insert_html_element(name, attributes);
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => self.parse_error(token),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token."
            // A self-closing flag is honoured inside svg/math and on unknown
            // tags, which have no end tag of their own to wait for.
            _ => {
                self.reconstruct_active_formatting_elements();
                if self_closing && (self.in_foreign_content() || !tags::is_known(name)) {
                    self.insert_self_closed_element(name, attributes);
                } else {
                    let _ = self.insert_html_element(name, attributes);
                }
            }
        }
    }

    fn in_body_end_tag(&mut self, token: &Token, name: &str) {
        match name {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "template" => self.handle_in_head_mode(token),

            // "An end tag whose tag name is "body""
            "body" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body") {
                    self.end_tag_error(name);
                    return;
                }
                // "Otherwise, if there is a node in the stack of open elements
                // that is not either a dd element, ... the html element, then
                // this is a parse error."
                self.check_open_elements_at_end();
                // "Switch the insertion mode to "after body"."
                self.switch_to(InsertionMode::AfterBody);
            }

            // "An end tag whose tag name is "html""
            "html" => {
                if !self.has_element_in_scope("body") {
                    self.end_tag_error(name);
                    return;
                }
                self.check_open_elements_at_end();
                // "Switch the insertion mode to "after body". Reprocess the token."
                self.switch_to(InsertionMode::AfterBody);
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "button", "center", "details", "dialog",
            // "dir", "div", "dl", "fieldset", "figcaption", "figure", "footer",
            // "header", "hgroup", "listing", "main", "menu", "nav", "ol",
            // "pre", "search", "section", "summary", "ul""
            _ if BLOCK_END_TAGS.contains(&name) => self.close_element_in_scope(name),

            // "An end tag whose tag name is "form""
            "form" => {
                if self.has_open_element("template") {
                    // "If the stack of open elements does not have a form
                    // element in scope, then this is a parse error; return and
                    // ignore the token."
                    if !self.has_element_in_scope("form") {
                        self.end_tag_error(name);
                        return;
                    }
                    self.generate_implied_end_tags();
                    if !self.current_node_is("form") {
                        self.end_tag_error(name);
                    }
                    self.pop_until_tag("form");
                    return;
                }
                // "Let node be the element that the form element pointer is
                // set to, or null if it is not set to an element. Set the form
                // element pointer to null."
                let node = self.form_element_pointer.take();
                // "If node is null or if the stack of open elements does not
                // have node in scope, then this is a parse error; return and
                // ignore the token."
                let Some(node) = node.filter(|&node| self.has_node_in_scope(node)) else {
                    self.end_tag_error(name);
                    return;
                };
                // "Generate implied end tags. If the current node is not node,
                // then this is a parse error. Remove node from the stack of
                // open elements."
                self.generate_implied_end_tags();
                if self.current_node() != Some(node) {
                    self.end_tag_error(name);
                }
                self.remove_from_stack(node);
            }

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML
                // element for a "p" start tag token with no attributes."
                if !self.has_element_in_button_scope("p") {
                    self.end_tag_error(name);
                    let _ = self.insert_html_element("p", &Attributes::new());
                }
                // "Close a p element."
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                // "If the stack of open elements does not have an li element in
                // list item scope, then this is a parse error; ignore the token."
                if !self.has_element_in_list_item_scope("li") {
                    self.end_tag_error(name);
                    return;
                }
                self.close_implied_element(name);
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.has_element_in_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                self.close_implied_element(name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.has_one_of_in_scope(HEADINGS) {
                    self.end_tag_error(name);
                    return;
                }
                // "Generate implied end tags. If the current node is not an
                // HTML element with the same tag name as that of the token,
                // then this is a parse error. Pop elements from the stack of
                // open elements until an HTML element whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6" has been popped from
                // the stack."
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.end_tag_error(name);
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            "a" | "nobr" => self.run_adoption_agency(name),
            _ if FORMATTING_TAGS.contains(&name) => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee", "object""
            "applet" | "marquee" | "object" => {
                if !self.has_element_in_scope(name) {
                    self.end_tag_error(name);
                    return;
                }
                // "Generate implied end tags. If the current node is not an
                // HTML element with the same tag name as the token, then this
                // is a parse error. Pop elements from the stack of open
                // elements until an HTML element with the same tag name as the
                // token has been popped from the stack. Clear the list of
                // active formatting elements up to the last marker."
                self.generate_implied_end_tags();
                if !self.current_node_is(name) {
                    self.end_tag_error(name);
                }
                self.pop_until_tag(name);
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br"
            // start tag token with no attributes, rather than the end tag
            // token that it actually is."
            "br" => {
                self.end_tag_error(name);
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_void_element("br", &Attributes::new());
                self.frameset_ok = false;
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
    }

    /// Shared steps for `li`, `dd` and `dt` start tags.
    ///
    /// 1. "Set the frameset-ok flag to "not ok"."
    /// 2. "Initialize node to be the current node (the bottommost node of the
    ///    stack)."
    /// 3. "Loop: If node is an li element [one of `closes`], then run these
    ///    substeps: Generate implied end tags, except for li elements. If the
    ///    current node is not an li element, then this is a parse error. Pop
    ///    elements from the stack of open elements until an li element has
    ///    been popped from the stack. Jump to the step labeled done below."
    /// 4. "If node is in the special category, but is not an address, div, or
    ///    p element, then jump to the step labeled done below."
    /// 5. "Otherwise, set node to the previous entry in the stack of open
    ///    elements and return to the step labeled loop."
    /// 6. "Done: If the stack of open elements has a p element in button
    ///    scope, then close a p element."
    /// 7. "Finally, insert an HTML element for the token."
    fn start_list_item(&mut self, name: &str, attributes: &Attributes, closes: &[&str]) {
        self.frameset_ok = false;

        let mut close = None;
        for &node_id in self.stack_of_open_elements.iter().rev() {
            let Some(tag) = self.get_tag_name(node_id) else {
                continue;
            };
            if closes.contains(&tag) {
                close = Some(tag.to_string());
                break;
            }
            if tags::is_special(tag) && !matches!(tag, "address" | "div" | "p") {
                break;
            }
        }
        if let Some(tag) = close {
            self.close_implied_element(&tag);
        }

        self.close_p_element_if_in_button_scope();
        let _ = self.insert_html_element(name, attributes);
    }

    /// Generate implied end tags except for `tag_name`, report if the current
    /// node is something else, then pop until `tag_name` is popped.
    fn close_implied_element(&mut self, tag_name: &str) {
        self.generate_implied_end_tags_excluding(Some(tag_name));
        if !self.current_node_is(tag_name) {
            self.end_tag_error(tag_name);
        }
        self.pop_until_tag(tag_name);
    }

    /// "If the stack of open elements does not have an element in scope that
    /// is an HTML element with the same tag name as that of the token, then
    /// this is a parse error; ignore the token. Otherwise, run these steps:
    /// Generate implied end tags. If the current node is not an HTML element
    /// with the same tag name as that of the token, then this is a parse
    /// error. Pop elements from the stack of open elements until an HTML
    /// element with the same tag name as the token has been popped from the
    /// stack."
    fn close_element_in_scope(&mut self, tag_name: &str) {
        if !self.has_element_in_scope(tag_name) {
            self.end_tag_error(tag_name);
            return;
        }
        self.generate_implied_end_tags();
        if !self.current_node_is(tag_name) {
            self.end_tag_error(tag_name);
        }
        self.pop_until_tag(tag_name);
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Push onto the list of active formatting elements
    /// that element."
    fn insert_formatting_element(&mut self, name: &str, attributes: &Attributes) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(name, attributes);
        self.push_active_formatting_element(element, name, attributes);
    }

    /// The second element on the stack of open elements, if it is a body.
    fn second_element_if_body(&self) -> Option<NodeId> {
        self.stack_of_open_elements
            .get(1)
            .copied()
            .filter(|&id| self.get_tag_name(id) == Some("body"))
    }
}
