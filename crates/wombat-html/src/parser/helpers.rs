//! Tree construction helpers: insertion, the stack of open elements, scopes
//! and the list of active formatting elements.

use wombat_dom::{Attributes, NodeId, NodeType};

use super::core::{ActiveFormattingElement, HtmlTreeBuilder, InsertionMode};
use crate::tags;
use crate::tokenizer::TokenizerState;

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// Scope markers: applet, caption, html, table, td, th, marquee, object,
/// template. The MathML and SVG markers are omitted because foreign elements
/// are not namespaced.
const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// "has an element in button scope": default scope markers plus button.
const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "button",
];

/// "has an element in list item scope": default scope markers plus ol, ul.
const LIST_ITEM_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "ol", "ul",
];

/// "has an element in table scope": html, table, template.
const TABLE_SCOPE: &[&str] = &["html", "table", "template"];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "generate all implied end tags thoroughly" adds the table parts.
const THOROUGH_IMPLIED_END_TAGS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// Elements that may legitimately still be open at the end of the body.
const ALLOWED_OPEN_AT_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

impl HtmlTreeBuilder {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// Tag name of the current node.
    pub(super) fn current_tag(&self) -> Option<&str> {
        self.current_node().and_then(|id| self.get_tag_name(id))
    }

    pub(super) fn current_node_is(&self, tag_name: &str) -> bool {
        self.current_tag() == Some(tag_name)
    }

    pub(super) fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.tag_name(id)
    }

    /// Returns true if an element with the given tag name is anywhere on the
    /// stack of open elements.
    pub(super) fn has_open_element(&self, tag_name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.get_tag_name(id) == Some(tag_name))
    }

    /// True inside `<svg>` or `<math>`. Those subtrees are parsed as ordinary
    /// elements, but self-closing tags inside them are honoured.
    pub(super) fn in_foreign_content(&self) -> bool {
        self.has_open_element("svg") || self.has_open_element("math")
    }

    // ===== Creating and inserting nodes =====

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target."
    ///
    /// Returns `(parent_id, Option<before_id>)`. When `before_id` is `Some`,
    /// the node goes immediately before it instead of at the end.
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> (NodeId, Option<NodeId>) {
        // STEP 1: "If there was an override target specified, then let target
        // be the override target. Otherwise, let target be the current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "If foster parenting is enabled and target is a table, tbody,
        // tfoot, thead, or tr element"
        if self.foster_parenting
            && self
                .get_tag_name(target)
                .is_some_and(|tag| matches!(tag, "table" | "tbody" | "tfoot" | "thead" | "tr"))
        {
            return self.foster_parent_location();
        }

        // "Otherwise: Let adjusted insertion location be inside target, after
        // its last child (if any)."
        (target, None)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    fn foster_parent_location(&self) -> (NodeId, Option<NodeId>) {
        // "Let last table be the last table element in the stack of open
        // elements, if any."
        let Some(table_pos) = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.get_tag_name(id) == Some("table"))
        else {
            // "If there is no last table, then let adjusted insertion location
            // be inside the first element in the stack of open elements (the
            // html element), after its last child (if any)."
            let first = self
                .stack_of_open_elements
                .first()
                .copied()
                .unwrap_or(NodeId::ROOT);
            return (first, None);
        };
        let table_id = self.stack_of_open_elements[table_pos];

        // "If last table has a parent node, then let adjusted insertion
        // location be inside last table's parent node, immediately before last
        // table."
        if let Some(parent_id) = self.tree.parent(table_id) {
            return (parent_id, Some(table_id));
        }

        // "Let previous element be the element immediately above last table in
        // the stack of open elements."
        let previous = table_pos
            .checked_sub(1)
            .map_or(NodeId::ROOT, |pos| self.stack_of_open_elements[pos]);
        (previous, None)
    }

    pub(super) fn insert_at(&mut self, location: (NodeId, Option<NodeId>), node: NodeId) {
        match location {
            (parent, Some(before)) => self.tree.insert_before(parent, node, before),
            (parent, None) => self.tree.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token". The element is allocated detached.
    pub(super) fn create_element(&mut self, tag_name: &str, attributes: &Attributes) -> NodeId {
        self.tree.alloc_element(tag_name, attributes.clone())
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    pub(super) fn insert_html_element(&mut self, tag_name: &str, attributes: &Attributes) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate place
        // for inserting a node."
        let location = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let element be the result of creating an element for the token"
        let element_id = self.create_element(tag_name, attributes);

        // STEP 3: "Insert element at the adjusted insertion location."
        self.insert_at(location, element_id);

        // STEP 4: "Push element onto the stack of open elements so that it is
        // the new current node."
        self.stack_of_open_elements.push(element_id);
        element_id
    }

    /// Insert an element that is popped straight away (void elements).
    pub(super) fn insert_void_element(&mut self, tag_name: &str, attributes: &Attributes) -> NodeId {
        let element_id = self.insert_html_element(tag_name, attributes);
        let _ = self.stack_of_open_elements.pop();
        element_id
    }

    /// Insert an element whose start tag closed itself, pop it, and remember
    /// that form so the serializer can keep it.
    pub(super) fn insert_self_closed_element(&mut self, tag_name: &str, attributes: &Attributes) {
        let element_id = self.insert_void_element(tag_name, attributes);
        if let Some(element) = self.tree.as_element_mut(element_id) {
            element.self_closing = true;
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        // STEP 2: "Let the adjusted insertion location be the appropriate place
        // for inserting a node."
        let (parent_id, before_id) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is inside a Document
        // node, then return."
        if parent_id == NodeId::ROOT {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        // insertion location, then append data to that Text node's data."
        let adjacent = match before_id {
            Some(before) => self.tree.prev_sibling(before),
            None => self.tree.last_child(parent_id),
        };
        if let Some(text_id) = adjacent
            && let Some(node) = self.tree.get_mut(text_id)
            && let NodeType::Text(ref mut data) = node.node_type
        {
            data.push(c);
            return;
        }

        // "Otherwise, create a new Text node whose data is data... and insert
        // the newly created node at the adjusted insertion location."
        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.insert_at((parent_id, before_id), text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let location = self.appropriate_place_for_inserting(None);
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.insert_at(location, comment_id);
    }

    /// Insert a comment as the last child of `parent`.
    pub(super) fn insert_comment_in(&mut self, parent: NodeId, data: &str) {
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent, comment_id);
    }

    /// Copy each attribute onto `node` unless it is already present.
    ///
    /// Used for stray `<html>` and `<body>` start tags: "for each attribute on
    /// the token, check to see if the attribute is already present on the
    /// element. If it is not, add the attribute and its corresponding value to
    /// that element."
    pub(super) fn merge_attributes(&mut self, node: NodeId, attributes: &Attributes) {
        if let Some(element) = self.tree.as_element_mut(node) {
            for attr in attributes {
                let _ = element.attrs.set_if_absent(&attr.name, &attr.value);
            }
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
    ///
    /// The generic raw text and RCDATA element parsing algorithms.
    pub(super) fn parse_text_element(
        &mut self,
        tag_name: &str,
        attributes: &Attributes,
        state: TokenizerState,
    ) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(tag_name, attributes);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        // element parsing algorithm, switch the tokenizer to the RAWTEXT state;
        // otherwise the algorithm invoked was the generic RCDATA element
        // parsing algorithm, switch the tokenizer to the RCDATA state."
        self.tokenizer.set_state(state);
        // STEP 3-4: "Let the original insertion mode be the current insertion
        // mode. Then, switch the insertion mode to "text"."
        self.switch_with_return(InsertionMode::Text);
    }

    // ===== The stack of open elements =====

    /// Pop elements until one with the given tag name has been popped.
    pub(super) fn pop_until_tag(&mut self, tag_name: &str) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.get_tag_name(id) == Some(tag_name) {
                break;
            }
        }
    }

    /// Pop elements until one of the given tag names has been popped.
    pub(super) fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .get_tag_name(id)
                .is_some_and(|name| tag_names.contains(&name))
            {
                break;
            }
        }
    }

    pub(super) fn remove_from_stack(&mut self, node: NodeId) {
        self.stack_of_open_elements.retain(|&id| id != node);
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "The stack of open elements is said to have an element target node in a
    /// specific scope consisting of a list of element types list when the
    /// following algorithm terminates in a match state:"
    ///
    /// STEP 1: "Initialize node to be the current node."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of open
    ///          elements and return to step 2."
    fn has_one_of_in_specific_scope(&self, tag_names: &[&str], scope_markers: &[&str]) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if let Some(tag) = self.get_tag_name(node_id) {
                if tag_names.contains(&tag) {
                    return true;
                }
                if scope_markers.contains(&tag) {
                    return false;
                }
            }
        }
        false
    }

    pub(super) fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_one_of_in_specific_scope(&[tag_name], DEFAULT_SCOPE)
    }

    pub(super) fn has_one_of_in_scope(&self, tag_names: &[&str]) -> bool {
        self.has_one_of_in_specific_scope(tag_names, DEFAULT_SCOPE)
    }

    pub(super) fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_one_of_in_specific_scope(&[tag_name], BUTTON_SCOPE)
    }

    pub(super) fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_one_of_in_specific_scope(&[tag_name], LIST_ITEM_SCOPE)
    }

    pub(super) fn has_element_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_one_of_in_specific_scope(&[tag_name], TABLE_SCOPE)
    }

    pub(super) fn has_one_of_in_table_scope(&self, tag_names: &[&str]) -> bool {
        self.has_one_of_in_specific_scope(tag_names, TABLE_SCOPE)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    ///
    /// "has an element in select scope": every element type except optgroup
    /// and option is a marker.
    pub(super) fn has_element_in_select_scope(&self, tag_name: &str) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            match self.get_tag_name(node_id) {
                Some(tag) if tag == tag_name => return true,
                Some("optgroup" | "option") => {}
                _ => return false,
            }
        }
        false
    }

    /// Scope check for one particular node rather than a tag name.
    pub(super) fn has_node_in_scope(&self, target: NodeId) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if node_id == target {
                return true;
            }
            if self
                .get_tag_name(node_id)
                .is_some_and(|tag| DEFAULT_SCOPE.contains(&tag))
            {
                return false;
            }
        }
        false
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "while the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    fn clear_stack_back_to(&mut self, stop_at: &[&str]) {
        while let Some(current) = self.current_node() {
            if self
                .get_tag_name(current)
                .is_some_and(|tag| stop_at.contains(&tag))
            {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags();
        // STEP 2: "If the current node is not now a td element or a th
        // element, then this is a parse error."
        if let Some(current) = self.current_node()
            && !matches!(self.get_tag_name(current), Some("td" | "th"))
        {
            self.unclosed_element_error(current);
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a
        // td element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_to(InsertionMode::InRow);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "close a p element": generate implied end tags except for p, then pop
    /// elements until a p element has been popped.
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some("p"));
        if let Some(current) = self.current_node()
            && !self.current_node_is("p")
        {
            self.unclosed_element_error(current);
        }
        self.pop_until_tag("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent must
    /// perform the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        self.pop_while_current_in(IMPLIED_END_TAGS, exclude);
    }

    /// "generate all implied end tags thoroughly"
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        self.pop_while_current_in(THOROUGH_IMPLIED_END_TAGS, None);
    }

    fn pop_while_current_in(&mut self, tag_names: &[&str], exclude: Option<&str>) {
        while let Some(tag) = self.current_tag() {
            if !tag_names.contains(&tag) || exclude == Some(tag) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Report the first element that should not still be open when the body
    /// ends.
    pub(super) fn check_open_elements_at_end(&mut self) {
        let offending = self.stack_of_open_elements.iter().copied().find(|&id| {
            self.get_tag_name(id)
                .is_some_and(|tag| !ALLOWED_OPEN_AT_END.contains(&tag))
        });
        if let Some(node) = offending {
            self.unclosed_element_error(node);
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mode = self.appropriate_insertion_mode();
        self.switch_to(mode);
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // STEP 1-2: "Let last be false. Let node be the last node in the stack
        // of open elements."
        for (index, &node_id) in self.stack_of_open_elements.iter().enumerate().rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            // elements, then set last to true."
            let last = index == 0;
            let Some(tag) = self.get_tag_name(node_id) else {
                continue;
            };

            match tag {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => {
                    if !last {
                        // "Loop: If ancestor is the first node in the stack of
                        // open elements, jump to the step below labeled done.
                        // Let ancestor be the node before ancestor in the stack
                        // of open elements. If ancestor is a template node,
                        // jump to the step below labeled done. If ancestor is a
                        // table node, switch the insertion mode to "in select
                        // in table" and return."
                        for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                            match self.get_tag_name(ancestor) {
                                Some("template") => break,
                                Some("table") => return InsertionMode::InSelectInTable,
                                _ => {}
                            }
                        }
                    }
                    // "Done: Switch the insertion mode to "in select" and return."
                    return InsertionMode::InSelect;
                }
                // STEP 5: "If node is a td or th element and last is false,
                // then switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => return InsertionMode::InCell,
                // STEP 6
                "tr" => return InsertionMode::InRow,
                // STEP 7
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                // STEP 8
                "caption" => return InsertionMode::InCaption,
                // STEP 9
                "colgroup" => return InsertionMode::InColumnGroup,
                // STEP 10
                "table" => return InsertionMode::InTable,
                // STEP 11: "If node is a template element, then switch the
                // insertion mode to the current template insertion mode and
                // return." Template contents are read with the "in body" rules.
                "template" => return InsertionMode::InBody,
                // STEP 12: "If node is a head element and last is false, then
                // switch the insertion mode to "in head" and return."
                "head" if !last => return InsertionMode::InHead,
                // STEP 13
                "body" => return InsertionMode::InBody,
                // STEP 14
                "frameset" => return InsertionMode::InFrameset,
                // STEP 15: "If node is an html element, run these substeps:"
                "html" => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }

            // STEP 16: "If last is true, then switch the insertion mode to "in
            // body" and return."
            if last {
                return InsertionMode::InBody;
            }
        }
        InsertionMode::InBody
    }

    // ===== The list of active formatting elements =====

    /// Index of `node` in the list of active formatting elements.
    pub(super) fn active_formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements.iter().position(
            |entry| matches!(entry, ActiveFormattingElement::Element { node_id, .. } if *node_id == node),
        )
    }

    /// The last element with the given tag name between the end of the list
    /// and the last marker, as `(index, node)`.
    pub(super) fn active_formatting_element_named(&self, tag_name: &str) -> Option<(usize, NodeId)> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element {
                    node_id,
                    tag_name: name,
                    ..
                } if name == tag_name => return Some((index, *node_id)),
                ActiveFormattingElement::Element { .. } => {}
            }
        }
        None
    }

    pub(super) fn remove_from_active_formatting_elements(&mut self, node: NodeId) {
        if let Some(index) = self.active_formatting_index_of(node) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    pub(super) fn push_active_formatting_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// Includes the Noah's Ark clause: "If there are already three elements
    /// in the list of active formatting elements after the last marker, if
    /// any, or anywhere in the list if there are no markers, that have the
    /// same tag name, namespace, and attributes as element, then remove the
    /// earliest such element from the list of active formatting elements."
    pub(super) fn push_active_formatting_element(
        &mut self,
        node_id: NodeId,
        tag_name: &str,
        attributes: &Attributes,
    ) {
        let mut count = 0;
        let mut earliest = None;
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element {
                    tag_name: name,
                    attributes: attrs,
                    ..
                } => {
                    if name == tag_name && same_attributes(attrs, attributes) {
                        count += 1;
                        earliest = Some(index);
                    }
                }
            }
        }
        if count >= 3
            && let Some(index) = earliest
        {
            let _ = self.active_formatting_elements.remove(index);
        }

        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                tag_name: tag_name.to_string(),
                attributes: attributes.clone(),
            });
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// This algorithm has two phases:
    /// - Rewind phase (steps 4-6): walk backwards to find where to start
    /// - Create phase (steps 7-10): walk forwards, creating elements
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1-2: "If there are no entries in the list of active formatting
        // elements, then there is nothing to reconstruct." Likewise if the last
        // entry is a marker or an element that is in the stack of open elements.
        let Some(last) = self.active_formatting_elements.last() else {
            return;
        };
        match last {
            ActiveFormattingElement::Marker => return,
            ActiveFormattingElement::Element { node_id, .. } => {
                if self.stack_of_open_elements.contains(node_id) {
                    return;
                }
            }
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        // list of active formatting elements."
        let mut entry_index = self.active_formatting_elements.len() - 1;

        // STEP 4-6: Rewind.
        while entry_index > 0 {
            let previous = &self.active_formatting_elements[entry_index - 1];
            let stop = match previous {
                ActiveFormattingElement::Marker => true,
                ActiveFormattingElement::Element { node_id, .. } => {
                    self.stack_of_open_elements.contains(node_id)
                }
            };
            if stop {
                break;
            }
            entry_index -= 1;
        }

        // STEP 7-10: Advance and create.
        while entry_index < self.active_formatting_elements.len() {
            // STEP 8: "Create: Insert an HTML element for the token for which
            // the element entry was created, to obtain new element."
            if let ActiveFormattingElement::Element {
                tag_name,
                attributes,
                ..
            } = self.active_formatting_elements[entry_index].clone()
            {
                let new_element = self.insert_html_element(&tag_name, &attributes);
                // STEP 9: "Replace the entry for entry in the list with an entry
                // for new element."
                self.active_formatting_elements[entry_index] = ActiveFormattingElement::Element {
                    node_id: new_element,
                    tag_name,
                    attributes,
                };
            }
            // STEP 10: "If the entry for new element in the list of active
            // formatting elements is not the last entry in the list, return to
            // the step labeled advance."
            entry_index += 1;
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    /// "Any other end tag" in the "in body" insertion mode.
    ///
    /// 1. "Initialize node to be the current node."
    /// 2. "Loop: If node is an HTML element with the same tag name as the
    ///    token, then: generate implied end tags, except for HTML elements
    ///    with the same tag name as the token; if node is not the current
    ///    node, then this is a parse error; pop all the nodes from the current
    ///    node up to node, including node, then stop these steps."
    /// 3. "Otherwise, if node is in the special category, then this is a
    ///    parse error; ignore the token, and return."
    /// 4. "Set node to the previous entry in the stack of open elements."
    pub(super) fn any_other_end_tag(&mut self, tag_name: &str) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];
            let Some(node_tag) = self.get_tag_name(node_id) else {
                continue;
            };
            if node_tag == tag_name {
                self.generate_implied_end_tags_excluding(Some(tag_name));
                if self.current_node() != Some(node_id) {
                    self.end_tag_error(tag_name);
                }
                self.stack_of_open_elements.truncate(index);
                return;
            }
            if tags::is_special(node_tag) {
                self.end_tag_error(tag_name);
                return;
            }
        }
    }
}

/// Attribute lists are equal regardless of order.
fn same_attributes(a: &Attributes, b: &Attributes) -> bool {
    a.len() == b.len() && a.iter().all(|attr| b.get(&attr.name) == Some(attr.value.as_str()))
}
