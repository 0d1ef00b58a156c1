//! [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs mis-nested formatting elements such as `<b><p>x</b>y</p>`.

use super::core::{ActiveFormattingElement, HtmlTreeBuilder};
use crate::tags;

impl HtmlTreeBuilder {
    /// Run the adoption agency algorithm for an end tag named `subject`.
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        // subject, and the current node is not in the list of active
        // formatting elements, then pop the current node off the stack of open
        // elements and return."
        if let Some(current) = self.current_node()
            && self.get_tag_name(current) == Some(subject)
            && self.active_formatting_index_of(current).is_none()
        {
            let _ = self.stack_of_open_elements.pop();
            return;
        }

        // STEP 3-4: "Let outer loop counter be 0. Outer loop: If outer loop
        // counter is greater than or equal to 8, then return."
        for _ in 0..8 {
            // "Let formatting element be the last element in the list of
            // active formatting elements that: is between the end of the list
            // and the last marker in the list, if any, or the start of the list
            // otherwise, and has the tag name subject."
            let Some((_, formatting_element)) = self.active_formatting_element_named(subject)
            else {
                // "If there is no such element, then return and instead act as
                // described in the "any other end tag" entry above."
                self.any_other_end_tag(subject);
                return;
            };

            // "If formatting element is not in the stack of open elements, then
            // this is a parse error; remove the element from the list, and return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element)
            else {
                self.end_tag_error(subject);
                self.remove_from_active_formatting_elements(formatting_element);
                return;
            };

            // "If formatting element is in the stack of open elements, but the
            // element is not in scope, then this is a parse error; return."
            if !self.has_node_in_scope(formatting_element) {
                self.end_tag_error(subject);
                return;
            }

            // "If formatting element is not the current node, this is a parse
            // error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.end_tag_error(subject);
            }

            // "Let furthest block be the topmost node in the stack of open
            // elements that is lower in the stack than formatting element, and
            // is an element in the special category."
            let furthest_block = self.stack_of_open_elements[formatting_stack_index + 1..]
                .iter()
                .copied()
                .find(|&id| self.get_tag_name(id).is_some_and(tags::is_special));

            // "If there is no furthest block, then the UA must first pop all
            // the nodes from the bottom of the stack of open elements, from the
            // current node up to and including formatting element, then remove
            // formatting element from the list of active formatting elements,
            // and finally return."
            let Some(furthest_block) = furthest_block else {
                self.stack_of_open_elements.truncate(formatting_stack_index);
                self.remove_from_active_formatting_elements(formatting_element);
                return;
            };

            // "Let common ancestor be the element immediately above formatting
            // element in the stack of open elements."
            let Some(common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .map(|index| self.stack_of_open_elements[index])
            else {
                return;
            };

            // "Let a bookmark note the position of formatting element in the
            // list of active formatting elements relative to the elements on
            // either side of it in the list."
            let Some(mut bookmark) = self.active_formatting_index_of(formatting_element) else {
                return;
            };

            // "Let node and last node be furthest block."
            let mut node_index = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
                .unwrap_or(formatting_stack_index + 1);
            let mut last_node = furthest_block;

            // "Let inner loop counter be 0."
            let mut inner_loop_counter = 0;
            loop {
                // "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // "Let node be the element immediately above node in the stack
                // of open elements, or if node is no longer in the stack of
                // open elements, the element that was immediately above node in
                // the stack of open elements before node was removed."
                let Some(above) = node_index.checked_sub(1) else {
                    break;
                };
                node_index = above;
                let node = self.stack_of_open_elements[node_index];

                // "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                let mut afe_index = self.active_formatting_index_of(node);

                // "If inner loop counter is greater than 3 and node is in the
                // list of active formatting elements, then remove node from the
                // list of active formatting elements."
                if inner_loop_counter > 3
                    && let Some(index) = afe_index
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                    afe_index = None;
                }

                // "If node is not in the list of active formatting elements,
                // then remove node from the stack of open elements and continue."
                let Some(afe_index) = afe_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // "Create an element for the token for which the element node
                // was created, in the HTML namespace, with common ancestor as
                // the intended parent; replace the entry for node in the list
                // of active formatting elements with an entry for the new
                // element, replace the entry for node in the stack of open
                // elements with an entry for the new element, and let node be
                // the new element."
                let ActiveFormattingElement::Element {
                    tag_name,
                    attributes,
                    ..
                } = self.active_formatting_elements[afe_index].clone()
                else {
                    break;
                };
                let new_element = self.create_element(&tag_name, &attributes);
                self.active_formatting_elements[afe_index] = ActiveFormattingElement::Element {
                    node_id: new_element,
                    tag_name,
                    attributes,
                };
                self.stack_of_open_elements[node_index] = new_element;

                // "If last node is furthest block, then move the aforementioned
                // bookmark to be immediately after the new node in the list of
                // active formatting elements."
                if last_node == furthest_block {
                    bookmark = afe_index + 1;
                }

                // "Append last node to node."
                self.tree.append_child(new_element, last_node);

                // "Set last node to node."
                last_node = new_element;
            }

            // "Insert whatever last node ended up being in the previous step at
            // the appropriate place for inserting a node, but using common
            // ancestor as the override target."
            let location = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_at(location, last_node);

            // "Create an element for the token for which formatting element was
            // created, in the HTML namespace, with furthest block as the
            // intended parent."
            let Some(formatting_index) = self.active_formatting_index_of(formatting_element)
            else {
                return;
            };
            let ActiveFormattingElement::Element {
                tag_name,
                attributes,
                ..
            } = self.active_formatting_elements[formatting_index].clone()
            else {
                return;
            };
            let new_element = self.create_element(&tag_name, &attributes);

            // "Take all of the child nodes of furthest block and append them to
            // the element created in the last step."
            self.tree.move_children(furthest_block, new_element);

            // "Append that new element to furthest block."
            self.tree.append_child(furthest_block, new_element);

            // "Remove formatting element from the list of active formatting
            // elements, and insert the new element into the list of active
            // formatting elements at the position of the aforementioned bookmark."
            let _ = self.active_formatting_elements.remove(formatting_index);
            if formatting_index < bookmark {
                bookmark -= 1;
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node_id: new_element,
                    tag_name,
                    attributes,
                },
            );

            // "Remove formatting element from the stack of open elements, and
            // insert the new element into the stack of open elements
            // immediately below the position of furthest block in that stack."
            self.remove_from_stack(formatting_element);
            let below_furthest = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
                .map_or(self.stack_of_open_elements.len(), |index| index + 1);
            self.stack_of_open_elements.insert(below_furthest, new_element);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn test_misnested_bold_and_paragraph() {
        let doc = parse("<b>1<p>2</b>3</p>");
        assert_eq!(doc.body().html(), "<b>1</b>\n<p><b>2</b>3</p>");
    }

    #[test]
    fn test_misnested_inline_formatting() {
        let doc = parse("<b><i>x</b>y</i>");
        assert_eq!(doc.body().html(), "<b><i>x</i></b><i>y</i>");
    }

    #[test]
    fn test_stray_formatting_end_tag_is_ignored() {
        let doc = parse("<p>a</b>c</p>");
        assert_eq!(doc.body().html(), "<p>ac</p>");
    }
}
