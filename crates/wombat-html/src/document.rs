//! The parsed document and borrowed handles to its nodes.

use wombat_common::ParseErrorList;
use wombat_dom::{DomTree, NodeId, NodeType};

use crate::serializer::{self, OutputSettings};
use crate::tags;

/// A parsed HTML document.
///
/// Owns the tree, the parse errors recorded while building it, and the
/// settings used when serializing it.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    errors: ParseErrorList,
    settings: OutputSettings,
}

impl Document {
    /// Wrap a finished tree.
    #[must_use]
    pub fn new(tree: DomTree, errors: ParseErrorList) -> Self {
        Self {
            tree,
            errors,
            settings: OutputSettings::default(),
        }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The Document node itself.
    #[must_use]
    pub const fn root(&self) -> NodeRef<'_> {
        self.handle(NodeId::ROOT)
    }

    /// The `body` element, or the `frameset` that replaced it.
    ///
    /// Parsing always produces one of the two. Should neither exist, the
    /// Document node is returned so that serializing still works.
    #[must_use]
    pub fn body(&self) -> NodeRef<'_> {
        self.handle(self.tree.body().unwrap_or(NodeId::ROOT))
    }

    /// The `head` element.
    #[must_use]
    pub fn head(&self) -> Option<NodeRef<'_>> {
        self.tree.head().map(|id| self.handle(id))
    }

    /// The `html` element.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeRef<'_>> {
        self.tree.document_element().map(|id| self.handle(id))
    }

    /// Text of the first `title` element, whitespace-normalised and trimmed.
    /// Empty if there is none.
    #[must_use]
    pub fn title(&self) -> String {
        self.get_elements_by_tag("title")
            .first()
            .map(NodeRef::text)
            .unwrap_or_default()
    }

    /// The whole document serialized.
    #[must_use]
    pub fn html(&self) -> String {
        serializer::serialize_document(&self.tree, &self.settings)
    }

    /// Same as [`Document::html`]: the Document node has no tags of its own.
    #[must_use]
    pub fn outer_html(&self) -> String {
        self.html()
    }

    /// The normalised text of the whole document.
    #[must_use]
    pub fn text(&self) -> String {
        self.root().text()
    }

    /// Parse errors recorded while parsing. Empty unless tracking was enabled.
    #[must_use]
    pub const fn errors(&self) -> &ParseErrorList {
        &self.errors
    }

    /// The settings used by [`Document::html`] and every [`NodeRef`].
    #[must_use]
    pub const fn output_settings(&self) -> &OutputSettings {
        &self.settings
    }

    /// Change how the document is serialized.
    pub const fn output_settings_mut(&mut self) -> &mut OutputSettings {
        &mut self.settings
    }

    /// All elements with the given tag name, in document order.
    #[must_use]
    pub fn get_elements_by_tag(&self, tag_name: &str) -> Vec<NodeRef<'_>> {
        let tag_name = tag_name.to_ascii_lowercase();
        self.tree
            .descendants(NodeId::ROOT)
            .filter(|&id| self.tree.is_element_named(id, &tag_name))
            .map(|id| self.handle(id))
            .collect()
    }

    /// The first element whose `id` attribute equals `id`.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        self.tree
            .descendants(NodeId::ROOT)
            .find(|&node| {
                self.tree
                    .as_element(node)
                    .is_some_and(|element| element.id() == Some(id))
            })
            .map(|node| self.handle(node))
    }

    /// A handle to any node in the tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.tree.get(id).map(|_| self.handle(id))
    }

    const fn handle(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef {
            tree: &self.tree,
            settings: &self.settings,
            id,
        }
    }
}

/// A borrowed handle to one node of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    settings: &'a OutputSettings,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// The node's id in the tree.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name, for elements.
    #[must_use]
    pub fn tag_name(&self) -> Option<&'a str> {
        self.tree.tag_name(self.id)
    }

    /// Returns true if this node is an element.
    #[must_use]
    pub fn is_element(&self) -> bool {
        self.tree.as_element(self.id).is_some()
    }

    /// Value of an attribute, for elements.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.tree
            .as_element(self.id)
            .and_then(|element| element.attrs.get(name))
    }

    /// Returns true if the element has the attribute.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Child nodes, in order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let (tree, settings) = (self.tree, self.settings);
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeRef { tree, settings, id })
    }

    /// The parent node. The Document node has none.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| Self { id, ..*self })
    }

    /// Data of a text or comment node.
    #[must_use]
    pub fn data(&self) -> Option<&'a str> {
        match &self.tree.get(self.id)?.node_type {
            NodeType::Text(data) | NodeType::Comment(data) => Some(data.as_str()),
            _ => None,
        }
    }

    /// The combined text of this node and its descendants.
    ///
    /// Whitespace is normalised except inside `pre` and similar elements,
    /// block elements and `br` are separated by a space, script and style
    /// contents are skipped, and the result is trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        let mut accum = String::new();
        // Elements are pushed a second time as `exiting`, so the space after
        // a block is decided once its children are written.
        let mut stack = vec![(self.id, false)];
        while let Some((node, exiting)) = stack.pop() {
            if exiting {
                self.end_element_text(node, &mut accum);
                continue;
            }
            let Some(data) = self.tree.get(node) else {
                continue;
            };
            match &data.node_type {
                NodeType::Text(text) => self.append_text_node(node, text, &mut accum),
                NodeType::Element(element) => {
                    let tag = element.tag_name.as_str();
                    if !accum.is_empty()
                        && (tags::is_block(tag) || tag == "br")
                        && !ends_with_whitespace(&accum)
                    {
                        accum.push(' ');
                    }
                    stack.push((node, true));
                    stack.extend(self.children_in_reverse(node));
                }
                NodeType::Document => stack.extend(self.children_in_reverse(node)),
                NodeType::Doctype(_) | NodeType::Comment(_) => {}
            }
        }
        accum.trim().to_string()
    }

    fn children_in_reverse(&self, node: NodeId) -> impl Iterator<Item = (NodeId, bool)> + use<'a> {
        let tree = self.tree;
        tree.children(node).iter().rev().map(|&child| (child, false))
    }

    fn append_text_node(&self, node: NodeId, text: &str, accum: &mut String) {
        let parent_tag = self.tree.parent(node).and_then(|id| self.tree.tag_name(id));
        if parent_tag.is_some_and(|tag| matches!(tag, "script" | "style")) {
            return;
        }
        if self.preserves_whitespace(node) {
            accum.push_str(text);
        } else {
            append_normalised_text(accum, text);
        }
    }

    /// A block followed by text is separated from it by a space.
    fn end_element_text(&self, node: NodeId, accum: &mut String) {
        let block = self.tree.tag_name(node).is_some_and(tags::is_block);
        let next_is_text = self
            .tree
            .next_sibling(node)
            .is_some_and(|id| self.tree.as_text(id).is_some());
        if block && next_is_text && !ends_with_whitespace(accum) {
            accum.push(' ');
        }
    }

    /// Text under `pre`, `textarea` and the like keeps its whitespace.
    fn preserves_whitespace(&self, text_node: NodeId) -> bool {
        self.tree
            .ancestors(text_node)
            .take(6)
            .any(|id| self.tree.tag_name(id).is_some_and(tags::preserves_whitespace))
    }

    /// The HTML of this node's children.
    #[must_use]
    pub fn html(&self) -> String {
        serializer::html(self.tree, self.id, self.settings)
    }

    /// The HTML of this node including its own tags.
    #[must_use]
    pub fn outer_html(&self) -> String {
        serializer::outer_html(self.tree, self.id, self.settings)
    }
}

/// Whitespace for text extraction also covers U+00A0.
const fn is_text_whitespace(c: char) -> bool {
    serializer::is_whitespace(c) || c == '\u{A0}'
}

fn ends_with_whitespace(accum: &str) -> bool {
    accum.ends_with(is_text_whitespace)
}

/// Append `text` with each whitespace run collapsed to a single space,
/// dropping leading whitespace when `accum` already ends in some.
fn append_normalised_text(accum: &mut String, text: &str) {
    let mut last_was_white = ends_with_whitespace(accum);
    for c in text.chars() {
        if is_text_whitespace(c) {
            if last_was_white {
                continue;
            }
            accum.push(' ');
            last_was_white = true;
        } else {
            accum.push(c);
            last_was_white = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_text_separates_blocks() {
        let doc = parse("<div>One</div><div>Two<br>Three</div>");
        assert_eq!(doc.body().text(), "One Two Three");
    }

    #[test]
    fn test_text_keeps_pre_whitespace() {
        let doc = parse("<p>a   b</p><pre>c   d</pre>");
        assert_eq!(doc.body().text(), "a b c   d");
    }

    #[test]
    fn test_text_skips_script() {
        let doc = parse("<p>x</p><script>var y = 1;</script>");
        assert_eq!(doc.body().text(), "x");
    }

    #[test]
    fn test_append_normalised_text_drops_repeat_space() {
        let mut accum = String::from("a ");
        append_normalised_text(&mut accum, "  b\n c");
        assert_eq!(accum, "a b c");
    }
}
