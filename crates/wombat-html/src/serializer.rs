//! HTML serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! The plain serializer writes the tree back as markup. With
//! [`OutputSettings::pretty_print`] enabled (the default) block-level
//! elements start on their own line, indented by their depth, and text
//! outside whitespace-preserving elements is collapsed.

use strum_macros::{Display, EnumString};
use wombat_dom::{DomTree, NodeId, NodeType};

use crate::entities::{self, EscapeContext};
use crate::tags;

/// Which characters are written as named entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EscapeMode {
    /// Only the markup-significant characters and U+00A0.
    #[default]
    Base,
    /// Every character that has a named entity.
    Extended,
    /// XHTML-safe output: U+00A0 is written numerically.
    Xhtml,
}

/// The character set output will be encoded in. Characters it cannot
/// represent are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Charset {
    /// Any character can be written as-is.
    #[default]
    Utf8,
    /// Non-ASCII characters are escaped.
    Ascii,
}

/// Output syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Syntax {
    /// HTML: void elements as `<br>`, boolean attributes collapsed.
    #[default]
    Html,
    /// XML-compatible: void elements as `<br />`, every attribute has a value.
    Xml,
}

/// Settings that control how a tree is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pretty_print: bool,
    indent_amount: usize,
    max_padding_width: usize,
    escape_mode: EscapeMode,
    charset: Charset,
    syntax: Syntax,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty_print: true,
            indent_amount: 1,
            max_padding_width: 30,
            escape_mode: EscapeMode::Base,
            charset: Charset::Utf8,
            syntax: Syntax::Html,
        }
    }
}

impl OutputSettings {
    /// Whether output is pretty printed.
    #[must_use]
    pub const fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// Spaces per level of indentation when pretty printing.
    #[must_use]
    pub const fn indent_amount(&self) -> usize {
        self.indent_amount
    }

    /// Indentation never exceeds this many spaces, however deep the tree.
    #[must_use]
    pub const fn max_padding_width(&self) -> usize {
        self.max_padding_width
    }

    /// The entity escaping mode.
    #[must_use]
    pub const fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }

    /// The output character set.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// The output syntax.
    #[must_use]
    pub const fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Enable or disable pretty printing.
    #[must_use]
    pub const fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Set the number of spaces per indentation level.
    #[must_use]
    pub const fn with_indent_amount(mut self, indent_amount: usize) -> Self {
        self.indent_amount = indent_amount;
        self
    }

    /// Set the maximum indentation width.
    #[must_use]
    pub const fn with_max_padding_width(mut self, max_padding_width: usize) -> Self {
        self.max_padding_width = max_padding_width;
        self
    }

    /// Set the entity escaping mode.
    #[must_use]
    pub const fn with_escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    /// Set the output character set.
    #[must_use]
    pub const fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Set the output syntax.
    #[must_use]
    pub const fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}

/// Serialize `node` and its descendants.
#[must_use]
pub fn outer_html(tree: &DomTree, node: NodeId, settings: &OutputSettings) -> String {
    let mut printer = Printer::new(tree, node, settings);
    printer.traverse(node, 0);
    printer.finish()
}

/// Serialize the children of `node`.
#[must_use]
pub fn html(tree: &DomTree, node: NodeId, settings: &OutputSettings) -> String {
    let Some(first) = tree.first_child(node) else {
        return String::new();
    };
    let mut printer = Printer::new(tree, first, settings);
    for &child in tree.children(node) {
        printer.traverse(child, 0);
    }
    printer.finish()
}

/// Serialize a whole document: its doctype, comments and `html` element.
#[must_use]
pub fn serialize_document(tree: &DomTree, settings: &OutputSettings) -> String {
    html(tree, NodeId::ROOT, settings)
}

/// Whitespace as the serializer and text extraction see it.
pub(crate) const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Append `text` to `out`, collapsing each whitespace run into one space.
///
/// With `trim_leading`, whitespace before the first other character is
/// dropped; with `trim_trailing`, whitespace after the last one is.
pub(crate) fn append_normalised(out: &mut String, text: &str, trim_leading: bool, trim_trailing: bool) {
    let mut reached_non_white = false;
    let mut pending_space = false;
    for c in text.chars() {
        if is_whitespace(c) {
            if trim_leading && !reached_non_white {
                continue;
            }
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        reached_non_white = true;
        out.push(c);
    }
    if pending_space && !trim_trailing {
        out.push(' ');
    }
}

/// A step of the printer's walk: open a node, or close an element whose
/// children have all been written.
#[derive(Debug, Clone, Copy)]
enum Visit {
    Enter(NodeId, usize),
    Leave(NodeId, usize),
}

/// Walks a subtree and writes markup.
///
/// `root` is the first node handed to the printer; it is never indented,
/// so serializations do not start with a line break.
struct Printer<'a> {
    tree: &'a DomTree,
    root: NodeId,
    settings: &'a OutputSettings,
    preserve_whitespace: bool,
    out: String,
}

impl<'a> Printer<'a> {
    fn new(tree: &'a DomTree, root: NodeId, settings: &'a OutputSettings) -> Self {
        // Content inside an open pre (or similar) keeps its whitespace even
        // when only part of it is printed.
        let preserve_whitespace = settings.pretty_print()
            && std::iter::once(root)
                .chain(tree.ancestors(root))
                .any(|id| tree.tag_name(id).is_some_and(tags::preserves_whitespace));
        Self {
            tree,
            root,
            settings,
            preserve_whitespace,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        if self.settings.pretty_print() {
            self.out.trim().to_string()
        } else {
            self.out
        }
    }

    /// Write `node` and its subtree. The walk keeps its own stack, so the
    /// depth of the tree is not limited by the call stack.
    fn traverse(&mut self, node: NodeId, depth: usize) {
        let tree = self.tree;
        let mut stack = vec![Visit::Enter(node, depth)];
        while let Some(visit) = stack.pop() {
            let (node, depth) = match visit {
                Visit::Enter(node, depth) => (node, depth),
                Visit::Leave(node, depth) => {
                    self.element_tail(node, depth);
                    continue;
                }
            };
            let Some(data) = tree.get(node) else {
                continue;
            };
            match &data.node_type {
                NodeType::Element(_) => {
                    self.element_head(node, depth);
                    stack.push(Visit::Leave(node, depth));
                    stack.extend(
                        tree.children(node)
                            .iter()
                            .rev()
                            .map(|&child| Visit::Enter(child, depth + 1)),
                    );
                }
                NodeType::Document => {
                    stack.extend(
                        tree.children(node)
                            .iter()
                            .rev()
                            .map(|&child| Visit::Enter(child, depth)),
                    );
                }
                NodeType::Text(text) => self.text(node, text, depth),
                NodeType::Comment(comment) => {
                    if self.should_indent(Some(node)) {
                        self.indent(depth);
                    }
                    self.out.push_str("<!--");
                    self.out.push_str(comment);
                    self.out.push_str("-->");
                }
                NodeType::Doctype(doctype) => {
                    if self.should_indent(Some(node)) {
                        self.indent(depth);
                    }
                    let has_ids = !doctype.public_id.is_empty() || !doctype.system_id.is_empty();
                    self.out.push_str(if has_ids || self.settings.syntax() == Syntax::Xml {
                        "<!DOCTYPE"
                    } else {
                        "<!doctype"
                    });
                    if !doctype.name.is_empty() {
                        self.out.push(' ');
                        self.out.push_str(&doctype.name);
                    }
                    if !doctype.public_id.is_empty() {
                        self.out.push_str(" PUBLIC \"");
                        self.out.push_str(&doctype.public_id);
                        self.out.push('"');
                    } else if !doctype.system_id.is_empty() {
                        self.out.push_str(" SYSTEM");
                    }
                    if !doctype.system_id.is_empty() {
                        self.out.push_str(" \"");
                        self.out.push_str(&doctype.system_id);
                        self.out.push('"');
                    }
                    self.out.push('>');
                }
            }
        }
    }

    fn element_head(&mut self, node: NodeId, depth: usize) {
        let Some(element) = self.tree.as_element(node) else {
            return;
        };
        if self.settings.pretty_print() && self.should_indent(Some(node)) {
            self.indent(depth);
        }

        self.out.push('<');
        self.out.push_str(&element.tag_name);
        for attr in &element.attrs {
            self.out.push(' ');
            self.out.push_str(&attr.name);
            // [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes)
            let collapse = self.settings.syntax() == Syntax::Html
                && tags::is_boolean_attribute(&attr.name)
                && (attr.value.is_empty() || attr.value.eq_ignore_ascii_case(&attr.name));
            if !collapse {
                self.out.push_str("=\"");
                self.out.push_str(&entities::escape(
                    &attr.value,
                    self.settings,
                    EscapeContext::Attribute,
                ));
                self.out.push('"');
            }
        }

        if tags::is_void(&element.tag_name) && self.tree.children(node).is_empty() {
            match self.settings.syntax() {
                Syntax::Html => self.out.push('>'),
                Syntax::Xml => self.out.push_str(" />"),
            }
        } else if self.keeps_self_closing_form(node) {
            self.out.push_str(" />");
        } else {
            self.out.push('>');
        }

        if self.settings.pretty_print() && tags::preserves_whitespace(&element.tag_name) {
            self.preserve_whitespace = true;
        }
    }

    /// An unknown element written `<path />` in the source, with no children,
    /// is written back the same way.
    fn keeps_self_closing_form(&self, node: NodeId) -> bool {
        self.tree.as_element(node).is_some_and(|element| {
            element.self_closing
                && !tags::is_known(&element.tag_name)
                && self.tree.children(node).is_empty()
        })
    }

    fn element_tail(&mut self, node: NodeId, depth: usize) {
        let Some(tag_name) = self.tree.tag_name(node) else {
            return;
        };
        if (tags::is_void(tag_name) && self.tree.children(node).is_empty())
            || self.keeps_self_closing_form(node)
        {
            return;
        }

        if self.settings.pretty_print() {
            let first_content = self.next_non_blank(self.tree.first_child(node));
            if self.should_indent(first_content) {
                self.indent(depth);
            }
        }
        self.out.push_str("</");
        self.out.push_str(tag_name);
        self.out.push('>');

        // Leaving the outermost whitespace-preserving element.
        if self.preserve_whitespace
            && tags::preserves_whitespace(tag_name)
            && !self
                .tree
                .ancestors(node)
                .any(|id| self.tree.tag_name(id).is_some_and(tags::preserves_whitespace))
        {
            self.preserve_whitespace = false;
        }
    }

    fn text(&mut self, node: NodeId, text: &str, depth: usize) {
        let parent = self.tree.parent(node);
        let parent_tag = parent.and_then(|id| self.tree.tag_name(id));

        // "If the parent of current node is a style, script, xmp, iframe,
        // noembed, noframes, or plaintext element ... then append the value of
        // current node's data IDL attribute literally."
        if parent_tag.is_some_and(tags::is_raw_text) {
            self.out.push_str(text);
            return;
        }

        if !self.settings.pretty_print() || self.preserve_whitespace {
            self.out
                .push_str(&entities::escape(text, self.settings, EscapeContext::Text));
            return;
        }

        let (trim_leading, trim_trailing) = if self.is_block(parent) {
            let prev = self.tree.prev_sibling(node);
            let next = self.tree.next_sibling(node);
            (
                prev.is_none_or(|id| !self.is_text(id) && self.should_indent(Some(id))),
                next.is_none_or(|id| !self.is_text(id) && self.should_indent(Some(id))),
            )
        } else {
            (false, false)
        };

        if !is_blank(text) && self.is_block(parent) && self.should_indent(Some(node)) {
            self.indent(depth);
        }

        let mut normalised = String::with_capacity(text.len());
        append_normalised(&mut normalised, text, trim_leading, trim_trailing);
        self.out.push_str(&entities::escape(
            &normalised,
            self.settings,
            EscapeContext::Text,
        ));
    }

    fn indent(&mut self, depth: usize) {
        if !self.settings.pretty_print() {
            return;
        }
        let width = (depth * self.settings.indent_amount()).min(self.settings.max_padding_width());
        self.out.push('\n');
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    /// Whether `node` starts on a new line.
    fn should_indent(&self, node: Option<NodeId>) -> bool {
        let Some(node) = node else {
            return false;
        };
        if node == self.root || self.preserve_whitespace || self.is_blank_text(Some(node)) {
            return false;
        }
        if self.is_block(Some(node)) {
            return true;
        }

        let prev = self.previous_non_blank(node);
        if self.is_block(prev) {
            return true;
        }

        let parent = self.tree.parent(node);
        if !self.is_block(parent)
            || parent
                .and_then(|id| self.tree.tag_name(id))
                .is_some_and(tags::is_inline_container)
            || !parent.is_some_and(|id| self.has_non_text_nodes(id))
        {
            return false;
        }

        prev.is_none_or(|id| !self.is_text(id) && self.tree.as_element(id).is_none())
    }

    /// Block-level for layout: a known block tag, or an unknown tag that sits
    /// directly under the document or contains blocks.
    fn is_block(&self, node: Option<NodeId>) -> bool {
        let Some(node) = node else {
            return false;
        };
        let Some(tag) = self.tree.tag_name(node) else {
            return false;
        };
        tags::is_block(tag)
            || (!tags::is_known(tag)
                && (self.tree.parent(node) == Some(NodeId::ROOT) || self.has_child_blocks(node)))
    }

    /// Checks the first few element children only.
    fn has_child_blocks(&self, node: NodeId) -> bool {
        self.tree
            .children(node)
            .iter()
            .filter_map(|&id| self.tree.tag_name(id))
            .take(MAX_SCAN)
            .any(|tag| tags::is_block(tag) || !tags::is_known(tag))
    }

    fn has_non_text_nodes(&self, node: NodeId) -> bool {
        self.tree
            .children(node)
            .iter()
            .take(MAX_SCAN)
            .any(|&id| !self.is_text(id))
    }

    fn previous_non_blank(&self, node: NodeId) -> Option<NodeId> {
        let mut prev = self.tree.prev_sibling(node);
        while self.is_blank_text(prev) {
            prev = prev.and_then(|id| self.tree.prev_sibling(id));
        }
        prev
    }

    fn next_non_blank(&self, mut node: Option<NodeId>) -> Option<NodeId> {
        while self.is_blank_text(node) {
            node = node.and_then(|id| self.tree.next_sibling(id));
        }
        node
    }

    fn is_text(&self, node: NodeId) -> bool {
        self.tree.as_text(node).is_some()
    }

    fn is_blank_text(&self, node: Option<NodeId>) -> bool {
        node.and_then(|id| self.tree.as_text(id)).is_some_and(is_blank)
    }
}

const MAX_SCAN: usize = 5;

fn is_blank(text: &str) -> bool {
    text.chars().all(is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wombat_dom::Attributes;

    fn tree_with_body() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let html = tree.alloc_element("html", Attributes::new());
        tree.append_child(NodeId::ROOT, html);
        let body = tree.alloc_element("body", Attributes::new());
        tree.append_child(html, body);
        (tree, body)
    }

    #[test]
    fn test_append_normalised_collapses_runs() {
        let mut out = String::new();
        append_normalised(&mut out, "  a \n\t b  ", true, true);
        assert_eq!(out, "a b");

        let mut out = String::new();
        append_normalised(&mut out, "  a  ", false, false);
        assert_eq!(out, " a ");
    }

    #[test]
    fn test_void_element_syntax() {
        let (mut tree, body) = tree_with_body();
        let br = tree.alloc_element("br", Attributes::new());
        tree.append_child(body, br);

        let settings = OutputSettings::default();
        assert_eq!(html(&tree, body, &settings), "<br>");
        let xml = settings.with_syntax(Syntax::Xml);
        assert_eq!(html(&tree, body, &xml), "<br />");
    }

    #[test]
    fn test_boolean_attribute_collapse() {
        let (mut tree, body) = tree_with_body();
        let attrs: Attributes = [("checked", ""), ("name", "x")].into_iter().collect();
        let input = tree.alloc_element("input", attrs);
        tree.append_child(body, input);

        let settings = OutputSettings::default();
        assert_eq!(html(&tree, body, &settings), "<input checked name=\"x\">");
        let xml = settings.with_syntax(Syntax::Xml);
        assert_eq!(html(&tree, body, &xml), "<input checked=\"\" name=\"x\" />");
    }

    #[test]
    fn test_settings_parse_from_names() {
        assert_eq!("extended".parse::<EscapeMode>(), Ok(EscapeMode::Extended));
        assert_eq!("ascii".parse::<Charset>(), Ok(Charset::Ascii));
        assert_eq!(Syntax::Xml.to_string(), "xml");
    }

    #[test]
    fn test_indentation_capped() {
        let settings = OutputSettings::default()
            .with_indent_amount(4)
            .with_max_padding_width(6);
        let (mut tree, body) = tree_with_body();
        let mut parent = body;
        for _ in 0..3 {
            let div = tree.alloc_element("div", Attributes::new());
            tree.append_child(parent, div);
            parent = div;
        }
        let out = html(&tree, body, &settings);
        assert_eq!(out, "<div>\n    <div>\n      <div></div>\n    </div>\n</div>");
    }
}
