use strum_macros::Display;

use wombat_common::{ParseErrorKind, ParseErrorList};
use wombat_dom::{Attributes, DomTree, NodeId};

use crate::settings::ParserOptions;
use crate::tags;
use crate::tokenizer::{HTMLTokenizer, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// There is no "in template" mode: template contents are parsed as ordinary
/// children of the `template` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list of active formatting elements... is used to handle mis-nested
/// formatting element tags."
///
/// The list contains entries that are either elements or markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFormattingElement {
    /// A formatting element entry.
    Element {
        /// The element in the DOM tree.
        node_id: NodeId,
        /// Tag name of the token the element was created for.
        tag_name: String,
        /// Attributes of that token, kept to recreate the element during
        /// reconstruction and the adoption agency algorithm.
        attributes: Attributes,
    },
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element."
    ///
    /// Markers are pushed when entering applet, object, marquee, template,
    /// td, th and caption.
    Marker,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Pulls tokens from an [`HTMLTokenizer`] one at a time and builds a
/// [`DomTree`]. The tree builder drives the tokenizer: it switches it to the
/// RCDATA, RAWTEXT, script data and PLAINTEXT states after inserting the
/// elements that need them.
pub struct HtmlTreeBuilder {
    pub(super) tokenizer: HTMLTokenizer,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was opened
    /// and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// Set from a DOCTYPE token's force-quirks flag.
    pub(super) quirks_mode: bool,

    /// Drop the next token if it is a LINE FEED (after `pre`, `listing`, `textarea`).
    pub(super) ignore_next_line_feed: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_characters: Vec<char>,

    /// True when parsing a body fragment into a prebuilt shell.
    pub(super) fragment: bool,

    pub(super) tree: DomTree,
    pub(super) stopped: bool,
}

impl HtmlTreeBuilder {
    /// Create a tree builder for a whole document.
    ///
    /// When `options` asks for error tracking, it replaces whatever error list
    /// the tokenizer was created with so both stages share one capped list.
    #[must_use]
    pub fn new(mut tokenizer: HTMLTokenizer, options: ParserOptions) -> Self {
        if options.is_tracking() {
            tokenizer.set_error_list(options.error_list());
        }
        Self {
            tokenizer,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            quirks_mode: false,
            ignore_next_line_feed: false,
            pending_table_characters: Vec::new(),
            fragment: false,
            // DomTree::new() creates the Document node at NodeId::ROOT
            tree: DomTree::new(),
            stopped: false,
        }
    }

    /// Create a tree builder that parses into the body of an empty
    /// `html`/`head`/`body` shell.
    ///
    /// The input is processed in the "in body" insertion mode with `body` as
    /// the current node, so `<html>`, `<head>` and `<body>` tags in it only
    /// merge attributes or are ignored.
    #[must_use]
    pub fn for_body_fragment(tokenizer: HTMLTokenizer, options: ParserOptions) -> Self {
        let mut builder = Self::new(tokenizer, options);

        let html = builder.tree.alloc_element("html", Attributes::new());
        builder.tree.append_child(NodeId::ROOT, html);
        let head = builder.tree.alloc_element("head", Attributes::new());
        builder.tree.append_child(html, head);
        let body = builder.tree.alloc_element("body", Attributes::new());
        builder.tree.append_child(html, body);

        builder.stack_of_open_elements.extend([html, body]);
        builder.head_element_pointer = Some(head);
        builder.frameset_ok = false;
        builder.fragment = true;
        builder.insertion_mode = InsertionMode::InBody;
        builder
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// Run the tree builder to the end of input.
    ///
    /// Returns the finished tree together with the parse errors recorded by
    /// the tokenizer and the tree builder. Open elements at the end of input
    /// are closed implicitly: they already sit in the tree where they were
    /// inserted.
    #[must_use]
    pub fn run(mut self) -> (DomTree, ParseErrorList) {
        while !self.stopped {
            let Some(token) = self.tokenizer.next() else {
                break;
            };

            // "If the next token is a U+000A LINE FEED (LF) character token,
            // then ignore that token and move on to the next one."
            if std::mem::take(&mut self.ignore_next_line_feed)
                && matches!(token, Token::Character { data: '\n' })
            {
                continue;
            }

            if let Token::StartTag {
                name,
                self_closing: true,
                ..
            } = &token
                && !tags::is_void(name)
                && tags::is_known(name)
                && !self.in_foreign_content()
                && self.tokenizer.errors().can_add_error()
            {
                self.tokenizer
                    .record_error(ParseErrorKind::NonVoidSelfClosingTag(name.clone()));
            }

            self.process_token(&token);
        }

        let errors = self.tokenizer.take_errors();
        (self.tree, errors)
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Process a token using the rules for the current insertion mode. Also
    /// used to "reprocess the token" after a mode switch.
    pub(super) fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// Switch the insertion mode.
    pub(super) fn switch_to(&mut self, mode: InsertionMode) {
        if mode != self.insertion_mode {
            tracing::trace!(from = %self.insertion_mode, to = %mode, "insertion mode");
        }
        self.insertion_mode = mode;
    }

    /// "Let the original insertion mode be the current insertion mode", then
    /// switch to `mode`.
    pub(super) fn switch_with_return(&mut self, mode: InsertionMode) {
        self.original_insertion_mode = Some(self.insertion_mode);
        self.switch_to(mode);
    }

    /// Switch back to the original insertion mode.
    pub(super) fn return_to_original_mode(&mut self) {
        let mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        self.switch_to(mode);
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record that `token` was not expected in the current insertion mode.
    pub(super) fn parse_error(&mut self, token: &Token) {
        if self.tokenizer.errors().can_add_error() {
            self.tokenizer.record_error(ParseErrorKind::UnexpectedToken {
                token: token.to_string(),
                mode: self.insertion_mode.to_string(),
            });
        }
    }

    /// Record a stray or misplaced end tag.
    pub(super) fn end_tag_error(&mut self, name: &str) {
        if self.tokenizer.errors().can_add_error() {
            self.tokenizer
                .record_error(ParseErrorKind::UnexpectedEndTag(name.to_string()));
        }
    }

    /// Record an element that had to be closed implicitly.
    pub(super) fn unclosed_element_error(&mut self, node: NodeId) {
        if self.tokenizer.errors().can_add_error() {
            let name = self.tree.tag_name(node).unwrap_or_default().to_string();
            self.tokenizer
                .record_error(ParseErrorKind::UnclosedElement(name));
        }
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    pub(super) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }
}
