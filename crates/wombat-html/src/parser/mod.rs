//! HTML tree construction.
//!
//! Implements [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction).
//! Each group of insertion modes lives in its own file; the shared
//! algorithms (scopes, implied end tags, active formatting elements) are in
//! `helpers` and `adoption`.

mod adoption;
mod after_modes;
mod core;
mod head_modes;
mod helpers;
mod in_body;
mod select_modes;
mod table_modes;

pub use self::core::{ActiveFormattingElement, HtmlTreeBuilder, InsertionMode};
