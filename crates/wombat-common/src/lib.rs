//! Common utilities for the Wombat HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Parse errors** - positioned, non-fatal error records and a capped list
//! - **Warning System** - deduplicated diagnostics for unsupported constructs

pub mod error;
pub mod warning;

pub use error::{ParseError, ParseErrorKind, ParseErrorList};
