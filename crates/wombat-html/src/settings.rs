//! Parser configuration.

use wombat_common::ParseErrorList;

/// Options controlling a parse.
///
/// Parse errors are only recorded when asked for. The default keeps none,
/// so a plain [`crate::parse`] never pays for error bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of parse errors to keep. Zero disables tracking.
    pub max_errors: usize,
}

impl ParserOptions {
    /// Options that keep up to `max_errors` parse errors.
    #[must_use]
    pub const fn tracking(max_errors: usize) -> Self {
        Self { max_errors }
    }

    /// Returns true if parse errors will be recorded.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.max_errors > 0
    }

    /// An empty error list sized for these options.
    #[must_use]
    pub fn error_list(&self) -> ParseErrorList {
        if self.is_tracking() {
            ParseErrorList::tracking(self.max_errors)
        } else {
            ParseErrorList::no_tracking()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_does_not_track() {
        let options = ParserOptions::default();
        assert!(!options.is_tracking());
        assert!(!options.error_list().can_add_error());
    }

    #[test]
    fn test_tracking_sets_limit() {
        let options = ParserOptions::tracking(3);
        assert_eq!(options.error_list().max_size(), 3);
    }
}
