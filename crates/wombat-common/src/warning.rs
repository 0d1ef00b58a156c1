//! Parser warnings routed through `tracing`.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and tree builder to report constructs they accept
//! but do not model, such as template contents and foreign content.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported construct (emitted once per unique message)
///
/// The warning is emitted with [`tracing::warn!`]; nothing is printed unless
/// the embedding application installs a subscriber.
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "<math> content is parsed as ordinary elements");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}

/// Clear all recorded warnings (call between unrelated documents)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Returns true if the given warning has already been emitted.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The warning set is global; tests that clear it must not interleave.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> std::sync::MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_warn_once_records_message() {
        let _guard = serial();
        warn_once("Test", "first message");
        assert!(was_warned("Test", "first message"));
        assert!(!was_warned("Test", "never emitted"));
    }

    #[test]
    fn test_components_are_distinct_keys() {
        let _guard = serial();
        warn_once("Tokenizer", "shared text");
        assert!(was_warned("Tokenizer", "shared text"));
        assert!(!was_warned("Tree Builder", "shared text"));
    }

    #[test]
    fn test_clear_warnings_lets_a_message_fire_again() {
        let _guard = serial();
        warn_once("Test", "repeated message");
        clear_warnings();
        assert!(!was_warned("Test", "repeated message"));

        warn_once("Test", "repeated message");
        assert!(was_warned("Test", "repeated message"));
    }
}
