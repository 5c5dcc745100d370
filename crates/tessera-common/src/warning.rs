//! Stylesheet warnings routed through `tracing`.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the scanner, parser and cascade to report dropped declarations,
//! unknown at-rules and similar recoverable problems.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (emitted once per unique message)
///
/// Returns `true` when the warning was emitted, `false` when it had
/// already been reported.
///
/// # Example
/// ```
/// use tessera_common::warning::warn_once;
///
/// let _ = warn_once("CSS", "unknown at-rule '@font-face' skipped");
/// ```
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
    should_emit
}

/// Clear all recorded warnings (call when the set of loaded sheets is reset)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let message = "warning-test: duplicated message";
        let first = warn_once("test", message);
        let second = warn_once("test", message);
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_components_are_separate_keys() {
        assert!(warn_once("warning-test-a", "same text"));
        assert!(warn_once("warning-test-b", "same text"));
    }
}
