//! Operation status reporting
//!
//! Every public engine operation leaves behind exactly one [`SearchStatus`]
//! describing its outcome. The status is reset at the start of each operation
//! and recomputed, so callers always read the result of the most recent call.
//! Statuses are produced only by the engine; callers consume them read-only,
//! typically through [`crate::message::status_message`].

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Find Status Codes
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome codes for single-find and replace preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindStatusCode {
    /// The search string was not found.
    NoMatch,
    /// The search ran off the document and restarted from the opposite end.
    Wrapped,
    /// The target refused the edit (read-only or failed validation).
    ReadOnly,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Status
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of outcomes a find/replace operation can report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No outcome to report (initial state, or the operation succeeded
    /// without anything noteworthy happening).
    #[default]
    None,
    /// A single-find outcome.
    Find(FindStatusCode),
    /// The pattern failed to compile; carries the parser's message.
    InvalidRegex(String),
    /// Replace-all finished, replacing this many occurrences.
    ReplaceAll(usize),
    /// Select-all finished, selecting this many occurrences.
    FindAll(usize),
}

impl SearchStatus {
    /// Whether the reporting operation is considered successful.
    ///
    /// A wrapped search still found something, so it counts as success; a
    /// zero-count replace-all or select-all does not.
    pub fn was_successful(&self) -> bool {
        match self {
            SearchStatus::None => true,
            SearchStatus::Find(FindStatusCode::Wrapped) => true,
            SearchStatus::Find(FindStatusCode::NoMatch) => false,
            SearchStatus::Find(FindStatusCode::ReadOnly) => false,
            SearchStatus::InvalidRegex(_) => false,
            SearchStatus::ReplaceAll(count) | SearchStatus::FindAll(count) => *count > 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(SearchStatus::default(), SearchStatus::None);
    }

    #[test]
    fn test_none_and_wrapped_are_successful() {
        assert!(SearchStatus::None.was_successful());
        assert!(SearchStatus::Find(FindStatusCode::Wrapped).was_successful());
    }

    #[test]
    fn test_failures_are_not_successful() {
        assert!(!SearchStatus::Find(FindStatusCode::NoMatch).was_successful());
        assert!(!SearchStatus::Find(FindStatusCode::ReadOnly).was_successful());
        assert!(!SearchStatus::InvalidRegex("boom".to_string()).was_successful());
    }

    #[test]
    fn test_counted_statuses_require_nonzero_count() {
        assert!(SearchStatus::ReplaceAll(3).was_successful());
        assert!(!SearchStatus::ReplaceAll(0).was_successful());
        assert!(SearchStatus::FindAll(1).was_successful());
        assert!(!SearchStatus::FindAll(0).was_successful());
    }
}
