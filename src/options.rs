//! Search option toggles
//!
//! The engine's behavior is controlled by seven independent on/off options.
//! Activating or deactivating an option may have side effects on the engine's
//! state (scope confinement, incremental anchor capture); those live in
//! [`crate::engine::FindReplaceLogic`]; this module only defines the option
//! vocabulary itself.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Search Options
// ─────────────────────────────────────────────────────────────────────────────

/// The independently toggle-able search options.
///
/// Searching backward is expressed as `Forward` being inactive; there is no
/// separate backward option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOption {
    /// Search the whole document rather than a confined scope.
    Global,
    /// Search toward the end of the document (inactive = backward).
    Forward,
    /// Search-as-you-type, anchored to a base location.
    Incremental,
    /// Restart from the opposite end when the search runs off the document.
    Wrap,
    /// Only report matches that stand as a word by themselves.
    WholeWord,
    /// Match case exactly.
    CaseSensitive,
    /// Interpret the find string as a regular expression.
    Regex,
}

impl SearchOption {
    /// All options, in a stable order.
    pub fn all() -> &'static [SearchOption] {
        &[
            SearchOption::Global,
            SearchOption::Forward,
            SearchOption::Incremental,
            SearchOption::Wrap,
            SearchOption::WholeWord,
            SearchOption::CaseSensitive,
            SearchOption::Regex,
        ]
    }

    /// Get a display label for the option.
    pub fn label(&self) -> &'static str {
        match self {
            SearchOption::Global => "Global",
            SearchOption::Forward => "Forward",
            SearchOption::Incremental => "Incremental",
            SearchOption::Wrap => "Wrap",
            SearchOption::WholeWord => "Whole Word",
            SearchOption::CaseSensitive => "Case Sensitive",
            SearchOption::Regex => "Regular Expression",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_lists_every_option_once() {
        let unique: HashSet<_> = SearchOption::all().iter().collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn test_labels_are_nonempty() {
        for option in SearchOption::all() {
            assert!(!option.label().is_empty());
        }
    }

    #[test]
    fn test_usable_in_hash_set() {
        let mut active = HashSet::new();
        assert!(active.insert(SearchOption::Forward));
        assert!(!active.insert(SearchOption::Forward));
        assert!(active.contains(&SearchOption::Forward));
    }
}
