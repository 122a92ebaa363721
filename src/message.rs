//! Status message generation
//!
//! Maps each [`SearchStatus`] variant to a user-facing string. This is a pure
//! function so presentation layers can render statuses without knowing the
//! variant set; the find string is substituted into the no-match message.

use crate::status::{FindStatusCode, SearchStatus};

/// Produce the user-facing message for a status.
///
/// Returns an empty string for [`SearchStatus::None`]; callers use that to
/// clear a previously shown message.
pub fn status_message(status: &SearchStatus, find_string: &str) -> String {
    match status {
        SearchStatus::None => String::new(),
        SearchStatus::Find(FindStatusCode::NoMatch) => {
            format!("'{}' not found", find_string)
        }
        SearchStatus::Find(FindStatusCode::Wrapped) => "Wrapped search".to_string(),
        SearchStatus::Find(FindStatusCode::ReadOnly) => {
            "Cannot replace: target is read-only".to_string()
        }
        SearchStatus::InvalidRegex(message) => message.clone(),
        SearchStatus::ReplaceAll(1) => "1 match replaced".to_string(),
        SearchStatus::ReplaceAll(count) => format!("{} matches replaced", count),
        SearchStatus::FindAll(1) => "1 match selected".to_string(),
        SearchStatus::FindAll(count) => format!("{} matches selected", count),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
