//! Target capability surface
//!
//! The engine never touches a document directly; it drives an abstract
//! *target* through [`FindReplaceTarget`]. The core trait covers what every
//! searchable text surface can do; everything else is an optional capability
//! exposed through accessor methods that default to `None`. The engine
//! resolves the capabilities it depends on for option availability once when
//! a target is bound, and uses the accessors for the rest. A target that
//! doesn't implement a capability simply opts out of the behavior built on
//! top of it.

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

// ─────────────────────────────────────────────────────────────────────────────
// Text Range
// ─────────────────────────────────────────────────────────────────────────────

/// A contiguous region of the target's text as (offset, length), in bytes.
///
/// Used for selections, search scopes, and the incremental search anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRange {
    /// Start offset of the region.
    pub offset: usize,
    /// Length of the region (zero for a caret position).
    pub length: usize,
}

impl TextRange {
    /// Create a range from an offset and length.
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Create a zero-length range (a caret position).
    pub fn caret(offset: usize) -> Self {
        Self { offset, length: 0 }
    }

    /// The exclusive end offset of the region.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether the range covers no text.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core Target Contract
// ─────────────────────────────────────────────────────────────────────────────

/// The text surface a [`crate::engine::FindReplaceLogic`] operates on.
///
/// Implementations own the document and the selection; the engine only ever
/// reads and mutates them through this trait. Lifetime of the underlying
/// surface belongs to the host.
pub trait FindReplaceTarget {
    /// The current selection.
    fn selection(&self) -> TextRange;

    /// Replace the current selection position without touching text.
    fn set_selection(&mut self, range: TextRange);

    /// The text covered by the current selection.
    fn selection_text(&self) -> String;

    /// Whether the target's content can be modified.
    fn is_editable(&self) -> bool;

    /// Search for `find` starting at `offset` and select the first hit.
    ///
    /// `offset = None` starts at the boundary for the direction: the start of
    /// the searchable region for forward searches, its end for backward ones.
    /// Backward searches report the last match starting at or before the
    /// offset. Returns the match's start offset, or `None` when nothing was
    /// found (in which case the selection is left untouched).
    fn find_and_select(
        &mut self,
        offset: Option<usize>,
        find: &str,
        forward: bool,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Option<usize>;

    /// Replace the current selection with `text` (literal, no escapes).
    ///
    /// On success the selection covers the inserted text.
    fn replace_selection(&mut self, text: &str) -> Result<(), TargetError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Optional capabilities
    // ─────────────────────────────────────────────────────────────────────────

    /// Regex-aware search and replace, when supported.
    fn regex_extension(&mut self) -> Option<&mut dyn RegexTarget> {
        None
    }

    /// Search-scope confinement, when supported.
    fn scope_extension(&mut self) -> Option<&mut dyn ScopeTarget> {
        None
    }

    /// Find/replace session bracketing, when supported.
    fn session_extension(&mut self) -> Option<&mut dyn SessionTarget> {
        None
    }

    /// Batched replace-all notification mode, when supported.
    fn batch_extension(&mut self) -> Option<&mut dyn BatchReplaceTarget> {
        None
    }

    /// Simultaneous multi-range selection, when supported.
    fn multi_selection_extension(&mut self) -> Option<&mut dyn MultiSelectionTarget> {
        None
    }

    /// Pre-edit state validation, when supported.
    fn validation_extension(&mut self) -> Option<&mut dyn ValidationTarget> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Regex-capable search and replace.
///
/// When a target exposes this capability, the engine routes *every* search
/// through [`RegexTarget::find_and_select`], passing `regex = false` for
/// literal searches.
pub trait RegexTarget {
    /// Like [`FindReplaceTarget::find_and_select`], with pattern support.
    ///
    /// With `regex = true`, `find` is compiled as a regular expression;
    /// compile failures are reported as [`TargetError::InvalidPattern`].
    #[allow(clippy::too_many_arguments)]
    fn find_and_select(
        &mut self,
        offset: Option<usize>,
        find: &str,
        forward: bool,
        case_sensitive: bool,
        whole_word: bool,
        regex: bool,
    ) -> Result<Option<usize>, TargetError>;

    /// Like [`FindReplaceTarget::replace_selection`], with pattern support.
    ///
    /// With `regex = true`, escape sequences (`\n`, `\t`, `\r`, `\\`) and
    /// group references (`$1`, `${name}`) in `text` are expanded against the
    /// pattern most recently matched on the selection. A malformed
    /// replacement (e.g. a dangling backslash) is an
    /// [`TargetError::InvalidPattern`] and must not modify the target.
    fn replace_selection(&mut self, text: &str, regex: bool) -> Result<(), TargetError>;
}

/// Confining searches to a sub-region of the target.
pub trait ScopeTarget {
    /// Restrict searching to `scope`, or lift the restriction with `None`.
    fn set_scope(&mut self, scope: Option<TextRange>);

    /// The currently confined region, if any.
    fn scope(&self) -> Option<TextRange>;

    /// The current selection expanded to whole lines.
    ///
    /// A selection ending exactly at the start of a line does not pull that
    /// line in; an empty selection covers just the line holding the caret.
    fn line_selection(&self) -> TextRange;
}

/// Bracketing a find/replace session so the target can set up and tear down
/// transient state (highlighting, caches) around dialog lifetime.
pub trait SessionTarget {
    fn begin_session(&mut self);
    fn end_session(&mut self);
}

/// Suppressing or batching per-edit notifications during replace-all.
pub trait BatchReplaceTarget {
    fn set_replace_all_mode(&mut self, active: bool);
}

/// Installing several selected regions at once (used by select-all so the
/// host repaints once instead of once per match).
pub trait MultiSelectionTarget {
    fn select_ranges(&mut self, ranges: &[TextRange]);
}

/// Letting the target veto edits beyond the static editable flag (e.g. a
/// version-control hook asking to check the file out first).
pub trait ValidationTarget {
    /// Returns `false` when the target must not be modified right now.
    fn validate_target_state(&mut self) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range_end() {
        let range = TextRange::new(4, 3);
        assert_eq!(range.end(), 7);
    }

    #[test]
    fn test_caret_is_empty() {
        let caret = TextRange::caret(9);
        assert!(caret.is_empty());
        assert_eq!(caret.offset, 9);
        assert_eq!(caret.end(), 9);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(TextRange::default(), TextRange::new(0, 0));
    }

    /// A minimal target exercising the capability defaults.
    struct BareTarget;

    impl FindReplaceTarget for BareTarget {
        fn selection(&self) -> TextRange {
            TextRange::default()
        }
        fn set_selection(&mut self, _range: TextRange) {}
        fn selection_text(&self) -> String {
            String::new()
        }
        fn is_editable(&self) -> bool {
            false
        }
        fn find_and_select(
            &mut self,
            _offset: Option<usize>,
            _find: &str,
            _forward: bool,
            _case_sensitive: bool,
            _whole_word: bool,
        ) -> Option<usize> {
            None
        }
        fn replace_selection(&mut self, _text: &str) -> Result<(), TargetError> {
            Err(TargetError::IllegalState)
        }
    }

    #[test]
    fn test_capabilities_default_to_unsupported() {
        let mut target = BareTarget;
        assert!(target.regex_extension().is_none());
        assert!(target.scope_extension().is_none());
        assert!(target.session_extension().is_none());
        assert!(target.batch_extension().is_none());
        assert!(target.multi_selection_extension().is_none());
        assert!(target.validation_extension().is_none());
    }
}
