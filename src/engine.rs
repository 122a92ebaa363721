//! The find/replace operation engine
//!
//! `FindReplaceLogic` owns the active option set, the find/replace strings,
//! the incremental-search anchor, and the operation status, and drives every
//! operation through the abstract target surface. The five public operations
//! (search, select-all, replace-all, select-and-replace, replace-and-find)
//! all funnel through one positional find-and-select leaf, so option gating
//! and capability dispatch live in exactly one place.
//!
//! Errors never escape the public methods: an invalid pattern becomes an
//! [`SearchStatus::InvalidRegex`] status, and a target invalidated by its
//! host makes the operation report failure; the engine deliberately keeps
//! no state across such invalidation.

use std::collections::HashSet;

use log::debug;
use regex::Regex;

use crate::error::TargetError;
use crate::message;
use crate::options::SearchOption;
use crate::status::{FindStatusCode, SearchStatus};
use crate::target::{FindReplaceTarget, TextRange};

// ─────────────────────────────────────────────────────────────────────────────
// Word Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Whether `text` is a single word (non-empty, word constituents only).
fn is_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

// ─────────────────────────────────────────────────────────────────────────────
// Find/Replace Logic
// ─────────────────────────────────────────────────────────────────────────────

/// The find/replace engine, bound to at most one target at a time.
///
/// A fresh engine has every option inactive and no target; binding a target
/// with [`update_target`](Self::update_target) activates [`SearchOption::Global`]
/// and anchors incremental search. All state mutation happens on the calling
/// thread; operations run to completion before returning.
pub struct FindReplaceLogic<T: FindReplaceTarget> {
    target: Option<T>,
    active: HashSet<SearchOption>,
    find_string: String,
    replace_string: String,
    status: SearchStatus,
    incremental_base: TextRange,
    /// Caller-supplied "may this session edit the target" flag.
    target_editable: bool,
    /// Whether the bound target supports the regex extension. Resolved once
    /// when the target is bound instead of on every call.
    target_supports_regex: bool,
}

impl<T: FindReplaceTarget> Default for FindReplaceLogic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FindReplaceTarget> FindReplaceLogic<T> {
    /// Create an engine with no target and all options inactive.
    pub fn new() -> Self {
        Self {
            target: None,
            active: HashSet::new(),
            find_string: String::new(),
            replace_string: String::new(),
            status: SearchStatus::None,
            incremental_base: TextRange::default(),
            target_editable: false,
            target_supports_regex: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Option State
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch an option on, applying its coupled side effects.
    ///
    /// Activating an already-active option is a no-op and re-triggers nothing.
    pub fn activate(&mut self, option: SearchOption) {
        if !self.active.insert(option) {
            return;
        }
        match option {
            SearchOption::Global => self.clear_scope(),
            SearchOption::Forward | SearchOption::Incremental => {
                if self.should_capture_incremental_base() {
                    self.reset_incremental_base_location();
                }
            }
            _ => {}
        }
    }

    /// Switch an option off, applying its coupled side effects.
    ///
    /// Deactivating an inactive option is a no-op.
    pub fn deactivate(&mut self, option: SearchOption) {
        if !self.active.remove(&option) {
            return;
        }
        match option {
            SearchOption::Global => self.confine_scope_to_selection(),
            SearchOption::Forward => {
                if self.should_capture_incremental_base() {
                    self.reset_incremental_base_location();
                }
            }
            _ => {}
        }
    }

    /// Whether an option is switched on.
    pub fn is_active(&self, option: SearchOption) -> bool {
        self.active.contains(&option)
    }

    /// Whether an option can currently take effect.
    ///
    /// An option can be active yet unavailable: regex search requires target
    /// support, whole-word search requires a single-word find string and no
    /// active regex, incremental search is suspended while regex is in
    /// effect.
    pub fn is_available(&self, option: SearchOption) -> bool {
        match option {
            SearchOption::Regex => self.target_supports_regex,
            SearchOption::WholeWord => self.is_whole_word_search_available(),
            SearchOption::Incremental => self.is_incremental_search_available(),
            SearchOption::Global
            | SearchOption::Forward
            | SearchOption::Wrap
            | SearchOption::CaseSensitive => true,
        }
    }

    /// Whether an option is switched on and can take effect.
    pub fn is_available_and_active(&self, option: SearchOption) -> bool {
        self.is_active(option) && self.is_available(option)
    }

    fn is_regex_search_available_and_active(&self) -> bool {
        self.target_supports_regex && self.is_active(SearchOption::Regex)
    }

    fn is_incremental_search_available(&self) -> bool {
        !self.is_regex_search_available_and_active()
    }

    fn is_whole_word_search_available(&self) -> bool {
        !self.is_regex_search_available_and_active() && is_word(&self.find_string)
    }

    fn should_capture_incremental_base(&self) -> bool {
        self.is_active(SearchOption::Incremental) && self.is_incremental_search_available()
    }

    fn clear_scope(&mut self) {
        if let Some(target) = self.target.as_mut() {
            if let Some(scope) = target.scope_extension() {
                scope.set_scope(None);
            }
        }
    }

    /// Confine searching to the lines covered by the current selection and
    /// park the caret at the scope edge the active direction starts from.
    fn confine_scope_to_selection(&mut self) {
        let forward = self.is_active(SearchOption::Forward);
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let Some(scope) = target.scope_extension() else {
            return;
        };
        let line_selection = scope.line_selection();
        scope.set_scope(Some(line_selection));

        let caret = if forward {
            line_selection.offset
        } else {
            line_selection.end()
        };
        target.set_selection(TextRange::caret(caret));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Strings and Status
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the search string.
    ///
    /// While incremental search is active and available, a changed non-empty
    /// string immediately searches from the anchor. Setting the same string
    /// again is a complete no-op, and clearing the string never moves the
    /// selection.
    pub fn set_find_string(&mut self, find: &str) {
        if find == self.find_string {
            return;
        }
        self.find_string = find.to_string();
        if self.is_available_and_active(SearchOption::Incremental) && !self.find_string.is_empty()
        {
            self.perform_incremental_search();
        }
    }

    /// The current search string.
    pub fn find_string(&self) -> &str {
        &self.find_string
    }

    /// Set the replacement string.
    pub fn set_replace_string(&mut self, replace: &str) {
        self.replace_string = replace.to_string();
    }

    /// The current replacement string.
    pub fn replace_string(&self) -> &str {
        &self.replace_string
    }

    /// The outcome of the most recent operation.
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// The user-facing message for the current status.
    pub fn status_message(&self) -> String {
        message::status_message(&self.status, &self.find_string)
    }

    fn reset_status(&mut self) {
        self.status = SearchStatus::None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Searching
    // ─────────────────────────────────────────────────────────────────────────

    /// Find the next occurrence of the search string and select it.
    ///
    /// Starts after the current selection (before it when searching
    /// backward); wraps around when [`SearchOption::Wrap`] is active,
    /// reporting [`FindStatusCode::Wrapped`]. An empty search string is
    /// silently "not found". Returns whether a match was selected.
    pub fn perform_search(&mut self) -> bool {
        self.reset_status();
        let incremental = self.should_capture_incremental_base();
        if incremental {
            // Find-next re-anchors search-as-you-type at the current hit.
            self.reset_incremental_base_location();
        }
        if self.find_string.is_empty() {
            return false;
        }
        let Some(target) = self.target.as_ref() else {
            return false;
        };

        let from = if incremental {
            self.incremental_base
        } else {
            target.selection()
        };
        let start = if self.is_active(SearchOption::Forward) {
            from.end()
        } else {
            from.offset
        };
        self.run_search(start)
    }

    /// Search-as-you-type from the incremental anchor.
    ///
    /// Does nothing unless [`SearchOption::Incremental`] is active and
    /// available. With an empty search string the selection collapses to a
    /// caret at the anchor instead of searching, since the selection must not
    /// jump while the user has typed nothing. The anchor itself is never
    /// moved here, so consecutive keystrokes extend the same match.
    pub fn perform_incremental_search(&mut self) -> bool {
        self.reset_status();
        if !self.should_capture_incremental_base() || self.target.is_none() {
            return false;
        }

        let base = self.incremental_base;
        if self.find_string.is_empty() {
            let offset = if self.is_active(SearchOption::Forward) {
                base.end()
            } else {
                base.offset
            };
            if let Some(target) = self.target.as_mut() {
                target.set_selection(TextRange::caret(offset));
            }
            return true;
        }

        // Keystroke travel: forward searches may re-match at the anchor so
        // the selection grows under it; backward searches start past it.
        let start = if self.is_active(SearchOption::Forward) {
            base.offset
        } else {
            base.end()
        };
        self.run_search(start)
    }

    /// Run the positional leaf at an explicit offset using the current
    /// options (`None` = the active direction's boundary).
    pub fn find_and_select(&mut self, offset: Option<usize>) -> Option<usize> {
        self.reset_status();
        if self.find_string.is_empty() {
            return None;
        }
        let forward = self.is_active(SearchOption::Forward);
        match self.find_and_select_at(offset, forward) {
            Ok(Some(index)) => Some(index),
            Ok(None) => {
                self.status = SearchStatus::Find(FindStatusCode::NoMatch);
                None
            }
            Err(TargetError::InvalidPattern(message)) => {
                self.status = SearchStatus::InvalidRegex(message);
                None
            }
            Err(TargetError::IllegalState) => {
                debug!("target invalidated during find-and-select");
                None
            }
        }
    }

    fn run_search(&mut self, start: usize) -> bool {
        match self.find_index(start) {
            Ok(Some(_)) => true,
            Ok(None) => {
                self.status = SearchStatus::Find(FindStatusCode::NoMatch);
                false
            }
            Err(TargetError::InvalidPattern(message)) => {
                self.status = SearchStatus::InvalidRegex(message);
                false
            }
            Err(TargetError::IllegalState) => {
                debug!("target invalidated during search; no state is kept across this");
                false
            }
        }
    }

    /// Probe at `start`, then once more from the wrap boundary if allowed.
    fn find_index(&mut self, start: usize) -> Result<Option<usize>, TargetError> {
        let forward = self.is_active(SearchOption::Forward);
        let first_probe = if forward {
            self.find_and_select_at(Some(start), true)?
        } else if start == 0 {
            // There is no position before the document start to probe.
            None
        } else {
            self.find_and_select_at(Some(start - 1), false)?
        };
        if first_probe.is_some() {
            return Ok(first_probe);
        }

        if self.is_active(SearchOption::Wrap) {
            self.status = SearchStatus::Find(FindStatusCode::Wrapped);
            return self.find_and_select_at(None, forward);
        }
        Ok(None)
    }

    /// The single leaf every operation funnels through: dispatch to the
    /// regex extension when the target has one (with the regex flag passed
    /// through), else to the base contract. Whole-word is gated on
    /// availability, not just the toggle.
    fn find_and_select_at(
        &mut self,
        offset: Option<usize>,
        forward: bool,
    ) -> Result<Option<usize>, TargetError> {
        let find = self.find_string.clone();
        let case_sensitive = self.is_active(SearchOption::CaseSensitive);
        let whole_word =
            self.is_active(SearchOption::WholeWord) && self.is_whole_word_search_available();
        let regex = self.is_regex_search_available_and_active();

        let Some(target) = self.target.as_mut() else {
            return Ok(None);
        };
        if let Some(ext) = target.regex_extension() {
            ext.find_and_select(offset, &find, forward, case_sensitive, whole_word, regex)
        } else {
            Ok(target.find_and_select(offset, &find, forward, case_sensitive, whole_word))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Replacing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the current selection when it matches the find string,
    /// searching first when it does not.
    ///
    /// When the selection is something else entirely and the search misses,
    /// nothing is replaced; an unrelated selection must never be
    /// overwritten. Returns whether a replacement happened.
    pub fn perform_select_and_replace(&mut self) -> bool {
        self.reset_status();
        match self.is_find_string_selected() {
            Err(message) => {
                self.status = SearchStatus::InvalidRegex(message);
                return false;
            }
            Ok(true) => {}
            Ok(false) => {
                if !self.perform_search() {
                    return false;
                }
            }
        }
        self.replace_selection()
    }

    /// Replace the current/next occurrence, then pre-select the one after it.
    ///
    /// The two steps are sequenced, not transactional: a failed replacement
    /// skips the trailing search, while a successful replacement still
    /// returns `true` even when no further occurrence exists (the status
    /// then reports [`FindStatusCode::NoMatch`]).
    pub fn perform_replace_and_find(&mut self) -> bool {
        let replaced = self.perform_select_and_replace();
        if replaced {
            self.perform_search();
        }
        replaced
    }

    /// Whether the current selection already is a hit for the find string.
    ///
    /// Under available-and-active regex the selection must match the whole
    /// pattern; otherwise plain (case-folded) string equality applies. The
    /// error value carries the compile failure for the user's pattern.
    fn is_find_string_selected(&self) -> Result<bool, String> {
        let Some(target) = self.target.as_ref() else {
            return Ok(false);
        };
        if self.find_string.is_empty() {
            return Ok(false);
        }
        let selection = target.selection_text();

        if self.is_regex_search_available_and_active() {
            let flags = if self.is_active(SearchOption::CaseSensitive) {
                ""
            } else {
                "(?i)"
            };
            // Compile the bare pattern first so a syntax error reports the
            // pattern the user typed, not our anchored wrapper.
            Regex::new(&format!("{}{}", flags, self.find_string))
                .map_err(|err| err.to_string())?;
            let anchored = Regex::new(&format!(r"{}\A(?:{})\z", flags, self.find_string))
                .map_err(|err| err.to_string())?;
            Ok(anchored.is_match(&selection))
        } else if self.is_active(SearchOption::CaseSensitive) {
            Ok(selection == self.find_string)
        } else {
            Ok(selection.to_lowercase() == self.find_string.to_lowercase())
        }
    }

    /// Replace the current selection, honoring validation, editability, and
    /// the regex extension. Sets the status on refusal or failure.
    fn replace_selection(&mut self) -> bool {
        if !self.validate_target_state() {
            return false;
        }
        match self.replace_selection_unchecked() {
            Ok(()) => true,
            Err(TargetError::InvalidPattern(message)) => {
                self.status = SearchStatus::InvalidRegex(message);
                false
            }
            Err(TargetError::IllegalState) => {
                debug!("target rejected the replacement; no state is kept across this");
                false
            }
        }
    }

    fn replace_selection_unchecked(&mut self) -> Result<(), TargetError> {
        let replace = self.replace_string.clone();
        let regex = self.is_regex_search_available_and_active();
        let Some(target) = self.target.as_mut() else {
            return Err(TargetError::IllegalState);
        };
        if let Some(ext) = target.regex_extension() {
            ext.replace_selection(&replace, regex)
        } else {
            target.replace_selection(&replace)
        }
    }

    /// Whether the target may be edited right now; refusals set
    /// [`FindStatusCode::ReadOnly`].
    fn validate_target_state(&mut self) -> bool {
        let can_edit = self.target_editable;
        let Some(target) = self.target.as_mut() else {
            return false;
        };
        if let Some(validation) = target.validation_extension() {
            if !validation.validate_target_state() {
                self.status = SearchStatus::Find(FindStatusCode::ReadOnly);
                return false;
            }
        }
        if !(can_edit && target.is_editable()) {
            self.status = SearchStatus::Find(FindStatusCode::ReadOnly);
            return false;
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace every occurrence of the find string, sweeping forward from
    /// the start of the searchable region.
    ///
    /// The user's direction is restored afterward; the sweep is always
    /// forward so replaced output is never re-scanned and the loop
    /// terminates. Returns the replacement count, also reported as
    /// [`SearchStatus::ReplaceAll`] (or [`FindStatusCode::NoMatch`] for
    /// zero).
    pub fn perform_replace_all(&mut self) -> usize {
        self.reset_status();
        if self.find_string.is_empty() || self.target.is_none() {
            return 0;
        }

        let outcome = self.with_forward_direction(|logic| {
            if !logic.validate_target_state() {
                return Ok(0);
            }
            logic.set_replace_all_mode(true);
            let result = logic.replace_all_loop();
            // Switched back off on the error paths too.
            logic.set_replace_all_mode(false);
            result
        });

        match outcome {
            Ok(count) => {
                self.status = if count == 0 {
                    SearchStatus::Find(FindStatusCode::NoMatch)
                } else {
                    SearchStatus::ReplaceAll(count)
                };
                count
            }
            Err(TargetError::InvalidPattern(message)) => {
                self.status = SearchStatus::InvalidRegex(message);
                0
            }
            Err(TargetError::IllegalState) => {
                debug!("target invalidated during replace-all; aborting sweep");
                0
            }
        }
    }

    fn replace_all_loop(&mut self) -> Result<usize, TargetError> {
        let mut count = 0;
        let mut position = 0;
        while self.find_and_select_at(Some(position), true)?.is_some() {
            let matched = self.selection_or_default();
            if matched.is_empty() {
                // A zero-length hit could never advance the sweep.
                break;
            }
            self.replace_selection_unchecked()?;
            count += 1;
            position = self.selection_or_default().end();
        }
        Ok(count)
    }

    /// Select every occurrence of the find string.
    ///
    /// Forward sweep like replace-all, but purely reading: the document is
    /// untouched and read-only targets are fine. When the target supports
    /// multi-range selection, all hits are installed in a single call at the
    /// end rather than one by one. Returns the match count, also reported as
    /// [`SearchStatus::FindAll`].
    pub fn perform_select_all(&mut self) -> usize {
        self.reset_status();
        if self.find_string.is_empty() || self.target.is_none() {
            return 0;
        }

        let outcome = self.with_forward_direction(|logic| logic.select_all_loop());

        match outcome {
            Ok(regions) => {
                let count = regions.len();
                if count == 0 {
                    self.status = SearchStatus::Find(FindStatusCode::NoMatch);
                } else {
                    if let Some(target) = self.target.as_mut() {
                        if let Some(ext) = target.multi_selection_extension() {
                            ext.select_ranges(&regions);
                        }
                    }
                    self.status = SearchStatus::FindAll(count);
                }
                count
            }
            Err(TargetError::InvalidPattern(message)) => {
                self.status = SearchStatus::InvalidRegex(message);
                0
            }
            Err(TargetError::IllegalState) => {
                debug!("target invalidated during select-all; aborting sweep");
                0
            }
        }
    }

    fn select_all_loop(&mut self) -> Result<Vec<TextRange>, TargetError> {
        let mut regions = Vec::new();
        let mut position = 0;
        while self.find_and_select_at(Some(position), true)?.is_some() {
            let matched = self.selection_or_default();
            if matched.is_empty() {
                break;
            }
            regions.push(matched);
            position = matched.end();
        }
        Ok(regions)
    }

    /// Force forward searching for the duration of `operation`, editing the
    /// raw option set so no activation side effects fire, and restoring the
    /// caller's direction on every path.
    fn with_forward_direction<R>(&mut self, operation: impl FnOnce(&mut Self) -> R) -> R {
        let forced = self.active.insert(SearchOption::Forward);
        let result = operation(self);
        if forced {
            self.active.remove(&SearchOption::Forward);
        }
        result
    }

    fn set_replace_all_mode(&mut self, active: bool) {
        if let Some(target) = self.target.as_mut() {
            if let Some(batch) = target.batch_extension() {
                batch.set_replace_all_mode(active);
            }
        }
    }

    fn selection_or_default(&self) -> TextRange {
        self.target
            .as_ref()
            .map(|target| target.selection())
            .unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Target Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Bind a new target, ending the previous target's session first.
    ///
    /// The new target's session is begun (when supported), searching becomes
    /// global, the regex capability is re-resolved, and the incremental
    /// anchor is re-initialized regardless of which options are active.
    pub fn update_target(&mut self, target: T, can_edit: bool) {
        self.reset_status();
        self.target_editable = can_edit;
        self.end_session();

        let mut target = target;
        self.target_supports_regex = target.regex_extension().is_some();
        self.target = Some(target);

        self.begin_session();
        self.activate(SearchOption::Global);
        self.reset_incremental_base_location();
    }

    /// Re-capture the incremental anchor from the target's selection (zero
    /// when there is no target or incremental search is unavailable).
    pub fn reset_incremental_base_location(&mut self) {
        self.incremental_base = match self.target.as_ref() {
            Some(target) if self.is_incremental_search_available() => target.selection(),
            _ => TextRange::default(),
        };
    }

    /// End the current session and release the target. Safe to call any
    /// number of times.
    pub fn dispose(&mut self) {
        self.end_session();
        self.target = None;
        self.target_supports_regex = false;
    }

    /// The bound target, if any.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Mutable access to the bound target, if any.
    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }

    fn begin_session(&mut self) {
        if let Some(target) = self.target.as_mut() {
            if let Some(session) = target.session_extension() {
                session.begin_session();
            }
        }
    }

    fn end_session(&mut self) {
        if let Some(target) = self.target.as_mut() {
            if let Some(session) = target.session_extension() {
                session.end_session();
            }
        }
    }
}

impl<T: FindReplaceTarget> Drop for FindReplaceLogic<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
