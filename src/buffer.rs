//! In-memory reference target
//!
//! `TextBuffer` is a `String`-backed implementation of the full target
//! capability surface: positional literal and regex search, scope
//! confinement, session bracketing, batched replace-all notifications,
//! multi-range selection, and pre-edit validation. It is what the test suite
//! drives, and doubles as a ready-made target for hosts that keep their text
//! in a plain string.
//!
//! All matching funnels through one compiled `regex::Regex`: literal search
//! strings are escaped, whole-word search wraps the pattern in `\b…\b`, and
//! case-insensitive search prefixes `(?i)`. Zero-length matches are never
//! reported, which keeps the engine's sweep loops advancing.

use log::debug;
use regex::{Match, Regex};

use crate::error::TargetError;
use crate::target::{
    BatchReplaceTarget, FindReplaceTarget, MultiSelectionTarget, RegexTarget, ScopeTarget,
    SessionTarget, TextRange, ValidationTarget,
};

// ─────────────────────────────────────────────────────────────────────────────
// Pattern Construction
// ─────────────────────────────────────────────────────────────────────────────

/// Compile the effective search pattern for one find operation.
fn build_pattern(
    find: &str,
    case_sensitive: bool,
    whole_word: bool,
    regex: bool,
) -> Result<Regex, TargetError> {
    let mut pattern = if regex {
        // Multi-line mode so ^ and $ work per line, as users expect from an
        // editor search field.
        format!("(?m){}", find)
    } else {
        regex::escape(find)
    };

    if whole_word {
        pattern = format!(r"\b{}\b", pattern);
    }
    if !case_sensitive {
        pattern = format!("(?i){}", pattern);
    }

    Regex::new(&pattern).map_err(|err| TargetError::InvalidPattern(err.to_string()))
}

/// Interpret replacement-string escapes (`\n`, `\t`, `\r`, `\\`).
///
/// Any other escaped character stands for itself; a trailing backslash is a
/// malformed replacement and must be rejected before the buffer is touched.
fn interpret_replace_escapes(text: &str) -> Result<String, TargetError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {
                return Err(TargetError::InvalidPattern(
                    "dangling backslash at end of replacement string".to_string(),
                ))
            }
        }
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// UTF-8 Boundary Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Largest index <= `index` on a character boundary.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest index >= `index` on a character boundary.
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// The boundary just past the character starting at `index`.
fn next_char_boundary(s: &str, index: usize) -> usize {
    match s[index..].chars().next() {
        Some(c) => index + c.len_utf8(),
        None => s.len(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// A `String`-backed find/replace target with every capability implemented.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    selection: TextRange,
    selected_ranges: Vec<TextRange>,
    scope: Option<TextRange>,
    editable: bool,
    valid: bool,
    replace_all_mode: bool,
    sessions_started: usize,
    sessions_ended: usize,
    edit_count: usize,
    notification_count: usize,
    batched_edits: usize,
    /// Pattern and range of the last regex-mode hit; regex replacement
    /// expands group references against it.
    last_regex_match: Option<(TextRange, Regex)>,
}

impl TextBuffer {
    /// Create a buffer over `text` with the caret at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: TextRange::default(),
            selected_ranges: Vec::new(),
            scope: None,
            editable: true,
            valid: true,
            replace_all_mode: false,
            sessions_started: 0,
            sessions_ended: 0,
            edit_count: 0,
            notification_count: 0,
            batched_edits: 0,
            last_regex_match: None,
        }
    }

    /// The buffer's full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole content, resetting selection, scope, and match state.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = TextRange::default();
        self.selected_ranges.clear();
        self.scope = None;
        self.last_regex_match = None;
    }

    /// Mark the buffer read-only or editable.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Arm or disarm the pre-edit validation hook.
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// The ranges installed by the last multi-range selection, if any.
    pub fn selected_ranges(&self) -> &[TextRange] {
        &self.selected_ranges
    }

    /// Whether the buffer is currently in replace-all mode.
    pub fn is_replace_all_mode(&self) -> bool {
        self.replace_all_mode
    }

    /// How many find/replace sessions were started on this buffer.
    pub fn sessions_started(&self) -> usize {
        self.sessions_started
    }

    /// How many find/replace sessions were ended on this buffer.
    pub fn sessions_ended(&self) -> usize {
        self.sessions_ended
    }

    /// Total number of edits applied through the target interface.
    pub fn edit_count(&self) -> usize {
        self.edit_count
    }

    /// Number of change notifications emitted: one per edit normally, one per
    /// batch while replace-all mode is active.
    pub fn notification_count(&self) -> usize {
        self.notification_count
    }

    /// The searchable byte region: the scope when set, else the whole text.
    fn region_bounds(&self) -> (usize, usize) {
        match self.scope {
            Some(scope) => {
                let lo = floor_char_boundary(&self.text, scope.offset.min(self.text.len()));
                let hi = ceil_char_boundary(&self.text, scope.end().min(self.text.len()));
                (lo, hi.max(lo))
            }
            None => (0, self.text.len()),
        }
    }

    /// Search for the compiled pattern and select the hit.
    ///
    /// Matching runs against the scope slice so word boundaries at the scope
    /// edges behave like text edges.
    fn search(
        &mut self,
        offset: Option<usize>,
        find: &str,
        forward: bool,
        case_sensitive: bool,
        whole_word: bool,
        regex: bool,
    ) -> Result<Option<usize>, TargetError> {
        let pattern = build_pattern(find, case_sensitive, whole_word, regex)?;
        let (lo, hi) = self.region_bounds();
        let region = &self.text[lo..hi];

        let hit = if forward {
            let from = offset.unwrap_or(lo).clamp(lo, hi) - lo;
            first_match_from(&pattern, region, ceil_char_boundary(region, from))
        } else if offset.unwrap_or(hi) < lo {
            // A backward search from before the scope can match nothing.
            None
        } else {
            let limit = offset.unwrap_or(hi).min(hi) - lo;
            last_match_up_to(&pattern, region, limit)
        };
        let hit = hit.map(|m| (m.start(), m.end()));

        match hit {
            Some((start, end)) => {
                let range = TextRange::new(lo + start, end - start);
                self.selection = range;
                if regex {
                    self.last_regex_match = Some((range, pattern));
                }
                Ok(Some(range.offset))
            }
            None => Ok(None),
        }
    }

    /// Splice `replacement` over the current selection, keeping the scope and
    /// selection consistent with the new text length.
    fn splice(&mut self, replacement: &str) {
        let sel = self.selection;
        debug_assert!(sel.end() <= self.text.len());
        self.text.replace_range(sel.offset..sel.end(), replacement);

        if let Some(scope) = self.scope.as_mut() {
            if sel.end() <= scope.offset {
                // Edit entirely before the scope: shift it.
                scope.offset = scope.offset - sel.length + replacement.len();
            } else if sel.offset >= scope.offset && sel.end() <= scope.end() {
                // Edit inside the scope: stretch or shrink it.
                scope.length = scope.length - sel.length + replacement.len();
            }
        }

        self.selection = TextRange::new(sel.offset, replacement.len());
        self.last_regex_match = None;

        self.edit_count += 1;
        if self.replace_all_mode {
            self.batched_edits += 1;
        } else {
            self.notification_count += 1;
        }
    }
}

/// First non-empty match starting at or after `from`.
fn first_match_from<'t>(pattern: &Regex, text: &'t str, from: usize) -> Option<Match<'t>> {
    let mut pos = from;
    while pos <= text.len() {
        let m = pattern.find_at(text, pos)?;
        if m.start() == m.end() {
            if m.start() >= text.len() {
                return None;
            }
            pos = next_char_boundary(text, m.start());
            continue;
        }
        return Some(m);
    }
    None
}

/// Last non-empty match starting at or before `limit`.
fn last_match_up_to<'t>(pattern: &Regex, text: &'t str, limit: usize) -> Option<Match<'t>> {
    let mut best = None;
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = pattern.find_at(text, pos) else {
            break;
        };
        if m.start() > limit {
            break;
        }
        if m.start() < m.end() {
            best = Some(m);
        }
        if m.start() >= text.len() {
            break;
        }
        pos = next_char_boundary(text, m.start());
    }
    best
}

// ─────────────────────────────────────────────────────────────────────────────
// Target Trait Implementations
// ─────────────────────────────────────────────────────────────────────────────

impl FindReplaceTarget for TextBuffer {
    fn selection(&self) -> TextRange {
        self.selection
    }

    fn set_selection(&mut self, range: TextRange) {
        let offset = floor_char_boundary(&self.text, range.offset);
        let end = ceil_char_boundary(&self.text, range.end().min(self.text.len()));
        self.selection = TextRange::new(offset, end.saturating_sub(offset));
    }

    fn selection_text(&self) -> String {
        let sel = self.selection;
        let end = sel.end().min(self.text.len());
        self.text[sel.offset.min(end)..end].to_string()
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn find_and_select(
        &mut self,
        offset: Option<usize>,
        find: &str,
        forward: bool,
        case_sensitive: bool,
        whole_word: bool,
    ) -> Option<usize> {
        // An escaped literal cannot fail to compile.
        self.search(offset, find, forward, case_sensitive, whole_word, false)
            .unwrap_or_else(|err| {
                debug!("literal search failed unexpectedly: {}", err);
                None
            })
    }

    fn replace_selection(&mut self, text: &str) -> Result<(), TargetError> {
        self.splice(text);
        Ok(())
    }

    fn regex_extension(&mut self) -> Option<&mut dyn RegexTarget> {
        Some(self)
    }

    fn scope_extension(&mut self) -> Option<&mut dyn ScopeTarget> {
        Some(self)
    }

    fn session_extension(&mut self) -> Option<&mut dyn SessionTarget> {
        Some(self)
    }

    fn batch_extension(&mut self) -> Option<&mut dyn BatchReplaceTarget> {
        Some(self)
    }

    fn multi_selection_extension(&mut self) -> Option<&mut dyn MultiSelectionTarget> {
        Some(self)
    }

    fn validation_extension(&mut self) -> Option<&mut dyn ValidationTarget> {
        Some(self)
    }
}

impl RegexTarget for TextBuffer {
    fn find_and_select(
        &mut self,
        offset: Option<usize>,
        find: &str,
        forward: bool,
        case_sensitive: bool,
        whole_word: bool,
        regex: bool,
    ) -> Result<Option<usize>, TargetError> {
        self.search(offset, find, forward, case_sensitive, whole_word, regex)
    }

    fn replace_selection(&mut self, text: &str, regex: bool) -> Result<(), TargetError> {
        if !regex {
            self.splice(text);
            return Ok(());
        }

        // Validate the template before any mutation.
        let template = interpret_replace_escapes(text)?;

        // Group references only make sense against the pattern that produced
        // the selection; replacing anything else is a stale-state misuse.
        let (range, pattern) = match self.last_regex_match.clone() {
            Some(state) if state.0 == self.selection => state,
            _ => return Err(TargetError::IllegalState),
        };

        let matched = &self.text[range.offset..range.end()];
        let expanded = match pattern.captures(matched) {
            Some(captures) => {
                let mut out = String::new();
                captures.expand(&template, &mut out);
                out
            }
            None => template,
        };

        self.splice(&expanded);
        Ok(())
    }
}

impl ScopeTarget for TextBuffer {
    fn set_scope(&mut self, scope: Option<TextRange>) {
        self.scope = scope;
    }

    fn scope(&self) -> Option<TextRange> {
        self.scope
    }

    fn line_selection(&self) -> TextRange {
        let sel = self.selection;
        let start = match self.text[..sel.offset.min(self.text.len())].rfind('\n') {
            Some(newline) => newline + 1,
            None => 0,
        };

        // A non-empty selection ending exactly at a line start does not pull
        // that line in.
        let sel_end = sel.end().min(self.text.len());
        let anchor = if sel.length > 0 && sel_end > 0 && self.text[..sel_end].ends_with('\n') {
            sel_end - 1
        } else {
            sel_end
        };

        let end = match self.text[anchor..].find('\n') {
            Some(newline) => anchor + newline + 1,
            None => self.text.len(),
        };

        TextRange::new(start, end - start)
    }
}

impl SessionTarget for TextBuffer {
    fn begin_session(&mut self) {
        self.sessions_started += 1;
    }

    fn end_session(&mut self) {
        self.sessions_ended += 1;
    }
}

impl BatchReplaceTarget for TextBuffer {
    fn set_replace_all_mode(&mut self, active: bool) {
        if active {
            self.batched_edits = 0;
        } else if self.replace_all_mode && self.batched_edits > 0 {
            // One notification for the whole batch.
            self.notification_count += 1;
            self.batched_edits = 0;
        }
        self.replace_all_mode = active;
    }
}

impl MultiSelectionTarget for TextBuffer {
    fn select_ranges(&mut self, ranges: &[TextRange]) {
        self.selected_ranges = ranges.to_vec();
    }
}

impl ValidationTarget for TextBuffer {
    fn validate_target_state(&mut self) -> bool {
        self.valid
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn find(
        buffer: &mut TextBuffer,
        offset: Option<usize>,
        pattern: &str,
        forward: bool,
    ) -> Option<usize> {
        RegexTarget::find_and_select(buffer, offset, pattern, forward, false, false, false)
            .expect("literal search cannot fail")
    }

    #[test]
    fn test_forward_literal_search() {
        let mut buffer = TextBuffer::new("cat cat dog cat");
        assert_eq!(find(&mut buffer, Some(0), "cat", true), Some(0));
        assert_eq!(find(&mut buffer, Some(1), "cat", true), Some(4));
        assert_eq!(find(&mut buffer, Some(13), "cat", true), None);
        assert_eq!(find(&mut buffer, None, "cat", true), Some(0));
    }

    #[test]
    fn test_forward_search_is_overlap_aware() {
        // A fresh search from offset 1 must see the match at 1, not skip to
        // the next non-overlapping one.
        let mut buffer = TextBuffer::new("aaaa");
        assert_eq!(find(&mut buffer, Some(1), "aa", true), Some(1));
    }

    #[test]
    fn test_backward_literal_search() {
        let mut buffer = TextBuffer::new("cat cat dog cat");
        assert_eq!(find(&mut buffer, Some(14), "cat", false), Some(12));
        assert_eq!(find(&mut buffer, Some(11), "cat", false), Some(4));
        assert_eq!(find(&mut buffer, None, "cat", false), Some(12));
    }

    #[test]
    fn test_backward_search_finds_match_spanning_offset() {
        let mut buffer = TextBuffer::new("hellohello");
        // The match at 5 extends past offset 9 but starts at or before it.
        assert_eq!(find(&mut buffer, Some(9), "hello", false), Some(5));
    }

    #[test]
    fn test_search_selects_match() {
        let mut buffer = TextBuffer::new("one two three");
        find(&mut buffer, Some(0), "two", true);
        assert_eq!(buffer.selection(), TextRange::new(4, 3));
        assert_eq!(buffer.selection_text(), "two");
    }

    #[test]
    fn test_miss_leaves_selection_untouched() {
        let mut buffer = TextBuffer::new("one two three");
        buffer.set_selection(TextRange::new(0, 3));
        assert_eq!(find(&mut buffer, Some(0), "zebra", true), None);
        assert_eq!(buffer.selection(), TextRange::new(0, 3));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let mut buffer = TextBuffer::new("Hello HELLO hello");
        assert_eq!(find(&mut buffer, Some(1), "hello", true), Some(6));
    }

    #[test]
    fn test_case_sensitive_search() {
        let mut buffer = TextBuffer::new("Hello HELLO hello");
        let hit =
            RegexTarget::find_and_select(&mut buffer, Some(0), "hello", true, true, false, false)
                .unwrap();
        assert_eq!(hit, Some(12));
    }

    #[test]
    fn test_whole_word_search() {
        let mut buffer = TextBuffer::new("test testing tested test");
        let hit =
            RegexTarget::find_and_select(&mut buffer, Some(1), "test", true, false, true, false)
                .unwrap();
        assert_eq!(hit, Some(20));
    }

    #[test]
    fn test_regex_search_multiline_anchors() {
        let mut buffer = TextBuffer::new("Hello\nWorld\n!");
        let hit = RegexTarget::find_and_select(&mut buffer, Some(0), "o$", true, true, false, true)
            .unwrap();
        assert_eq!(hit, Some(4));
    }

    #[test]
    fn test_invalid_regex_reports_pattern_error() {
        let mut buffer = TextBuffer::new("abc");
        let err = RegexTarget::find_and_select(&mut buffer, Some(0), "a(", true, false, false, true)
            .unwrap_err();
        assert!(matches!(err, TargetError::InvalidPattern(_)));
    }

    #[test]
    fn test_zero_length_matches_are_skipped() {
        let mut buffer = TextBuffer::new("AbAbAbAb");
        let hit =
            RegexTarget::find_and_select(&mut buffer, Some(0), "(Ab)*", true, false, false, true)
                .unwrap();
        assert_eq!(hit, Some(0));
        assert_eq!(buffer.selection(), TextRange::new(0, 8));
        // From the end of that match only zero-length matches remain.
        let next =
            RegexTarget::find_and_select(&mut buffer, Some(8), "(Ab)*", true, false, false, true)
                .unwrap();
        assert_eq!(next, None);
    }

    #[test]
    fn test_literal_replace() {
        let mut buffer = TextBuffer::new("hello world");
        find(&mut buffer, Some(0), "world", true);
        FindReplaceTarget::replace_selection(&mut buffer, "there").unwrap();
        assert_eq!(buffer.text(), "hello there");
        assert_eq!(buffer.selection(), TextRange::new(6, 5));
    }

    #[test]
    fn test_regex_replace_expands_groups() {
        let mut buffer = TextBuffer::new("Hello<replace>World");
        RegexTarget::find_and_select(&mut buffer, Some(0), r"<(\w*)>", true, false, false, true)
            .unwrap();
        RegexTarget::replace_selection(&mut buffer, "[$1]", true).unwrap();
        assert_eq!(buffer.text(), "Hello[replace]World");
        assert_eq!(buffer.selection_text(), "[replace]");
    }

    #[test]
    fn test_regex_replace_interprets_escapes() {
        let mut buffer = TextBuffer::new("Hello");
        RegexTarget::find_and_select(&mut buffer, Some(0), "Hello", true, true, false, true)
            .unwrap();
        RegexTarget::replace_selection(&mut buffer, "Hello\\n", true).unwrap();
        assert_eq!(buffer.text(), "Hello\n");
    }

    #[test]
    fn test_regex_replace_dangling_backslash_is_rejected() {
        let mut buffer = TextBuffer::new("Hello");
        RegexTarget::find_and_select(&mut buffer, Some(0), "Hello", true, true, false, true)
            .unwrap();
        let err = RegexTarget::replace_selection(&mut buffer, "Hello\\", true).unwrap_err();
        assert!(matches!(err, TargetError::InvalidPattern(_)));
        assert_eq!(buffer.text(), "Hello");
    }

    #[test]
    fn test_regex_replace_without_prior_find_is_illegal_state() {
        let mut buffer = TextBuffer::new("Hello");
        buffer.set_selection(TextRange::new(0, 5));
        let err = RegexTarget::replace_selection(&mut buffer, "x", true).unwrap_err();
        assert_eq!(err, TargetError::IllegalState);
        assert_eq!(buffer.text(), "Hello");
    }

    #[test]
    fn test_scope_confines_search() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        buffer.set_scope(Some(TextRange::new(6, 6)));
        assert_eq!(find(&mut buffer, Some(0), "line", true), Some(6));
        assert_eq!(find(&mut buffer, Some(7), "line", true), None);
        assert_eq!(find(&mut buffer, None, "line", false), Some(6));
    }

    #[test]
    fn test_scope_tracks_edits_inside_it() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        buffer.set_scope(Some(TextRange::new(6, 6)));
        find(&mut buffer, Some(6), "line", true);
        FindReplaceTarget::replace_selection(&mut buffer, "").unwrap();
        assert_eq!(buffer.text(), "line1\n2\nline3");
        assert_eq!(buffer.scope(), Some(TextRange::new(6, 2)));
        // The shrunken scope no longer contains a match.
        assert_eq!(find(&mut buffer, Some(0), "line", true), None);
    }

    #[test]
    fn test_line_selection_zero_length_selection() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        buffer.set_selection(TextRange::caret(7));
        assert_eq!(buffer.line_selection(), TextRange::new(6, 6));
    }

    #[test]
    fn test_line_selection_at_line_start() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        buffer.set_selection(TextRange::caret(6));
        assert_eq!(buffer.line_selection(), TextRange::new(6, 6));
    }

    #[test]
    fn test_line_selection_multi_line() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        buffer.set_selection(TextRange::new(6, 11));
        assert_eq!(buffer.line_selection(), TextRange::new(6, 11));
    }

    #[test]
    fn test_line_selection_excludes_line_merely_touched() {
        let mut buffer = TextBuffer::new("line1\nline2\nline3");
        // Selection covers "line2\n" and ends exactly where line3 starts.
        buffer.set_selection(TextRange::new(6, 6));
        assert_eq!(buffer.line_selection(), TextRange::new(6, 6));
    }

    #[test]
    fn test_batch_mode_collapses_notifications() {
        let mut buffer = TextBuffer::new("a a a");
        BatchReplaceTarget::set_replace_all_mode(&mut buffer, true);
        for offset in [0, 2, 4] {
            buffer.set_selection(TextRange::new(offset, 1));
            FindReplaceTarget::replace_selection(&mut buffer, "b").unwrap();
        }
        BatchReplaceTarget::set_replace_all_mode(&mut buffer, false);
        assert_eq!(buffer.text(), "b b b");
        assert_eq!(buffer.edit_count(), 3);
        assert_eq!(buffer.notification_count(), 1);
        assert!(!buffer.is_replace_all_mode());
    }

    #[test]
    fn test_session_counters() {
        let mut buffer = TextBuffer::new("");
        SessionTarget::begin_session(&mut buffer);
        SessionTarget::end_session(&mut buffer);
        assert_eq!(buffer.sessions_started(), 1);
        assert_eq!(buffer.sessions_ended(), 1);
    }

    #[test]
    fn test_multi_selection_install() {
        let mut buffer = TextBuffer::new("x x x");
        let ranges = [TextRange::new(0, 1), TextRange::new(2, 1), TextRange::new(4, 1)];
        MultiSelectionTarget::select_ranges(&mut buffer, &ranges);
        assert_eq!(buffer.selected_ranges(), &ranges);
    }

    #[test]
    fn test_unicode_search_and_selection() {
        let mut buffer = TextBuffer::new("på tur på fjellet");
        assert_eq!(find(&mut buffer, Some(1), "på", true), Some(8));
        assert_eq!(buffer.selection_text(), "på");
    }

    #[test]
    fn test_escape_interpretation() {
        assert_eq!(interpret_replace_escapes("a\\tb").unwrap(), "a\tb");
        assert_eq!(interpret_replace_escapes("a\\\\b").unwrap(), "a\\b");
        assert_eq!(interpret_replace_escapes("a\\qb").unwrap(), "aqb");
        assert!(interpret_replace_escapes("oops\\").is_err());
    }
}
