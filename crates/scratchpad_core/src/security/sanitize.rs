//! Text and enum input validation.
//!
//! # Invariants
//! - Sanitized text never exceeds the requested character budget.
//! - A literal `|` only survives as `\|`, so notes cannot add table cells.
//! - Enum validation never fails; unknown values fall back to the default.

use crate::error::{ScratchpadError, ScratchpadResult};
use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};

const BLOCKED_PATTERNS: &[&str] = &[
    r"\.\.",
    r"~",
    r"\$",
    r"`",
    r"<script",
    r"javascript:",
    r"file://",
    r"\x00",
];

const BLOCKED_PATTERN_LABELS: &[&str] = &[
    "..",
    "~",
    "$",
    "`",
    "<script",
    "javascript:",
    "file://",
    "NUL byte",
];

static BLOCKED_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSetBuilder::new(BLOCKED_PATTERNS)
        .case_insensitive(true)
        .build()
        .expect("valid blocked pattern set")
});

/// Returns the label of the first denylisted pattern found in `text`.
pub fn find_blocked_pattern(text: &str) -> Option<&'static str> {
    BLOCKED_SET
        .matches(text)
        .iter()
        .next()
        .map(|index| BLOCKED_PATTERN_LABELS[index])
}

/// Sanitizes one caller-supplied text value for insertion into the document.
///
/// Steps: trim, denylist check, newline collapse (unless `allow_newlines`),
/// control-character removal, pipe escaping, truncation to `max_len` chars.
///
/// # Errors
/// - `InvalidInput` when the trimmed text contains a blocked pattern.
pub fn sanitize_text(text: &str, max_len: usize, allow_newlines: bool) -> ScratchpadResult<String> {
    let trimmed = text.trim();
    if let Some(pattern) = find_blocked_pattern(trimmed) {
        return Err(ScratchpadError::InvalidInput(format!(
            "Input contains blocked pattern: {pattern}"
        )));
    }

    let mut sanitized = String::with_capacity(trimmed.len().min(max_len.saturating_mul(2)));
    let mut used = 0usize;
    for ch in trimmed.chars() {
        let ch = if !allow_newlines && matches!(ch, '\n' | '\r') {
            ' '
        } else {
            ch
        };
        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        // An escaped pipe is kept or dropped as a unit.
        let width = if ch == '|' { 2 } else { 1 };
        if used + width > max_len {
            break;
        }
        if ch == '|' {
            sanitized.push('\\');
        }
        sanitized.push(ch);
        used += width;
    }

    Ok(sanitized)
}

/// Case-insensitive membership check with silent fallback to `default`.
pub fn validate_enum<'a>(value: Option<&str>, allowed: &[&'a str], default: &'a str) -> &'a str {
    let Some(value) = value else {
        return default;
    };
    let normalized = value.trim();
    allowed
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(normalized))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{find_blocked_pattern, sanitize_text, validate_enum};
    use crate::error::ErrorKind;

    #[test]
    fn trims_and_truncates() {
        let sanitized = sanitize_text("   hello world   ", 5, false).expect("clean text");
        assert_eq!(sanitized, "hello");
    }

    #[test]
    fn collapses_newlines_unless_allowed() {
        assert_eq!(
            sanitize_text("one\ntwo\r\nthree", 100, false).expect("clean text"),
            "one two  three"
        );
        assert_eq!(
            sanitize_text("one\ntwo", 100, true).expect("clean text"),
            "one\ntwo"
        );
    }

    #[test]
    fn escapes_table_pipes_without_splitting_escape() {
        assert_eq!(
            sanitize_text("a|b", 100, false).expect("clean text"),
            "a\\|b"
        );
        // Budget of 2 fits `a` but not the two-char escape that follows.
        assert_eq!(sanitize_text("a|b", 2, false).expect("clean text"), "a");
    }

    #[test]
    fn strips_control_characters_but_keeps_tab() {
        let sanitized = sanitize_text("a\u{7}b\tc\u{1b}d", 100, false).expect("clean text");
        assert_eq!(sanitized, "ab\tcd");
    }

    #[test]
    fn rejects_blocked_patterns_case_insensitively() {
        for input in [
            "../etc/passwd",
            "~/secrets",
            "cost $HOME",
            "run `ls`",
            "<SCRIPT>alert(1)</script>",
            "JavaScript:void(0)",
            "FILE://host/share",
            "nul\0byte",
        ] {
            let err = sanitize_text(input, 500, false).expect_err("blocked input must fail");
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "input: {input:?}");
        }
    }

    #[test]
    fn blocked_pattern_beyond_budget_still_rejected() {
        let input = format!("{}..", "x".repeat(20));
        assert!(sanitize_text(&input, 10, false).is_err());
    }

    #[test]
    fn reports_matched_pattern_label() {
        assert_eq!(find_blocked_pattern("a..b"), Some(".."));
        assert_eq!(find_blocked_pattern("plain note"), None);
    }

    #[test]
    fn huge_budget_keeps_whole_text() {
        assert_eq!(
            sanitize_text("a|b", usize::MAX, false).expect("clean text"),
            "a\\|b"
        );
    }

    #[test]
    fn validate_enum_falls_back_to_default() {
        let allowed = ["high", "medium", "low"];
        assert_eq!(validate_enum(Some(" HIGH "), &allowed, "medium"), "high");
        assert_eq!(validate_enum(Some("urgent"), &allowed, "medium"), "medium");
        assert_eq!(validate_enum(None, &allowed, "medium"), "medium");
    }
}
