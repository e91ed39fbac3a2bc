//! Field-level cleanup rules
//!
//! Pure functions applied to single cell values. Raw exports need label and
//! link splitting plus comment metadata removal; the issue-key rule applies to
//! both layouts.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{COMMENT_METADATA_PARTS, MULTI_VALUE_SEPARATOR, NULL_ISSUE_KEY_LITERAL};

/// Separators between raw labels: commas, semicolons and ASCII whitespace
static LABEL_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,;\t\n\x0B\x0C\r ]+").expect("label separator pattern is valid")
});

/// Separators between raw issue links; spaces stay inside link names
static ISSUE_LINK_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\r\n]+").expect("issue link separator pattern is valid"));

/// Any line terminator, with CR LF counted once
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\x0B\x0C\r\u{85}\u{2028}\u{2029}]")
        .expect("line break pattern is valid")
});

/// Strip leading and trailing ASCII control characters and spaces
///
/// Other whitespace, such as a no-break space, is kept as cell content.
pub fn trim_field(value: &str) -> &str {
    value.trim_matches(|c: char| c <= ' ')
}

/// Trim an issue key and map the literal `null` (any case) to `""`
pub fn normalize_issue_key(value: &str) -> String {
    let trimmed = trim_field(value);
    if trimmed.eq_ignore_ascii_case(NULL_ISSUE_KEY_LITERAL) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Split labels on commas, semicolons and whitespace, then rejoin with `", "`
pub fn normalize_labels(value: &str) -> String {
    split_and_join(value, &LABEL_SEPARATORS)
}

/// Split issue links on commas, semicolons and line breaks, then rejoin with `", "`
pub fn normalize_issue_links(value: &str) -> String {
    split_and_join(value, &ISSUE_LINK_SEPARATORS)
}

fn split_and_join(value: &str, separators: &Regex) -> String {
    let trimmed = trim_field(value);
    if trimmed.is_empty() {
        return String::new();
    }

    separators
        .split(trimmed)
        .map(trim_field)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_SEPARATOR)
}

/// Strip the `timestamp;author;` prefix from every line of a comment
///
/// Lines that become empty are dropped; the remaining lines are joined with
/// `\n`.
pub fn clean_comment(value: &str) -> String {
    if trim_field(value).is_empty() {
        return String::new();
    }

    LINE_BREAKS
        .split(value)
        .map(clean_comment_line)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean a single comment line
///
/// A line with at least two `;` keeps only the text after the second one;
/// anything else is kept whole.
pub fn clean_comment_line(line: &str) -> String {
    let trimmed = trim_field(line);
    if trimmed.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = trimmed.splitn(COMMENT_METADATA_PARTS, ';').collect();
    if parts.len() == COMMENT_METADATA_PARTS {
        trim_field(parts[COMMENT_METADATA_PARTS - 1]).to_string()
    } else {
        trimmed.to_string()
    }
}
