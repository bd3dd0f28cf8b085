//! Note synthesis engine.
//!
//! # Responsibility
//! - Turn raw text plus optional metadata into bounded, ordered note fields.
//! - Keep every stage a pure function of its inputs; no cross-invocation state.
//!
//! # Invariants
//! - Stages run in dependency order: line split -> evidence/references ->
//!   title/tags/narratives -> identity.
//! - Identical (text, date) inputs always produce identical output.
//! - Every inference stage degrades to a fixed default instead of failing.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

pub mod evidence;
pub mod identity;
pub mod narrative;
pub mod refs;
pub mod tags;
pub mod title;

/// Error-keyword pattern shared by title inference and finding classification.
pub(crate) static ERROR_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(error|fatal|exception|traceback)\b").expect("valid error regex"));

/// Warning-keyword pattern shared by title inference and finding classification.
pub(crate) static WARNING_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bwarning\b").expect("valid warning regex"));

/// Splits raw text into physical lines with trailing newlines stripped.
///
/// Blank lines are kept here; each downstream stage decides how to treat
/// them without renumbering the relative order of the rest.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Deduplicates by exact string equality, preserving first occurrence.
pub(crate) fn dedupe_preserve(items: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            result.push(item);
        }
    }
    result
}

/// Caps `value` at `max_chars`, replacing the tail with `...` when it is cut.
pub(crate) fn cap_with_ellipsis(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut capped: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    capped.push_str("...");
    capped
}
