//! Source-location reference extraction.
//!
//! # Responsibility
//! - Recognize `path:line[:col]` tokens in raw lines.
//! - Aggregate the first match per line into an ordered, deduplicated list.
//!
//! # Invariants
//! - All lines are scanned, not just selected evidence lines.
//! - Output order is first occurrence in the text.

use crate::summarize::dedupe_preserve;
use once_cell::sync::Lazy;
use regex::Regex;

static FILE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z0-9_./\\-]+):(\d+)(?::(\d+))?").expect("valid file reference regex")
});

/// Returns whether `line` carries at least one `path:line[:col]` token.
pub fn contains_reference(line: &str) -> bool {
    FILE_REF_RE.is_match(line)
}

/// Extracts the first `path:line[:col]` reference from each line.
///
/// Returns references in first-occurrence order, deduplicated by exact
/// string equality.
pub fn extract_file_refs(lines: &[&str]) -> Vec<String> {
    let mut refs = Vec::new();
    for line in lines {
        if let Some(caps) = FILE_REF_RE.captures(line) {
            let path = &caps[1];
            let line_no = &caps[2];
            let reference = match caps.get(3) {
                Some(col) => format!("{path}:{line_no}:{}", col.as_str()),
                None => format!("{path}:{line_no}"),
            };
            refs.push(reference);
        }
    }
    dedupe_preserve(refs)
}
