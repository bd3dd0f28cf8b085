//! Title inference from diagnostic lines and metadata.
//!
//! # Responsibility
//! - Pick the most diagnostically significant line as the title source.
//! - Clean timestamp/keyword noise off the chosen line.
//! - Fall back through metadata, the first non-blank line, and a fixed
//!   default so a title always exists.
//!
//! # Invariants
//! - Lines are scanned in original order; the first match wins.
//! - Cleaning that empties a line falls back to the original line.
//! - Titles are capped at `MAX_TITLE_LEN` chars.

use crate::model::request::NoteMeta;
use crate::summarize::{cap_with_ellipsis, ERROR_KEYWORD_RE, WARNING_KEYWORD_RE};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum title length, ellipsis included.
pub const MAX_TITLE_LEN: usize = 120;

const DEFAULT_TITLE: &str = "Notes summary";

static DATE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[?\d{4}-\d{2}-\d{2}[^\]]*\]?\s*").expect("valid date prefix regex")
});
static KEYWORD_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(error|fatal|exception|warning)[:\s-]+").expect("valid keyword prefix regex")
});
static ERROR_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\berror\b\s*[:\-]?\s*(.+)").expect("valid error tail regex"));

/// Infers the note title from raw lines and optional metadata.
///
/// Priority: first diagnostic line (error/warning keyword, implicit
/// declaration, redefinition), then `project: topic` / whichever of the two
/// is present, then the first non-blank line cleaned the same way, then a
/// fixed default.
pub fn infer_title(lines: &[&str], meta: &NoteMeta) -> String {
    for line in lines {
        let lower = line.to_lowercase();
        if ERROR_KEYWORD_RE.is_match(line)
            || WARNING_KEYWORD_RE.is_match(line)
            || lower.contains("implicit declaration")
            || lower.contains("redefinition")
        {
            return clean_title_line(line);
        }
    }

    let project = meta.project.as_deref().filter(|value| !value.is_empty());
    let topic = meta.topic.as_deref().filter(|value| !value.is_empty());
    match (project, topic) {
        (Some(project), Some(topic)) => return format!("{project}: {topic}"),
        (None, Some(topic)) => return topic.to_string(),
        (Some(project), None) => return project.to_string(),
        (None, None) => {}
    }

    for line in lines {
        if !line.trim().is_empty() {
            return clean_title_line(line);
        }
    }

    DEFAULT_TITLE.to_string()
}

/// Cleans one line into title shape.
///
/// Strips a leading (possibly bracketed) ISO-date prefix, then a leading
/// diagnostic keyword with its separator. When the remainder still contains
/// an `error` token followed by text, that trailing text wins. Cleaning that
/// removes everything falls back to the original trimmed line.
pub(crate) fn clean_title_line(line: &str) -> String {
    let original = line.trim();
    let without_date = DATE_PREFIX_RE.replace(original, "");
    let without_keyword = KEYWORD_PREFIX_RE.replace(without_date.as_ref(), "");
    let mut candidate = without_keyword.trim().to_string();

    if let Some(caps) = ERROR_TAIL_RE.captures(&candidate) {
        if let Some(tail) = caps.get(1) {
            let tail = tail.as_str().trim();
            if !tail.is_empty() {
                candidate = tail.to_string();
            }
        }
    }

    if candidate.is_empty() {
        candidate = original.to_string();
    }
    cap_with_ellipsis(&candidate, MAX_TITLE_LEN)
}
