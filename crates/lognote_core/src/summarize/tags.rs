//! Tag synthesis and normalization.
//!
//! # Responsibility
//! - Merge caller-supplied tags with pattern-triggered tags.
//! - Normalize every tag into `[a-z0-9-]` shape and bound the count.
//!
//! # Invariants
//! - Caller tags come first; trigger tags append in table order.
//! - Normalization never produces empty tags; unsalvageable input is dropped.
//! - Output is deduplicated by first occurrence and capped at `MAX_TAGS`.

use crate::model::request::NoteMeta;
use crate::summarize::dedupe_preserve;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of tags on one note.
pub const MAX_TAGS: usize = 12;

/// Literal marker in the lowercased full text mapped to fixed tags.
struct TagRule {
    marker: &'static str,
    tags: &'static [&'static str],
}

const TAG_RULES: &[TagRule] = &[
    TagRule {
        marker: "implicit declaration",
        tags: &["c99", "implicit-declaration"],
    },
    TagRule {
        marker: "redefinition",
        tags: &["redefinition"],
    },
    TagRule {
        marker: "/src/htslib",
        tags: &["htslib"],
    },
];

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static INVALID_TAG_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("valid tag charset regex"));
static HYPHEN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("valid hyphen run regex"));

/// Builds the final tag list from metadata tags and text-triggered tags.
pub fn build_tags(text: &str, meta: &NoteMeta) -> Vec<String> {
    let mut raw: Vec<String> = meta.tags.clone();
    let lower = text.to_lowercase();
    for rule in TAG_RULES {
        if lower.contains(rule.marker) {
            raw.extend(rule.tags.iter().map(|tag| (*tag).to_string()));
        }
    }

    let normalized: Vec<String> = raw
        .iter()
        .filter_map(|tag| normalize_tag(tag))
        .collect();
    let mut tags = dedupe_preserve(normalized);
    tags.truncate(MAX_TAGS);
    tags
}

/// Normalizes one tag: lowercase, whitespace runs to single hyphens, strip
/// anything outside `[a-z0-9-]`, collapse hyphen runs, trim edge hyphens.
///
/// Returns `None` when nothing survives normalization.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let lowered = tag.trim().to_lowercase();
    let hyphenated = WHITESPACE_RUN_RE.replace_all(&lowered, "-");
    let stripped = INVALID_TAG_CHAR_RE.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN_RE.replace_all(&stripped, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
