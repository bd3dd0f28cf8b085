//! Deterministic note identity: slug and short content hash.
//!
//! # Responsibility
//! - Derive a human-readable slug from project/topic, hint, or title.
//! - Derive a fixed-length content hash over (text, date).
//!
//! # Invariants
//! - Slugs match `[a-z0-9-]*`, are non-empty and at most 40 chars, with no
//!   edge hyphens.
//! - Identical (text, date) always hashes identically; any one-character
//!   change to either input changes the digest.

use crate::model::note::NoteIdentity;
use crate::model::request::NoteMeta;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Maximum slug length.
pub const MAX_SLUG_LEN: usize = 40;

/// Hex chars kept from the digest.
pub const SHORT_HASH_LEN: usize = 8;

const DEFAULT_SLUG: &str = "note";

static NON_ALNUM_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug charset regex"));

/// Normalizes free text into a lowercase hyphenated slug.
///
/// Lowercases, collapses non-alphanumeric runs to single hyphens, trims edge
/// hyphens, caps the length at 40 (re-trimming a trailing hyphen after the
/// cut) and falls back to `note` when nothing survives.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let hyphenated = NON_ALNUM_RUN_RE.replace_all(&lowered, "-");
    let trimmed = hyphenated.trim_matches('-');
    if trimmed.is_empty() {
        return DEFAULT_SLUG.to_string();
    }
    if trimmed.chars().count() <= MAX_SLUG_LEN {
        return trimmed.to_string();
    }
    let capped: String = trimmed.chars().take(MAX_SLUG_LEN).collect();
    let capped = capped.trim_end_matches('-');
    if capped.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        capped.to_string()
    }
}

/// Picks the slug basis: project/topic joined by a space when either is
/// present, else the explicit hint, else the inferred title.
pub fn slug_basis(meta: &NoteMeta, slug_hint: Option<&str>, title: &str) -> String {
    let project = meta.project.as_deref().filter(|value| !value.is_empty());
    let topic = meta.topic.as_deref().filter(|value| !value.is_empty());
    if project.is_some() || topic.is_some() {
        return [project, topic]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
    }
    if let Some(hint) = slug_hint.filter(|value| !value.is_empty()) {
        return hint.to_string();
    }
    title.to_string()
}

/// Computes the fixed-length short hash over the exact text and date string.
pub fn short_hash(text: &str, date: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(b"\n");
    hasher.update(date.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)[..SHORT_HASH_LEN].to_string()
}

/// Composes the full note identity for (text, date, slug inputs).
pub fn note_identity(
    text: &str,
    date: NaiveDate,
    meta: &NoteMeta,
    slug_hint: Option<&str>,
    title: &str,
) -> NoteIdentity {
    let slug = slugify(&slug_basis(meta, slug_hint, title));
    let date_string = date.format("%Y-%m-%d").to_string();
    NoteIdentity {
        date,
        slug,
        short_hash: short_hash(text, &date_string),
    }
}
