//! Note domain model.
//!
//! # Responsibility
//! - Define the rendered note record and its stable identity.
//! - Provide partition helpers (`year`, `year_month`) for persistence.
//!
//! # Invariants
//! - `NoteIdentity` is a pure function of (text, date, slug basis): identical
//!   inputs always compose the same identifier.
//! - A `Note` is created once per invocation and never mutated after assembly.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse evidence-volume bucket. Reflects excerpt count, not correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Stable string value used in the rendered metadata block.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Stable, content-derived identity for one note.
///
/// Composed identifier shape: `{date}-{slug}-{short_hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteIdentity {
    /// Calendar date the note is filed under.
    pub date: NaiveDate,
    /// Normalized hyphenated slug, `[a-z0-9-]`, at most 40 chars, non-empty.
    pub slug: String,
    /// Fixed-length lowercase hex digest over (text, date).
    pub short_hash: String,
}

impl NoteIdentity {
    /// ISO date string (`YYYY-MM-DD`) used in the id and metadata block.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Year partition segment (`YYYY`).
    pub fn year(&self) -> String {
        self.date.format("%Y").to_string()
    }

    /// Year-month partition segment (`YYYY-MM`).
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Composed identifier: `{date}-{slug}-{short_hash}`.
    pub fn composed_id(&self) -> String {
        format!("{}-{}-{}", self.date_string(), self.slug, self.short_hash)
    }
}

/// Final structured note produced by one invocation.
///
/// All list fields are ordered, deduplicated and bounded by their builders;
/// the renderer performs no further shaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Stable identity; also keys the persisted file name.
    pub identity: NoteIdentity,
    /// Project label, defaulted to `general` when metadata omits it.
    pub project: String,
    /// Topic label, defaulted to `general` when metadata omits it.
    pub topic: String,
    /// Normalized tags, at most 12.
    pub tags: Vec<String>,
    /// Input channel label, defaulted to `chat`.
    pub source: String,
    /// Evidence-volume bucket.
    pub confidence: Confidence,
    /// Inferred title, at most 120 chars.
    pub title: String,
    /// TL;DR bullets, at most 6.
    pub tldr: Vec<String>,
    /// Key-finding bullets, at most 5.
    pub findings: Vec<String>,
    /// Selected excerpt lines, each at most 300 chars.
    pub evidence: Vec<String>,
    /// Next-step bullets, at most 5.
    pub next_steps: Vec<String>,
    /// Deduplicated links, at most 8.
    pub links: Vec<String>,
}
