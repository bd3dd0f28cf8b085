//! Summarize request shape and fail-fast validation.
//!
//! # Responsibility
//! - Define the external request contract (text + optional metadata).
//! - Validate and resolve request fields before any processing starts.
//!
//! # Invariants
//! - Validation failures surface before the pipeline touches the text.
//! - Resolution is pure: the same request and clock inputs resolve the same.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Default excerpt bound when the request omits `max_excerpt_lines`.
pub const DEFAULT_MAX_EXCERPT_LINES: usize = 8;

/// Optional structured metadata accompanying the raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteMeta {
    /// Project label used for title fallback, slug basis and context bullets.
    pub project: Option<String>,
    /// Topic label used for title fallback, slug basis and context bullets.
    pub topic: Option<String>,
    /// Input channel label (`chat` when omitted).
    pub source: Option<String>,
    /// Caller-supplied tags, merged ahead of pattern-triggered tags.
    pub tags: Vec<String>,
    /// Related files, surfaced in findings and next steps.
    pub files: Vec<String>,
    /// Related functions, surfaced in findings.
    pub functions: Vec<String>,
    /// Caller-supplied links, merged ahead of links found in the text.
    pub links: Vec<String>,
}

/// One summarize invocation. Immutable once received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// Raw input text. Required; must be non-empty after trimming.
    pub text: String,
    /// Optional structured metadata.
    #[serde(default)]
    pub meta: NoteMeta,
    /// Calendar date (`YYYY-MM-DD`). Defaults to today in the resolved zone.
    #[serde(default)]
    pub date: Option<String>,
    /// IANA timezone identifier. Defaults to the local zone.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Explicit slug basis, consulted when project/topic are absent.
    #[serde(default)]
    pub slug_hint: Option<String>,
    /// Evidence bound. Must be positive; defaults to 8.
    #[serde(default)]
    pub max_excerpt_lines: Option<u32>,
}

/// Validation error for summarize requests.
///
/// Every variant maps to one fail-fast check; messages surface verbatim in
/// the caller-facing result envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// `text` is missing or blank after trimming.
    EmptyText,
    /// `date` is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// `timezone` is not a known IANA identifier.
    InvalidTimezone(String),
    /// `max_excerpt_lines` is zero.
    NonPositiveExcerptBound,
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text is required and must not be empty"),
            Self::InvalidDate(value) => {
                write!(f, "date must be in YYYY-MM-DD format, got `{value}`")
            }
            Self::InvalidTimezone(value) => write!(f, "invalid timezone: {value}"),
            Self::NonPositiveExcerptBound => {
                write!(f, "max_excerpt_lines must be a positive integer")
            }
        }
    }
}

impl Error for RequestError {}

impl SummarizeRequest {
    /// Returns the raw text after the non-empty check.
    pub fn resolved_text(&self) -> Result<&str, RequestError> {
        if self.text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        Ok(self.text.as_str())
    }

    /// Returns the effective evidence bound (default 8, rejects zero).
    pub fn resolved_excerpt_bound(&self) -> Result<usize, RequestError> {
        match self.max_excerpt_lines {
            None => Ok(DEFAULT_MAX_EXCERPT_LINES),
            Some(0) => Err(RequestError::NonPositiveExcerptBound),
            Some(bound) => Ok(bound as usize),
        }
    }

    /// Resolves the optional timezone identifier to a concrete zone.
    pub fn resolved_timezone(&self) -> Result<Option<Tz>, RequestError> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => Tz::from_str(name)
                .map(Some)
                .map_err(|_| RequestError::InvalidTimezone(name.to_string())),
        }
    }

    /// Resolves the note date: explicit `YYYY-MM-DD`, else today in `tz`,
    /// else today in the local zone.
    pub fn resolved_date(&self, tz: Option<Tz>) -> Result<NaiveDate, RequestError> {
        match self.date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| RequestError::InvalidDate(value.to_string())),
            _ => Ok(match tz {
                Some(tz) => chrono::Utc::now().with_timezone(&tz).date_naive(),
                None => chrono::Local::now().date_naive(),
            }),
        }
    }
}
