//! Summarize use-case service.
//!
//! # Responsibility
//! - Validate the request, run the pipeline stages in dependency order,
//!   render the note and persist it through the repository contract.
//! - Report a caller-facing outcome with the composed identifier.
//!
//! # Invariants
//! - Validation failures surface before any file is written.
//! - One invocation writes exactly one note; nothing is cached across
//!   invocations.
//! - Log events carry metadata only, never raw input text.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

use crate::model::note::Note;
use crate::model::request::{RequestError, SummarizeRequest};
use crate::render::render_note;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::summarize::narrative::{
    build_key_findings, build_links, build_next_steps, build_summary, build_tldr,
    estimate_confidence, NarrativeContext,
};
use crate::summarize::{evidence, identity, normalize_lines, refs, tags, title};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_PROJECT: &str = "general";
const DEFAULT_TOPIC: &str = "general";
const DEFAULT_SOURCE: &str = "chat";

/// Caller-facing result of one successful summarize invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeOutcome {
    /// Absolute path of the written note.
    pub note_path: PathBuf,
    /// Composed identifier (`date-slug-hash`).
    pub note_id: String,
    /// Inferred title.
    pub title: String,
    /// Final tag list.
    pub tags: Vec<String>,
    /// One-paragraph plain-text summary.
    pub summary: String,
}

/// Service error for the summarize use-case.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Request validation failed before processing.
    Request(RequestError),
    /// Persistence failed after synthesis.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RequestError> for NoteServiceError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Summarize service facade over a note repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Synthesizes one note from the request and persists it.
    pub fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeOutcome, NoteServiceError> {
        let text = request.resolved_text()?;
        let max_lines = request.resolved_excerpt_bound()?;
        let tz = request.resolved_timezone()?;
        let date = request.resolved_date(tz)?;

        info!(
            "event=summarize module=service status=start date={} max_excerpt_lines={}",
            date.format("%Y-%m-%d"),
            max_lines
        );

        let lines = normalize_lines(text);
        let evidence_lines = evidence::select_evidence(&lines, max_lines);
        let file_refs = refs::extract_file_refs(&lines);
        let note_title = title::infer_title(&lines, &request.meta);
        let note_tags = tags::build_tags(text, &request.meta);

        let ctx = NarrativeContext {
            title: &note_title,
            meta: &request.meta,
            evidence: &evidence_lines,
            refs: &file_refs,
            text,
        };
        let tldr = build_tldr(&ctx);
        let findings = build_key_findings(&ctx);
        let next_steps = build_next_steps(&ctx);
        let summary = build_summary(&ctx);
        let confidence = estimate_confidence(evidence_lines.len());
        let links = build_links(text, &request.meta);

        let note_identity = identity::note_identity(
            text,
            date,
            &request.meta,
            request.slug_hint.as_deref(),
            &note_title,
        );

        let note = Note {
            identity: note_identity,
            project: labeled(&request.meta.project, DEFAULT_PROJECT),
            topic: labeled(&request.meta.topic, DEFAULT_TOPIC),
            tags: note_tags,
            source: labeled(&request.meta.source, DEFAULT_SOURCE),
            confidence,
            title: note_title,
            tldr,
            findings,
            evidence: evidence_lines,
            next_steps,
            links,
        };

        let rendered = render_note(&note);
        let note_path = match self.repo.store_note(&note.identity, &rendered) {
            Ok(path) => path,
            Err(err) => {
                error!(
                    "event=summarize module=service status=error id={} error={err}",
                    note.identity.composed_id()
                );
                return Err(err.into());
            }
        };

        info!(
            "event=summarize module=service status=ok id={} evidence={} tags={} confidence={}",
            note.identity.composed_id(),
            note.evidence.len(),
            note.tags.len(),
            note.confidence.as_str()
        );

        Ok(SummarizeOutcome {
            note_path,
            note_id: note.identity.composed_id(),
            title: note.title,
            tags: note.tags,
            summary,
        })
    }
}

/// Resolves an optional metadata label to its fixed default.
fn labeled(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default.to_string(),
    }
}
