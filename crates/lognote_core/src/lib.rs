//! Core domain logic for lognote.
//! This crate is the single source of truth for note-synthesis invariants.

pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod summarize;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Confidence, Note, NoteIdentity};
pub use model::request::{NoteMeta, RequestError, SummarizeRequest, DEFAULT_MAX_EXCERPT_LINES};
pub use render::render_note;
pub use repo::note_repo::{FsNoteRepository, NoteRepository, RepoError, RepoResult};
pub use service::note_service::{NoteService, NoteServiceError, SummarizeOutcome};
pub use sync::provider_registry::{SyncRegistry, SyncRegistryError};
pub use sync::provider_spi::SyncSpi;
pub use sync::provider_types::{SyncErrorEnvelope, SyncRequest, SyncReport, SyncResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
