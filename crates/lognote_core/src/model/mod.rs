//! Domain model for note synthesis.
//!
//! # Responsibility
//! - Define the canonical request and note structures used by core logic.
//! - Keep one immutable note shape shared by rendering and persistence.
//!
//! # Invariants
//! - Every note is identified by a content-derived `NoteIdentity`.
//! - Model values are assembled once per invocation and never mutated after.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

pub mod note;
pub mod request;
