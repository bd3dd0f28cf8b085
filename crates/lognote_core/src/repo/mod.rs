//! Persistence layer for rendered notes.
//!
//! # Responsibility
//! - Define the note storage contract consumed by the service layer.
//! - Keep filesystem layout details inside the persistence boundary.
//!
//! # Invariants
//! - The storage root is validated at construction, never at write time.
//! - Stored paths are partitioned by year and year-month derived from the
//!   note date.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

pub mod note_repo;
