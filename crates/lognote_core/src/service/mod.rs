//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, the synthesis pipeline, rendering and
//!   persistence into one use-case API.
//! - Keep CLI/shell layers decoupled from engine and storage details.
//!
//! # See also
//! - docs/architecture/note-pipeline.md

pub mod note_service;
