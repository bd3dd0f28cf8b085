//! Sync collaborator seam.
//!
//! The repository-synchronization workflow (pull, stage, commit, push) is an
//! external collaborator: it runs after notes are written and never sees
//! note content, only paths. This module defines the contract that
//! collaborator is consumed through — provider SPI, request/report types and
//! an in-process registry — without shipping any provider implementation.
//!
//! # See also
//! - docs/architecture/sync-spi.md

pub mod provider_registry;
pub mod provider_spi;
pub mod provider_types;
