//! Request/report types for the sync collaborator contract.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type for provider operations.
pub type SyncResult<T> = Result<T, SyncErrorEnvelope>;

/// One synchronization request handed to the active provider.
///
/// Providers receive paths only; note content is never part of the
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Root of the notes repository to synchronize.
    pub repo_root: PathBuf,
    /// Optional commit author name.
    pub author_name: Option<String>,
    /// Optional commit author email.
    pub author_email: Option<String>,
    /// Optional branch override.
    pub branch: Option<String>,
    /// Optional remote override.
    pub remote: Option<String>,
    /// Paths to stage. Empty means the provider's default staging scope.
    pub paths: Vec<PathBuf>,
}

impl SyncRequest {
    /// Creates a request with defaults for everything but the root.
    pub fn for_root(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            author_name: None,
            author_email: None,
            branch: None,
            remote: None,
            paths: Vec::new(),
        }
    }
}

/// Which workflow actions actually occurred, plus the resulting revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Remote changes were pulled.
    pub pulled: bool,
    /// Paths were staged.
    pub added: bool,
    /// A commit was created.
    pub committed: bool,
    /// The branch was pushed.
    pub pushed: bool,
    /// Revision identifier after the run, when the provider knows one.
    pub revision: Option<String>,
}

/// Typed provider failure surfaced through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncErrorEnvelope {
    /// Provider that produced the failure (or `registry`).
    pub provider_id: String,
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl SyncErrorEnvelope {
    /// Creates an envelope with owned fields.
    pub fn new(
        provider_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for SyncErrorEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sync provider `{}` failed ({}): {}",
            self.provider_id, self.code, self.message
        )
    }
}

impl Error for SyncErrorEnvelope {}
