//! Note repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Persist rendered notes under `notes/{year}/{year-month}/{id}.md`.
//! - Validate the storage root as explicit required configuration.
//!
//! # Invariants
//! - `try_new` rejects a missing or non-directory root before any
//!   processing starts; there is no sentinel default.
//! - `store_note` returns the absolute path of the written file.

use crate::model::note::NoteIdentity;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const NOTES_SUBDIR: &str = "notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for note storage.
#[derive(Debug)]
pub enum RepoError {
    /// Configured root is missing or not a directory.
    InvalidRoot(PathBuf),
    /// Filesystem operation failed at `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot(path) => write!(
                f,
                "notes root `{}` does not exist or is not a directory",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "filesystem error at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRoot(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Storage contract for rendered notes.
pub trait NoteRepository {
    /// Writes one rendered note and returns its absolute path.
    fn store_note(&self, identity: &NoteIdentity, rendered: &str) -> RepoResult<PathBuf>;
}

/// Filesystem-backed note repository.
#[derive(Debug)]
pub struct FsNoteRepository {
    root: PathBuf,
}

impl FsNoteRepository {
    /// Constructs a repository over an existing directory.
    ///
    /// The root is required configuration: absence fails here, before any
    /// text processing, with a descriptive error.
    pub fn try_new(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RepoError::InvalidRoot(root));
        }
        Ok(Self { root })
    }

    /// Returns the partitioned path for one identity, relative to the root.
    pub fn note_path(&self, identity: &NoteIdentity) -> PathBuf {
        self.root
            .join(NOTES_SUBDIR)
            .join(identity.year())
            .join(identity.year_month())
            .join(format!("{}.md", identity.composed_id()))
    }

    fn io_error(path: &Path, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl NoteRepository for FsNoteRepository {
    fn store_note(&self, identity: &NoteIdentity, rendered: &str) -> RepoResult<PathBuf> {
        let path = self.note_path(identity);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| Self::io_error(parent, err))?;
        }
        fs::write(&path, rendered).map_err(|err| Self::io_error(&path, err))?;
        fs::canonicalize(&path).map_err(|err| Self::io_error(&path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::{FsNoteRepository, NoteRepository, RepoError};
    use crate::model::note::NoteIdentity;
    use chrono::NaiveDate;

    fn identity() -> NoteIdentity {
        NoteIdentity {
            date: NaiveDate::from_ymd_opt(2026, 2, 24).expect("valid date"),
            slug: "demo-build".to_string(),
            short_hash: "a1b2c3d4".to_string(),
        }
    }

    #[test]
    fn missing_root_is_rejected_at_construction() {
        let err = FsNoteRepository::try_new("/definitely/not/a/real/root")
            .expect_err("missing root must fail");
        assert!(matches!(err, RepoError::InvalidRoot(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn note_path_partitions_by_year_and_year_month() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FsNoteRepository::try_new(dir.path()).expect("root exists");
        let path = repo.note_path(&identity());
        let expected_tail = [
            "notes",
            "2026",
            "2026-02",
            "2026-02-24-demo-build-a1b2c3d4.md",
        ]
        .iter()
        .collect::<std::path::PathBuf>();
        assert!(path.ends_with(expected_tail));
    }

    #[test]
    fn store_note_creates_partition_dirs_and_writes_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FsNoteRepository::try_new(dir.path()).expect("root exists");
        let written = repo
            .store_note(&identity(), "---\nid: x\n---\n")
            .expect("store should succeed");
        assert!(written.is_absolute());
        let content = std::fs::read_to_string(&written).expect("note readable");
        assert!(content.starts_with("---"));
    }
}
