//! Error types for ccoco operations.
//!
//! [`CcocoError`] covers every failure that aborts an operation. Per-file
//! problems during apply (missing snapshot, malformed header, unreadable
//! snapshot) are not errors: they are recorded as
//! [`FileOutcome`](crate::switch::FileOutcome)s and the run continues.
//!
//! Messages end with a "To fix:" hint so the output of a git hook is
//! actionable on its own.

use std::io;
use std::path::{Path, PathBuf};

use ccoco_git::{BranchName, BranchNameError, GitError};
use thiserror::Error;

use crate::manifest::ManifestError;

/// Unified error type for ccoco operations.
#[derive(Debug, Error)]
pub enum CcocoError {
    /// The state directories or the manifest are missing.
    #[error(
        "ccoco is not initialized in {}.\n  To fix: run `ccoco init` at the repository root.",
        root.display()
    )]
    NotInitialized {
        /// Repository root that was checked.
        root: PathBuf,
    },

    /// A flat branch has no snapshot directory.
    #[error(
        "no snapshots for branch '{branch}' (expected {}).\n  To fix: run `ccoco generate` to create per-branch snapshots.",
        path.display()
    )]
    BranchNotFound {
        /// The branch being applied.
        branch: BranchName,
        /// The snapshot directory that was expected.
        path: PathBuf,
    },

    /// A flat branch's snapshot path exists but is not a directory.
    #[error(
        "snapshot path for branch '{branch}' is not a directory: {}\n  To fix: remove it and run `ccoco generate`.",
        path.display()
    )]
    NotADirectory {
        /// The branch being applied.
        branch: BranchName,
        /// The offending path.
        path: PathBuf,
    },

    /// A sub-branch apply found no usable snapshot for any tracked file.
    #[error(
        "failed to find any configs for branch '{branch}' (tried: {}).\n  To fix: run `ccoco generate`, or create snapshots under one of the tried directories.",
        candidates.join(", ")
    )]
    NoSnapshotsFound {
        /// The branch being applied.
        branch: BranchName,
        /// Candidate directories, in probe order.
        candidates: Vec<String>,
    },

    /// The manifest could not be parsed or serialized.
    #[error(
        "manifest error in '{}': {source}\n  To fix: edit the file so it is a JSON object with a \"files\" array of paths relative to the repository root.",
        path.display()
    )]
    Manifest {
        /// Path to the manifest file.
        path: PathBuf,
        /// What was wrong with it.
        #[source]
        source: ManifestError,
    },

    /// A tracked path would resolve outside the working tree.
    #[error(
        "tracked path '{path}' {reason}.\n  To fix: run `ccoco remove {path}` and track a path relative to the repository root."
    )]
    InvalidTrackedPath {
        /// The logical path as given.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The post-checkout hook exited unsuccessfully.
    #[error(
        "post-checkout hook {} failed ({status}).\n  To fix: check the preflight scripts, or rerun with `--skip`.",
        path.display()
    )]
    HookFailed {
        /// Path to the hook script.
        path: PathBuf,
        /// Exit status description.
        status: String,
    },

    /// A branch name given on the command line is invalid.
    #[error(transparent)]
    InvalidBranch(#[from] BranchNameError),

    /// The version-control adapter failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// An I/O error on a specific path.
    #[error("I/O error on {}: {source}\n  To fix: check file permissions and disk space.", path.display())]
    Io {
        /// The path being read, written or removed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl CcocoError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = CcocoError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
