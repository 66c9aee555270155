//! Error types for git operations.
//!
//! [`GitError`] is the single error type returned by all [`GitRepo`](crate::GitRepo)
//! trait methods. Callers treat every variant as fatal to the enclosing
//! operation; the variants exist so the message can say what to do next.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`GitRepo`](crate::GitRepo) operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository could be found at or above the given path.
    #[error("no git repository found at or above {}", path.display())]
    NotFound {
        /// The directory discovery started from.
        path: PathBuf,
    },

    /// The repository has no working tree (bare repository).
    #[error("repository at {} has no working tree", path.display())]
    NoWorkdir {
        /// The git directory of the bare repository.
        path: PathBuf,
    },

    /// HEAD does not point at a branch (detached HEAD).
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    /// A branch name reported by git failed validation.
    #[error(transparent)]
    InvalidBranch(#[from] crate::types::BranchNameError),

    /// The underlying git backend returned an unclassified error.
    ///
    /// The `message` should include enough context to diagnose the failure.
    #[error("git backend error: {message}")]
    BackendError {
        /// Freeform error description from the backend.
        message: String,
    },
}
