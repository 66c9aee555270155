//! The [`GitRepo`] trait: the single abstraction boundary between ccoco and git.
//!
//! ccoco needs exactly three things from version control:
//!
//! | Method           | Used by                                |
//! |------------------|----------------------------------------|
//! | `workdir`        | locating the manifest and snapshot tree |
//! | `current_branch` | `generate`, `run` (without override)   |
//! | `list_branches`  | `generate`                             |

use std::path::Path;

use crate::error::GitError;
use crate::types::BranchName;

/// The git capability consumed by ccoco.
///
/// Implementations may be backed by gix ([`GixRepo`](crate::GixRepo)) or a
/// test double.
///
/// # Object safety
///
/// This trait is object-safe: callers may hold a `Box<dyn GitRepo>`.
pub trait GitRepo {
    /// Root of the working tree. Tracked logical paths are relative to it.
    fn workdir(&self) -> &Path;

    /// The branch HEAD currently points at, in short form (`feature/a`).
    ///
    /// Returns [`GitError::DetachedHead`] when HEAD is not a symbolic ref to
    /// a local branch.
    ///
    /// Replaces: `git symbolic-ref --short HEAD`.
    fn current_branch(&self) -> Result<BranchName, GitError>;

    /// All local branches in short form. Order is unspecified.
    ///
    /// Replaces: `git for-each-ref --format=%(refname:short) refs/heads/`.
    fn list_branches(&self) -> Result<Vec<BranchName>, GitError>;
}

impl<T: GitRepo + ?Sized> GitRepo for Box<T> {
    fn workdir(&self) -> &Path {
        (**self).workdir()
    }

    fn current_branch(&self) -> Result<BranchName, GitError> {
        (**self).current_branch()
    }

    fn list_branches(&self) -> Result<Vec<BranchName>, GitError> {
        (**self).list_branches()
    }
}
