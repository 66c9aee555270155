//! The gix-backed implementation of [`GitRepo`].

use std::path::{Path, PathBuf};

use crate::error::GitError;
use crate::repo::GitRepo;
use crate::types::BranchName;

/// A [`GitRepo`] implementation backed by [gix](https://github.com/GitoxideLabs/gitoxide).
///
/// Construct via [`GixRepo::discover`] or [`GixRepo::open_at`].
pub struct GixRepo {
    pub(crate) repo: gix::Repository,
    pub(crate) workdir: PathBuf,
}

impl GixRepo {
    /// Open the git repository at or above `path`.
    ///
    /// # Errors
    /// Returns [`GitError::NotFound`] if no repository contains `path`, and
    /// [`GitError::NoWorkdir`] for bare repositories.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = gix::discover(path).map_err(|e| {
            tracing::debug!(error = %e, "repository discovery failed");
            GitError::NotFound {
                path: path.to_path_buf(),
            }
        })?;
        Self::from_repo(repo)
    }

    /// Open a git repository at exactly `path` (no parent discovery).
    ///
    /// # Errors
    /// Returns [`GitError::BackendError`] if `path` is not a repository.
    pub fn open_at(path: &Path) -> Result<Self, GitError> {
        let repo = gix::open_opts(path, gix::open::Options::isolated())
            .map_err(|e| GitError::BackendError { message: e.to_string() })?;
        Self::from_repo(repo)
    }

    fn from_repo(repo: gix::Repository) -> Result<Self, GitError> {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitError::NoWorkdir {
                path: repo.git_dir().to_path_buf(),
            })?;
        Ok(Self { repo, workdir })
    }
}

impl GitRepo for GixRepo {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn current_branch(&self) -> Result<BranchName, GitError> {
        crate::refs_impl::current_branch(self)
    }

    fn list_branches(&self) -> Result<Vec<BranchName>, GitError> {
        crate::refs_impl::list_branches(self)
    }
}
