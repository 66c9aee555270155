//! gix-backed branch queries.

use crate::error::GitError;
use crate::gix_repo::GixRepo;
use crate::types::BranchName;

const HEADS_PREFIX: &str = "refs/heads/";

pub fn current_branch(repo: &GixRepo) -> Result<BranchName, GitError> {
    let head = repo.repo.head_name().map_err(|e| GitError::BackendError {
        message: e.to_string(),
    })?;
    let Some(full) = head else {
        return Err(GitError::DetachedHead);
    };
    let full = full.as_bstr().to_string();
    // HEAD may point outside refs/heads/ (e.g. a remote-tracking ref).
    let Some(short) = full.strip_prefix(HEADS_PREFIX) else {
        return Err(GitError::DetachedHead);
    };
    Ok(BranchName::new(short)?)
}

pub fn list_branches(repo: &GixRepo) -> Result<Vec<BranchName>, GitError> {
    let platform = repo.repo.references().map_err(|e| GitError::BackendError {
        message: e.to_string(),
    })?;
    let refs_iter = platform
        .local_branches()
        .map_err(|e| GitError::BackendError {
            message: e.to_string(),
        })?;

    let mut result = Vec::new();
    for r in refs_iter {
        let r = r.map_err(|e| GitError::BackendError {
            message: e.to_string(),
        })?;
        let full = r.name().as_bstr().to_string();
        let Some(short) = full.strip_prefix(HEADS_PREFIX) else {
            continue;
        };
        match BranchName::new(short) {
            Ok(name) => result.push(name),
            Err(e) => tracing::warn!(error = %e, "ignoring branch with unusable name"),
        }
    }
    Ok(result)
}
