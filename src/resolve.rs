//! Branch resolution: which snapshot applies to a tracked file on a branch.
//!
//! A flat branch (`main`) has exactly one candidate directory, itself. A
//! sub-branch (`feature/x/y`) probes its own directory first and then each
//! shorter ancestor, stopping before the bare first segment:
//!
//! ```text
//! feature/x/y  ->  feature/x/y, feature/x
//! feature/a    ->  feature/a
//! ```
//!
//! The first segment alone is never a candidate.

use std::io;
use std::path::{Path, PathBuf};

use ccoco_git::BranchName;

use crate::encode::PathEncoder;

/// Candidate snapshot directories for `branch`, relative to the snapshot
/// root, in probe order.
#[must_use]
pub fn candidates(branch: &BranchName) -> Vec<String> {
    let segments: Vec<&str> = branch.segments().collect();
    if segments.len() == 1 {
        return vec![branch.to_string()];
    }
    (2..=segments.len())
        .rev()
        .map(|i| segments[..i].join("/"))
        .collect()
}

/// A snapshot chosen for one tracked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The candidate directory that matched (e.g. `release/1.0`).
    pub candidate: String,
    /// Full path of the snapshot file.
    pub path: PathBuf,
}

/// Outcome of resolving one tracked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A regular snapshot file exists under one of the candidates.
    Found(Resolved),
    /// No candidate held a regular file. `tried` lists every probed path.
    NotFound {
        /// Probed snapshot paths, in order.
        tried: Vec<PathBuf>,
    },
}

/// Finds snapshot files under a snapshot root.
pub struct BranchResolver<'a> {
    snapshot_root: &'a Path,
    encoder: &'a dyn PathEncoder,
}

impl<'a> BranchResolver<'a> {
    pub fn new(snapshot_root: &'a Path, encoder: &'a dyn PathEncoder) -> Self {
        Self {
            snapshot_root,
            encoder,
        }
    }

    /// Resolve `tracked` for `branch`, returning the first candidate whose
    /// snapshot is a regular file.
    ///
    /// Directories in place of a snapshot and unreadable metadata are
    /// skipped with a warning.
    #[must_use]
    pub fn resolve(&self, branch: &BranchName, tracked: &str) -> Resolution {
        let file_name = self.encoder.encode(tracked);
        let mut tried = Vec::new();

        for candidate in candidates(branch) {
            let path = self.snapshot_root.join(&candidate).join(&file_name);
            tracing::debug!(candidate = %candidate, path = %path.display(), "probing snapshot");

            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    return Resolution::Found(Resolved { candidate, path });
                }
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "snapshot path is not a regular file, skipping");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to stat snapshot, skipping");
                }
            }
            tried.push(path);
        }

        Resolution::NotFound { tried }
    }
}
