//! Applying snapshots to the working tree.
//!
//! For each tracked file the [`BranchResolver`] picks a snapshot, its marker
//! line is checked and stripped, and the payload replaces whatever is at the
//! file's working-tree path. Problems with one file are logged and recorded
//! in the [`ApplyReport`]; they do not stop the others. The overwrite is
//! unconditional: the snapshot tree is the backup.

use std::io;
use std::path::{Path, PathBuf};

use ccoco_git::BranchName;
use tracing::instrument;

use crate::context::Context;
use crate::encode::PathEncoder;
use crate::error::{CcocoError, Result};
use crate::layout::Layout;
use crate::resolve::{candidates, BranchResolver, Resolution};
use crate::snapshot;

/// What happened to one tracked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// The snapshot from `candidate` was written to the working tree.
    Applied {
        /// Candidate directory the snapshot came from.
        candidate: String,
        /// The snapshot file.
        snapshot: PathBuf,
    },
    /// No candidate directory held a snapshot.
    NotFound {
        /// Probed snapshot paths, in order.
        tried: Vec<PathBuf>,
    },
    /// The snapshot's marker line did not match.
    Malformed {
        /// The snapshot file.
        snapshot: PathBuf,
    },
    /// The snapshot exists but could not be read.
    Unreadable {
        /// The snapshot file.
        snapshot: PathBuf,
        /// The read error.
        error: String,
    },
    /// The existing working-tree entry could not be removed.
    NotCleared {
        /// The working-tree path.
        path: PathBuf,
        /// The removal error.
        error: String,
    },
}

/// Per-file result of an apply run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// Tracked logical path.
    pub file: String,
    pub outcome: FileOutcome,
}

/// Result of applying one branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyReport {
    /// The branch that was applied.
    pub branch: BranchName,
    /// One entry per tracked file, in manifest order.
    pub files: Vec<FileReport>,
}

impl ApplyReport {
    /// Number of files written to the working tree.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Applied { .. }))
            .count()
    }

    /// Whether every tracked file was applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.applied() == self.files.len()
    }
}

/// Writes resolved snapshots over working-tree files.
pub struct ConfigSwitcher<'a> {
    layout: &'a Layout,
    encoder: &'a dyn PathEncoder,
}

impl<'a> ConfigSwitcher<'a> {
    pub fn new(layout: &'a Layout, encoder: &'a dyn PathEncoder) -> Self {
        Self { layout, encoder }
    }

    /// Apply `branch`'s snapshots for every file in `tracked`.
    ///
    /// # Errors
    /// - Flat branch: [`CcocoError::BranchNotFound`] / [`CcocoError::NotADirectory`]
    ///   if its snapshot directory is missing or not a directory.
    /// - Sub-branch: [`CcocoError::NoSnapshotsFound`] if no file was applied.
    /// - Either: [`CcocoError::InvalidTrackedPath`] before anything is
    ///   touched if a tracked path is absolute or climbs out of the root, and
    ///   [`CcocoError::Io`] if writing a working-tree file fails.
    pub fn apply(&self, branch: &BranchName, tracked: &[String]) -> Result<ApplyReport> {
        for file in tracked {
            self.layout.working_path(file)?;
        }
        let snapshot_root = self.layout.snapshot_root();
        if !branch.is_hierarchical() {
            self.check_branch_dir(branch, &snapshot_root)?;
        }

        let resolver = BranchResolver::new(&snapshot_root, self.encoder);
        let mut report = ApplyReport {
            branch: branch.clone(),
            files: Vec::with_capacity(tracked.len()),
        };

        for file in tracked {
            let outcome = match resolver.resolve(branch, file) {
                Resolution::NotFound { tried } => {
                    tracing::warn!(branch = %branch, file = %file, "no snapshot found, skipping");
                    FileOutcome::NotFound { tried }
                }
                Resolution::Found(found) => {
                    if found.candidate != branch.as_str() {
                        tracing::info!(
                            branch = %branch,
                            file = %file,
                            ancestor = %found.candidate,
                            "using ancestor branch snapshot"
                        );
                    }
                    self.apply_one(file, found.candidate, found.path)?
                }
            };
            report.files.push(FileReport {
                file: file.clone(),
                outcome,
            });
        }

        if branch.is_hierarchical() && report.applied() == 0 {
            return Err(CcocoError::NoSnapshotsFound {
                branch: branch.clone(),
                candidates: candidates(branch),
            });
        }
        Ok(report)
    }

    fn check_branch_dir(&self, branch: &BranchName, snapshot_root: &Path) -> Result<()> {
        let dir = snapshot_root.join(branch.as_str());
        match std::fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(CcocoError::NotADirectory {
                branch: branch.clone(),
                path: dir,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CcocoError::BranchNotFound {
                branch: branch.clone(),
                path: dir,
            }),
            Err(e) => Err(CcocoError::io(&dir, e)),
        }
    }

    fn apply_one(&self, file: &str, candidate: String, snapshot: PathBuf) -> Result<FileOutcome> {
        let data = match std::fs::read(&snapshot) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(file = %file, path = %snapshot.display(), error = %e, "failed to read snapshot, skipping");
                return Ok(FileOutcome::Unreadable {
                    snapshot,
                    error: e.to_string(),
                });
            }
        };

        let Ok(payload) = snapshot::parse(file, &data) else {
            tracing::warn!(file = %file, path = %snapshot.display(), "malformed snapshot, skipping");
            return Ok(FileOutcome::Malformed { snapshot });
        };

        let target = self.layout.working_path(file)?;
        if let Err(e) = remove_entry(&target) {
            tracing::warn!(path = %target.display(), error = %e, "failed to clear working-tree path, skipping");
            return Ok(FileOutcome::NotCleared {
                path: target,
                error: e.to_string(),
            });
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CcocoError::io(parent, e))?;
        }
        std::fs::write(&target, payload).map_err(|e| CcocoError::io(&target, e))?;
        tracing::info!(file = %file, from = %candidate, "applied snapshot");

        Ok(FileOutcome::Applied {
            candidate,
            snapshot,
        })
    }
}

/// Remove a file, symlink or directory tree. Missing entries are fine,
/// including ones whose parent is not a directory.
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Apply snapshots for `branch`, or for the current branch when `None`.
///
/// # Errors
/// Fails if the repository is not initialized, the current branch cannot be
/// determined, or [`ConfigSwitcher::apply`] fails.
#[instrument(skip_all, fields(branch = tracing::field::Empty))]
pub fn apply(ctx: &Context, branch: Option<&BranchName>) -> Result<ApplyReport> {
    ctx.layout().ensure_initialized()?;
    let branch = match branch {
        Some(b) => b.clone(),
        None => ctx.repo().current_branch()?,
    };
    tracing::Span::current().record("branch", tracing::field::display(&branch));
    if branch.is_hierarchical() {
        tracing::info!(branch = %branch, "current branch is a sub-branch");
    }

    ConfigSwitcher::new(ctx.layout(), ctx.encoder()).apply(&branch, ctx.manifest().files())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
