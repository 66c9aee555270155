//! Snapshot files and their generation.
//!
//! A snapshot is one tracked file's content for one branch, stored at
//! `<snapshot root>/<branch>/<encoded name>`. The first line is a marker
//! naming the logical path it belongs to:
//!
//! ```text
//! CCOCO GENERATED FILE - config/db.json - DO NOT REMOVE OR EDIT THIS LINE
//! <payload bytes>
//! ```
//!
//! Generation never overwrites an existing snapshot: once created, a
//! snapshot's body is curated by hand.

use std::io;
use std::path::{Path, PathBuf};

use ccoco_git::BranchName;
use tracing::instrument;

use crate::context::Context;
use crate::encode::PathEncoder;
use crate::error::{CcocoError, Result};
use crate::layout::Layout;

const HEADER_PREFIX: &str = "CCOCO GENERATED FILE - ";
const HEADER_SUFFIX: &str = " - DO NOT REMOVE OR EDIT THIS LINE";

// ---------------------------------------------------------------------------
// Header marker
// ---------------------------------------------------------------------------

/// The marker line (without newline) for `logical`.
#[must_use]
pub fn header(logical: &str) -> String {
    format!("{HEADER_PREFIX}{logical}{HEADER_SUFFIX}")
}

/// Full snapshot content: marker, newline, payload.
#[must_use]
pub fn render(logical: &str, payload: &[u8]) -> Vec<u8> {
    let header = header(logical);
    let mut out = Vec::with_capacity(header.len() + 1 + payload.len());
    out.extend_from_slice(header.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(payload);
    out
}

/// The first line of a snapshot did not match the marker for its path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedSnapshot {
    /// Logical path the snapshot was expected to belong to.
    pub logical: String,
}

impl std::fmt::Display for MalformedSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed snapshot for {}: missing or altered marker line", self.logical)
    }
}

impl std::error::Error for MalformedSnapshot {}

/// Validate the marker line and return the payload after it.
///
/// The first line must equal [`header`]`(logical)`; a `\r\n` terminator is
/// accepted. Content with a valid marker and no newline has an empty
/// payload.
///
/// # Errors
/// Returns [`MalformedSnapshot`] if the first line differs.
pub fn parse<'a>(logical: &str, data: &'a [u8]) -> std::result::Result<&'a [u8], MalformedSnapshot> {
    let (line, payload) = match data.iter().position(|&b| b == b'\n') {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &data[data.len()..]),
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line == header(logical).as_bytes() {
        Ok(payload)
    } else {
        Err(MalformedSnapshot {
            logical: logical.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Counts from one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Branches that were processed.
    pub branches: usize,
    /// Snapshots written by this run.
    pub created: Vec<PathBuf>,
    /// Snapshots that already existed and were left untouched.
    pub kept: usize,
}

/// Writes per-branch snapshots under a [`Layout`]'s snapshot root.
pub struct SnapshotStore<'a> {
    layout: &'a Layout,
    encoder: &'a dyn PathEncoder,
}

impl<'a> SnapshotStore<'a> {
    pub fn new(layout: &'a Layout, encoder: &'a dyn PathEncoder) -> Self {
        Self { layout, encoder }
    }

    /// Snapshot directory for a branch (slashes become nested directories).
    #[must_use]
    pub fn branch_dir(&self, branch: &BranchName) -> PathBuf {
        self.layout.snapshot_root().join(branch.as_str())
    }

    /// Snapshot file for `tracked` on `branch`.
    #[must_use]
    pub fn snapshot_path(&self, branch: &BranchName, tracked: &str) -> PathBuf {
        self.branch_dir(branch).join(self.encoder.encode(tracked))
    }

    /// Ensure every branch has a directory and a snapshot of every tracked
    /// file.
    ///
    /// Missing snapshots are created with the marker line and, for
    /// `current`, the working-tree content of the file (empty if the file
    /// does not exist). Existing snapshots are left byte-for-byte intact, so
    /// the outcome does not depend on processing order.
    ///
    /// # Errors
    /// A tracked path outside the repository root, or any directory
    /// creation, working-file read (other than not-found) or snapshot write
    /// failure aborts the run.
    pub fn generate(
        &self,
        branches: &[BranchName],
        tracked: &[String],
        current: &BranchName,
    ) -> Result<GenerateReport> {
        for file in tracked {
            self.layout.working_path(file)?;
        }
        let mut report = GenerateReport::default();

        for branch in branches {
            let dir = self.branch_dir(branch);
            std::fs::create_dir_all(&dir).map_err(|e| CcocoError::io(&dir, e))?;
            report.branches += 1;

            for file in tracked {
                let path = self.snapshot_path(branch, file);
                if exists(&path)? {
                    tracing::debug!(branch = %branch, file = %file, "snapshot exists, keeping");
                    report.kept += 1;
                    continue;
                }

                let payload = if branch == current {
                    self.read_working(file)?
                } else {
                    Vec::new()
                };
                std::fs::write(&path, render(file, &payload))
                    .map_err(|e| CcocoError::io(&path, e))?;
                tracing::info!(branch = %branch, file = %file, path = %path.display(), "created snapshot");
                report.created.push(path);
            }
        }

        Ok(report)
    }

    fn read_working(&self, logical: &str) -> Result<Vec<u8>> {
        let path = self.layout.working_path(logical)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(CcocoError::io(&path, e)),
        }
    }
}

fn exists(path: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CcocoError::io(path, e)),
    }
}

/// Generate snapshots for every local branch of the repository in `ctx`.
///
/// # Errors
/// Fails if the repository is not initialized, if the branch queries fail,
/// or on any I/O error while writing snapshots.
#[instrument(skip_all, fields(branch = tracing::field::Empty))]
pub fn generate(ctx: &Context) -> Result<GenerateReport> {
    ctx.layout().ensure_initialized()?;
    let current = ctx.repo().current_branch()?;
    tracing::Span::current().record("branch", tracing::field::display(&current));
    let branches = ctx.repo().list_branches()?;
    tracing::info!(current = %current, branches = branches.len(), "generating snapshots");

    SnapshotStore::new(ctx.layout(), ctx.encoder()).generate(
        &branches,
        ctx.manifest().files(),
        &current,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
