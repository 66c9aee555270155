//! On-disk layout of a ccoco-managed repository.
//!
//! ```text
//! <root>/
//!   ccoco.config.json          manifest
//!   .ccoco/                    state root
//!     configs/<branch>/<enc>   snapshot root, one directory per branch
//!     preflights/              scripts run by the post-checkout hook
//! ```

use std::path::{Component, Path, PathBuf};

use crate::error::{CcocoError, Result};

/// Manifest file name, relative to the repository root.
pub const DEFAULT_MANIFEST_FILE: &str = "ccoco.config.json";
/// State root, relative to the repository root.
pub const DEFAULT_STATE_DIR: &str = ".ccoco";
/// Snapshot root, relative to the repository root.
pub const DEFAULT_CONFIGS_DIR: &str = ".ccoco/configs";
/// Preflight script directory, relative to the repository root.
pub const DEFAULT_PREFLIGHTS_DIR: &str = ".ccoco/preflights";

/// Directory configuration for one repository.
///
/// All paths except `root` are relative to `root`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Working tree root.
    pub root: PathBuf,
    /// ccoco state directory (the one added to `.gitignore`).
    pub state_dir: PathBuf,
    /// Snapshot root.
    pub configs_dir: PathBuf,
    /// Preflight script directory.
    pub preflights_dir: PathBuf,
    /// Manifest file.
    pub manifest_file: PathBuf,
}

impl Layout {
    /// Default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            configs_dir: PathBuf::from(DEFAULT_CONFIGS_DIR),
            preflights_dir: PathBuf::from(DEFAULT_PREFLIGHTS_DIR),
            manifest_file: PathBuf::from(DEFAULT_MANIFEST_FILE),
        }
    }

    #[must_use]
    pub fn state_root(&self) -> PathBuf {
        self.root.join(&self.state_dir)
    }

    #[must_use]
    pub fn snapshot_root(&self) -> PathBuf {
        self.root.join(&self.configs_dir)
    }

    #[must_use]
    pub fn preflight_dir(&self) -> PathBuf {
        self.root.join(&self.preflights_dir)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest_file)
    }

    /// Working-tree location of a tracked logical path.
    ///
    /// # Errors
    /// Returns [`CcocoError::InvalidTrackedPath`] if `logical` is absolute
    /// or climbs out of the root (see [`check_logical`]).
    pub fn working_path(&self, logical: &str) -> Result<PathBuf> {
        check_logical(logical).map_err(|reason| CcocoError::InvalidTrackedPath {
            path: logical.to_owned(),
            reason,
        })?;
        Ok(self.root.join(logical))
    }

    /// Whether all directories and the manifest exist.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        [
            self.state_root(),
            self.snapshot_root(),
            self.preflight_dir(),
        ]
        .iter()
        .all(|p| p.is_dir())
            && self.manifest_path().is_file()
    }

    /// Fail with [`CcocoError::NotInitialized`] unless [`is_initialized`](Self::is_initialized).
    ///
    /// # Errors
    /// Returns `NotInitialized` if any required entry is missing.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(CcocoError::NotInitialized {
                root: self.root.clone(),
            })
        }
    }

    /// Paths of the directories created by `init`, in creation order.
    #[must_use]
    pub fn required_dirs(&self) -> [PathBuf; 3] {
        [
            self.state_root(),
            self.snapshot_root(),
            self.preflight_dir(),
        ]
    }

    /// The state directory as it should appear in `.gitignore`.
    #[must_use]
    pub fn gitignore_entry(&self) -> String {
        path_to_slash(&self.state_dir)
    }
}

/// Check that a tracked logical path stays inside the repository root.
///
/// Empty paths, absolute paths (including Windows drive prefixes) and paths
/// with a `..` segment are rejected with a short reason.
///
/// # Errors
/// Returns the reason the path was rejected.
pub fn check_logical(logical: &str) -> std::result::Result<(), &'static str> {
    if logical.is_empty() {
        return Err("is empty");
    }
    if logical.starts_with('/') {
        return Err("is absolute");
    }
    for component in Path::new(logical).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err("contains a '..' segment"),
            Component::RootDir | Component::Prefix(_) => return Err("is absolute"),
        }
    }
    Ok(())
}

/// Join a relative path's components with `/`.
pub(crate) fn path_to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
