//! Repository initialization: state directories, default manifest, sample
//! preflight script and the `.gitignore` entry.
//!
//! Every step is idempotent; running `init` again never clobbers a
//! manifest or preflight script the user has edited.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CcocoError, Result};
use crate::layout::Layout;
use crate::manifest::Manifest;

/// Name of the sample script created in the preflight directory.
pub const SAMPLE_PREFLIGHT: &str = "preflight";

const SAMPLE_PREFLIGHT_SCRIPT: &str = "#!/bin/sh\necho \"Running preflight script\"\n";

#[derive(Clone, Copy, Debug, Default)]
pub struct InitOptions {
    /// Add the state directory to the repository's `.gitignore`.
    pub gitignore: bool,
}

/// What `init` changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Paths created by this run (directories and files).
    pub created: Vec<PathBuf>,
    /// Whether `.gitignore` was created or extended.
    pub gitignore_updated: bool,
}

/// Initialize ccoco under `layout`.
///
/// # Errors
/// Returns [`CcocoError::Io`] if a directory or file cannot be created.
pub fn init(layout: &Layout, opts: InitOptions) -> Result<InitReport> {
    let mut report = InitReport::default();

    for dir in layout.required_dirs() {
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| CcocoError::io(&dir, e))?;
            report.created.push(dir);
        }
    }

    let manifest_path = layout.manifest_path();
    if !manifest_path.exists() {
        Manifest::default().save(&manifest_path)?;
        report.created.push(manifest_path);
    }

    let preflight = layout.preflight_dir().join(SAMPLE_PREFLIGHT);
    if !preflight.exists() {
        write_executable(&preflight, SAMPLE_PREFLIGHT_SCRIPT)?;
        report.created.push(preflight);
    }

    if opts.gitignore {
        report.gitignore_updated = ensure_gitignored(&layout.root, &layout.gitignore_entry())?;
    }

    tracing::info!(root = %layout.root.display(), created = report.created.len(), "initialized ccoco");
    Ok(report)
}

/// Make sure `<root>/.gitignore` ignores `entry`, creating or appending.
///
/// Returns `true` if the file was changed.
///
/// # Errors
/// Returns [`CcocoError::Io`] if `.gitignore` cannot be read or written.
pub fn ensure_gitignored(root: &Path, entry: &str) -> Result<bool> {
    let gitignore_path = root.join(".gitignore");

    if gitignore_path.exists() {
        let content =
            fs::read_to_string(&gitignore_path).map_err(|e| CcocoError::io(&gitignore_path, e))?;

        let covered = content.lines().any(|line| {
            let line = line.trim().trim_start_matches('/').trim_end_matches('/');
            line == entry
        });
        if covered {
            tracing::debug!(entry, "already in .gitignore");
            return Ok(false);
        }

        let separator = if content.is_empty() || content.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        let new_content = format!("{content}{separator}\n# ccoco directory\n{entry}\n");
        fs::write(&gitignore_path, new_content).map_err(|e| CcocoError::io(&gitignore_path, e))?;
        tracing::info!(entry, "added to .gitignore");
    } else {
        fs::write(&gitignore_path, format!("# ccoco directory\n{entry}\n"))
            .map_err(|e| CcocoError::io(&gitignore_path, e))?;
        tracing::info!(entry, "created .gitignore");
    }

    Ok(true)
}

/// Write `content` to `path` with mode 0755 on unix.
pub(crate) fn write_executable(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| CcocoError::io(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| CcocoError::io(path, e))?;
    }
    Ok(())
}
