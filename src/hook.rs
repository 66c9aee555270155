//! The `post-checkout` git hook.
//!
//! The hook runs every executable in the preflight directory and then
//! `ccoco run`, so snapshots are applied on each checkout. Setting
//! `SKIP_CCOCO=1` in the environment disables it for one command.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::bootstrap::write_executable;
use crate::error::{CcocoError, Result};
use crate::layout::{path_to_slash, Layout};

pub const HOOK_NAME: &str = "post-checkout";

#[derive(Clone, Copy, Debug, Default)]
pub struct HookOptions {
    /// Install without running the hook once afterwards.
    pub skip_execution: bool,
}

/// Location of the hook script inside the repository.
#[must_use]
pub fn hook_path(layout: &Layout) -> PathBuf {
    layout.root.join(".git").join("hooks").join(HOOK_NAME)
}

/// How the hook refers to the ccoco executable: relative to the repository
/// root when it lives inside it (e.g. `node_modules/.bin`), else absolute.
#[must_use]
pub fn exe_reference(root: &Path, exe: &Path) -> String {
    match exe.strip_prefix(root) {
        Ok(rel) => format!("./{}", path_to_slash(rel)),
        Err(_) => exe.to_string_lossy().replace('\\', "/"),
    }
}

/// Render the hook script.
#[must_use]
pub fn script(layout: &Layout, exe: &str) -> String {
    let preflights = path_to_slash(&layout.preflights_dir);
    format!(
        r#"#!/bin/sh
# Skip ccoco if SKIP_CCOCO is set to 1
if [ "$SKIP_CCOCO" = "1" ]; then
	echo "SKIP_CCOCO is set to 1, skipping ccoco."
	exit 0
fi

# Run all preflight scripts
for file in ./{preflights}/*; do
	[ -e "$file" ] || continue
	if [ -x "$file" ]; then
		echo "Running $file"
		"$file"
	else
		echo "Cannot execute $file. Skipping."
	fi
done

# Run ccoco
{exe} run
"#,
        exe = shell_quote(exe),
    )
}

fn shell_quote(s: &str) -> String {
    if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "/._-+".contains(c))
    {
        s.to_owned()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Write the hook for `exe` and, unless skipped, run it once.
///
/// Returns the hook path.
///
/// # Errors
/// Returns [`CcocoError::Io`] if the hook cannot be written or spawned and
/// [`CcocoError::HookFailed`] if it exits unsuccessfully.
pub fn install(layout: &Layout, exe: &Path, opts: HookOptions) -> Result<PathBuf> {
    let path = hook_path(layout);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| CcocoError::io(dir, e))?;
    }
    let exe = exe_reference(&layout.root, exe);
    write_executable(&path, &script(layout, &exe))?;
    tracing::info!(path = %path.display(), "post-checkout hook injected");

    if opts.skip_execution {
        tracing::info!("skipped post-checkout hook execution");
        return Ok(path);
    }

    let status = Command::new("sh")
        .arg(&path)
        .current_dir(&layout.root)
        .status()
        .map_err(|e| CcocoError::io(&path, e))?;
    if !status.success() {
        return Err(CcocoError::HookFailed {
            path,
            status: status.to_string(),
        });
    }
    Ok(path)
}
