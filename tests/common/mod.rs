//! Shared test helpers for ccoco integration tests.
//!
//! All tests use temp directories: no side effects on the real repo.
//! Each test gets its own git repo via `setup_repo()`.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run git in `dir` and assert it succeeds.
pub fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        out.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Create a git repo on `main` with one commit and the given extra branches.
pub fn setup_repo(branches: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "test@test.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    std::fs::write(dir.path().join("README.md"), "# test repo\n").unwrap();
    git(dir.path(), &["add", "README.md"]);
    git(dir.path(), &["commit", "-q", "-m", "initial commit"]);
    for b in branches {
        git(dir.path(), &["branch", b]);
    }
    dir
}

/// Switch branches without running hooks.
pub fn checkout(dir: &Path, branch: &str) {
    let out = Command::new("git")
        .args(["checkout", "-q", branch])
        .env("SKIP_CCOCO", "1")
        .current_dir(dir)
        .output()
        .expect("failed to run git checkout");
    assert!(
        out.status.success(),
        "git checkout {branch} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Run the ccoco binary in `dir`.
pub fn ccoco_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ccoco"))
        .args(args)
        .current_dir(dir)
        .env_remove("CCOCO_LOG")
        .env_remove("CCOCO_LOG_FORMAT")
        .output()
        .expect("failed to execute ccoco")
}

/// Run ccoco and assert it succeeds. Returns stdout as string.
pub fn ccoco_ok(dir: &Path, args: &[&str]) -> String {
    let out = ccoco_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "ccoco {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run ccoco and assert it fails. Returns stderr as string.
pub fn ccoco_err(dir: &Path, args: &[&str]) -> String {
    let out = ccoco_in(dir, args);
    assert!(
        !out.status.success(),
        "ccoco {} unexpectedly succeeded:\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout)
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

pub fn read(dir: &Path, rel: &str) -> String {
    std::fs::read_to_string(dir.join(rel))
        .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
}

pub fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
