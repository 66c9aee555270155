use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use ccoco_git::{BranchName, GitError, GitRepo, GixRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Fresh repository on `main` with one commit, so branches can be created.
fn setup_repo_with_commit() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "test@test.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    std::fs::write(dir.path().join("README.md"), "# test\n").unwrap();
    git(dir.path(), &["add", "README.md"]);
    git(dir.path(), &["commit", "-q", "-m", "initial commit"]);
    dir
}

fn names(branches: Vec<BranchName>) -> Vec<String> {
    let mut v: Vec<String> = branches.into_iter().map(|b| b.to_string()).collect();
    v.sort();
    v
}

// ===========================================================================
// Opening
// ===========================================================================

#[test]
fn discover_from_subdirectory() {
    let dir = setup_repo_with_commit();
    let nested = dir.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();
    let repo = GixRepo::discover(&nested).unwrap();
    assert_eq!(
        repo.workdir().canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[test]
fn discover_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    match GixRepo::discover(dir.path()) {
        Err(GitError::NotFound { .. }) => {}
        Err(other) => panic!("expected NotFound, got: {other:?}"),
        Ok(_) => {
            // A repository above the temp dir (e.g. CI checkout); nothing to assert.
        }
    }
}

// ===========================================================================
// Branch queries
// ===========================================================================

#[test]
fn current_branch_is_main() {
    let dir = setup_repo_with_commit();
    let repo = GixRepo::open_at(dir.path()).unwrap();
    assert_eq!(repo.current_branch().unwrap().as_str(), "main");
}

#[test]
fn current_branch_follows_checkout_of_sub_branch() {
    let dir = setup_repo_with_commit();
    git(dir.path(), &["checkout", "-q", "-b", "feature/a"]);
    let repo = GixRepo::discover(dir.path()).unwrap();
    let branch = repo.current_branch().unwrap();
    assert_eq!(branch.as_str(), "feature/a");
    assert!(branch.is_hierarchical());
}

#[test]
fn detached_head_is_an_error() {
    let dir = setup_repo_with_commit();
    git(dir.path(), &["checkout", "-q", "--detach"]);
    let repo = GixRepo::discover(dir.path()).unwrap();
    match repo.current_branch() {
        Err(GitError::DetachedHead) => {}
        other => panic!("expected DetachedHead, got: {other:?}"),
    }
}

#[test]
fn list_branches_includes_nested_names() {
    let dir = setup_repo_with_commit();
    git(dir.path(), &["branch", "feature/a"]);
    git(dir.path(), &["branch", "release/1.0/hotfix"]);
    let repo = GixRepo::discover(dir.path()).unwrap();
    assert_eq!(
        names(repo.list_branches().unwrap()),
        ["feature/a", "main", "release/1.0/hotfix"]
    );
}

#[test]
fn list_branches_excludes_tags() {
    let dir = setup_repo_with_commit();
    git(dir.path(), &["tag", "v1"]);
    let repo = GixRepo::discover(dir.path()).unwrap();
    assert_eq!(names(repo.list_branches().unwrap()), ["main"]);
}

#[test]
fn boxed_repo_delegates() {
    let dir = setup_repo_with_commit();
    let repo: Box<dyn GitRepo> = Box::new(GixRepo::discover(dir.path()).unwrap());
    assert_eq!(repo.current_branch().unwrap().as_str(), "main");
}
