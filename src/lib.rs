//! ccoco: change config on checkout.
//!
//! Keeps a per-branch snapshot of each tracked working-tree file (typically
//! an untracked `.env`) and copies the snapshot for the checked-out branch
//! over the working file, usually from a `post-checkout` hook.
//!
//! - [`encode`]: flat snapshot file names for nested tracked paths.
//! - [`resolve`]: candidate directories for a branch and sub-branch fallback.
//! - [`snapshot`]: the marker line and snapshot generation.
//! - [`switch`]: applying snapshots to the working tree.
//! - [`context`], [`layout`], [`manifest`]: what an operation runs against.
//! - [`bootstrap`], [`hook`]: `init` and the `post-checkout` hook.

pub mod bootstrap;
pub mod context;
pub mod encode;
pub mod error;
pub mod hook;
pub mod layout;
pub mod manifest;
pub mod resolve;
pub mod snapshot;
pub mod switch;

pub use ccoco_git::{BranchName, GitError, GitRepo};
pub use context::Context;
pub use error::CcocoError;
pub use snapshot::generate;
pub use switch::apply;
