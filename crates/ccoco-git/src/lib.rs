//! Git abstraction layer for ccoco.
//!
//! This crate defines the [`GitRepo`] trait: the only interface through which
//! ccoco asks questions of version control. The snapshot and switch logic in
//! the `ccoco` crate program against the trait and never import gix directly,
//! which lets them run against an in-memory double in tests.
//!
//! # Crate layout
//!
//! - [`repo`]: the [`GitRepo`] trait definition.
//! - [`types`]: [`BranchName`], the validated branch name value type.
//! - [`error`]: the [`GitError`] enum returned by all trait methods.

pub mod error;
pub mod repo;
pub mod types;

// gix-backed implementation modules
mod gix_repo;
mod refs_impl;

pub use gix_repo::GixRepo;

pub use error::GitError;
pub use repo::GitRepo;
pub use types::{BranchName, BranchNameError};
