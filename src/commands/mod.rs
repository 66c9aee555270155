//! Command implementations. Each opens the repository containing the
//! current directory and calls into the `ccoco` library.

use anyhow::{Context as _, Result};

pub mod files;
pub mod generate;
pub mod githook;
pub mod init;
pub mod run;

fn open() -> Result<ccoco::Context> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(ccoco::Context::discover(&cwd)?)
}
