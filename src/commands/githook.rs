use anyhow::{Context as _, Result};

use ccoco::hook::{self, HookOptions};

pub fn run(skip: bool) -> Result<()> {
    let ctx = super::open()?;
    let exe = std::env::current_exe().context("failed to locate the ccoco executable")?;
    let path = hook::install(
        ctx.layout(),
        &exe,
        HookOptions {
            skip_execution: skip,
        },
    )?;
    println!("[OK] Installed {}", path.display());
    Ok(())
}
