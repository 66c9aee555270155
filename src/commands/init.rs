use anyhow::{Context as _, Result};
use clap::Args;

use ccoco::bootstrap::{self, InitOptions};
use ccoco::hook::{self, HookOptions};

#[derive(Args)]
pub struct InitArgs {
    /// Add .ccoco to .gitignore
    #[arg(short = 'i', long)]
    gitignore: bool,

    /// Inject ccoco into .git/hooks/post-checkout
    #[arg(short = 'g', long)]
    githook: bool,

    /// Skip hook execution when used with --githook
    #[arg(short, long, requires = "githook")]
    skip: bool,
}

pub fn run(args: &InitArgs) -> Result<()> {
    let ctx = super::open()?;
    let layout = ctx.layout();

    let report = bootstrap::init(
        layout,
        InitOptions {
            gitignore: args.gitignore,
        },
    )?;
    for path in &report.created {
        println!("[OK] Created {}", path.display());
    }
    if args.gitignore {
        if report.gitignore_updated {
            println!("[OK] Added {} to .gitignore", layout.gitignore_entry());
        } else {
            println!("[OK] {} is in .gitignore", layout.gitignore_entry());
        }
    }

    if args.githook {
        let exe = std::env::current_exe().context("failed to locate the ccoco executable")?;
        let path = hook::install(
            layout,
            &exe,
            HookOptions {
                skip_execution: args.skip,
            },
        )?;
        println!("[OK] Installed {}", path.display());
    }

    println!(
        "Initialized ccoco-related files and directories at {}",
        layout.root.display()
    );
    Ok(())
}
