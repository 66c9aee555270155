use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod telemetry;

/// Change config on checkout
///
/// ccoco changes your config files based on your current branch. It keeps
/// one snapshot of every tracked file (e.g. `.env`) per branch under
/// `.ccoco/configs/` and copies the one for the checked-out branch over the
/// working file. Integrate with git hooks to switch automatically.
///
/// QUICK START:
///
///   ccoco init --gitignore --githook   # set up and install post-checkout hook
///   ccoco add config/db.json           # track more files (default: .env)
///   ccoco generate                     # snapshot every branch
///   # edit .ccoco/configs/<branch>/... below the marker line
///   git checkout <branch>              # hook runs `ccoco run`
///
/// SUB-BRANCHES:
///
///   On `release/1.0/hotfix`, snapshots are looked up in
///   `release/1.0/hotfix` and then `release/1.0` (never `release` alone).
#[derive(Parser)]
#[command(name = "ccoco")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'ccoco <command> --help' for more information on a specific command.")]
struct Cli {
    /// Log debug diagnostics (overridden by CCOCO_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config file and directories
    ///
    /// Creates .ccoco/configs, .ccoco/preflights, a sample preflight script
    /// and ccoco.config.json. Safe to run multiple times.
    #[command(visible_alias = "i")]
    Init(commands::init::InitArgs),

    /// Add file(s) to the manifest
    #[command(visible_alias = "a")]
    Add {
        /// Paths relative to the repository root
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Remove file(s) from the manifest
    #[command(visible_alias = "rm")]
    Remove {
        /// Paths relative to the repository root
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Generate per-branch config files
    ///
    /// Creates a snapshot of every tracked file for every local branch.
    /// Existing snapshots are never overwritten; the current branch's
    /// snapshots are seeded from the working tree.
    #[command(visible_alias = "gen")]
    Generate,

    /// Change config files to match the current branch
    #[command(visible_aliases = ["r", "start"])]
    Run {
        /// Apply this branch's snapshots instead of the checked-out branch's
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Inject ccoco into .git/hooks/post-checkout
    #[command(visible_alias = "gh")]
    Githook {
        /// Do not run the hook after installing it
        #[arg(short, long)]
        skip: bool,
    },

    /// Print the version of ccoco
    #[command(visible_alias = "v")]
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match cli.command {
        Commands::Init(args) => commands::init::run(&args),
        Commands::Add { files } => commands::files::add(&files),
        Commands::Remove { files } => commands::files::remove(&files),
        Commands::Generate => commands::generate::run(),
        Commands::Run { branch } => commands::run::run(branch.as_deref()),
        Commands::Githook { skip } => commands::githook::run(skip),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
