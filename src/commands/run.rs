use anyhow::Result;

use ccoco::BranchName;
use ccoco::switch::FileOutcome;

pub fn run(branch: Option<&str>) -> Result<()> {
    let ctx = super::open()?;
    let branch = branch.map(BranchName::new).transpose()?;
    let report = ccoco::apply(&ctx, branch.as_ref())?;

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Applied { candidate, .. } if candidate != report.branch.as_str() => {
                println!("[OK] {} (from {candidate})", file.file);
            }
            FileOutcome::Applied { .. } => println!("[OK] {}", file.file),
            FileOutcome::NotFound { .. } => println!("[SKIP] {}: no snapshot", file.file),
            FileOutcome::Malformed { .. } => println!("[SKIP] {}: malformed snapshot", file.file),
            FileOutcome::Unreadable { error, .. } | FileOutcome::NotCleared { error, .. } => {
                println!("[SKIP] {}: {error}", file.file);
            }
        }
    }
    println!(
        "Applied {} of {} file(s) for branch {}.",
        report.applied(),
        report.files.len(),
        report.branch
    );
    Ok(())
}
