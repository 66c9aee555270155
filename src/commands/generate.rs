use anyhow::Result;

pub fn run() -> Result<()> {
    let ctx = super::open()?;
    let report = ccoco::generate(&ctx)?;
    println!(
        "Generated {} snapshot(s) across {} branch(es); kept {} existing.",
        report.created.len(),
        report.branches,
        report.kept
    );
    Ok(())
}
