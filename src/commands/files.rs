use anyhow::Result;

pub fn add(files: &[String]) -> Result<()> {
    let mut ctx = super::open()?;
    ctx.layout().ensure_initialized()?;

    let added = ctx.manifest_mut().add(files)?;
    ctx.save_manifest()?;
    for file in &added {
        println!("[OK] Tracking {file}");
    }
    if added.is_empty() {
        println!("Nothing to add; all files are already tracked.");
    }
    Ok(())
}

pub fn remove(files: &[String]) -> Result<()> {
    let mut ctx = super::open()?;
    ctx.layout().ensure_initialized()?;

    let removed = ctx.manifest_mut().remove(files);
    ctx.save_manifest()?;
    for file in &removed {
        println!("[OK] No longer tracking {file}");
    }
    if removed.is_empty() {
        println!("Nothing to remove; none of the files are tracked.");
    }
    Ok(())
}
