use anyhow::{Result, bail};
use std::path::Path;

use crate::classify::{Classification, classify as classify_files};
use crate::package::collect_files;
use crate::runtime::Runtime;

/// Work out where the files of an extracted archive belong
#[tracing::instrument(skip(runtime))]
pub fn classify<R: Runtime>(runtime: R, dir: &Path) -> Result<()> {
    if !runtime.is_dir(dir) {
        bail!("{} is not a directory", dir.display());
    }

    let mut files = collect_files(&runtime, dir)?;
    if files.is_empty() {
        println!("No files found in {}.", dir.display());
        return Ok(());
    }

    let classification = classify_files(&mut files);
    println!("Layout: {}", classification);
    if classification == Classification::Inconclusive {
        println!("Could not determine an install root; paths are shown as found.");
    }
    for file in &files {
        println!("  {}", file.relative_path);
    }
    Ok(())
}
