use anyhow::Result;
use std::path::Path;

use crate::cleanup::{prune_empty_dirs, render_report};
use crate::runtime::Runtime;

/// Remove empty directories below a content folder
#[tracing::instrument(skip(runtime))]
pub fn clean<R: Runtime>(runtime: R, dir: &Path) -> Result<()> {
    if prune_and_report(&runtime, dir)? == 0 {
        println!("No empty directories under {}.", dir.display());
    }
    Ok(())
}

/// Prune `dir` and print one line per removed directory. Returns how many were removed.
pub(super) fn prune_and_report<R: Runtime>(runtime: &R, dir: &Path) -> Result<usize> {
    match prune_empty_dirs(runtime, dir) {
        Ok(outcomes) => {
            print!("{}", render_report(&outcomes));
            Ok(outcomes.iter().filter(|o| o.is_removed()).count())
        }
        Err(e) => {
            // Show what was removed before the failure
            print!("{}", render_report(&e.completed));
            Err(e.into())
        }
    }
}
