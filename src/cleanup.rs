//! Removal of directories left empty after an uninstall.

use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::runtime::Runtime;

/// Generated by Windows Explorer in folders with pictures. A directory holding
/// nothing but this file counts as empty.
pub const DEBRIS_FILE: &str = "thumbs.db";

/// What happened to one directory during a prune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    Removed(PathBuf),
    /// Removed after deleting a lone [`DEBRIS_FILE`].
    RemovedWithDebris(PathBuf),
    /// Still has content.
    Kept { path: PathBuf, entries: usize },
}

impl PruneOutcome {
    pub fn path(&self) -> &Path {
        match self {
            PruneOutcome::Removed(path)
            | PruneOutcome::RemovedWithDebris(path)
            | PruneOutcome::Kept { path, .. } => path,
        }
    }

    pub fn is_removed(&self) -> bool {
        !matches!(self, PruneOutcome::Kept { .. })
    }
}

/// A filesystem operation failed part way through a prune.
///
/// `completed` holds every outcome recorded before the failure.
#[derive(Error, Debug)]
#[error("Failed to prune {path:?}: {reason}")]
pub struct PruneError {
    pub path: PathBuf,
    pub reason: String,
    pub completed: Vec<PruneOutcome>,
}

/// Recursively remove empty directories below and including `root`.
///
/// Children are handled before their parent, so a tree of empty directories is
/// removed bottom-up. Symlinks are treated as content and never followed.
/// A missing root is not an error and produces no outcomes. A root that is a
/// symlink is reported as kept and left alone.
#[tracing::instrument(skip(runtime))]
pub fn prune_empty_dirs<R: Runtime>(
    runtime: &R,
    root: &Path,
) -> Result<Vec<PruneOutcome>, PruneError> {
    let mut outcomes = Vec::new();
    if !runtime.is_dir(root) {
        debug!("Nothing to prune at {:?}", root);
        return Ok(outcomes);
    }
    if runtime.is_symlink(root) {
        debug!("Not following symlinked root {:?}", root);
        outcomes.push(PruneOutcome::Kept {
            path: root.to_path_buf(),
            entries: 1,
        });
        return Ok(outcomes);
    }

    match visit(runtime, root, &mut outcomes) {
        Ok(()) => Ok(outcomes),
        Err((path, e)) => Err(PruneError {
            path,
            reason: format!("{:#}", e),
            completed: outcomes,
        }),
    }
}

fn visit<R: Runtime>(
    runtime: &R,
    dir: &Path,
    outcomes: &mut Vec<PruneOutcome>,
) -> Result<(), (PathBuf, anyhow::Error)> {
    let fault = |e| (dir.to_path_buf(), e);

    let mut children: Vec<PathBuf> = runtime
        .read_dir(dir)
        .map_err(fault)?
        .into_iter()
        .filter(|p| runtime.is_dir(p) && !runtime.is_symlink(p))
        .collect();
    children.sort();

    for child in &children {
        visit(runtime, child, outcomes)?;
    }

    let remaining = runtime.read_dir(dir).map_err(fault)?;
    match remaining.as_slice() {
        [] => {
            runtime.remove_dir(dir).map_err(fault)?;
            info!("Removed empty directory {:?}", dir);
            outcomes.push(PruneOutcome::Removed(dir.to_path_buf()));
        }
        [only] if is_debris(runtime, only) => {
            debug!("Removing {:?}", only);
            runtime.remove_file(only).map_err(|e| (only.clone(), e))?;
            runtime.remove_dir(dir).map_err(fault)?;
            info!("Removed empty directory {:?}", dir);
            outcomes.push(PruneOutcome::RemovedWithDebris(dir.to_path_buf()));
        }
        entries => outcomes.push(PruneOutcome::Kept {
            path: dir.to_path_buf(),
            entries: entries.len(),
        }),
    }
    Ok(())
}

fn is_debris<R: Runtime>(runtime: &R, path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(DEBRIS_FILE))
        && !runtime.is_dir(path)
}

/// One line per removed directory, in removal order.
pub fn render_report(outcomes: &[PruneOutcome]) -> String {
    outcomes
        .iter()
        .filter(|o| o.is_removed())
        .map(|o| format!("{} deleted successfully.\n", o.path().display()))
        .collect()
}
