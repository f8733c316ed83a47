//! File records for the contents of an extracted archive.

use anyhow::Result;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::runtime::Runtime;

/// One file from an archive.
///
/// `relative_path` starts with a separator (`/Route/line.csv`) and is rewritten
/// in place by the classifier; `absolute_path` is where the file currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub relative_path: String,
    pub absolute_path: String,
}

impl PackageFile {
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }
}

/// Collect every regular file below `root` as a [`PackageFile`].
///
/// Directories are walked depth-first with entries sorted by name so the
/// resulting order is stable across platforms. Symlinked directories are
/// listed as files rather than followed. A root that is not a directory yields
/// no files.
#[tracing::instrument(skip(runtime))]
pub fn collect_files<R: Runtime>(runtime: &R, root: &Path) -> Result<Vec<PackageFile>> {
    let mut files = Vec::new();
    if !runtime.is_dir(root) {
        return Ok(files);
    }
    collect_into(runtime, root, root, &mut files)?;
    log::debug!("Collected {} file(s) from {:?}", files.len(), root);
    Ok(files)
}

fn collect_into<R: Runtime>(
    runtime: &R,
    root: &Path,
    dir: &Path,
    files: &mut Vec<PackageFile>,
) -> Result<()> {
    let mut entries = runtime.read_dir(dir)?;
    entries.sort();

    for entry in entries {
        if runtime.is_dir(&entry) && !runtime.is_symlink(&entry) {
            collect_into(runtime, root, &entry, files)?;
        } else {
            files.push(PackageFile::new(
                relative_to(root, &entry),
                entry.to_string_lossy(),
            ));
        }
    }
    Ok(())
}

fn relative_to(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).map(PathBuf::from).unwrap_or_default();
    let mut out = String::new();
    for component in relative.components() {
        out.push(MAIN_SEPARATOR);
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
