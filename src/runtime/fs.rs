//! Filesystem calls for [`RealRuntime`](super::RealRuntime), with the path
//! named in every error.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub(super) fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

#[tracing::instrument(skip(contents), fields(len = contents.len()))]
pub(super) fn write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

#[tracing::instrument]
pub(super) fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
}

#[tracing::instrument]
pub(super) fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))
}

#[tracing::instrument]
pub(super) fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir(path).with_context(|| format!("Failed to remove directory {:?}", path))
}

pub(super) fn read_dir(path: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(path).with_context(|| format!("Failed to list {:?}", path))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .with_context(|| format!("Failed to list {:?}", path))
        })
        .collect()
}
