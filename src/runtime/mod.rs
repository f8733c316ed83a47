//! System access for the package tools.
//!
//! Everything that touches the filesystem, the user's configuration directory
//! or the terminal goes through [`Runtime`], so the store, file collection and
//! pruning can be exercised against `MockRuntime` in unit tests.

mod fs;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory, which must be empty.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    /// Full paths of the entries of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn exists(&self, path: &Path) -> bool;

    /// Follows symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Looks at the link itself, never its target.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Per-user configuration directory, if the platform has one.
    fn config_dir(&self) -> Option<PathBuf>;

    /// Ask a yes/no question on the terminal. Anything but yes is no.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// [`Runtime`] backed by the host system.
pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        user::confirm(prompt)
    }
}
