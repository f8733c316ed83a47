//! Installed-package store.
//!
//! Installed packages are kept in three partitions, one per [`Category`].
//! The store is a plain value owned by the caller; resolution functions take
//! it by reference.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::package::{Category, Package, PackageId};
use crate::runtime::Runtime;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PackageDatabase {
    #[serde(default)]
    pub routes: Vec<Package>,
    #[serde(default)]
    pub trains: Vec<Package>,
    #[serde(default)]
    pub other: Vec<Package>,
}

/// How [`PackageDatabase::load`] obtained its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No database file yet; an empty store was created.
    Missing,
    /// The file could not be read or parsed; an empty store was created.
    Corrupt,
}

impl PackageDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition(&self, category: Category) -> &[Package] {
        match category {
            Category::Route => &self.routes,
            Category::Train => &self.trains,
            Category::Other => &self.other,
        }
    }

    fn partition_mut(&mut self, category: Category) -> &mut Vec<Package> {
        match category {
            Category::Route => &mut self.routes,
            Category::Train => &mut self.trains,
            Category::Other => &mut self.other,
        }
    }

    /// All installed packages: routes, then trains, then other.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.partition(category).iter())
    }

    pub fn len(&self) -> usize {
        self.routes.len() + self.trains.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &PackageId) -> Option<&Package> {
        self.iter().find(|p| &p.id == id)
    }

    /// Record `package` in its category, replacing a record with the same id.
    ///
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        let partition = self.partition_mut(package.category);
        match partition.iter_mut().find(|p| p.id == package.id) {
            Some(existing) => Some(std::mem::replace(existing, package)),
            None => {
                partition.push(package);
                None
            }
        }
    }

    /// Remove the package with `id` from whichever category holds it.
    pub fn remove(&mut self, id: &PackageId) -> Option<Package> {
        for category in Category::ALL {
            let partition = self.partition_mut(category);
            if let Some(index) = partition.iter().position(|p| &p.id == id) {
                return Some(partition.remove(index));
            }
        }
        None
    }

    /// Load the database from `path`.
    ///
    /// A missing or unreadable file is not an error: an empty database is
    /// returned and the [`LoadStatus`] says why.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> (Self, LoadStatus) {
        if !runtime.exists(path) {
            debug!("No package database at {:?}", path);
            return (Self::new(), LoadStatus::Missing);
        }

        let parsed = runtime
            .read_to_string(path)
            .and_then(|content| serde_json::from_str::<Self>(&content).map_err(Into::into));

        match parsed {
            Ok(db) => (db, LoadStatus::Loaded),
            Err(e) => {
                warn!(
                    "Failed to load package database {:?}, starting empty: {}",
                    path, e
                );
                (Self::new(), LoadStatus::Corrupt)
            }
        }
    }

    #[tracing::instrument(skip(self, runtime))]
    pub fn save<R: Runtime>(&self, runtime: &R, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !runtime.exists(parent)
        {
            runtime.create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        runtime
            .write(path, content.as_bytes())
            .with_context(|| format!("Failed to save package database to {:?}", path))
    }
}
