use anyhow::{Context, Result, bail};
use log::debug;
use std::path::PathBuf;

use crate::database::{LoadStatus, PackageDatabase};
use crate::runtime::Runtime;

const DATABASE_FILE: &str = "packages.json";

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    /// Use `database_path` if given, otherwise `<config_dir>/railpkg/packages.json`.
    pub fn new<R: Runtime>(runtime: &R, database_path: Option<PathBuf>) -> Result<Self> {
        let database_path = match database_path {
            Some(path) => path,
            None => default_database_path(runtime)?,
        };
        debug!("Using package database {:?}", database_path);
        Ok(Self { database_path })
    }

    pub fn load_database<R: Runtime>(&self, runtime: &R) -> PackageDatabase {
        let (database, status) = PackageDatabase::load(runtime, &self.database_path);
        if status == LoadStatus::Corrupt {
            eprintln!(
                "warning: package database {} could not be read; treating it as empty",
                self.database_path.display()
            );
        }
        database
    }

    /// Load the database for a command that will save it afterwards.
    ///
    /// Fails on a corrupt file instead of starting empty, so saving cannot
    /// replace the records that are still in it.
    pub fn load_database_for_update<R: Runtime>(&self, runtime: &R) -> Result<PackageDatabase> {
        let (database, status) = PackageDatabase::load(runtime, &self.database_path);
        if status == LoadStatus::Corrupt {
            bail!(
                "Package database {} could not be read; fix or remove it before changing it",
                self.database_path.display()
            );
        }
        Ok(database)
    }

    pub fn save_database<R: Runtime>(&self, runtime: &R, database: &PackageDatabase) -> Result<()> {
        database.save(runtime, &self.database_path)
    }
}

pub fn default_database_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let config_dir = runtime
        .config_dir()
        .context("Could not find configuration directory")?;
    Ok(config_dir.join("railpkg").join(DATABASE_FILE))
}
