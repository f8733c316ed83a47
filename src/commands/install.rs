//! Checking a package manifest against the store and recording it as installed.

use anyhow::{Result, bail};
use log::info;
use std::path::Path;

use crate::package::{Dependency, Package};
use crate::resolver::check_requirements;
use crate::runtime::Runtime;

use super::config::Config;

/// Report the unmet dependencies of a package manifest
#[tracing::instrument(skip(runtime, config))]
pub fn check<R: Runtime>(runtime: R, manifest: &Path, config: Config) -> Result<()> {
    let package = Package::load_manifest(&runtime, manifest)?;
    let database = config.load_database(&runtime);

    let unmet = check_requirements(&package.dependencies, &database);
    if unmet.is_empty() {
        println!(
            "All dependencies of {} are installed.",
            package.display_name()
        );
        return Ok(());
    }

    print_unmet(&package, &unmet);
    bail!("{} has {} unmet dependencies", package.display_name(), unmet.len())
}

/// Record a package as installed, refusing if dependencies are missing unless forced
#[tracing::instrument(skip(runtime, config))]
pub fn add<R: Runtime>(runtime: R, manifest: &Path, force: bool, config: Config) -> Result<()> {
    let package = Package::load_manifest(&runtime, manifest)?;
    let mut database = config.load_database_for_update(&runtime)?;

    let unmet = check_requirements(&package.dependencies, &database);
    if !unmet.is_empty() {
        print_unmet(&package, &unmet);
        if !force {
            bail!(
                "Refusing to add {}: {} unmet dependencies (use --force to add anyway)",
                package.display_name(),
                unmet.len()
            );
        }
    }

    let summary = format!(
        "{} {} [{}]",
        package.display_name(),
        package.version,
        package.category
    );
    match database.insert(package) {
        Some(previous) => println!("Updated {} (was {})", summary, previous.version),
        None => println!("Added {}", summary),
    }
    config.save_database(&runtime, &database)?;
    info!("Saved package database to {:?}", config.database_path);
    Ok(())
}

fn print_unmet(package: &Package, unmet: &[Dependency]) {
    println!("{} requires packages that are not installed:", package.display_name());
    for dependency in unmet {
        println!("  - {}", dependency);
    }
}
