use anyhow::{Result, bail};
use log::{debug, info};
use std::path::PathBuf;

use crate::database::PackageDatabase;
use crate::package::{Package, PackageId};
use crate::resolver::check_removal_impact;
use crate::runtime::Runtime;

use super::clean::prune_and_report;
use super::config::Config;
use super::list::describe;

/// Show which installed packages would break if the given packages were removed
#[tracing::instrument(skip(runtime, config))]
pub fn impact<R: Runtime>(runtime: R, ids: Vec<String>, config: Config) -> Result<()> {
    let database = config.load_database(&runtime);
    let ids: Vec<PackageId> = ids.into_iter().map(PackageId::new).collect();

    let broken = check_removal_impact(&ids, &database);
    if broken.is_empty() {
        println!("No installed package depends on {}.", join(&ids));
    } else {
        print_broken(&broken);
    }
    Ok(())
}

/// Remove packages from the database, warning about dependents first
#[tracing::instrument(skip(runtime, config))]
pub fn remove<R: Runtime>(
    runtime: R,
    ids: Vec<String>,
    yes: bool,
    clean_dir: Option<PathBuf>,
    config: Config,
) -> Result<()> {
    let mut database = config.load_database_for_update(&runtime)?;
    let ids: Vec<PackageId> = ids.into_iter().map(PackageId::new).collect();

    for id in &ids {
        if database.find(id).is_none() {
            bail!("Package {} is not installed.", id);
        }
    }

    let broken = dependents_outside(&ids, &database);
    if !broken.is_empty() {
        print_broken(&broken);
        if !yes && !runtime.confirm("Remove anyway?")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    for id in &ids {
        if let Some(package) = database.remove(id) {
            println!("Removed {} [{}]", describe(&package), package.category);
        }
    }
    config.save_database(&runtime, &database)?;
    info!("Saved package database to {:?}", config.database_path);

    if let Some(dir) = clean_dir {
        debug!("Pruning empty directories under {:?}", dir);
        prune_and_report(&runtime, &dir)?;
    }
    Ok(())
}

/// Broken packages that are not themselves being removed.
fn dependents_outside<'a>(ids: &[PackageId], database: &'a PackageDatabase) -> Vec<&'a Package> {
    check_removal_impact(ids, database)
        .into_iter()
        .filter(|p| !ids.contains(&p.id))
        .collect()
}

fn print_broken(broken: &[&Package]) {
    println!("The following installed packages depend on it and would break:");
    for package in broken {
        println!("  {} [{}]", describe(package), package.category);
    }
}

fn join(ids: &[PackageId]) -> String {
    ids.iter().map(PackageId::as_str).collect::<Vec<_>>().join(", ")
}
