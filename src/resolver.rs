//! Dependency resolution against the installed-package store.
//!
//! Both checks are single linear passes over the store. There is no
//! backtracking and no attempt to choose between several installed versions:
//! a requirement is met as soon as one record in its category matches.

use log::debug;
use std::collections::HashSet;

use crate::database::PackageDatabase;
use crate::package::{Dependency, Package, PackageId};

/// Whether any package in `installed` satisfies `requirement`.
pub fn is_met(requirement: &Dependency, installed: &[Package]) -> bool {
    installed.iter().any(|package| requirement.is_met_by(package))
}

/// Return the requirements not satisfied by `database`, in their original order.
///
/// Each requirement is looked up only in the partition of its own category.
/// An empty result means everything is satisfied.
pub fn check_requirements(requirements: &[Dependency], database: &PackageDatabase) -> Vec<Dependency> {
    let unmet: Vec<Dependency> = requirements
        .iter()
        .filter(|requirement| !is_met(requirement, database.partition(requirement.category)))
        .cloned()
        .collect();

    debug!(
        "{} of {} requirement(s) unmet",
        unmet.len(),
        requirements.len()
    );
    unmet
}

/// Return the installed packages that depend on any identity in `removing`.
///
/// Every category is scanned. Each broken package is reported once, in store
/// order, however many of its dependencies point at removed identities.
pub fn check_removal_impact<'a>(
    removing: &[PackageId],
    database: &'a PackageDatabase,
) -> Vec<&'a Package> {
    let removing: HashSet<&PackageId> = removing.iter().collect();
    let mut seen = HashSet::new();

    database
        .iter()
        .filter(|package| {
            package
                .dependencies
                .iter()
                .any(|dependency| removing.contains(&dependency.id))
        })
        .filter(|package| seen.insert(package.id.clone()))
        .collect()
}
