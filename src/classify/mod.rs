//! Archive layout classification.
//!
//! Content archives are packed in many different ways. Before extraction,
//! [`classify`] decides which canonical root the files belong under and
//! rewrites each record's relative path accordingly. Three phases run in
//! order and the first decisive signal wins:
//!
//! 1. a marker folder at the start of a relative path ([`MARKER_RULES`]);
//! 2. the folder the archive was extracted into ([`LOCATION_RULES`]);
//! 3. the kinds of files present ([`ContentSignature`]).
//!
//! If nothing fires the records are left alone and the caller decides.

mod rules;
mod signature;

use log::debug;
use std::fmt;

use crate::package::PackageFile;

pub use rules::{FolderRule, LOCATION_RULES, MARKER_RULES, Matching, Rewrite, RootFolder, lookup};
pub use signature::ContentSignature;

/// Which rule decided the layout of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The archive's top folder was an install root and has been removed.
    StrippedRoot(RootFolder),
    /// Paths were already rooted correctly.
    AlreadyRooted(RootFolder),
    /// Every path was placed under this folder.
    Prefixed(RootFolder),
    /// No rule applied; paths are unchanged.
    Inconclusive,
}

impl Classification {
    pub fn root(&self) -> Option<RootFolder> {
        match self {
            Classification::StrippedRoot(f)
            | Classification::AlreadyRooted(f)
            | Classification::Prefixed(f) => Some(*f),
            Classification::Inconclusive => None,
        }
    }

    pub fn is_conclusive(&self) -> bool {
        self.root().is_some()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::StrippedRoot(folder) => write!(f, "{} root (top folder removed)", folder),
            Classification::AlreadyRooted(folder) => write!(f, "{} (already rooted)", folder),
            Classification::Prefixed(folder) => write!(f, "{} (paths prefixed)", folder),
            Classification::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

/// Classify an archive's files and rewrite their relative paths in place.
///
/// Records are never added or removed, only their `relative_path` changes.
#[tracing::instrument(skip(files), fields(count = files.len()))]
pub fn classify(files: &mut [PackageFile]) -> Classification {
    let classification = by_marker(files)
        .or_else(|| by_location(files))
        .unwrap_or_else(|| by_signature(files));
    debug!("Classified {} file(s): {}", files.len(), classification);
    classification
}

fn by_marker(files: &mut [PackageFile]) -> Option<Classification> {
    let rule = files.iter().find_map(|file| {
        rules::first_segment(&file.relative_path).and_then(|seg| lookup(MARKER_RULES, seg))
    })?;
    Some(apply(rule, files))
}

fn by_location(files: &mut [PackageFile]) -> Option<Classification> {
    let rule = files.iter().find_map(|file| {
        let location = extraction_dir(file);
        lookup(LOCATION_RULES, location.trim_end_matches(rules::is_separator))
    })?;
    Some(apply(rule, files))
}

fn by_signature(files: &mut [PackageFile]) -> Classification {
    let signature = ContentSignature::from_files(files);
    debug!("Content signature: {:?}", signature);
    match signature.suggest() {
        Some(folder) => apply(
            FolderRule {
                folder,
                matching: Matching::Segment,
                rewrite: Rewrite::Prefix,
            },
            files,
        ),
        None => Classification::Inconclusive,
    }
}

/// The absolute path with the relative path removed from its end.
///
/// Separators are normalised before comparing. If the relative path is not a
/// suffix the whole absolute path is returned.
fn extraction_dir(file: &PackageFile) -> String {
    let absolute = file.absolute_path.replace('\\', "/");
    let relative = file.relative_path.replace('\\', "/");
    match absolute.strip_suffix(relative.as_str()) {
        Some(dir) if !relative.is_empty() => dir.to_string(),
        _ => absolute,
    }
}

fn apply(rule: FolderRule, files: &mut [PackageFile]) -> Classification {
    match rule.rewrite {
        Rewrite::Strip => {
            for file in files.iter_mut() {
                if rules::first_segment(&file.relative_path).is_some_and(|s| rule.applies_to(s)) {
                    file.relative_path = rules::strip_first_segment(&file.relative_path);
                }
            }
            Classification::StrippedRoot(rule.folder)
        }
        Rewrite::Keep => Classification::AlreadyRooted(rule.folder),
        Rewrite::Prefix => {
            for file in files.iter_mut() {
                file.relative_path = rules::prefix_segment(&file.relative_path, rule.folder);
            }
            Classification::Prefixed(rule.folder)
        }
    }
}
