//! Package data model
//!
//! Identities, categories, versions and dependency declarations for installed
//! content, plus the file records produced from an extracted archive.

mod file;
mod model;
mod version;

pub use file::{PackageFile, collect_files};
pub use model::{Category, Dependency, Package, PackageId};
pub use version::{Version, VersionParseError, VersionRange};
