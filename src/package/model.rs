use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::runtime::Runtime;

use super::{Version, VersionRange};

/// Kind of installed content. Each category is a partition of the package
/// database.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Route,
    Train,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Route, Category::Train, Category::Other];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Route => "route",
            Category::Train => "train",
            Category::Other => "other",
        };
        f.write_str(name)
    }
}

/// Globally unique package identity, independent of version.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared need for package `id` of `category` within `range`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dependency {
    pub id: PackageId,
    #[serde(default)]
    pub name: String,
    pub category: Category,
    #[serde(flatten)]
    pub range: VersionRange,
}

impl Dependency {
    pub fn new(id: impl Into<PackageId>, category: Category, range: VersionRange) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category,
            range,
        }
    }

    /// Whether `package` has this dependency's identity and a version in range.
    pub fn is_met_by(&self, package: &Package) -> bool {
        package.id == self.id && self.range.contains(&package.version)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{} [{}] ({})", self.id, self.category, self.range)
        } else {
            write!(
                f,
                "{} {} [{}] ({})",
                self.name, self.id, self.category, self.range
            )
        }
    }
}

/// Metadata for one content package, as read from its manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Package {
    pub id: PackageId,
    #[serde(default)]
    pub name: String,
    pub version: Version,
    pub category: Category,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Package {
    pub fn new(id: impl Into<PackageId>, version: Version, category: Category) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            version,
            category,
            dependencies: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Name for display, falling back to the identity.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load_manifest<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read manifest {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_dependency_is_met_by_identity_and_range() {
        let dep = Dependency::new("abc", Category::Train, VersionRange::at_least(v("1.0")));
        assert!(dep.is_met_by(&Package::new("abc", v("1.0"), Category::Train)));
        assert!(!dep.is_met_by(&Package::new("abc", v("0.9"), Category::Train)));
        assert!(!dep.is_met_by(&Package::new("abd", v("1.0"), Category::Train)));
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = r#"{
            "id": "6d1c5e0e-route",
            "name": "Demo Line",
            "version": "1.2",
            "category": "route",
            "dependencies": [
                { "id": "stock-emu", "category": "train", "minimum": "2.0" },
                { "id": "objects", "name": "Objects", "category": "other" }
            ]
        }"#;

        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package.id, PackageId::from("6d1c5e0e-route"));
        assert_eq!(package.category, Category::Route);
        assert_eq!(package.dependencies.len(), 2);
        assert_eq!(
            package.dependencies[0].range,
            VersionRange::at_least(v("2.0"))
        );
        assert_eq!(package.dependencies[1].range, VersionRange::any());
        assert_eq!(package.dependencies[1].name, "Objects");
    }

    #[test]
    fn test_range_bounds_omitted_when_serialized() {
        let dep = Dependency::new("x", Category::Other, VersionRange::at_most(v("3")));
        let json = serde_json::to_string(&dep).unwrap();
        assert!(json.contains(r#""maximum":"3""#));
        assert!(!json.contains("minimum"));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let package = Package::new("id-1", v("1"), Category::Other);
        assert_eq!(package.display_name(), "id-1");
        assert_eq!(package.with_name("Nice").display_name(), "Nice");
    }

    #[test]
    fn test_load_manifest() {
        let mut runtime = MockRuntime::new();
        let path = PathBuf::from("/tmp/manifest.json");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| {
                Ok(r#"{"id":"a","version":"1.0","category":"train"}"#.to_string())
            });

        let package = Package::load_manifest(&runtime, &path).unwrap();
        assert_eq!(package.id, PackageId::from("a"));
        assert!(package.dependencies.is_empty());
    }

    #[test]
    fn test_load_manifest_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("not json".to_string()));

        let err = Package::load_manifest(&runtime, Path::new("/m.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse manifest"));
    }
}
