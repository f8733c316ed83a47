//! Dotted numeric versions and inclusive version ranges.
//!
//! Versions have between one and four numeric components
//! (`major.minor[.build[.revision]]`). Missing components compare as zero,
//! so `1.2` and `1.2.0.0` are the same version.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

const MAX_COMPONENTS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,

    #[error("invalid version component '{0}'")]
    InvalidComponent(String),

    #[error("version '{0}' has more than four components")]
    TooManyComponents(String),
}

/// A totally ordered package version.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    parts: [u32; MAX_COMPONENTS],
    len: usize,
}

impl Version {
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            parts: [major, minor, build, revision],
            len: MAX_COMPONENTS,
        }
    }

    pub fn major(&self) -> u32 {
        self.parts[0]
    }

    pub fn minor(&self) -> u32 {
        self.parts[1]
    }

    /// The components as written, without the implicit trailing zeros.
    pub fn components(&self) -> &[u32] {
        &self.parts[..self.len]
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Tags are often written as "v1.2.3"
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut parts = [0u32; MAX_COMPONENTS];
        let mut len = 0;
        for component in trimmed.split('.') {
            if len == MAX_COMPONENTS {
                return Err(VersionParseError::TooManyComponents(s.to_string()));
            }
            parts[len] = component
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent(component.to_string()))?;
            len += 1;
        }

        Ok(Self { parts, len })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in self.components() {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

/// An optional inclusive lower and upper bound on a [`Version`].
///
/// An absent bound leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Version>,
}

impl VersionRange {
    /// Matches every version.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn at_least(minimum: Version) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: None,
        }
    }

    pub fn at_most(maximum: Version) -> Self {
        Self {
            minimum: None,
            maximum: Some(maximum),
        }
    }

    pub fn between(minimum: Version, maximum: Version) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    pub fn exactly(version: Version) -> Self {
        Self::between(version, version)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.minimum.is_none_or(|min| min <= *version)
            && self.maximum.is_none_or(|max| max >= *version)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.minimum, &self.maximum) {
            (None, None) => write!(f, "any"),
            (Some(min), None) => write!(f, ">= {}", min),
            (None, Some(max)) => write!(f, "<= {}", max),
            (Some(min), Some(max)) if min == max => write!(f, "= {}", min),
            (Some(min), Some(max)) => write!(f, "{} ..= {}", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_full_version() {
        let version = v("1.2.3.4");
        assert_eq!(version.components(), &[1, 2, 3, 4]);
        assert_eq!(version.to_string(), "1.2.3.4");
    }

    #[test]
    fn test_parse_short_version_keeps_display() {
        let version = v("2.5");
        assert_eq!(version.major(), 2);
        assert_eq!(version.minor(), 5);
        assert_eq!(version.to_string(), "2.5");
    }

    #[test]
    fn test_parse_with_v_prefix() {
        assert_eq!(v("v1.0.0"), v("1.0.0"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Version>(), Err(VersionParseError::Empty));
        assert_eq!("  ".parse::<Version>(), Err(VersionParseError::Empty));
        assert_eq!(
            "1.x".parse::<Version>(),
            Err(VersionParseError::InvalidComponent("x".into()))
        );
        assert_eq!(
            "1..2".parse::<Version>(),
            Err(VersionParseError::InvalidComponent("".into()))
        );
        assert!(matches!(
            "1.2.3.4.5".parse::<Version>(),
            Err(VersionParseError::TooManyComponents(_))
        ));
    }

    #[test]
    fn test_missing_components_compare_as_zero() {
        assert_eq!(v("1.2"), v("1.2.0.0"));
        assert!(v("1.2") < v("1.2.0.1"));
        assert!(v("1.10") > v("1.9.9"));
    }

    #[test]
    fn test_range_unbounded_contains_everything() {
        let range = VersionRange::any();
        assert!(range.contains(&v("0")));
        assert!(range.contains(&v("999.0")));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = VersionRange::between(v("1.0"), v("2.0"));
        assert!(range.contains(&v("1.0")));
        assert!(range.contains(&v("1.5")));
        assert!(range.contains(&v("2.0")));
        assert!(!range.contains(&v("0.9")));
        assert!(!range.contains(&v("2.0.0.1")));
    }

    #[test]
    fn test_range_one_sided() {
        assert!(VersionRange::at_least(v("1.0")).contains(&v("5.0")));
        assert!(!VersionRange::at_least(v("1.0")).contains(&v("0.9")));
        assert!(VersionRange::at_most(v("1.0")).contains(&v("0.1")));
        assert!(!VersionRange::at_most(v("1.0")).contains(&v("1.0.1")));
    }

    #[test]
    fn test_range_exact_matches_only_that_version() {
        let range = VersionRange::exactly(v("1.4"));
        assert!(range.contains(&v("1.4.0")));
        assert!(!range.contains(&v("1.3.9")));
        assert!(!range.contains(&v("1.4.0.1")));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(VersionRange::any().to_string(), "any");
        assert_eq!(VersionRange::at_least(v("1.0")).to_string(), ">= 1.0");
        assert_eq!(VersionRange::at_most(v("2")).to_string(), "<= 2");
        assert_eq!(VersionRange::exactly(v("1.1")).to_string(), "= 1.1");
        assert_eq!(
            VersionRange::between(v("1.0"), v("2.0")).to_string(),
            "1.0 ..= 2.0"
        );
    }

    #[test]
    fn test_version_json_is_a_string() {
        let json = serde_json::to_string(&v("1.2.3")).unwrap();
        assert_eq!(json, "\"1.2.3\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("1.2.3"));
        assert!(serde_json::from_str::<Version>("\"abc\"").is_err());
    }
}
