//! Canonical root folders and the folder-name rule tables.

use std::fmt;
use std::path::MAIN_SEPARATOR;

/// A canonical top-level folder that archive contents can be rooted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootFolder {
    Railway,
    Train,
    Route,
    Object,
    Sound,
}

impl RootFolder {
    pub fn name(&self) -> &'static str {
        match self {
            RootFolder::Railway => "Railway",
            RootFolder::Train => "Train",
            RootFolder::Route => "Route",
            RootFolder::Object => "Object",
            RootFolder::Sound => "Sound",
        }
    }

    /// Case-insensitive comparison against a single path segment.
    pub fn matches(&self, segment: &str) -> bool {
        segment.eq_ignore_ascii_case(self.name())
    }
}

impl fmt::Display for RootFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with every record's relative path once a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Drop the folder segment from the front of paths that start with it.
    Strip,
    /// Paths are already correct.
    Keep,
    /// Put the folder segment in front of every path.
    Prefix,
}

/// How a rule's folder name is compared against a piece of path text.
///
/// All comparisons ignore ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    /// The text is exactly the folder name.
    Segment,
    /// The text starts with the folder name (`Objects` matches `Object`).
    Prefix,
    /// The text ends with the folder name (`MyRoute` matches `Route`).
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderRule {
    pub folder: RootFolder,
    pub matching: Matching,
    pub rewrite: Rewrite,
}

impl FolderRule {
    pub fn applies_to(&self, text: &str) -> bool {
        let name = self.folder.name();
        match self.matching {
            Matching::Segment => self.folder.matches(text),
            Matching::Prefix => text
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name)),
            Matching::Suffix => text
                .len()
                .checked_sub(name.len())
                .and_then(|start| text.get(start..))
                .is_some_and(|tail| tail.eq_ignore_ascii_case(name)),
        }
    }
}

const fn rule(folder: RootFolder, matching: Matching, rewrite: Rewrite) -> FolderRule {
    FolderRule {
        folder,
        matching,
        rewrite,
    }
}

/// Rules for the first segment of a relative path.
///
/// `Railway` and `Train` name the install roots themselves, so the archive's
/// top folder is dropped; they must match the whole segment. `Route`, `Object`
/// and `Sound` live inside the railway root and are extracted as they are.
/// Any folder whose name starts with one of them counts (`Objects`, `Routes`).
pub const MARKER_RULES: &[FolderRule] = &[
    rule(RootFolder::Railway, Matching::Segment, Rewrite::Strip),
    rule(RootFolder::Train, Matching::Segment, Rewrite::Strip),
    rule(RootFolder::Route, Matching::Prefix, Rewrite::Keep),
    rule(RootFolder::Object, Matching::Prefix, Rewrite::Keep),
    rule(RootFolder::Sound, Matching::Prefix, Rewrite::Keep),
];

/// Rules for the directory an archive was extracted into, matched against the
/// end of that path.
pub const LOCATION_RULES: &[FolderRule] = &[
    rule(RootFolder::Railway, Matching::Suffix, Rewrite::Keep),
    rule(RootFolder::Train, Matching::Suffix, Rewrite::Keep),
    rule(RootFolder::Route, Matching::Suffix, Rewrite::Prefix),
    rule(RootFolder::Object, Matching::Suffix, Rewrite::Prefix),
    rule(RootFolder::Sound, Matching::Suffix, Rewrite::Prefix),
];

/// Find the first rule in `rules` that applies to `text`.
pub fn lookup(rules: &[FolderRule], text: &str) -> Option<FolderRule> {
    rules.iter().copied().find(|r| r.applies_to(text))
}

pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Non-empty segments of a path, accepting either separator style.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(is_separator).filter(|s| !s.is_empty())
}

pub(crate) fn first_segment(path: &str) -> Option<&str> {
    segments(path).next()
}

/// The separator style used by `path`, or the platform's if it has none.
pub(crate) fn separator_of(path: &str) -> char {
    path.chars().find(|c| is_separator(*c)).unwrap_or(MAIN_SEPARATOR)
}

/// Remove the first segment, keeping the separator that followed it.
///
/// `\Railway\Route\a.csv` becomes `\Route\a.csv`.
pub(crate) fn strip_first_segment(path: &str) -> String {
    let start = path.len() - path.trim_start_matches(is_separator).len();
    let rest = &path[start..];
    match rest.find(is_separator) {
        Some(end) => rest[end..].to_string(),
        None => String::new(),
    }
}

/// Put `folder` in front of `path` as a new first segment.
pub(crate) fn prefix_segment(path: &str, folder: RootFolder) -> String {
    let sep = separator_of(path);
    if path.starts_with(is_separator) {
        format!("{}{}{}", sep, folder.name(), path)
    } else {
        format!("{}{}{}{}", sep, folder.name(), sep, path)
    }
}
