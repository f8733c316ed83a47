//! Content-based guess at an archive's root folder.
//!
//! When no folder names give the layout away, the kinds of files in the
//! archive are counted and compared against empirically tuned thresholds.

use crate::package::PackageFile;

use super::rules::RootFolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Sound,
    Image,
    Object,
    Route,
    Train,
}

/// File name endings and the kind of content they indicate.
///
/// Checked in order, first match wins: the well-known train files must come
/// before the generic `.txt` entry. `.csv` is counted as route content even
/// though object files use it too.
const KIND_SUFFIXES: &[(&str, ContentKind)] = &[
    (".wav", ContentKind::Sound),
    (".png", ContentKind::Image),
    (".bmp", ContentKind::Image),
    (".tiff", ContentKind::Image),
    (".ace", ContentKind::Image),
    (".b3d", ContentKind::Object),
    (".csv", ContentKind::Route),
    (".animated", ContentKind::Object),
    (".rw", ContentKind::Route),
    ("train.dat", ContentKind::Train),
    ("panel.cfg", ContentKind::Train),
    ("panel2.cfg", ContentKind::Train),
    ("extensions.cfg", ContentKind::Train),
    ("ats.cfg", ContentKind::Train),
    ("train.txt", ContentKind::Train),
    (".txt", ContentKind::Route),
];

fn kind_of(path: &str) -> Option<ContentKind> {
    let lower = path.to_ascii_lowercase();
    KIND_SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|(_, kind)| *kind)
}

/// Counts of each kind of content file in an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSignature {
    pub sound: usize,
    pub image: usize,
    pub object: usize,
    pub route: usize,
    pub train: usize,
}

type SignatureRule = (RootFolder, fn(&ContentSignature) -> bool);

/// Ordered rules; the first whose predicate holds decides the root.
const SIGNATURE_RULES: &[SignatureRule] = &[
    // Only sounds: a subfolder of Sound
    (RootFolder::Sound, |s| s.sound > 0 && s.object == 0 && s.image == 0),
    // Route files, no objects and few images: a subfolder of Route
    (RootFolder::Route, |s| s.route > 0 && s.image < 20 && s.object == 0),
    // Objects or csv files with many images: a subfolder of Object. Very
    // image-heavy folders win even with a few stray train files in them.
    (RootFolder::Object, |s| {
        (s.object > 0 || s.route > 0) && s.image > 20 && (s.train < 2 || s.image > 200)
    }),
    (RootFolder::Train, |s| s.train > 2 && s.image > 2 && s.sound > 2),
];

impl ContentSignature {
    pub fn from_files(files: &[PackageFile]) -> Self {
        let mut signature = Self::default();
        for file in files {
            match kind_of(&file.relative_path) {
                Some(ContentKind::Sound) => signature.sound += 1,
                Some(ContentKind::Image) => signature.image += 1,
                Some(ContentKind::Object) => signature.object += 1,
                Some(ContentKind::Route) => signature.route += 1,
                Some(ContentKind::Train) => signature.train += 1,
                None => {}
            }
        }
        signature
    }

    /// The root folder these counts point at, if any rule applies.
    pub fn suggest(&self) -> Option<RootFolder> {
        SIGNATURE_RULES
            .iter()
            .find(|(_, applies)| applies(self))
            .map(|(folder, _)| *folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(sound: usize, image: usize, object: usize, route: usize, train: usize) -> ContentSignature {
        ContentSignature {
            sound,
            image,
            object,
            route,
            train,
        }
    }

    fn files(names: &[&str]) -> Vec<PackageFile> {
        names
            .iter()
            .map(|n| PackageFile::new(format!("/{}", n), format!("/tmp/x/{}", n)))
            .collect()
    }

    #[test]
    fn test_kind_of_suffixes() {
        assert_eq!(kind_of("/a/horn.WAV"), Some(ContentKind::Sound));
        assert_eq!(kind_of("/t/tex.ace"), Some(ContentKind::Image));
        assert_eq!(kind_of("/o/pole.b3d"), Some(ContentKind::Object));
        assert_eq!(kind_of("/o/door.animated"), Some(ContentKind::Object));
        assert_eq!(kind_of("/r/line.csv"), Some(ContentKind::Route));
        assert_eq!(kind_of("/r/line.rw"), Some(ContentKind::Route));
        assert_eq!(kind_of("/r/include.txt"), Some(ContentKind::Route));
        assert_eq!(kind_of("/emu/readme.md"), None);
    }

    #[test]
    fn test_train_files_win_over_generic_txt() {
        assert_eq!(kind_of("/emu/train.txt"), Some(ContentKind::Train));
        assert_eq!(kind_of("/emu/Train.dat"), Some(ContentKind::Train));
        assert_eq!(kind_of("/emu/panel2.cfg"), Some(ContentKind::Train));
        assert_eq!(kind_of("/emu/ATS.cfg"), Some(ContentKind::Train));
        assert_eq!(kind_of("/emu/extensions.cfg"), Some(ContentKind::Train));
        assert_eq!(kind_of("/emu/sound.cfg"), None);
    }

    #[test]
    fn test_from_files_counts() {
        let sig = ContentSignature::from_files(&files(&[
            "a.wav", "b.wav", "c.png", "d.bmp", "e.b3d", "f.csv", "panel.cfg", "x.dll",
        ]));
        assert_eq!(sig, signature(2, 2, 1, 1, 1));
    }

    #[test]
    fn test_only_sounds_suggest_sound() {
        assert_eq!(signature(5, 0, 0, 0, 0).suggest(), Some(RootFolder::Sound));
        // route text alongside sounds does not block the sound rule
        assert_eq!(signature(5, 0, 0, 3, 0).suggest(), Some(RootFolder::Sound));
        assert_eq!(signature(5, 1, 0, 0, 0).suggest(), None);
    }

    #[test]
    fn test_route_image_threshold() {
        assert_eq!(signature(0, 19, 0, 1, 0).suggest(), Some(RootFolder::Route));
        assert_eq!(signature(0, 20, 0, 1, 0).suggest(), None);
        assert_eq!(signature(0, 21, 0, 1, 0).suggest(), Some(RootFolder::Object));
    }

    #[test]
    fn test_route_with_objects_is_not_route() {
        assert_eq!(signature(0, 3, 1, 4, 0).suggest(), None);
    }

    #[test]
    fn test_object_rule_train_files() {
        assert_eq!(signature(0, 25, 3, 0, 1).suggest(), Some(RootFolder::Object));
        assert_eq!(signature(0, 25, 3, 0, 2).suggest(), None);
        assert_eq!(signature(0, 200, 3, 0, 5).suggest(), None);
        assert_eq!(signature(0, 201, 3, 0, 5).suggest(), Some(RootFolder::Object));
    }

    #[test]
    fn test_train_rule_needs_more_than_two_of_each() {
        assert_eq!(signature(3, 3, 0, 0, 3).suggest(), Some(RootFolder::Train));
        assert_eq!(signature(2, 3, 0, 0, 3).suggest(), None);
        assert_eq!(signature(3, 2, 0, 0, 3).suggest(), None);
        assert_eq!(signature(3, 3, 0, 0, 2).suggest(), None);
    }

    #[test]
    fn test_empty_signature_is_inconclusive() {
        assert_eq!(ContentSignature::default().suggest(), None);
    }
}
