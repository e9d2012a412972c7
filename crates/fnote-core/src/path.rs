//! Folder paths and note path composition.
//!
//! Paths are vault-relative, forward-slash delimited strings. The root
//! folder is the single-character sentinel `/`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::settings::Settings;

/// The root folder sentinel.
pub const ROOT: &str = "/";

/// Normalize a vault path: backslashes become `/`, runs of separators
/// collapse, leading and trailing separators are dropped, non-breaking
/// spaces become spaces. An empty result is the root `/`.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for segment in raw.split(['/', '\\']).filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push('/');
        }
        out.extend(segment.chars().map(|c| if c == '\u{a0}' { ' ' } else { c }));
    }
    if out.is_empty() {
        ROOT.to_string()
    } else {
        out
    }
}

/// A normalized folder path, used purely as a lookup key into the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FolderPath(String);

impl FolderPath {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize_path(raw))
    }

    #[must_use]
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from the top down; empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// The child folder `self/segment`.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            Self::new(segment)
        } else {
            Self::new(&format!("{}/{segment}", self.0))
        }
    }

    /// Every folder from the top-most segment down to `self`, excluding the
    /// root. `a/b/c` yields `a`, `a/b`, `a/b/c`.
    #[must_use]
    pub fn lineage(&self) -> Vec<FolderPath> {
        let mut current = FolderPath::root();
        self.segments()
            .map(|segment| {
                current = current.join(segment);
                current.clone()
            })
            .collect()
    }
}

impl Default for FolderPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FolderPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for FolderPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<FolderPath> for String {
    fn from(path: FolderPath) -> Self {
        path.0
    }
}

/// A note name split at its path separators.
///
/// `a / b/c` has intermediate segments `a`, `b` and the leaf `c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedName {
    pub parents: Vec<String>,
    pub leaf: String,
}

impl NestedName {
    /// Split a sanitized name on `/` and `\`, trimming each segment and
    /// dropping empty ones.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let mut segments: Vec<String> = name
            .split(['/', '\\'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let leaf = segments.pop().unwrap_or_default();
        Self {
            parents: segments,
            leaf,
        }
    }

    /// The intermediate folders under `base`, ancestors first. `a/b/c` under
    /// `root` yields `root/a`, `root/a/b`.
    #[must_use]
    pub fn intermediate_folders(&self, base: &FolderPath) -> Vec<FolderPath> {
        let mut current = base.clone();
        self.parents
            .iter()
            .map(|segment| {
                current = current.join(segment);
                current.clone()
            })
            .collect()
    }

    /// The name relative to its base folder, separators normalized.
    #[must_use]
    pub fn relative(&self) -> String {
        let mut out = self.parents.join("/");
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&self.leaf);
        out
    }
}

/// Compose `folder/name + extension`, omitting the separator for the root.
#[must_use]
pub fn compose(folder: &FolderPath, name: &str, extension: &str) -> String {
    let joined = if folder.is_root() {
        format!("{name}{extension}")
    } else {
        format!("{folder}/{name}{extension}")
    };
    normalize_path(&joined)
}

/// Build the candidate note path from a folder, a name, and the naming and
/// extension settings.
///
/// # Errors
///
/// Returns [`ValidationError::MissingTitle`] if the name is empty and
/// untitled notes are not allowed.
pub fn build_note_path(
    folder: &FolderPath,
    name: &str,
    settings: &Settings,
) -> Result<String, ValidationError> {
    let name = match name.trim() {
        "" if settings.allow_untitled_notes => settings.effective_untitled_name(),
        "" => return Err(ValidationError::MissingTitle),
        trimmed => trimmed,
    };
    Ok(compose(folder, name, settings.effective_extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // === normalize / FolderPath ===

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_path("//a\\\\b///c/"), "a/b/c");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("a\u{a0}b"), "a b");
    }

    #[test]
    fn folder_path_root_forms() {
        assert!(FolderPath::new("/").is_root());
        assert!(FolderPath::new("").is_root());
        assert!(!FolderPath::new("a").is_root());
        assert_eq!(FolderPath::root().join("a").as_str(), "a");
    }

    #[test]
    fn lineage_lists_every_level() {
        let lineage: Vec<String> = FolderPath::new("a/b/c")
            .lineage()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(lineage, vec!["a", "a/b", "a/b/c"]);
        assert!(FolderPath::root().lineage().is_empty());
    }

    #[test]
    fn folder_path_deserializes_normalized() {
        let path: FolderPath = serde_json::from_str("\"/Projects//Work/\"").unwrap();
        assert_eq!(path.as_str(), "Projects/Work");
    }

    // === NestedName ===

    #[test]
    fn nested_name_splits_and_trims_segments() {
        let name = NestedName::parse(" a / b\\c ");
        assert_eq!(name.parents, vec!["a", "b"]);
        assert_eq!(name.leaf, "c");
        assert_eq!(name.relative(), "a/b/c");
    }

    #[test]
    fn intermediate_folders_are_ancestors_first() {
        let name = NestedName::parse("a/b/c");
        let folders: Vec<String> = name
            .intermediate_folders(&FolderPath::new("root"))
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(folders, vec!["root/a", "root/a/b"]);
    }

    #[test]
    fn flat_name_has_no_intermediates() {
        let name = NestedName::parse("Foo");
        assert!(name.parents.is_empty());
        assert!(name.intermediate_folders(&FolderPath::new("A")).is_empty());
    }

    // === build_note_path ===

    #[test]
    fn root_folder_omits_separator() {
        let settings = Settings::default();
        assert_eq!(
            build_note_path(&FolderPath::root(), "Foo", &settings).unwrap(),
            "Foo.md"
        );
        assert_eq!(
            build_note_path(&FolderPath::new("A/B"), "Foo", &settings).unwrap(),
            "A/B/Foo.md"
        );
    }

    #[test]
    fn empty_extension_defaults_to_markdown() {
        let settings = Settings {
            default_note_extension: String::new(),
            ..Settings::default()
        };
        assert_eq!(
            build_note_path(&FolderPath::new("A"), "Foo", &settings).unwrap(),
            "A/Foo.md"
        );
    }

    #[test]
    fn empty_name_uses_untitled_or_fails() {
        let settings = Settings::default();
        assert_eq!(
            build_note_path(&FolderPath::root(), " ", &settings).unwrap(),
            "Untitled.md"
        );

        let strict = Settings {
            allow_untitled_notes: false,
            ..Settings::default()
        };
        assert_eq!(
            build_note_path(&FolderPath::root(), "", &strict),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn single_letter_folder_is_not_the_root() {
        assert_eq!(compose(&FolderPath::new("a"), "Foo", ".md"), "a/Foo.md");
    }

    proptest! {
        #[test]
        fn composed_path_is_folder_slash_name_extension(
            segments in prop::collection::vec("[a-zA-Z0-9]{1,6}", 1..4),
            name in "[a-zA-Z0-9]{1,10}",
        ) {
            let folder = FolderPath::new(&segments.join("/"));
            let path = build_note_path(&folder, &name, &Settings::default()).unwrap();
            prop_assert_eq!(path, format!("{}/{}.md", segments.join("/"), name));
        }
    }
}
