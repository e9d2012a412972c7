//! The store contract and its tagged entry listing.

use fnote_core::error::Result;
use fnote_core::path::FolderPath;

use crate::duplicate::find_duplicate;

/// Whether a store entry is a folder or a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Folder,
    Document,
}

/// One path in the store, with an explicit type discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    #[must_use]
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
        }
    }

    #[must_use]
    pub fn document(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Document,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    #[must_use]
    pub fn is_document(&self) -> bool {
        self.kind == EntryKind::Document
    }
}

/// Operations fnote consumes from the host file store.
///
/// Paths are vault-relative and `/`-delimited. Results are assumed to be a
/// stable snapshot within one resolution pass; nothing here holds a lock
/// between a check and a later create.
pub trait Vault {
    /// Whether a folder exists. The root always does.
    fn folder_exists(&self, path: &FolderPath) -> bool;

    /// Create one folder whose parent already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the folder.
    fn create_folder(&self, path: &FolderPath) -> Result<()>;

    /// Whether a document exists at exactly this path.
    fn file_exists(&self, path: &str) -> bool;

    /// Every folder and document in the store, root excluded.
    fn entries(&self) -> Vec<Entry>;

    /// Read a document's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or cannot be read.
    fn read(&self, path: &str) -> Result<String>;

    /// Create a new document. This is the single commit point of a note
    /// creation; it must not overwrite an existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if the store denies the write.
    fn create(&self, path: &str, contents: &str) -> Result<()>;

    /// Paths of every document.
    fn files(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(Entry::is_document)
            .map(|e| e.path)
            .collect()
    }

    /// The existing document whose path equals `path` ignoring case.
    ///
    /// Unlike [`Vault::files`] this must also see documents a store keeps
    /// out of its listings.
    fn find_file_ignoring_case(&self, path: &str) -> Option<String> {
        let files = self.files();
        find_duplicate(path, files.iter().map(String::as_str)).map(str::to_string)
    }

    /// Every folder, root excluded.
    fn folders(&self) -> Vec<FolderPath> {
        self.entries()
            .into_iter()
            .filter(Entry::is_folder)
            .map(|e| FolderPath::new(&e.path))
            .collect()
    }
}

impl<V: Vault + ?Sized> Vault for &V {
    fn folder_exists(&self, path: &FolderPath) -> bool {
        (**self).folder_exists(path)
    }

    fn create_folder(&self, path: &FolderPath) -> Result<()> {
        (**self).create_folder(path)
    }

    fn file_exists(&self, path: &str) -> bool {
        (**self).file_exists(path)
    }

    fn entries(&self) -> Vec<Entry> {
        (**self).entries()
    }

    fn read(&self, path: &str) -> Result<String> {
        (**self).read(path)
    }

    fn create(&self, path: &str, contents: &str) -> Result<()> {
        (**self).create(path, contents)
    }

    fn find_file_ignoring_case(&self, path: &str) -> Option<String> {
        (**self).find_file_ignoring_case(path)
    }
}
