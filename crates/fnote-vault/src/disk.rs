//! A store rooted at a directory on disk.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use fnote_core::error::{NoteError, Result};
use fnote_core::path::{normalize_path, FolderPath, ROOT};

use crate::entry::{Entry, Vault};

/// A vault backed by a directory. Hidden entries (names starting with `.`)
/// are not listed, but the duplicate lookup still sees them.
#[derive(Debug, Clone)]
pub struct DiskVault {
    root: PathBuf,
}

impl DiskVault {
    /// Open a vault at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Vault`] if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(NoteError::Vault(format!(
                "vault root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault-relative path, refusing anything that would leave the
    /// vault root.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Vault`] for `..` segments or absolute components.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let normalized = normalize_path(relative);
        if normalized == ROOT {
            return Ok(self.root.clone());
        }
        let relative = Path::new(&normalized);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(NoteError::Vault(format!(
                "path escapes the vault: {normalized}"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn collect(&self, dir: &Path, prefix: &str, out: &mut Vec<Entry>) -> Result<()> {
        let mut children: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
        children.sort_by_key(fs::DirEntry::file_name);

        for child in children {
            let name = child.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let file_type = child.file_type()?;
            if file_type.is_dir() {
                out.push(Entry::folder(path.clone()));
                self.collect(&child.path(), &path, out)?;
            } else if file_type.is_file() {
                out.push(Entry::document(path));
            }
        }
        Ok(())
    }

    /// Children of `dir` whose name equals `segment` ignoring case, sorted.
    fn children_ignoring_case(dir: &Path, segment: &str) -> Vec<(String, PathBuf)> {
        let wanted = segment.to_lowercase();
        let Ok(read) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut hits: Vec<_> = read
            .filter_map(std::result::Result::ok)
            .map(|child| (child.file_name().to_string_lossy().into_owned(), child.path()))
            .filter(|(name, _)| name.to_lowercase() == wanted)
            .collect();
        hits.sort();
        hits
    }
}

impl Vault for DiskVault {
    fn folder_exists(&self, path: &FolderPath) -> bool {
        self.resolve(path.as_str()).is_ok_and(|p| p.is_dir())
    }

    fn create_folder(&self, path: &FolderPath) -> Result<()> {
        let target = self.resolve(path.as_str())?;
        match fs::create_dir(&target) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && target.is_dir() => Ok(()),
            Err(e) => Err(NoteError::Io(e)),
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn entries(&self) -> Vec<Entry> {
        let mut out = Vec::new();
        if let Err(e) = self.collect(&self.root, "", &mut out) {
            tracing::warn!(root = %self.root.display(), error = %e, "failed to list vault");
        }
        out
    }

    fn read(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path)?)?)
    }

    /// Walks `path` one segment at a time, following every directory that
    /// matches ignoring case, so hidden folders and documents are found.
    fn find_file_ignoring_case(&self, path: &str) -> Option<String> {
        let normalized = normalize_path(path);
        if normalized == ROOT {
            return None;
        }
        let segments: Vec<&str> = normalized.split('/').collect();
        let (leaf, parents) = segments.split_last()?;

        let mut dirs = vec![(String::new(), self.root.clone())];
        for segment in parents {
            dirs = dirs
                .iter()
                .flat_map(|(prefix, dir)| {
                    Self::children_ignoring_case(dir, segment)
                        .into_iter()
                        .filter(|(_, p)| p.is_dir())
                        .map(move |(name, p)| (join_relative(prefix, &name), p))
                })
                .collect();
            if dirs.is_empty() {
                return None;
            }
        }

        dirs.iter().find_map(|(prefix, dir)| {
            Self::children_ignoring_case(dir, leaf)
                .into_iter()
                .find(|(_, p)| p.is_file())
                .map(|(name, _)| join_relative(prefix, &name))
        })
    }

    /// Writes into a temporary file beside the target and links it into
    /// place only once the contents are complete. A failed write leaves
    /// nothing behind, and an existing document is never replaced.
    fn create(&self, path: &str, contents: &str) -> Result<()> {
        let target = self.resolve(path)?;
        let dir = target
            .parent()
            .ok_or_else(|| NoteError::Vault(format!("no parent folder for {path}")))?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist_noclobber(&target).map_err(|e| NoteError::Io(e.error))?;
        Ok(())
    }
}

fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
