//! An in-memory store.
//!
//! Folders must exist before anything is created inside them, mirroring a
//! host that does not create parents implicitly. Every successful mutation
//! is appended to an operation log so callers can observe ordering.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fnote_core::error::{NoteError, Result};
use fnote_core::path::{normalize_path, FolderPath};

use crate::entry::{Entry, Vault};

/// A successful mutation, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateFolder(String),
    CreateFile(String),
}

#[derive(Debug, Clone)]
enum Node {
    Folder,
    Document(String),
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    log: Vec<Operation>,
    read_only: bool,
}

/// A store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    state: RwLock<State>,
}

impl InMemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from documents, creating their parent folders.
    /// Seeding is not recorded in the operation log.
    #[must_use]
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let vault = Self::new();
        if let Ok(mut state) = vault.state.write() {
            for (path, contents) in files {
                let path = normalize_path(path);
                let parent = FolderPath::new(path.rsplit_once('/').map_or("", |(p, _)| p));
                for folder in parent.lineage() {
                    state.nodes.insert(folder.to_string(), Node::Folder);
                }
                state.nodes.insert(path, Node::Document(contents.to_string()));
            }
        }
        vault
    }

    /// Add empty folders (and their ancestors) without logging them.
    #[must_use]
    pub fn with_folders<'a>(self, folders: impl IntoIterator<Item = &'a str>) -> Self {
        if let Ok(mut state) = self.state.write() {
            for folder in folders {
                for level in FolderPath::new(folder).lineage() {
                    state.nodes.insert(level.to_string(), Node::Folder);
                }
            }
        }
        self
    }

    /// Make every later create call fail, as a host that denies writes.
    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.lock_write()?.read_only = read_only;
        Ok(())
    }

    /// Mutations performed since construction.
    pub fn operations(&self) -> Result<Vec<Operation>> {
        Ok(self.lock_read()?.log.clone())
    }

    fn lock_read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| NoteError::Vault("in-memory vault lock poisoned".to_string()))
    }

    fn lock_write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| NoteError::Vault("in-memory vault lock poisoned".to_string()))
    }
}

fn parent_exists(state: &State, path: &str) -> bool {
    match path.rsplit_once('/') {
        None => true,
        Some((parent, _)) => matches!(state.nodes.get(parent), Some(Node::Folder)),
    }
}

impl Vault for InMemoryVault {
    fn folder_exists(&self, path: &FolderPath) -> bool {
        if path.is_root() {
            return true;
        }
        self.lock_read()
            .is_ok_and(|s| matches!(s.nodes.get(path.as_str()), Some(Node::Folder)))
    }

    fn create_folder(&self, path: &FolderPath) -> Result<()> {
        if path.is_root() {
            return Ok(());
        }
        let mut state = self.lock_write()?;
        if state.read_only {
            return Err(NoteError::Vault(format!("read-only vault: {path}")));
        }
        match state.nodes.get(path.as_str()) {
            Some(Node::Folder) => return Ok(()),
            Some(Node::Document(_)) => {
                return Err(NoteError::Vault(format!("a document exists at {path}")));
            }
            None => {}
        }
        if !parent_exists(&state, path.as_str()) {
            return Err(NoteError::Vault(format!("parent folder missing for {path}")));
        }
        state.nodes.insert(path.to_string(), Node::Folder);
        state.log.push(Operation::CreateFolder(path.to_string()));
        Ok(())
    }

    fn file_exists(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.lock_read()
            .is_ok_and(|s| matches!(s.nodes.get(&path), Some(Node::Document(_))))
    }

    fn entries(&self) -> Vec<Entry> {
        let Ok(state) = self.lock_read() else {
            return Vec::new();
        };
        state
            .nodes
            .iter()
            .map(|(path, node)| match node {
                Node::Folder => Entry::folder(path.clone()),
                Node::Document(_) => Entry::document(path.clone()),
            })
            .collect()
    }

    fn read(&self, path: &str) -> Result<String> {
        let path = normalize_path(path);
        match self.lock_read()?.nodes.get(&path) {
            Some(Node::Document(contents)) => Ok(contents.clone()),
            _ => Err(NoteError::Vault(format!("no document at {path}"))),
        }
    }

    fn create(&self, path: &str, contents: &str) -> Result<()> {
        let path = normalize_path(path);
        let mut state = self.lock_write()?;
        if state.read_only {
            return Err(NoteError::Vault(format!("read-only vault: {path}")));
        }
        if state.nodes.contains_key(&path) {
            return Err(NoteError::Vault(format!("{path} already exists")));
        }
        if !parent_exists(&state, &path) {
            return Err(NoteError::Vault(format!("parent folder missing for {path}")));
        }
        state.nodes.insert(path.clone(), Node::Document(contents.to_string()));
        state.log.push(Operation::CreateFile(path));
        Ok(())
    }
}
