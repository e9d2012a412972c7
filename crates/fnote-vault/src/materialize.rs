//! Create-if-missing folder chains.
//!
//! Idempotent: existing folders are left alone, nothing is ever deleted, and
//! missing levels are created ancestors first.

use fnote_core::error::Result;
use fnote_core::path::{FolderPath, NestedName};

use crate::entry::Vault;

/// Ensure `folder` and every ancestor of it exist. Returns the folders that
/// had to be created, in creation order.
///
/// # Errors
///
/// Propagates the store's refusal to create a folder.
pub fn ensure_folder<V: Vault + ?Sized>(vault: &V, folder: &FolderPath) -> Result<Vec<FolderPath>> {
    let mut created = Vec::new();
    for level in folder.lineage() {
        if vault.folder_exists(&level) {
            continue;
        }
        vault.create_folder(&level)?;
        tracing::debug!(folder = %level, "created folder");
        created.push(level);
    }
    Ok(created)
}

/// Ensure the target folder of a note exists, then every intermediate
/// folder named by a nested note name (`a/b/c` under `root` needs `root/a`
/// and `root/a/b`). Returns the folders created, in creation order.
///
/// # Errors
///
/// Propagates the store's refusal to create a folder.
pub fn ensure_note_folders<V: Vault + ?Sized>(
    vault: &V,
    base: &FolderPath,
    name: &NestedName,
) -> Result<Vec<FolderPath>> {
    let mut created = ensure_folder(vault, base)?;
    for folder in name.intermediate_folders(base) {
        if vault.folder_exists(&folder) {
            continue;
        }
        vault.create_folder(&folder)?;
        tracing::debug!(folder = %folder, "created intermediate folder");
        created.push(folder);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryVault, Operation};

    #[test]
    fn creates_every_missing_level_top_down() {
        let vault = InMemoryVault::new().with_folders(["a"]);
        let created = ensure_folder(&vault, &FolderPath::new("a/b/c")).unwrap();
        assert_eq!(created, vec![FolderPath::new("a/b"), FolderPath::new("a/b/c")]);
        assert_eq!(
            vault.operations().unwrap(),
            vec![
                Operation::CreateFolder("a/b".to_string()),
                Operation::CreateFolder("a/b/c".to_string()),
            ]
        );
    }

    #[test]
    fn existing_folder_is_left_alone() {
        let vault = InMemoryVault::new().with_folders(["a/b"]);
        assert!(ensure_folder(&vault, &FolderPath::new("a/b")).unwrap().is_empty());
        assert!(ensure_folder(&vault, &FolderPath::root()).unwrap().is_empty());
        assert!(vault.operations().unwrap().is_empty());
    }

    #[test]
    fn nested_name_creates_intermediates_under_base() {
        let vault = InMemoryVault::new().with_folders(["root"]);
        let name = NestedName::parse("a/b/c");
        let created = ensure_note_folders(&vault, &FolderPath::new("root"), &name).unwrap();
        assert_eq!(
            created,
            vec![FolderPath::new("root/a"), FolderPath::new("root/a/b")]
        );
    }

    #[test]
    fn missing_base_folder_is_created_first() {
        let vault = InMemoryVault::new();
        let name = NestedName::parse("x/note");
        ensure_note_folders(&vault, &FolderPath::new("Inbox"), &name).unwrap();
        assert_eq!(
            vault.operations().unwrap(),
            vec![
                Operation::CreateFolder("Inbox".to_string()),
                Operation::CreateFolder("Inbox/x".to_string()),
            ]
        );
    }

    #[test]
    fn running_twice_creates_nothing_new() {
        let vault = InMemoryVault::new();
        let name = NestedName::parse("a/b/c");
        let base = FolderPath::new("root");
        ensure_note_folders(&vault, &base, &name).unwrap();
        assert!(ensure_note_folders(&vault, &base, &name).unwrap().is_empty());
    }
}
