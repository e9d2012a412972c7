//! # fnote-vault
//!
//! The host file store as fnote sees it. The store is the authoritative
//! source of truth and the sole arbiter of conflicting writes; fnote only
//! asks it whether things exist, reads templates, and creates folders and
//! documents.
//!
//! - [`Vault`]: the store contract, with tagged [`Entry`] listings
//! - [`InMemoryVault`]: a store for tests and embedding
//! - [`DiskVault`]: a store rooted at a directory
//! - [`materialize`]: create-if-missing folder chains
//! - [`duplicate`]: case-insensitive existence checks

pub mod disk;
pub mod duplicate;
pub mod entry;
pub mod materialize;
pub mod memory;

pub use disk::DiskVault;
pub use duplicate::{check_duplicate, find_duplicate};
pub use entry::{Entry, EntryKind, Vault};
pub use materialize::{ensure_folder, ensure_note_folders};
pub use memory::{InMemoryVault, Operation};
