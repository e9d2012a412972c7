//! Case-insensitive duplicate detection.
//!
//! The check is advisory: no lock is held between it and the create call,
//! so a second flow may still win the race. [`Vault::create`] refusing to
//! overwrite is the final guard.

use fnote_core::error::{NoteError, Result};
use fnote_core::path::normalize_path;

use crate::entry::Vault;

/// The first existing path equal to `path` ignoring case.
#[must_use]
pub fn find_duplicate<'a, I>(path: &str, existing: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize_path(path).to_lowercase();
    existing
        .into_iter()
        .find(|candidate| candidate.to_lowercase() == wanted)
}

/// Fail if any document in the store matches `path` case-insensitively,
/// including documents the store does not list.
///
/// # Errors
///
/// Returns [`NoteError::AlreadyExists`] naming the existing document.
pub fn check_duplicate<V: Vault + ?Sized>(vault: &V, path: &str) -> Result<()> {
    match vault.find_file_ignoring_case(path) {
        Some(existing) => Err(NoteError::AlreadyExists(existing)),
        None => Ok(()),
    }
}
