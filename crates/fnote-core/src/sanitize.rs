//! Note-name and extension validation.
//!
//! Checks run in a fixed order: emptiness (with the untitled fallback),
//! platform-illegal characters, then separator/whitespace-only names. No
//! side effects.

use crate::error::{NameKind, ValidationError};
use crate::path::FolderPath;
use crate::settings::Settings;

/// Characters Windows refuses in file names.
pub const WINDOWS_ILLEGAL: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Characters refused in an extension under Windows compatibility.
pub const WINDOWS_ILLEGAL_EXTENSION: &[char] = &['<', '>', ':', '"', '\\', '|', '?', '*', '/'];

/// The subset of [`Settings`] that governs name validation.
#[derive(Debug, Clone, Copy)]
pub struct NameRules<'a> {
    pub windows_compatibility: bool,
    pub allow_untitled: bool,
    pub untitled_name: &'a str,
}

impl<'a> NameRules<'a> {
    #[must_use]
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self {
            windows_compatibility: settings.windows_compatibility(),
            allow_untitled: settings.allow_untitled_notes,
            untitled_name: settings.effective_untitled_name(),
        }
    }
}

/// Validate a raw note name and return it trimmed.
///
/// An empty (or whitespace-only) name becomes the untitled name when
/// untitled notes are allowed.
///
/// # Errors
///
/// - [`ValidationError::EmptyName`] if the trimmed name is empty and untitled
///   notes are not allowed.
/// - [`ValidationError::IllegalCharacter`] if Windows compatibility is on and
///   the name contains any of `< > : " | ? *`.
/// - [`ValidationError::WhitespaceOnlyName`] if the name consists solely of
///   `/`, `\` and whitespace.
pub fn sanitize_name(raw: &str, rules: NameRules<'_>) -> Result<String, ValidationError> {
    let mut name = raw.trim();

    if name.is_empty() {
        if !rules.allow_untitled {
            return Err(ValidationError::EmptyName);
        }
        name = rules.untitled_name.trim();
    }

    if rules.windows_compatibility {
        if let Some(character) = name.chars().find(|c| WINDOWS_ILLEGAL.contains(c)) {
            return Err(ValidationError::IllegalCharacter {
                kind: NameKind::Title,
                character,
            });
        }
    }

    if name.chars().all(|c| c == '/' || c == '\\' || c.is_whitespace()) {
        return Err(ValidationError::WhitespaceOnlyName);
    }

    Ok(name.to_string())
}

/// Validate the target folder. Under Windows compatibility no segment may
/// contain `< > : " | ? *`; otherwise every folder passes.
///
/// # Errors
///
/// Returns [`ValidationError::IllegalCharacter`] with [`NameKind::Folder`]
/// for the first refused character.
pub fn sanitize_folder(
    folder: &FolderPath,
    windows_compatibility: bool,
) -> Result<(), ValidationError> {
    if !windows_compatibility {
        return Ok(());
    }
    match folder
        .segments()
        .flat_map(str::chars)
        .find(|c| WINDOWS_ILLEGAL.contains(c))
    {
        Some(character) => Err(ValidationError::IllegalCharacter {
            kind: NameKind::Folder,
            character,
        }),
        None => Ok(()),
    }
}

/// Validate a note extension.
///
/// `/` is never allowed; the full Windows set (including `\`) is refused
/// when compatibility is on.
///
/// # Errors
///
/// Returns [`ValidationError::IllegalCharacter`] with
/// [`NameKind::Extension`] for the first refused character.
pub fn sanitize_extension(raw: &str, windows_compatibility: bool) -> Result<String, ValidationError> {
    let refused: &[char] = if windows_compatibility {
        WINDOWS_ILLEGAL_EXTENSION
    } else {
        &['/']
    };

    if let Some(character) = raw.chars().find(|c| refused.contains(c)) {
        return Err(ValidationError::IllegalCharacter {
            kind: NameKind::Extension,
            character,
        });
    }

    Ok(raw.to_string())
}
