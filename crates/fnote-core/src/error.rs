//! Error types for fnote.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Top-level result type for fnote operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// How long a failure notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Top-level error type for note creation.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("That note already exists: {0}")]
    AlreadyExists(String),

    #[error("Could not create the note {path}: {reason}")]
    CreationFailed { path: String, reason: String },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("vault error: {0}")]
    Vault(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which user-entered string a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Title,
    Folder,
    Extension,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Title => f.write_str("title"),
            NameKind::Folder => f.write_str("folder"),
            NameKind::Extension => f.write_str("extension"),
        }
    }
}

/// Rejections produced while sanitizing names and composing paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Add a title to the note")]
    EmptyName,

    #[error("The note {kind} must not include the character '{character}'")]
    IllegalCharacter { kind: NameKind, character: char },

    #[error("The note title must not be only '\\', '/' or whitespace")]
    WhitespaceOnlyName,

    #[error("The note needs a title because untitled notes are not allowed")]
    MissingTitle,
}

/// Flat discriminant over every failure a creation attempt can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    EmptyName,
    IllegalCharacter,
    WhitespaceOnlyName,
    MissingTitle,
    AlreadyExists,
    CreationFailed,
    TemplateNotFound,
    Vault,
    Settings,
    Io,
}

impl NoteError {
    /// The failure kind, without its payload.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            NoteError::Validation(ValidationError::EmptyName) => FailureKind::EmptyName,
            NoteError::Validation(ValidationError::IllegalCharacter { .. }) => {
                FailureKind::IllegalCharacter
            }
            NoteError::Validation(ValidationError::WhitespaceOnlyName) => {
                FailureKind::WhitespaceOnlyName
            }
            NoteError::Validation(ValidationError::MissingTitle) => FailureKind::MissingTitle,
            NoteError::AlreadyExists(_) => FailureKind::AlreadyExists,
            NoteError::CreationFailed { .. } => FailureKind::CreationFailed,
            NoteError::TemplateNotFound(_) => FailureKind::TemplateNotFound,
            NoteError::Vault(_) => FailureKind::Vault,
            NoteError::Settings(_) => FailureKind::Settings,
            NoteError::Io(_) => FailureKind::Io,
        }
    }

    /// Whether the attempt is over. Every other failure leaves the flow open
    /// so the user can correct the input and resubmit.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, NoteError::CreationFailed { .. })
    }

    /// Text for the transient message shown to the user.
    #[must_use]
    pub fn notice(&self) -> String {
        self.to_string()
    }
}
