//! # fnote-core
//!
//! Pure note-creation logic for fnote. Nothing in this crate touches the
//! file store; it validates, composes, and substitutes strings.
//!
//! - [`Settings`]: the persisted configuration record
//! - Error hierarchy ([`NoteError`], [`ValidationError`], [`FailureKind`])
//! - [`sanitize`]: legality checks for note names, folders and extensions
//! - [`path`]: [`FolderPath`] and the note path builder
//! - [`template`]: title-template and body-template resolution
//! - [`fuzzy`]: left-to-right token matching and highlighting
//! - [`format`]: the [`DateFormatter`] seam and a moment-style implementation
//! - [`mode`]: [`OpenMode`] and the host [`ViewTarget`] it maps to

pub mod error;
pub mod format;
pub mod fuzzy;
pub mod mode;
pub mod path;
pub mod sanitize;
pub mod settings;
pub mod template;

pub use error::{FailureKind, NameKind, NoteError, Result, ValidationError};
pub use format::{Clock, DateFormatter, FixedClock, MomentFormatter, SystemClock};
pub use mode::{OpenMode, ViewTarget};
pub use path::{FolderPath, NestedName};
pub use settings::Settings;
