//! The note creation orchestrator.
//!
//! One creation runs in three phases, each a separate method so a caller
//! can observe where an attempt stopped:
//!
//! 1. [`NoteCreator::resolve`] turns the request into a sanitized name and
//!    rendered body.
//! 2. [`NoteCreator::validate`] builds the path, materializes folders, and
//!    runs the duplicate check.
//! 3. [`NoteCreator::commit`] asks the store to create the document.
//!
//! [`NoteCreator::create`] runs all three.

use std::time::Duration;

use fnote_core::error::{NoteError, Result, NOTICE_DURATION};
use fnote_core::path::build_note_path;
use fnote_core::sanitize::{sanitize_extension, sanitize_folder, sanitize_name, NameRules};
use fnote_core::settings::DEFAULT_EXTENSION;
use fnote_core::template::{render_body, resolve_title, RenderContext};
use fnote_core::{
    Clock, DateFormatter, FolderPath, MomentFormatter, NestedName, OpenMode, Settings, SystemClock,
};
use fnote_vault::{check_duplicate, ensure_note_folders, Vault};

use crate::shell::Shell;

/// How long the "opens in the default application" notice stays up.
pub const EXTERNAL_OPEN_NOTICE_DURATION: Duration = Duration::from_millis(4000);

/// One user request to create a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCreationRequest {
    pub folder: FolderPath,
    /// The name as typed. Ignored when a title template is selected.
    pub name: String,
    pub title_template: Option<String>,
    /// Path of the body template document.
    pub body_template: Option<String>,
    pub mode: OpenMode,
}

impl NoteCreationRequest {
    #[must_use]
    pub fn new(folder: FolderPath, name: impl Into<String>, mode: OpenMode) -> Self {
        Self {
            folder,
            name: name.into(),
            title_template: None,
            body_template: None,
            mode,
        }
    }

    #[must_use]
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_body_template(mut self, path: impl Into<String>) -> Self {
        self.body_template = Some(path.into());
        self
    }
}

/// Output of the resolve phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: NestedName,
    pub extension: String,
    pub contents: String,
}

/// Output of the validate phase: everything needed to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planned {
    pub path: String,
    pub extension: String,
    pub contents: String,
    pub created_folders: Vec<FolderPath>,
}

/// A document that now exists in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNote {
    pub path: String,
    pub extension: String,
    pub mode: OpenMode,
}

impl CreatedNote {
    /// Whether the host opens the note itself rather than in a system
    /// application.
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        self.extension == DEFAULT_EXTENSION
    }
}

/// What the selection flow should do after a note was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    /// Close the flow.
    Close,
    /// Clear the input and keep the flow open for another note.
    KeepOpen,
}

impl From<OpenMode> for FlowControl {
    fn from(mode: OpenMode) -> Self {
        if mode.is_bulk() {
            FlowControl::KeepOpen
        } else {
            FlowControl::Close
        }
    }
}

/// Sequences sanitizing, template resolution, path building, folder
/// materialization, the duplicate check, and the create call.
pub struct NoteCreator<'a, V: Vault + ?Sized> {
    vault: &'a V,
    settings: &'a Settings,
    formatter: &'a dyn DateFormatter,
    clock: &'a dyn Clock,
}

impl<'a, V: Vault + ?Sized> NoteCreator<'a, V> {
    /// A creator using the system clock and the moment-style formatter.
    #[must_use]
    pub fn new(vault: &'a V, settings: &'a Settings) -> Self {
        Self {
            vault,
            settings,
            formatter: &MomentFormatter,
            clock: &SystemClock,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: &'a dyn DateFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn vault(&self) -> &'a V {
        self.vault
    }

    #[must_use]
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Sanitize the folder, the name (after applying a title template) and
    /// the extension, then render the body template if one was chosen.
    ///
    /// # Errors
    ///
    /// - [`NoteError::Validation`] for an illegal folder, name or extension.
    /// - [`NoteError::TemplateNotFound`] if the body template cannot be read.
    pub fn resolve(&self, request: &NoteCreationRequest) -> Result<Resolved> {
        sanitize_folder(&request.folder, self.settings.windows_compatibility())?;

        let now = self.clock.now();
        let raw_name = match &request.title_template {
            Some(template) => resolve_title(template, &now, self.formatter),
            None => request.name.clone(),
        };
        tracing::debug!(name = %raw_name, "resolved note name");

        let name = sanitize_name(&raw_name, NameRules::from_settings(self.settings))?;
        let extension = sanitize_extension(
            self.settings.effective_extension(),
            self.settings.windows_compatibility(),
        )?;

        let contents = match &request.body_template {
            Some(path) => {
                let raw = self.read_template(path)?;
                let ctx = RenderContext::from_settings(self.settings, now);
                render_body(&raw, &ctx, self.formatter)
            }
            None => String::new(),
        };

        Ok(Resolved {
            name: NestedName::parse(&name),
            extension,
            contents,
        })
    }

    /// Build the final path, create any missing folders on the way to it,
    /// and confirm nothing already lives there.
    ///
    /// # Errors
    ///
    /// - [`NoteError::Validation`] if the name cannot form a path.
    /// - [`NoteError::CreationFailed`] if the store refuses a folder.
    /// - [`NoteError::AlreadyExists`] if the path is taken, ignoring case.
    pub fn validate(&self, request: &NoteCreationRequest, resolved: Resolved) -> Result<Planned> {
        let path = build_note_path(&request.folder, &resolved.name.relative(), self.settings)?;

        let created_folders = ensure_note_folders(self.vault, &request.folder, &resolved.name)
            .map_err(|e| NoteError::CreationFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        check_duplicate(self.vault, &path)?;

        Ok(Planned {
            path,
            extension: resolved.extension,
            contents: resolved.contents,
            created_folders,
        })
    }

    /// Create the document. This is the only write of the note itself.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::CreationFailed`] if the store denies the write.
    pub fn commit(&self, request: &NoteCreationRequest, planned: Planned) -> Result<CreatedNote> {
        self.vault
            .create(&planned.path, &planned.contents)
            .map_err(|e| NoteError::CreationFailed {
                path: planned.path.clone(),
                reason: e.to_string(),
            })?;
        tracing::info!(
            path = %planned.path,
            mode = %request.mode,
            folders = ?planned.created_folders,
            "created note"
        );
        Ok(CreatedNote {
            path: planned.path,
            extension: planned.extension,
            mode: request.mode,
        })
    }

    /// Run every phase.
    ///
    /// # Errors
    ///
    /// Any error of [`resolve`](Self::resolve), [`validate`](Self::validate)
    /// or [`commit`](Self::commit).
    pub fn create(&self, request: &NoteCreationRequest) -> Result<CreatedNote> {
        let resolved = self.resolve(request)?;
        let planned = self.validate(request, resolved)?;
        self.commit(request, planned)
    }

    /// Create a note and report the outcome through `shell`: open the
    /// document on success, show the failure as a notice otherwise.
    ///
    /// # Errors
    ///
    /// Returns the creation error after it has been shown.
    pub fn run<S: Shell + ?Sized>(
        &self,
        request: &NoteCreationRequest,
        shell: &mut S,
    ) -> Result<(CreatedNote, FlowControl)> {
        match self.create(request) {
            Ok(note) => {
                let control = open(&note, shell);
                Ok((note, control))
            }
            Err(e) => {
                report(&e, shell);
                Err(e)
            }
        }
    }

    fn read_template(&self, path: &str) -> Result<String> {
        if !self.vault.file_exists(path) {
            return Err(NoteError::TemplateNotFound(path.to_string()));
        }
        self.vault.read(path).map_err(|e| {
            tracing::warn!(template = path, error = %e, "failed to read body template");
            NoteError::TemplateNotFound(path.to_string())
        })
    }
}

/// Hand a created note to the host in its open mode.
pub fn open<S: Shell + ?Sized>(note: &CreatedNote, shell: &mut S) -> FlowControl {
    shell.open_document(&note.path, note.mode.view_target());
    if !note.is_markdown() {
        shell.show_message(
            &format!(
                "Created note {}, opening it on the system's default application if there is one",
                note.path
            ),
            EXTERNAL_OPEN_NOTICE_DURATION,
        );
    }
    FlowControl::from(note.mode)
}

/// Show a failure as a transient notice.
pub fn report<S: Shell + ?Sized>(error: &NoteError, shell: &mut S) {
    tracing::warn!(kind = ?error.kind(), error = %error, "note creation rejected");
    shell.show_message(&error.notice(), NOTICE_DURATION);
}
