//! The persisted settings record.
//!
//! Loaded once at startup, edited key by key, and written back after every
//! edit. A creation flow only ever reads it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};
use crate::mode::OpenMode;

pub const DEFAULT_EXTENSION: &str = ".md";
pub const DEFAULT_UNTITLED_NAME: &str = "Untitled";
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm";
pub const DEFAULT_FOLDER_SUGGESTION_LIMIT: usize = 5;

/// User configuration for note creation.
///
/// Every field has a default, so a partially written file loads cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub show_instructions: bool,
    pub windows_note_title_compatibility: bool,
    pub allow_untitled_notes: bool,
    pub default_note_extension: String,
    pub untitled_note_name: String,
    pub use_note_title_templates: bool,
    /// Newline-delimited title templates.
    pub note_title_templates: String,
    pub use_note_templates: bool,
    pub note_templates_folder: String,
    pub date_format: String,
    pub time_format: String,
    pub override_new_note: bool,
    pub override_command: OpenMode,
    pub folder_suggestion_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_instructions: true,
            windows_note_title_compatibility: false,
            allow_untitled_notes: true,
            default_note_extension: DEFAULT_EXTENSION.to_string(),
            untitled_note_name: DEFAULT_UNTITLED_NAME.to_string(),
            use_note_title_templates: false,
            note_title_templates: String::new(),
            use_note_templates: true,
            note_templates_folder: String::new(),
            date_format: String::new(),
            time_format: String::new(),
            override_new_note: false,
            override_command: OpenMode::NewTab,
            folder_suggestion_limit: DEFAULT_FOLDER_SUGGESTION_LIMIT,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the file cannot be read and
    /// [`NoteError::Settings`] if it is not valid JSON for this record.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)
            .map_err(|e| NoteError::Settings(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings as pretty JSON, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| NoteError::Settings(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Set one field by its persisted (camelCase) key.
    ///
    /// Text values are trimmed the way the settings surface trims them.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Settings`] for an unknown key or a value that does
    /// not parse for the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let text = value.trim().to_string();
        match key {
            "showInstructions" => self.show_instructions = parse_bool(key, value)?,
            "windowsNoteTitleCompatibility" => {
                self.windows_note_title_compatibility = parse_bool(key, value)?;
            }
            "allowUntitledNotes" => self.allow_untitled_notes = parse_bool(key, value)?,
            "defaultNoteExtension" => self.default_note_extension = text,
            "untitledNoteName" => self.untitled_note_name = text,
            "useNoteTitleTemplates" => self.use_note_title_templates = parse_bool(key, value)?,
            "noteTitleTemplates" => self.note_title_templates = text,
            "useNoteTemplates" => self.use_note_templates = parse_bool(key, value)?,
            "noteTemplatesFolder" => self.note_templates_folder = text,
            "dateFormat" => self.date_format = text,
            "timeFormat" => self.time_format = text,
            "overrideNewNote" => self.override_new_note = parse_bool(key, value)?,
            "overrideCommand" => self.override_command = text.parse()?,
            "folderSuggestionLimit" => {
                self.folder_suggestion_limit = text
                    .parse()
                    .map_err(|_| NoteError::Settings(format!("{key}: expected a number")))?;
            }
            other => return Err(NoteError::Settings(format!("unknown setting '{other}'"))),
        }
        Ok(())
    }

    /// The configured extension, or `.md` when it is empty.
    #[must_use]
    pub fn effective_extension(&self) -> &str {
        non_empty_or(&self.default_note_extension, DEFAULT_EXTENSION)
    }

    /// The configured untitled-note name, or `Untitled` when it is empty.
    #[must_use]
    pub fn effective_untitled_name(&self) -> &str {
        non_empty_or(&self.untitled_note_name, DEFAULT_UNTITLED_NAME)
    }

    #[must_use]
    pub fn effective_date_format(&self) -> &str {
        non_empty_or(&self.date_format, DEFAULT_DATE_FORMAT)
    }

    #[must_use]
    pub fn effective_time_format(&self) -> &str {
        non_empty_or(&self.time_format, DEFAULT_TIME_FORMAT)
    }

    /// The title-template catalog: one trimmed template per non-blank line.
    #[must_use]
    pub fn title_templates(&self) -> Vec<&str> {
        self.note_title_templates
            .lines()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Whether Windows-illegal characters are rejected. Always on when
    /// running on Windows.
    #[must_use]
    pub fn windows_compatibility(&self) -> bool {
        cfg!(windows) || self.windows_note_title_compatibility
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(NoteError::Settings(format!(
            "{key}: expected true or false, got '{value}'"
        ))),
    }
}
