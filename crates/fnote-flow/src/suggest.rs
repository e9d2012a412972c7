//! Suggestion lists for the folder picker, the title picker, and the
//! templates-folder setting.

use fnote_core::fuzzy::{self, Segment};
use fnote_core::template::is_body_template;
use fnote_core::{FolderPath, Settings};
use fnote_vault::Vault;

/// Where a title-phase suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// A date pattern from `noteTitleTemplates`.
    TitleTemplate,
    /// A document under `noteTemplatesFolder`, used as the note body.
    NoteTemplate,
}

/// One entry of the title picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The template string, or the body template's path.
    pub text: String,
    pub kind: SuggestionKind,
    /// The trimmed query this suggestion matched, kept for highlighting.
    pub query: String,
}

impl Suggestion {
    fn new(text: impl Into<String>, kind: SuggestionKind, query: &str) -> Self {
        Self {
            text: text.into(),
            kind,
            query: query.to_string(),
        }
    }

    /// Matched and unmatched runs of [`Suggestion::text`].
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        fuzzy::highlight(&self.text, &self.query)
    }
}

/// Every folder of the store matching `query`, the root first.
#[must_use]
pub fn folder_suggestions<V: Vault + ?Sized>(vault: &V, query: &str) -> Vec<FolderPath> {
    let mut folders = vec![FolderPath::root()];
    folders.extend(vault.folders());
    fuzzy::filter_by(query, folders, |f| f.as_str())
}

/// Title templates matching `query`, in configured order.
#[must_use]
pub fn title_template_suggestions(settings: &Settings, query: &str) -> Vec<Suggestion> {
    let query = query.trim();
    fuzzy::filter_by(query, settings.title_templates(), |t| *t)
        .into_iter()
        .map(|t| Suggestion::new(t, SuggestionKind::TitleTemplate, query))
        .collect()
}

/// Body templates matching `query`: documents under the templates folder.
#[must_use]
pub fn note_template_suggestions<V: Vault + ?Sized>(
    vault: &V,
    settings: &Settings,
    query: &str,
) -> Vec<Suggestion> {
    let query = query.trim();
    let templates = vault
        .files()
        .into_iter()
        .filter(|path| is_body_template(path, &settings.note_templates_folder));
    fuzzy::filter_by(query, templates, String::as_str)
        .into_iter()
        .map(|path| Suggestion::new(path, SuggestionKind::NoteTemplate, query))
        .collect()
}

/// The title picker's list.
///
/// With neither template kind enabled the list is empty. Once a body
/// template has been chosen only title templates are offered; otherwise
/// title templates (when enabled) come before body templates (when
/// enabled).
#[must_use]
pub fn title_phase_suggestions<V: Vault + ?Sized>(
    vault: &V,
    settings: &Settings,
    query: &str,
    body_template_selected: bool,
) -> Vec<Suggestion> {
    if !settings.use_note_title_templates && !settings.use_note_templates {
        return Vec::new();
    }
    if body_template_selected {
        return title_template_suggestions(settings, query);
    }

    let mut out = Vec::new();
    if settings.use_note_title_templates {
        out.extend(title_template_suggestions(settings, query));
    }
    if settings.use_note_templates {
        out.extend(note_template_suggestions(vault, settings, query));
    }
    out
}

/// Folders offered for the templates-folder setting: those whose path
/// contains `query` ignoring case, at most `limit` of them.
#[must_use]
pub fn template_folder_suggestions<V: Vault + ?Sized>(
    vault: &V,
    query: &str,
    limit: usize,
) -> Vec<FolderPath> {
    let needle = query.trim().to_lowercase();
    std::iter::once(FolderPath::root())
        .chain(vault.folders())
        .filter(|f| f.as_str().to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnote_vault::InMemoryVault;

    fn vault() -> InMemoryVault {
        InMemoryVault::with_files([
            ("Templates/daily.md", "# {{date}}"),
            ("Templates/meeting.md", "## {{time}}"),
            ("Projects/plan.md", ""),
        ])
        .with_folders(["Archive/2024"])
    }

    fn settings() -> Settings {
        Settings {
            use_note_title_templates: true,
            note_title_templates: "YYYY-MM-DD\n\nDo MMMM\n".to_string(),
            use_note_templates: true,
            note_templates_folder: "Templates".to_string(),
            ..Settings::default()
        }
    }

    // === Folders ===

    #[test]
    fn folders_include_root_first() {
        let all = folder_suggestions(&vault(), "");
        assert_eq!(all[0], FolderPath::root());
        assert!(all.contains(&FolderPath::new("Archive/2024")));
        assert!(all.contains(&FolderPath::new("Templates")));
    }

    #[test]
    fn folders_filter_fuzzily() {
        let hits = folder_suggestions(&vault(), "arc 24");
        assert_eq!(hits, vec![FolderPath::new("Archive/2024")]);
    }

    // === Title phase ===

    #[test]
    fn title_templates_precede_body_templates() {
        let list = title_phase_suggestions(&vault(), &settings(), "", false);
        let kinds: Vec<_> = list.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::TitleTemplate,
                SuggestionKind::TitleTemplate,
                SuggestionKind::NoteTemplate,
                SuggestionKind::NoteTemplate,
            ]
        );
        assert_eq!(list[0].text, "YYYY-MM-DD");
        assert_eq!(list[2].text, "Templates/daily.md");
    }

    #[test]
    fn only_title_templates_once_a_body_template_is_chosen() {
        let list = title_phase_suggestions(&vault(), &settings(), "", true);
        assert!(list.iter().all(|s| s.kind == SuggestionKind::TitleTemplate));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn nothing_when_templates_are_disabled() {
        let settings = Settings {
            use_note_title_templates: false,
            use_note_templates: false,
            ..settings()
        };
        assert!(title_phase_suggestions(&vault(), &settings, "", false).is_empty());
    }

    #[test]
    fn body_templates_only_come_from_the_templates_folder() {
        let list = note_template_suggestions(&vault(), &settings(), "");
        assert!(list.iter().all(|s| s.text.starts_with("Templates/")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn query_is_trimmed_and_kept_for_highlighting() {
        let list = note_template_suggestions(&vault(), &settings(), "  meet ");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].query, "meet");
        let matched: String = list[0]
            .segments()
            .into_iter()
            .filter(|s| s.matched)
            .map(|s| s.text)
            .collect();
        assert_eq!(matched, "meet");
    }

    // === Template folder setting ===

    #[test]
    fn template_folders_match_substrings_up_to_the_limit() {
        let vault = InMemoryVault::new().with_folders(["t1", "t2", "t3", "misc"]);
        let hits = template_folder_suggestions(&vault, "T", 2);
        assert_eq!(hits, vec![FolderPath::new("t1"), FolderPath::new("t2")]);
    }
}
