//! The interactive creation flow as an explicit state machine.
//!
//! ```text
//! AwaitingFolder -> AwaitingTitle -> Resolving -> Validating -> Creating -> Opened
//!                        ^   |            \____________\___________\-----> Failed
//!                        |___| (body template chosen, bulk success,
//!                               correctable failure)
//! ```
//!
//! Selecting with the keyboard leaves the Enter release of that keystroke
//! to be delivered to the next prompt. `AwaitingTitle` therefore starts out
//! `just_opened` after a keyboard selection and swallows exactly one Enter.

use fnote_core::error::Result;
use fnote_core::{FailureKind, FolderPath, NoteError, OpenMode};
use fnote_vault::Vault;

use crate::creator::{self, CreatedNote, FlowControl, NoteCreationRequest, NoteCreator};
use crate::shell::Shell;
use crate::suggest::{self, Suggestion, SuggestionKind};

/// How a selection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Keyboard,
    Pointer,
}

/// The flow's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    AwaitingFolder,
    AwaitingTitle {
        folder: FolderPath,
        body_template: Option<String>,
        just_opened: bool,
    },
    Opened {
        path: String,
    },
    Failed {
        kind: FailureKind,
    },
    Cancelled,
}

impl FlowState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            FlowState::AwaitingFolder => Phase::AwaitingFolder,
            FlowState::AwaitingTitle { .. } => Phase::AwaitingTitle,
            FlowState::Opened { .. } => Phase::Opened,
            FlowState::Failed { .. } => Phase::Failed,
            FlowState::Cancelled => Phase::Cancelled,
        }
    }

    /// Whether the flow still accepts input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            FlowState::AwaitingFolder | FlowState::AwaitingTitle { .. }
        )
    }
}

/// Every phase a flow can pass through, including the transient creation
/// phases that never rest as a [`FlowState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingFolder,
    AwaitingTitle,
    Resolving,
    Validating,
    Creating,
    Opened,
    Failed,
    Cancelled,
}

/// The result of feeding one event to the flow.
#[derive(Debug)]
pub enum Step {
    /// The event does not apply in the current state.
    Ignored,
    /// The flow now waits for a title.
    AwaitTitle,
    /// A note was created and handed to the shell.
    Created {
        note: CreatedNote,
        control: FlowControl,
    },
    /// The attempt failed and the failure was shown.
    Rejected(NoteError),
}

/// One creation flow, from folder selection to an opened note.
pub struct CreationFlow<'a, V: Vault + ?Sized> {
    creator: NoteCreator<'a, V>,
    mode: OpenMode,
    state: FlowState,
    trace: Vec<Phase>,
}

impl<'a, V: Vault + ?Sized> CreationFlow<'a, V> {
    #[must_use]
    pub fn new(creator: NoteCreator<'a, V>, mode: OpenMode) -> Self {
        Self {
            creator,
            mode,
            state: FlowState::AwaitingFolder,
            trace: vec![Phase::AwaitingFolder],
        }
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Phases entered so far, oldest first.
    #[must_use]
    pub fn trace(&self) -> &[Phase] {
        &self.trace
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Folders to offer while awaiting a folder.
    #[must_use]
    pub fn folder_suggestions(&self, query: &str) -> Vec<FolderPath> {
        match self.state {
            FlowState::AwaitingFolder => suggest::folder_suggestions(self.creator.vault(), query),
            _ => Vec::new(),
        }
    }

    /// Titles and templates to offer while awaiting a title.
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        match &self.state {
            FlowState::AwaitingTitle { body_template, .. } => suggest::title_phase_suggestions(
                self.creator.vault(),
                self.creator.settings(),
                query,
                body_template.is_some(),
            ),
            _ => Vec::new(),
        }
    }

    /// Select the folder the note goes into. The folder need not exist yet.
    pub fn choose_folder(&mut self, folder: FolderPath, via: Input) -> Step {
        if self.state != FlowState::AwaitingFolder {
            return Step::Ignored;
        }
        tracing::debug!(folder = %folder, "folder chosen");
        self.transition(FlowState::AwaitingTitle {
            folder,
            body_template: None,
            just_opened: via == Input::Keyboard,
        });
        Step::AwaitTitle
    }

    /// Handle an Enter release in the title prompt.
    ///
    /// The first release after a keyboard selection is swallowed. Otherwise
    /// the highlighted suggestion (or the first, when the highlight is out
    /// of range) is chosen, and with no suggestions the typed text is
    /// submitted as the name.
    pub fn enter<S: Shell + ?Sized>(
        &mut self,
        input: &str,
        highlighted: Option<usize>,
        shell: &mut S,
    ) -> Step {
        let FlowState::AwaitingTitle { just_opened, .. } = &mut self.state else {
            return Step::Ignored;
        };
        if *just_opened {
            *just_opened = false;
            return Step::Ignored;
        }

        let suggestions = self.suggestions(input);
        let picked = highlighted
            .and_then(|i| suggestions.get(i))
            .or_else(|| suggestions.first())
            .cloned();
        match picked {
            Some(suggestion) => self.choose(&suggestion, Input::Keyboard, shell),
            None => self.submit(input, shell),
        }
    }

    /// Choose a title-phase suggestion.
    ///
    /// A title template creates the note at once. A body template is
    /// remembered and the flow asks for a title again.
    pub fn choose<S: Shell + ?Sized>(
        &mut self,
        suggestion: &Suggestion,
        via: Input,
        shell: &mut S,
    ) -> Step {
        let FlowState::AwaitingTitle {
            folder,
            body_template,
            ..
        } = &self.state
        else {
            return Step::Ignored;
        };

        match suggestion.kind {
            SuggestionKind::TitleTemplate => {
                let mut request = NoteCreationRequest::new(folder.clone(), "", self.mode)
                    .with_title_template(&suggestion.text);
                request.body_template = body_template.clone();
                self.attempt(request, shell)
            }
            SuggestionKind::NoteTemplate => {
                tracing::debug!(template = %suggestion.text, "body template chosen");
                let next = FlowState::AwaitingTitle {
                    folder: folder.clone(),
                    body_template: Some(suggestion.text.clone()),
                    just_opened: via == Input::Keyboard,
                };
                self.transition(next);
                Step::AwaitTitle
            }
        }
    }

    /// Create a note named by the typed text.
    pub fn submit<S: Shell + ?Sized>(&mut self, input: &str, shell: &mut S) -> Step {
        let FlowState::AwaitingTitle {
            folder,
            body_template,
            ..
        } = &self.state
        else {
            return Step::Ignored;
        };
        let mut request = NoteCreationRequest::new(folder.clone(), input, self.mode);
        request.body_template = body_template.clone();
        self.attempt(request, shell)
    }

    /// Close the flow. An attempt that already finished is unaffected.
    pub fn cancel(&mut self) {
        if self.state.is_open() {
            self.transition(FlowState::Cancelled);
        }
    }

    fn attempt<S: Shell + ?Sized>(&mut self, request: NoteCreationRequest, shell: &mut S) -> Step {
        match self.run_phases(&request) {
            Ok(note) => {
                let control = creator::open(&note, shell);
                let next = match control {
                    FlowControl::Close => FlowState::Opened {
                        path: note.path.clone(),
                    },
                    FlowControl::KeepOpen => FlowState::AwaitingTitle {
                        folder: request.folder,
                        body_template: request.body_template,
                        just_opened: false,
                    },
                };
                self.transition(next);
                Step::Created { note, control }
            }
            Err(e) => {
                creator::report(&e, shell);
                let next = if e.is_terminal() {
                    FlowState::Failed { kind: e.kind() }
                } else {
                    FlowState::AwaitingTitle {
                        folder: request.folder,
                        body_template: request.body_template,
                        just_opened: false,
                    }
                };
                self.transition(next);
                Step::Rejected(e)
            }
        }
    }

    fn run_phases(&mut self, request: &NoteCreationRequest) -> Result<CreatedNote> {
        self.trace.push(Phase::Resolving);
        let resolved = self.creator.resolve(request)?;
        self.trace.push(Phase::Validating);
        let planned = self.creator.validate(request, resolved)?;
        self.trace.push(Phase::Creating);
        self.creator.commit(request, planned)
    }

    fn transition(&mut self, next: FlowState) {
        self.trace.push(next.phase());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed_now, RecordingShell};
    use fnote_core::{FixedClock, Settings, ViewTarget};
    use fnote_vault::InMemoryVault;

    fn template_settings() -> Settings {
        Settings {
            use_note_title_templates: true,
            note_title_templates: "YYYY-MM-DD".to_string(),
            use_note_templates: true,
            note_templates_folder: "Templates".to_string(),
            ..Settings::default()
        }
    }

    fn plain_settings() -> Settings {
        Settings {
            use_note_templates: false,
            ..Settings::default()
        }
    }

    // === Folder phase ===

    #[test]
    fn starts_awaiting_a_folder() {
        let vault = InMemoryVault::new().with_folders(["Inbox"]);
        let settings = plain_settings();
        let flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        assert_eq!(flow.state(), &FlowState::AwaitingFolder);
        assert_eq!(
            flow.folder_suggestions("inb"),
            vec![FolderPath::new("Inbox")]
        );
        assert!(flow.suggestions("").is_empty());
    }

    #[test]
    fn keyboard_folder_choice_swallows_one_enter() {
        let vault = InMemoryVault::new();
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        assert!(matches!(
            flow.choose_folder(FolderPath::new("Inbox"), Input::Keyboard),
            Step::AwaitTitle
        ));
        assert!(matches!(flow.enter("Idea", None, &mut shell), Step::Ignored));
        assert!(!vault.file_exists("Inbox/Idea.md"));

        assert!(matches!(
            flow.enter("Idea", None, &mut shell),
            Step::Created { .. }
        ));
        assert!(vault.file_exists("Inbox/Idea.md"));
    }

    #[test]
    fn pointer_folder_choice_does_not_swallow_enter() {
        let vault = InMemoryVault::new();
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::root(), Input::Pointer);
        assert!(matches!(
            flow.enter("Idea", None, &mut shell),
            Step::Created { .. }
        ));
    }

    // === Title phase ===

    #[test]
    fn single_mode_success_ends_opened() {
        let vault = InMemoryVault::new();
        let settings = plain_settings();
        let mut flow =
            CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::CurrentTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::new("A/B"), Input::Pointer);
        flow.submit("Foo", &mut shell);

        assert_eq!(
            flow.state(),
            &FlowState::Opened {
                path: "A/B/Foo.md".to_string()
            }
        );
        assert!(!flow.is_open());
        assert_eq!(
            flow.trace(),
            &[
                Phase::AwaitingFolder,
                Phase::AwaitingTitle,
                Phase::Resolving,
                Phase::Validating,
                Phase::Creating,
                Phase::Opened,
            ]
        );
        assert_eq!(
            shell.opened,
            vec![("A/B/Foo.md".to_string(), ViewTarget::CurrentTab)]
        );
    }

    #[test]
    fn bulk_mode_stays_open_for_more_notes() {
        let vault = InMemoryVault::new();
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::BulkNewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::new("Inbox"), Input::Pointer);
        assert!(matches!(
            flow.submit("one", &mut shell),
            Step::Created {
                control: FlowControl::KeepOpen,
                ..
            }
        ));
        flow.submit("two", &mut shell);

        assert!(flow.is_open());
        assert!(vault.file_exists("Inbox/one.md"));
        assert!(vault.file_exists("Inbox/two.md"));
        assert_eq!(shell.opened.len(), 2);
    }

    #[test]
    fn correctable_failure_keeps_the_flow_open() {
        let vault = InMemoryVault::with_files([("Foo.md", "")]);
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::root(), Input::Pointer);
        let step = flow.submit("FOO", &mut shell);
        assert!(matches!(&step, Step::Rejected(e) if e.kind() == FailureKind::AlreadyExists));
        assert!(matches!(flow.state(), FlowState::AwaitingTitle { .. }));
        assert_eq!(shell.messages.len(), 1);

        assert!(matches!(flow.submit("Bar", &mut shell), Step::Created { .. }));
    }

    #[test]
    fn denied_write_fails_the_flow() {
        let vault = InMemoryVault::new();
        vault.set_read_only(true).unwrap();
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::root(), Input::Pointer);
        flow.submit("Foo", &mut shell);
        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                kind: FailureKind::CreationFailed
            }
        );
        assert!(matches!(flow.submit("Foo", &mut shell), Step::Ignored));
        assert_eq!(flow.trace().last(), Some(&Phase::Failed));
    }

    // === Templates ===

    #[test]
    fn enter_picks_the_highlighted_title_template() {
        let vault = InMemoryVault::new();
        let settings = template_settings();
        let clock = FixedClock(fixed_now());
        let creator = NoteCreator::new(&vault, &settings).with_clock(&clock);
        let mut flow = CreationFlow::new(creator, OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::new("Daily"), Input::Pointer);
        flow.enter("", Some(0), &mut shell);
        assert!(vault.file_exists("Daily/2025-02-10.md"));
    }

    #[test]
    fn enter_without_suggestions_submits_the_typed_name() {
        let vault = InMemoryVault::new();
        let settings = template_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::root(), Input::Pointer);
        assert!(flow.suggestions("zzz").is_empty());
        flow.enter("zzz", Some(0), &mut shell);
        assert!(vault.file_exists("zzz.md"));
    }

    #[test]
    fn body_template_then_title_template() {
        let vault = InMemoryVault::with_files([("Templates/daily.md", "Log for {{date}}")]);
        let settings = template_settings();
        let clock = FixedClock(fixed_now());
        let creator = NoteCreator::new(&vault, &settings).with_clock(&clock);
        let mut flow = CreationFlow::new(creator, OpenMode::NewTab);
        let mut shell = RecordingShell::default();

        flow.choose_folder(FolderPath::new("Journal"), Input::Keyboard);
        flow.enter("", None, &mut shell);

        let listed = flow.suggestions("daily");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].kind, SuggestionKind::NoteTemplate);
        assert!(matches!(
            flow.enter("daily", Some(0), &mut shell),
            Step::AwaitTitle
        ));
        assert_eq!(
            flow.state(),
            &FlowState::AwaitingTitle {
                folder: FolderPath::new("Journal"),
                body_template: Some("Templates/daily.md".to_string()),
                just_opened: true,
            }
        );

        let listed = flow.suggestions("");
        assert!(listed.iter().all(|s| s.kind == SuggestionKind::TitleTemplate));

        flow.enter("", Some(0), &mut shell);
        flow.enter("", Some(0), &mut shell);
        assert_eq!(
            vault.read("Journal/2025-02-10.md").unwrap(),
            "Log for 2025-02-10"
        );
    }

    // === Cancellation ===

    #[test]
    fn cancel_closes_an_open_flow_only() {
        let vault = InMemoryVault::new();
        let settings = plain_settings();
        let mut flow = CreationFlow::new(NoteCreator::new(&vault, &settings), OpenMode::NewTab);
        flow.cancel();
        assert_eq!(flow.state(), &FlowState::Cancelled);
        assert!(matches!(
            flow.choose_folder(FolderPath::root(), Input::Pointer),
            Step::Ignored
        ));
    }
}
