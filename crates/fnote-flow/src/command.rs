//! The command catalog registered with the host's command palette.

use fnote_core::OpenMode;

/// One palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub id: &'static str,
    pub name: &'static str,
    pub mode: OpenMode,
}

/// Every command, one per open mode, single modes first.
#[must_use]
pub fn commands() -> Vec<Command> {
    OpenMode::ALL
        .iter()
        .map(|&mode| Command {
            id: mode.id(),
            name: display_name(mode),
            mode,
        })
        .collect()
}

fn display_name(mode: OpenMode) -> &'static str {
    match mode {
        OpenMode::NewTab => "Create note in a new tab",
        OpenMode::CurrentTab => "Create note in current tab",
        OpenMode::NewWindow => "Create note in a new window",
        OpenMode::SplitHorizontal => "Create note in a horizontal split",
        OpenMode::SplitVertical => "Create note in a vertical split",
        OpenMode::BulkNewTab => "Create notes in new tabs",
        OpenMode::BulkCurrentTab => "Create notes in current tab",
        OpenMode::BulkNewWindow => "Create notes in new windows",
        OpenMode::BulkSplitHorizontal => "Create notes in horizontal splits",
        OpenMode::BulkSplitVertical => "Create notes in vertical splits",
    }
}
