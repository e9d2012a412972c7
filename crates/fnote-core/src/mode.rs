//! Open modes: where a created note is shown, and whether the flow stays open.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// The kind of view the host opens a document in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewTarget {
    NewTab,
    CurrentTab,
    NewWindow,
    SplitHorizontal,
    SplitVertical,
}

impl ViewTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewTarget::NewTab => "new-tab",
            ViewTarget::CurrentTab => "current-tab",
            ViewTarget::NewWindow => "new-window",
            ViewTarget::SplitHorizontal => "split-horizontal",
            ViewTarget::SplitVertical => "split-vertical",
        }
    }
}

impl fmt::Display for ViewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creation-flow variant: a view target, optionally in bulk.
///
/// Bulk modes keep the flow open after each note so several can be created
/// in a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenMode {
    #[default]
    NewTab,
    CurrentTab,
    NewWindow,
    SplitHorizontal,
    SplitVertical,
    BulkNewTab,
    BulkCurrentTab,
    BulkNewWindow,
    BulkSplitHorizontal,
    BulkSplitVertical,
}

impl OpenMode {
    pub const ALL: [OpenMode; 10] = [
        OpenMode::NewTab,
        OpenMode::CurrentTab,
        OpenMode::NewWindow,
        OpenMode::SplitHorizontal,
        OpenMode::SplitVertical,
        OpenMode::BulkNewTab,
        OpenMode::BulkCurrentTab,
        OpenMode::BulkNewWindow,
        OpenMode::BulkSplitHorizontal,
        OpenMode::BulkSplitVertical,
    ];

    #[must_use]
    pub fn view_target(self) -> ViewTarget {
        match self {
            OpenMode::NewTab | OpenMode::BulkNewTab => ViewTarget::NewTab,
            OpenMode::CurrentTab | OpenMode::BulkCurrentTab => ViewTarget::CurrentTab,
            OpenMode::NewWindow | OpenMode::BulkNewWindow => ViewTarget::NewWindow,
            OpenMode::SplitHorizontal | OpenMode::BulkSplitHorizontal => {
                ViewTarget::SplitHorizontal
            }
            OpenMode::SplitVertical | OpenMode::BulkSplitVertical => ViewTarget::SplitVertical,
        }
    }

    #[must_use]
    pub fn is_bulk(self) -> bool {
        matches!(
            self,
            OpenMode::BulkNewTab
                | OpenMode::BulkCurrentTab
                | OpenMode::BulkNewWindow
                | OpenMode::BulkSplitHorizontal
                | OpenMode::BulkSplitVertical
        )
    }

    /// Stable kebab-case id, also used as the command id.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            OpenMode::NewTab => "new-tab",
            OpenMode::CurrentTab => "current-tab",
            OpenMode::NewWindow => "new-window",
            OpenMode::SplitHorizontal => "split-horizontal",
            OpenMode::SplitVertical => "split-vertical",
            OpenMode::BulkNewTab => "bulk-new-tab",
            OpenMode::BulkCurrentTab => "bulk-current-tab",
            OpenMode::BulkNewWindow => "bulk-new-window",
            OpenMode::BulkSplitHorizontal => "bulk-split-horizontal",
            OpenMode::BulkSplitVertical => "bulk-split-vertical",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OpenMode {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpenMode::ALL
            .into_iter()
            .find(|mode| mode.id() == s.trim())
            .ok_or_else(|| NoteError::Settings(format!("unknown open mode '{s}'")))
    }
}
