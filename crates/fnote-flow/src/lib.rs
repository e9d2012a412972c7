//! # fnote-flow
//!
//! Sequences note creation on top of [`fnote_core`] and [`fnote_vault`]:
//! pick a folder, pick or type a title, optionally pick a body template,
//! then resolve, validate, create, and hand the document to the host.
//!
//! - [`command`]: the command catalog, one entry per [`OpenMode`]
//! - [`shell`]: the host UI contract ([`Shell`])
//! - [`suggest`]: folder and template suggestion lists
//! - [`creator`]: the [`NoteCreator`] orchestrator
//! - [`flow`]: the [`CreationFlow`] state machine
//! - [`trigger`]: ownership of the "new note" trigger subscription
//!
//! [`OpenMode`]: fnote_core::OpenMode

pub mod command;
pub mod creator;
pub mod flow;
pub mod shell;
pub mod suggest;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_utils;

pub use command::{commands, Command};
pub use creator::{CreatedNote, FlowControl, NoteCreationRequest, NoteCreator};
pub use flow::{CreationFlow, FlowState, Input, Phase, Step};
pub use shell::Shell;
pub use suggest::{Suggestion, SuggestionKind};
pub use trigger::{NewNoteTrigger, TriggerHost};
