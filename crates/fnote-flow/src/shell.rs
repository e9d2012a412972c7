//! The host UI contract.

use std::time::Duration;

use fnote_core::ViewTarget;

/// What the flow asks of the application it is embedded in.
pub trait Shell {
    /// Show a document in the requested kind of view.
    fn open_document(&mut self, path: &str, target: ViewTarget);

    /// Show a transient message for `duration`.
    fn show_message(&mut self, text: &str, duration: Duration);
}

impl<S: Shell + ?Sized> Shell for &mut S {
    fn open_document(&mut self, path: &str, target: ViewTarget) {
        (**self).open_document(path, target);
    }

    fn show_message(&mut self, text: &str, duration: Duration) {
        (**self).show_message(text, duration);
    }
}
