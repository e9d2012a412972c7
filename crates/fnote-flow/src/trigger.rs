//! Ownership of the host's "new note" trigger.
//!
//! When `overrideNewNote` is on, the host's own new-note action starts a
//! creation flow instead. [`NewNoteTrigger`] holds the single subscription
//! that makes this happen and gives it back when disabled or dropped.

use fnote_core::{OpenMode, Settings};

/// A host that lets fnote intercept its new-note action.
pub trait TriggerHost {
    type Handle;

    /// Start routing the new-note action to a flow in `mode`.
    fn subscribe(&mut self, mode: OpenMode) -> Self::Handle;

    /// Stop routing. Consumes the handle.
    fn unsubscribe(&mut self, handle: Self::Handle);
}

impl<H: TriggerHost + ?Sized> TriggerHost for &mut H {
    type Handle = H::Handle;

    fn subscribe(&mut self, mode: OpenMode) -> Self::Handle {
        (**self).subscribe(mode)
    }

    fn unsubscribe(&mut self, handle: Self::Handle) {
        (**self).unsubscribe(handle);
    }
}

/// At most one live subscription.
pub struct NewNoteTrigger<H: TriggerHost> {
    host: H,
    active: Option<(H::Handle, OpenMode)>,
}

impl<H: TriggerHost> NewNoteTrigger<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self { host, active: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// The mode of the live subscription.
    #[must_use]
    pub fn mode(&self) -> Option<OpenMode> {
        self.active.as_ref().map(|(_, mode)| *mode)
    }

    /// Subscribe in `mode`. Returns `false` if already subscribed in that
    /// mode; a subscription in another mode is replaced.
    pub fn enable(&mut self, mode: OpenMode) -> bool {
        if self.mode() == Some(mode) {
            return false;
        }
        self.disable();
        let handle = self.host.subscribe(mode);
        tracing::debug!(%mode, "new-note trigger enabled");
        self.active = Some((handle, mode));
        true
    }

    /// Release the subscription. Returns `false` if there was none.
    pub fn disable(&mut self) -> bool {
        match self.active.take() {
            Some((handle, _)) => {
                self.host.unsubscribe(handle);
                tracing::debug!("new-note trigger disabled");
                true
            }
            None => false,
        }
    }

    /// Follow `overrideNewNote` and `overrideCommand`.
    pub fn sync(&mut self, settings: &Settings) {
        if settings.override_new_note {
            self.enable(settings.override_command);
        } else {
            self.disable();
        }
    }
}

impl<H: TriggerHost> Drop for NewNoteTrigger<H> {
    fn drop(&mut self) {
        self.disable();
    }
}
