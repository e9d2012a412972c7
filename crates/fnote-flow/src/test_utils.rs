//! Shared fixtures for flow tests.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use fnote_core::ViewTarget;

use crate::shell::Shell;

/// 2025-02-10 09:15:30 UTC.
pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2025, 2, 10, 9, 15, 30)
        .unwrap()
}

/// A shell that records every request.
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub opened: Vec<(String, ViewTarget)>,
    pub messages: Vec<(String, Duration)>,
}

impl Shell for RecordingShell {
    fn open_document(&mut self, path: &str, target: ViewTarget) {
        self.opened.push((path.to_string(), target));
    }

    fn show_message(&mut self, text: &str, duration: Duration) {
        self.messages.push((text.to_string(), duration));
    }
}
