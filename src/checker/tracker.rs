//! Transition detection and poll scheduling for a single target.

use std::time::Duration;

use crate::status::Status;

/// Remembers the last classification of one target and reports changes.
///
/// The tracker starts empty, so the very first classification always counts
/// as a transition.
#[derive(Debug, Default)]
pub struct TransitionTracker {
    last: Option<Status>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record a classification. Returns `Some(status)` when it differs from
    /// the previous one, `None` when nothing changed.
    pub fn record(&mut self, status: Status) -> Option<Status> {
        if self.last == Some(status) {
            None
        } else {
            self.last = Some(status);
            Some(status)
        }
    }

    pub fn last(&self) -> Option<Status> {
        self.last
    }
}

/// How long to wait before probing again: `delay` while online, twice that
/// while offline.
pub fn next_wait(status: Status, delay: Duration) -> Duration {
    match status {
        Status::Online => delay,
        Status::Offline => delay.saturating_mul(2),
    }
}
