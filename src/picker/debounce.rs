//! Cancellable search delay
//!
//! Each keystroke reschedules the pending search; the search only fires once
//! the input has been quiet for the configured delay. Time is passed in by the
//! caller so the event loop (and tests) decide what "now" is.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct PendingSearch {
    query: String,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<PendingSearch>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule a search for `query`, replacing any pending one
    pub fn schedule(&mut self, query: String, now: Instant) {
        self.pending = Some(PendingSearch {
            query,
            due: now + self.delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending search, if any
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending query once its delay has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod debounce_tests;
