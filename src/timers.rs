//! Deferred actions scheduled by the controller.
//!
//! `schedule` hands back nothing to cancel with. The host asks for the next
//! deadline, sleeps until then, and runs whatever has come due.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Deferred {
    /// Remove the invalid marker from every cell.
    ClearInvalid,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<(Instant, Deferred)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, action: Deferred) {
        self.entries.push((Instant::now() + delay, action));
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every action due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due: Vec<(Instant, Deferred)> = Vec::new();
        self.entries.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, action)| action).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
