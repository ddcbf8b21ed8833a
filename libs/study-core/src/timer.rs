//! Deferred transitions for display delays.
//!
//! An engine owns one `Timer` and at most one pending event. Scheduling a new
//! event replaces the old one. Nothing sleeps: the caller passes the current
//! time to `poll`, and the event comes back once its fire time is reached.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
struct Pending<E> {
    fires_at: DateTime<Utc>,
    event: E,
}

/// Single-slot cancellable timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer<E> {
    pending: Option<Pending<E>>,
}

impl<E> Default for Timer<E> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<E> Timer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, returning any event it replaced.
    pub fn schedule(&mut self, now: DateTime<Utc>, delay: Duration, event: E) -> Option<E> {
        let replaced = self.cancel();
        self.pending = Some(Pending {
            fires_at: now + delay,
            event,
        });
        replaced
    }

    /// Disarm the timer, returning the event that will no longer fire.
    pub fn cancel(&mut self) -> Option<E> {
        self.pending.take().map(|p| p.event)
    }

    /// Take the pending event if its fire time has been reached.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<E> {
        match &self.pending {
            Some(p) if p.fires_at <= now => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn fires_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|p| p.fires_at)
    }
}
