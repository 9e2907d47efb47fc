//! A single pending-call slot with a quiet period.
//!
//! Each [`Debouncer::schedule`] replaces whatever was pending and restarts the
//! quiet period; only the last value scheduled before a pause is ever
//! delivered. The caller drives time explicitly by passing `now`, which keeps
//! the TUI event loop the only clock and makes the behaviour deterministic in
//! tests.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value with `value`, due `quiet` after `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending { value, due: now + self.quiet });
        tracing::trace!(superseded, "debounce: scheduled");
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drop the pending value. Returns it, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}
