//! Cancellable single-slot debounce timer.
//!
//! Holds at most one pending value. Every `push` replaces the value and
//! restarts the quiescence window; `poll` releases the value once the window
//! has elapsed without another push. The event loop sleeps until
//! [`Debouncer::deadline`] instead of polling on a fixed tick.
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending value and restart the window from now.
    pub fn push(&mut self, value: T) {
        self.push_at(value, Instant::now());
    }

    /// Replace the pending value and restart the window from `now`.
    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Release the pending value if its window has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Release the pending value immediately, regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Peek at the value waiting to be released.
    pub fn pending_value(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }
}
