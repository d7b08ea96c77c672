//! Debouncing of committed filter changes.
//!
//! [`Debouncer`] is a clock-driven state machine: callers push values with the
//! current instant and poll it later. Every push restarts the timer, so a
//! burst of pushes yields exactly one value, the last one, once the input has
//! been quiet for the configured delay. [`Debouncer::settle`] is the async
//! driver that sleeps until the pending deadline.

use std::time::Duration;

use tokio::time::Instant;

/// Default debounce delay.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delays a value until it has stopped changing for a fixed interval.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and restarts the timer from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Returns the pending value if its deadline has passed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self.pending.as_ref().is_some_and(|p| p.deadline <= now);
        if ready {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Returns the instant at which the pending value settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Returns true if a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Sleeps until the pending value settles and returns it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.poll(deadline)
    }
}
