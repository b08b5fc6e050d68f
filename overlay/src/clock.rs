//! Virtual time: clocks, one-shot delays, and trailing-edge debouncing.
//!
//! DESIGN
//! ======
//! Nothing here owns a real timer. Each primitive records a deadline and
//! reports whether it is due when polled with the current time. The browser
//! glue arms a single host timeout for the earliest pending deadline; tests
//! advance a [`ManualClock`] instead.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::cell::Cell;

/// Milliseconds on some monotonic-enough timeline.
pub type Millis = u64;

pub trait Clock {
    fn now(&self) -> Millis;
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, by: Millis) -> Millis {
        let next = self.now.get().saturating_add(by);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

/// A cancellable one-shot timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delay {
    deadline: Option<Millis>,
}

impl Delay {
    /// (Re)start so the delay is due `after` ms from `now`.
    pub fn start(&mut self, now: Millis, after: Millis) {
        self.deadline = Some(now.saturating_add(after));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Consume the delay if it is due at `now`.
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Trailing-edge debouncer.
///
/// Every [`push`](Self::push) replaces the captured value and restarts the
/// window, so [`fire`](Self::fire) yields only the latest value, once, after
/// the input has been quiet for the full delay.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Millis) -> Self {
        Self { delay, pending: None }
    }

    pub fn push(&mut self, now: Millis, value: T) {
        self.pending = Some((now.saturating_add(self.delay), value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Take the captured value if the window has elapsed at `now`.
    pub fn fire(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some((at, _)) if *at <= now => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }
}

/// Earliest of several optional deadlines.
#[must_use]
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Millis>>) -> Option<Millis> {
    deadlines.into_iter().flatten().min()
}
