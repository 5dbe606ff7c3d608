//! Cancellable scheduled-task model for debounced effects.
//!
//! Scheduling replaces any pending flush and re-arms the delay, so a burst
//! of updates yields at most one flush per quiet period. The debouncer
//! holds the value and its deadline; the host event loop calls
//! [`Debouncer::poll`] from its timer tick.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value` to flush one delay from `now`, cancelling any
    /// previously scheduled value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Takes the scheduled value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|pending| pending.due <= now) {
            return self.pending.take().map(|pending| pending.value);
        }
        None
    }

    /// Flushes immediately, ignoring the remaining delay.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn poll_before_the_deadline_yields_nothing() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();
        debouncer.schedule("a", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + DELAY), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rescheduling_cancels_the_prior_value_and_rearms_the_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();
        debouncer.schedule("a", start);
        debouncer.schedule("b", start + Duration::from_millis(200));

        // The first deadline passes without a flush.
        assert_eq!(debouncer.poll(start + DELAY), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(200) + DELAY),
            Some("b")
        );
    }

    #[test]
    fn at_most_one_flush_per_quiet_period() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();
        debouncer.schedule("a", start);

        let flushed = debouncer.poll(start + DELAY);
        assert_eq!(flushed, Some("a"));
        assert_eq!(debouncer.poll(start + DELAY * 2), None);
    }

    #[test]
    fn cancel_discards_the_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();
        debouncer.schedule("a", start);

        assert_eq!(debouncer.cancel(), Some("a"));
        assert_eq!(debouncer.poll(start + DELAY), None);
    }

    #[test]
    fn flush_ignores_the_remaining_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("a", Instant::now());
        assert_eq!(debouncer.flush(), Some("a"));
    }
}
