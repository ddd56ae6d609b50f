//! Input debouncing for search queries.
//!
//! Keeps at most one pending payload. Scheduling a new payload replaces the
//! pending one and restarts the quiet period, so fast typing produces a
//! single query for the last text entered.
//!
//! The debouncer never reads the clock itself: callers pass `now`, and the
//! host event loop polls [`Debouncer::drain_ready`] when the deadline passes.

use std::time::{Duration, Instant};

/// Pending payload waiting for its quiet period to end.
#[derive(Debug)]
struct Pending<T> {
    payload: T,
    deadline: Instant,
}

/// Single-shot, restartable timer carrying a payload.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<Pending<T>>,
    delay: Duration,
}

impl<T> Debouncer<T> {
    /// Create a new debouncer with the specified quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            delay,
        }
    }

    /// Quiet period between the last schedule and firing.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `payload` to fire after the quiet period.
    ///
    /// Any pending payload is dropped.
    pub fn schedule(&mut self, payload: T, now: Instant) {
        self.pending = Some(Pending {
            payload,
            deadline: now + self.delay,
        });
    }

    /// Drop the pending payload, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// True while a payload waits to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending payload if its deadline has passed.
    pub fn drain_ready(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|p| p.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_single_payload_fires_after_deadline() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        debouncer.schedule("ov", start);

        // Before deadline
        assert_eq!(debouncer.drain_ready(start + Duration::from_millis(99)), None);
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.drain_ready(start + DELAY), Some("ov"));

        // Should be empty after drain
        assert_eq!(debouncer.drain_ready(start + DELAY * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rapid_schedules_fire_once_with_last_payload() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        // Simulate typing: a keystroke every 30ms
        for (i, text) in ["ov", "ove", "over", "overv"].into_iter().enumerate() {
            let at = start + Duration::from_millis(30 * i as u64);
            assert_eq!(debouncer.drain_ready(at), None);
            debouncer.schedule(text, at);
        }

        let last = start + Duration::from_millis(90);
        assert_eq!(debouncer.deadline(), Some(last + DELAY));
        assert_eq!(debouncer.drain_ready(last + Duration::from_millis(99)), None);
        assert_eq!(debouncer.drain_ready(last + DELAY), Some("overv"));
        assert_eq!(debouncer.drain_ready(last + DELAY * 5), None);
    }

    #[test]
    fn test_reschedule_restarts_quiet_period() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        debouncer.schedule(1, start);
        debouncer.schedule(2, start + Duration::from_millis(80));

        // The first deadline has passed but was superseded
        assert_eq!(debouncer.drain_ready(start + DELAY), None);
        assert_eq!(
            debouncer.drain_ready(start + Duration::from_millis(180)),
            Some(2)
        );
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        debouncer.schedule("ab", start);
        debouncer.cancel();

        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.drain_ready(start + DELAY), None);
    }

    #[test]
    fn test_drain_without_pending() {
        let mut debouncer: Debouncer<String> = Debouncer::new(DELAY);
        assert_eq!(debouncer.drain_ready(Instant::now()), None);
        assert_eq!(debouncer.delay(), DELAY);
    }
}
