#![forbid(unsafe_code)]

//! Deadline-based timer handles.
//!
//! Timers never own a thread. The component that created a timer keeps the
//! handle, the program feeds it the current [`Instant`] on every heartbeat,
//! and the handle reports whether it fired. Cancelling is dropping the
//! deadline, so a cancelled timer can never act on stale state.
//!
//! Taking `now` as a parameter keeps every timer deterministic under test:
//! callers advance a synthetic clock instead of sleeping.

use std::time::{Duration, Instant};

/// One-shot timer with at most one pending deadline.
#[derive(Debug, Clone, Default)]
pub struct Timeout {
    deadline: Option<Instant>,
    generation: u64,
}

impl Timeout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending deadline.
    ///
    /// Returns the generation of the new deadline; every call bumps it.
    pub fn start(&mut self, now: Instant, delay: Duration) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now + delay);
        self.generation
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time left before the deadline, `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire at most once: `true` the first time `now` reaches the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Periodic timer.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    /// A stopped interval with the given period. Zero periods are bumped to
    /// one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start (or restart) counting from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Number of whole periods that elapsed since the previous poll.
    ///
    /// The next deadline advances by exactly that many periods, so late polls
    /// neither drop nor repeat a firing.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next else {
            return 0;
        };
        if now < next {
            return 0;
        }
        let late = now.duration_since(next);
        let fired = u32::try_from(late.as_nanos() / self.period.as_nanos())
            .ok()
            .and_then(|whole| whole.checked_add(1));
        let advanced = fired
            .and_then(|count| self.period.checked_mul(count))
            .and_then(|step| next.checked_add(step));
        // An uncountable gap re-anchors one period after `now`.
        self.next = Some(advanced.unwrap_or(now + self.period));
        fired.unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn timeout_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timeout = Timeout::new();
        timeout.start(t0, 400 * MS);

        assert!(!timeout.poll(t0 + 399 * MS));
        assert!(timeout.poll(t0 + 400 * MS));
        assert!(!timeout.poll(t0 + 2000 * MS));
        assert!(!timeout.is_pending());
    }

    #[test]
    fn restarting_replaces_pending_deadline() {
        let t0 = Instant::now();
        let mut timeout = Timeout::new();
        let first = timeout.start(t0, 400 * MS);
        let second = timeout.start(t0 + 300 * MS, 400 * MS);

        assert_ne!(first, second);
        assert!(!timeout.poll(t0 + 500 * MS));
        assert!(timeout.poll(t0 + 700 * MS));
    }

    #[test]
    fn cancelled_timeout_never_fires() {
        let t0 = Instant::now();
        let mut timeout = Timeout::new();
        timeout.start(t0, 10 * MS);
        timeout.cancel();
        assert!(!timeout.poll(t0 + 1000 * MS));
        assert_eq!(timeout.remaining(t0), None);
    }

    #[test]
    fn interval_counts_elapsed_periods() {
        let t0 = Instant::now();
        let mut interval = Interval::new(15 * 1000 * MS);
        interval.start(t0);

        assert_eq!(interval.poll(t0 + 14_999 * MS), 0);
        assert_eq!(interval.poll(t0 + 15_000 * MS), 1);
        assert_eq!(interval.poll(t0 + 15_001 * MS), 0);
        assert_eq!(interval.poll(t0 + 61_000 * MS), 3);
        assert_eq!(interval.poll(t0 + 74_000 * MS), 0);
        assert_eq!(interval.poll(t0 + 75_000 * MS), 1);
    }

    #[test]
    fn huge_gap_saturates_and_reanchors() {
        let t0 = Instant::now();
        let mut interval = Interval::new(MS);
        interval.start(t0);

        // Sixty days of 1 ms periods is more than u32 can count.
        let resumed = t0 + Duration::from_secs(60 * 24 * 3600);
        assert_eq!(interval.poll(resumed), u32::MAX);
        assert_eq!(interval.poll(resumed), 0);
        assert_eq!(interval.poll(resumed + MS), 1);
        assert!(interval.is_running());
    }

    #[test]
    fn stopped_interval_is_silent() {
        let t0 = Instant::now();
        let mut interval = Interval::new(50 * MS);
        assert_eq!(interval.poll(t0 + 1000 * MS), 0);
        interval.start(t0);
        interval.stop();
        assert_eq!(interval.poll(t0 + 1000 * MS), 0);
        assert!(!interval.is_running());
    }
}
