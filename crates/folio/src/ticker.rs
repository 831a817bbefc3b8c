#![forbid(unsafe_code)]

//! Cosmetic "live updates" feed driven by a local random timer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use folio_runtime::Interval;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::content::UPDATE_MESSAGES;
use crate::ids::IdSequence;

pub const TICKER_PERIOD: Duration = Duration::from_secs(15);

/// Most recent events retained.
pub const TICKER_CAP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEvent {
    /// Creation timestamp in milliseconds, unique per ticker.
    pub id: u64,
    pub message: &'static str,
}

#[derive(Debug)]
pub struct UpdateTicker {
    interval: Interval,
    events: VecDeque<UpdateEvent>,
    messages: &'static [&'static str],
    rng: StdRng,
    ids: IdSequence,
}

impl UpdateTicker {
    pub fn new(seed: u64) -> Self {
        Self::with_messages(seed, &UPDATE_MESSAGES)
    }

    pub fn with_messages(seed: u64, messages: &'static [&'static str]) -> Self {
        Self {
            interval: Interval::new(TICKER_PERIOD),
            events: VecDeque::with_capacity(TICKER_CAP),
            messages,
            rng: StdRng::seed_from_u64(seed),
            ids: IdSequence::new(),
        }
    }

    /// Start a fresh feed. Events from an earlier mount are dropped.
    pub fn mount(&mut self, now: Instant) {
        self.events.clear();
        self.interval.start(now);
        tracing::debug!("update ticker mounted");
    }

    /// Stop the timer. Nothing is appended until the next mount.
    pub fn unmount(&mut self) {
        if self.interval.is_running() {
            tracing::debug!("update ticker unmounted");
        }
        self.interval.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.interval.is_running()
    }

    /// Append one event per elapsed period and return the period count.
    /// Only the last [`TICKER_CAP`] periods of a long gap are drawn.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let fired = self.interval.poll(now);
        for _ in 0..fired.min(TICKER_CAP as u32) {
            self.push_random();
        }
        fired
    }

    fn push_random(&mut self) {
        let Some(message) = self.messages.choose(&mut self.rng).copied() else {
            return;
        };
        let id = self.ids.next_id();
        self.events.push_front(UpdateEvent { id, message });
        self.events.truncate(TICKER_CAP);
    }

    /// Newest first.
    pub fn events(&self) -> impl ExactSizeIterator<Item = &UpdateEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
