#![forbid(unsafe_code)]

//! Timestamp-derived, strictly increasing ids.

/// Hands out millisecond timestamps, bumped past the previous id whenever
/// the clock has not advanced (or went backwards).
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: Option<u64>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id using the wall clock.
    pub fn next_id(&mut self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.next_at(u64::try_from(now).unwrap_or(0))
    }

    /// Next id given the current time in milliseconds.
    pub fn next_at(&mut self, now_ms: u64) -> u64 {
        let id = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        id
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }
}
