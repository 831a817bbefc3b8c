#![forbid(unsafe_code)]

//! Reveals a string one grapheme per tick, then stops its own timer.

use std::time::{Duration, Instant};

use folio_runtime::Interval;
use unicode_segmentation::UnicodeSegmentation;

pub const TYPEWRITER_STEP: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of each grapheme.
    ends: Vec<usize>,
    revealed: usize,
    interval: Interval,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self {
            text,
            ends,
            revealed: 0,
            interval: Interval::new(TYPEWRITER_STEP),
        }
    }

    /// Restart from an empty reveal.
    pub fn start(&mut self, now: Instant) {
        self.revealed = 0;
        if self.ends.is_empty() {
            self.interval.stop();
        } else {
            self.interval.start(now);
        }
    }

    pub fn cancel(&mut self) {
        self.interval.stop();
    }

    /// Show the whole text at once.
    pub fn finish(&mut self) {
        self.revealed = self.ends.len();
        self.interval.stop();
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    pub fn is_done(&self) -> bool {
        self.revealed == self.ends.len()
    }

    /// Advance by the elapsed ticks. Returns whether the visible text grew.
    pub fn poll(&mut self, now: Instant) -> bool {
        let steps = self.interval.poll(now) as usize;
        if steps == 0 {
            return false;
        }
        self.revealed = (self.revealed + steps).min(self.ends.len());
        if self.is_done() {
            self.interval.stop();
        }
        true
    }

    pub fn visible(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn reveals_one_grapheme_per_step() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("Dream");
        tw.start(t0);
        assert_eq!(tw.visible(), "");
        assert!(tw.poll(t0 + 50 * MS));
        assert_eq!(tw.visible(), "D");
        assert!(!tw.poll(t0 + 60 * MS));
        assert!(tw.poll(t0 + 150 * MS));
        assert_eq!(tw.visible(), "Dre");
    }

    #[test]
    fn stops_itself_when_done() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("Hi!");
        tw.start(t0);
        tw.poll(t0 + 1000 * MS);
        assert_eq!(tw.visible(), "Hi!");
        assert!(tw.is_done());
        assert!(!tw.is_running());
        assert!(!tw.poll(t0 + 2000 * MS));
    }

    #[test]
    fn graphemes_are_not_split() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("e\u{301}x");
        tw.start(t0);
        tw.poll(t0 + 50 * MS);
        assert_eq!(tw.visible(), "e\u{301}");
    }

    #[test]
    fn empty_text_never_runs() {
        let mut tw = Typewriter::new("");
        tw.start(Instant::now());
        assert!(!tw.is_running());
        assert!(tw.is_done());
    }

    #[test]
    fn cancel_freezes_reveal() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new("abcdef");
        tw.start(t0);
        tw.poll(t0 + 100 * MS);
        tw.cancel();
        assert!(!tw.poll(t0 + 1000 * MS));
        assert_eq!(tw.visible(), "ab");
        tw.finish();
        assert_eq!(tw.visible(), "abcdef");
    }
}
