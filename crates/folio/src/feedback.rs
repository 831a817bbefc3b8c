#![forbid(unsafe_code)]

//! Feedback wall ledger.
//!
//! Entries are never edited or removed. New entries are prepended, so the
//! stored order is newest first; every other order is a projection built on
//! demand by [`FeedbackLedger::view`].

use crate::ids::IdSequence;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub id: u64,
    pub name: String,
    pub rating: u8,
    pub comment: String,
}

impl FeedbackEntry {
    /// Five-star entries get the featured badge.
    pub fn is_featured(&self) -> bool {
        self.rating == MAX_RATING
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("Please enter your name")]
    EmptyName,
    #[error("Please write a comment")]
    EmptyComment,
    #[error("Rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Newest,
    HighestRating,
}

impl SortMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Newest => Self::HighestRating,
            Self::HighestRating => Self::Newest,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::HighestRating => "Highest rating",
        }
    }
}

#[derive(Debug, Default)]
pub struct FeedbackLedger {
    entries: Vec<FeedbackEntry>,
    ids: IdSequence,
}

impl FeedbackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and prepend a new entry, stamped with the wall clock.
    pub fn submit(
        &mut self,
        name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<&FeedbackEntry, FeedbackError> {
        let (name, comment) = Self::check(name, rating, comment)?;
        let id = self.ids.next_id();
        Ok(self.prepend(id, name, rating, comment))
    }

    /// Like [`submit`](Self::submit) with an explicit clock reading.
    pub fn submit_at(
        &mut self,
        now_ms: u64,
        name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<&FeedbackEntry, FeedbackError> {
        let (name, comment) = Self::check(name, rating, comment)?;
        let id = self.ids.next_at(now_ms);
        Ok(self.prepend(id, name, rating, comment))
    }

    fn check<'a>(
        name: &'a str,
        rating: u8,
        comment: &'a str,
    ) -> Result<(&'a str, &'a str), FeedbackError> {
        let name = name.trim();
        let comment = comment.trim();
        if name.is_empty() {
            return Err(FeedbackError::EmptyName);
        }
        if comment.is_empty() {
            return Err(FeedbackError::EmptyComment);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(FeedbackError::RatingOutOfRange(rating));
        }
        Ok((name, comment))
    }

    fn prepend(&mut self, id: u64, name: &str, rating: u8, comment: &str) -> &FeedbackEntry {
        tracing::debug!(id, rating, "feedback accepted");
        self.entries.insert(
            0,
            FeedbackEntry {
                id,
                name: name.to_owned(),
                rating,
                comment: comment.to_owned(),
            },
        );
        &self.entries[0]
    }

    /// Stored order: newest first.
    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries projected into `mode` order. Equal ratings keep newest-first
    /// order.
    pub fn view(&self, mode: SortMode) -> Vec<&FeedbackEntry> {
        let mut view: Vec<&FeedbackEntry> = self.entries.iter().collect();
        if mode == SortMode::HighestRating {
            view.sort_by(|a, b| b.rating.cmp(&a.rating));
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(view: &[&FeedbackEntry]) -> Vec<String> {
        view.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn newest_and_highest_views() {
        let mut ledger = FeedbackLedger::new();
        ledger.submit("X", 5, "great").unwrap();
        ledger.submit("Y", 3, "ok").unwrap();

        assert_eq!(names(&ledger.view(SortMode::Newest)), ["Y", "X"]);
        assert_eq!(names(&ledger.view(SortMode::HighestRating)), ["X", "Y"]);

        let x = &ledger.entries()[1];
        let y = &ledger.entries()[0];
        assert!(x.is_featured());
        assert!(!y.is_featured());
    }

    #[test]
    fn rejections() {
        let mut ledger = FeedbackLedger::new();
        assert_eq!(
            ledger.submit("  ", 4, "nice").unwrap_err(),
            FeedbackError::EmptyName
        );
        assert_eq!(
            ledger.submit("Ana", 4, " \n").unwrap_err(),
            FeedbackError::EmptyComment
        );
        assert_eq!(
            ledger.submit("Ana", 0, "nice").unwrap_err(),
            FeedbackError::RatingOutOfRange(0)
        );
        assert_eq!(
            ledger.submit("Ana", 6, "nice").unwrap_err(),
            FeedbackError::RatingOutOfRange(6)
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn stored_text_is_trimmed() {
        let mut ledger = FeedbackLedger::new();
        let entry = ledger.submit(" Ana ", 4, " nice work ").unwrap();
        assert_eq!(entry.name, "Ana");
        assert_eq!(entry.comment, "nice work");
    }

    #[test]
    fn same_millisecond_submissions_get_distinct_ids() {
        let mut ledger = FeedbackLedger::new();
        ledger.submit_at(42, "A", 1, "a").unwrap();
        ledger.submit_at(42, "B", 2, "b").unwrap();
        let ids: Vec<u64> = ledger.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, [43, 42]);
    }

    #[test]
    fn sort_toggle_roundtrips() {
        assert_eq!(SortMode::Newest.toggle(), SortMode::HighestRating);
        assert_eq!(SortMode::Newest.toggle().toggle(), SortMode::Newest);
    }

    proptest! {
        #[test]
        fn newest_view_is_descending_ids(ratings in proptest::collection::vec(1u8..=5, 0..32)) {
            let mut ledger = FeedbackLedger::new();
            for (i, rating) in ratings.iter().enumerate() {
                ledger.submit_at(1_000, &format!("n{i}"), *rating, "c").unwrap();
            }
            let view = ledger.view(SortMode::Newest);
            prop_assert!(view.windows(2).all(|w| w[0].id > w[1].id));
        }

        #[test]
        fn highest_view_is_stable(ratings in proptest::collection::vec(1u8..=5, 0..32)) {
            let mut ledger = FeedbackLedger::new();
            for (i, rating) in ratings.iter().enumerate() {
                ledger.submit_at(i as u64, &format!("n{i}"), *rating, "c").unwrap();
            }
            let view = ledger.view(SortMode::HighestRating);
            prop_assert_eq!(view.len(), ratings.len());
            for pair in view.windows(2) {
                prop_assert!(pair[0].rating >= pair[1].rating);
                if pair[0].rating == pair[1].rating {
                    prop_assert!(pair[0].id > pair[1].id);
                }
            }
            // Projection never mutates the base order.
            let base: Vec<u64> = ledger.entries().iter().map(|e| e.id).collect();
            prop_assert!(base.windows(2).all(|w| w[0] > w[1]));
        }
    }
}
