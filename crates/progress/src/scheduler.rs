//! Spaced repetition scheduling (Neuro-Spaced Mastery).
//!
//! Each answer bumps the question's attempt count. While the count is
//! within the interval table the next review is pushed out by
//! `intervals[attempt_count - 1]` days; past the end of the table the
//! question is fully reviewed and always due.
//!
//! [`ReviewDeck`] walks a pool in a circle. Questions that are not due are
//! skipped but stay in the deck, and the walk wraps around so they come up
//! again on a later pass.

use chrono::{Days, NaiveDate};
use gamechanger_core::{Question, ReviewSchedule};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{ProgressError, Result};

/// Applies the interval table to review schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewScheduler {
    intervals: Vec<u32>,
}

impl ReviewScheduler {
    /// Create a scheduler with the given day offsets.
    pub fn new(intervals: Vec<u32>) -> Self {
        Self { intervals }
    }

    /// Create a scheduler from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.review_intervals.clone())
    }

    /// The interval table.
    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    /// Record an answer given on `today` and return the new review date.
    pub fn record_attempt(&self, schedule: &mut ReviewSchedule, today: NaiveDate) -> Option<NaiveDate> {
        schedule.attempt_count += 1;
        schedule.last_attempt_date = Some(today);

        let slot = schedule.attempt_count as usize - 1;
        schedule.next_review_date = self.intervals.get(slot).map(|days| {
            today
                .checked_add_days(Days::new(u64::from(*days)))
                .unwrap_or(NaiveDate::MAX)
        });
        schedule.next_review_date
    }

    /// Whether every interval has been used up.
    pub fn is_fully_reviewed(&self, schedule: &ReviewSchedule) -> bool {
        schedule.attempt_count as usize > self.intervals.len()
    }
}

impl Default for ReviewScheduler {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Result of asking the deck for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextReview {
    /// Present the question at this index
    Due(usize),
    /// Nothing is due; the earliest upcoming review, if any
    Idle(Option<NaiveDate>),
}

/// A question together with its review schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// The question to review
    pub question: Question,

    /// Its spaced repetition state; unseen when absent
    #[serde(default)]
    pub schedule: ReviewSchedule,
}

/// A pool of questions with per-question review schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDeck {
    entries: Vec<ReviewEntry>,
    #[serde(default)]
    cursor: usize,
}

impl ReviewDeck {
    /// Create a deck where every question is unseen.
    pub fn new(questions: Vec<Question>) -> Self {
        let entries = questions
            .into_iter()
            .map(|question| ReviewEntry {
                question,
                schedule: ReviewSchedule::default(),
            })
            .collect();
        Self { entries, cursor: 0 }
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the deck has no questions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Question at `index`.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.entries.get(index).map(|e| &e.question)
    }

    /// Schedule of the question at `index`.
    pub fn schedule(&self, index: usize) -> Option<&ReviewSchedule> {
        self.entries.get(index).map(|e| &e.schedule)
    }

    /// Indices of every question due on `today`, in deck order.
    pub fn due_indices(&self, today: NaiveDate) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.schedule.is_due(today))
            .map(|(i, _)| i)
            .collect()
    }

    /// Find the next due question starting at the cursor, wrapping around.
    /// Skipped questions stay in the deck.
    pub fn next_due(&mut self, today: NaiveDate) -> NextReview {
        let len = self.entries.len();
        for offset in 0..len {
            let index = (self.cursor + offset) % len;
            let due = self
                .entries
                .get(index)
                .is_some_and(|e| e.schedule.is_due(today));
            if due {
                if offset > 0 {
                    debug!("Skipped {} question(s) not yet due", offset);
                }
                self.cursor = index;
                return NextReview::Due(index);
            }
        }

        let upcoming = self
            .entries
            .iter()
            .filter_map(|e| e.schedule.next_review_date)
            .filter(|d| *d > today)
            .min();
        NextReview::Idle(upcoming)
    }

    /// Record an answer for the question at `index` and move past it.
    pub fn answer(
        &mut self,
        scheduler: &ReviewScheduler,
        index: usize,
        today: NaiveDate,
    ) -> Result<ReviewSchedule> {
        let len = self.entries.len();
        let Some(entry) = self.entries.get_mut(index) else {
            return Err(ProgressError::InvalidState(format!(
                "no question {} in a deck of {}",
                index, len
            )));
        };
        if !entry.schedule.is_due(today) {
            return Err(ProgressError::InvalidState(format!(
                "question {} is not due until {:?}",
                index, entry.schedule.next_review_date
            )));
        }

        scheduler.record_attempt(&mut entry.schedule, today);
        let updated = entry.schedule.clone();
        // index < len here, so len > 0
        self.cursor = (index + 1) % len;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamechanger_core::{Difficulty, ReviewState};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn deck(n: usize) -> ReviewDeck {
        ReviewDeck::new(
            (0..n)
                .map(|i| Question::new("Grammar", "Verbs", Difficulty::Easy, format!("q{}", i), "a"))
                .collect(),
        )
    }

    #[test]
    fn test_first_attempt_waits_three_days() {
        let scheduler = ReviewScheduler::new(vec![3, 7, 21]);
        let mut schedule = ReviewSchedule::default();

        let next = scheduler.record_attempt(&mut schedule, date(1, 10));
        assert_eq!(schedule.attempt_count, 1);
        assert_eq!(next, Some(date(1, 13)));
        assert!(!schedule.is_due(date(1, 12)));
        assert!(schedule.is_due(date(1, 13)));
    }

    #[test]
    fn test_intervals_then_fully_reviewed() {
        let scheduler = ReviewScheduler::default();
        let mut schedule = ReviewSchedule::default();

        assert_eq!(scheduler.record_attempt(&mut schedule, date(1, 1)), Some(date(1, 4)));
        assert_eq!(scheduler.record_attempt(&mut schedule, date(1, 4)), Some(date(1, 11)));
        assert_eq!(scheduler.record_attempt(&mut schedule, date(1, 11)), Some(date(2, 1)));
        assert!(!scheduler.is_fully_reviewed(&schedule));

        assert_eq!(scheduler.record_attempt(&mut schedule, date(2, 1)), None);
        assert!(scheduler.is_fully_reviewed(&schedule));
        assert_eq!(schedule.state(date(2, 1)), ReviewState::Due);
    }

    #[test]
    fn test_deck_skips_and_wraps() {
        let scheduler = ReviewScheduler::default();
        let mut deck = deck(3);
        let today = date(3, 1);

        assert_eq!(deck.next_due(today), NextReview::Due(0));
        deck.answer(&scheduler, 0, today).unwrap();
        assert_eq!(deck.next_due(today), NextReview::Due(1));
        deck.answer(&scheduler, 1, today).unwrap();
        assert_eq!(deck.next_due(today), NextReview::Due(2));
        deck.answer(&scheduler, 2, today).unwrap();

        // Everything scheduled three days out
        assert_eq!(deck.next_due(today), NextReview::Idle(Some(date(3, 4))));
        assert_eq!(deck.len(), 3);

        // Due again later, starting from the wrapped cursor
        assert_eq!(deck.next_due(date(3, 4)), NextReview::Due(0));
    }

    #[test]
    fn test_skipped_question_not_lost() {
        let scheduler = ReviewScheduler::default();
        let mut deck = deck(3);
        let today = date(3, 1);

        deck.answer(&scheduler, 1, today).unwrap();
        assert_eq!(deck.due_indices(today), vec![0, 2]);

        // Cursor sits past question 1, which is skipped on the next lap
        assert_eq!(deck.next_due(today), NextReview::Due(2));
        deck.answer(&scheduler, 2, today).unwrap();
        assert_eq!(deck.next_due(today), NextReview::Due(0));
        deck.answer(&scheduler, 0, today).unwrap();
        assert_eq!(deck.next_due(date(3, 4)), NextReview::Due(1));
    }

    #[test]
    fn test_answer_before_due_rejected() {
        let scheduler = ReviewScheduler::default();
        let mut deck = deck(1);
        deck.answer(&scheduler, 0, date(3, 1)).unwrap();
        assert!(deck.answer(&scheduler, 0, date(3, 2)).is_err());
        assert!(deck.answer(&scheduler, 5, date(3, 2)).is_err());
    }

    #[test]
    fn test_saved_deck_keeps_question_and_schedule_together() {
        let scheduler = ReviewScheduler::default();
        let mut saved = deck(2);
        saved.answer(&scheduler, 0, date(1, 1)).unwrap();

        let json = serde_json::to_string(&saved).unwrap();
        let mut restored: ReviewDeck = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.schedule(0).unwrap().attempt_count, 1);
        assert_eq!(restored.next_due(date(1, 2)), NextReview::Due(1));
    }

    #[test]
    fn test_loaded_deck_with_unscheduled_entry_and_stale_cursor() {
        // Second entry was added after the first was scheduled
        let json = r#"{
            "entries": [
                {"question": {"question": "q0", "answer": "a"},
                 "schedule": {"attempt_count": 1, "last_attempt_date": "2024-01-01", "next_review_date": "2024-01-04"}},
                {"question": {"question": "q1", "answer": "a"}}
            ],
            "cursor": 7
        }"#;
        let mut deck: ReviewDeck = serde_json::from_str(json).unwrap();
        let scheduler = ReviewScheduler::default();

        assert_eq!(deck.next_due(date(1, 2)), NextReview::Due(1));
        deck.answer(&scheduler, 1, date(1, 2)).unwrap();
        assert_eq!(deck.next_due(date(1, 2)), NextReview::Idle(Some(date(1, 4))));
    }

    #[test]
    fn test_parallel_lists_are_rejected() {
        let json = r#"{"questions": [{"question": "q0", "answer": "a"}], "schedules": [], "cursor": 0}"#;
        assert!(serde_json::from_str::<ReviewDeck>(json).is_err());
    }

    #[test]
    fn test_empty_deck_is_idle() {
        let mut deck = deck(0);
        assert_eq!(deck.next_due(date(1, 1)), NextReview::Idle(None));
    }
}
