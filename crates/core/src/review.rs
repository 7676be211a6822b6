//! Review schedule - per-question spaced repetition state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spaced repetition state of one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    /// Number of submitted answers
    pub attempt_count: u32,

    /// Date of the most recent answer
    pub last_attempt_date: Option<NaiveDate>,

    /// Earliest date the question may be presented again
    pub next_review_date: Option<NaiveDate>,
}

/// Where a question stands in its review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewState {
    /// Never answered
    Unseen,
    /// Ready to be presented
    Due,
    /// Waiting until the given date
    Scheduled(NaiveDate),
}

impl ReviewSchedule {
    /// Current state relative to `today`.
    pub fn state(&self, today: NaiveDate) -> ReviewState {
        if self.attempt_count == 0 {
            return ReviewState::Unseen;
        }
        match self.next_review_date {
            Some(date) if date > today => ReviewState::Scheduled(date),
            _ => ReviewState::Due,
        }
    }

    /// Whether the question may be presented on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !matches!(self.state(today), ReviewState::Scheduled(_))
    }
}
