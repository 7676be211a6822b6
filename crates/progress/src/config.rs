//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ProgressError, Result};

/// Thresholds and sizes used by the progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many weak topics the analyzer selects
    pub weak_topic_count: usize,
    /// Upper bound on the reinforcement set
    pub reinforcement_size: usize,
    /// Correct answers on one topic that unlock the reward
    pub reward_correct_count: usize,
    /// Attempts on a topic before mastery is considered
    pub mastery_min_attempts: usize,
    /// Minimum correct ratio for mastery
    pub mastery_ratio: f64,
    /// Growth trait bump granted with the reward
    pub growth_increment: f32,
    /// Review offsets in days, indexed by attempt number
    pub review_intervals: Vec<u32>,
    /// Whether diagnostic answers are graded when recorded
    pub grade_diagnostic: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weak_topic_count: 5,
            reinforcement_size: 15,
            reward_correct_count: 4,
            mastery_min_attempts: 10,
            mastery_ratio: 0.8,
            growth_increment: 0.5,
            review_intervals: vec![3, 7, 21],
            grade_diagnostic: false,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a JSON file. Unset keys keep their defaults.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match tokio::fs::read_to_string(path).await {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProgressError::MissingResource(path.display().to_string()));
            }
            Err(e) => return Err(ProgressError::Storage(e.into())),
        };
        serde_json::from_str(&text).map_err(|e| ProgressError::MalformedResource {
            resource: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Set the weak topic count.
    pub fn with_weak_topic_count(mut self, count: usize) -> Self {
        self.weak_topic_count = count;
        self
    }

    /// Set the reinforcement set bound.
    pub fn with_reinforcement_size(mut self, size: usize) -> Self {
        self.reinforcement_size = size;
        self
    }

    /// Set the mastery thresholds.
    pub fn with_mastery(mut self, min_attempts: usize, ratio: f64) -> Self {
        self.mastery_min_attempts = min_attempts;
        self.mastery_ratio = ratio;
        self
    }

    /// Set the review intervals.
    pub fn with_review_intervals(mut self, intervals: Vec<u32>) -> Self {
        self.review_intervals = intervals;
        self
    }

    /// Enable or disable diagnostic grading.
    pub fn with_grade_diagnostic(mut self, enabled: bool) -> Self {
        self.grade_diagnostic = enabled;
        self
    }
}
