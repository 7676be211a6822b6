//! Mastery and reward tracking for the reinforcement phase.

use gamechanger_core::{MasteryState, ReinforcementTally};
use tracing::info;

use crate::config::EngineConfig;

/// What changed after recording one outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Topic newly added to the mastered set
    pub mastery_delta: Option<String>,

    /// Topic that just unlocked the session reward
    pub reward_delta: Option<String>,

    /// The topic's outcomes after recording
    pub tally: Vec<bool>,
}

/// Applies the reward and mastery rules to a running tally.
#[derive(Debug, Clone, Copy)]
pub struct MasteryTracker {
    reward_correct_count: usize,
    min_attempts: usize,
    ratio: f64,
}

impl MasteryTracker {
    /// Create a tracker from explicit thresholds.
    pub fn new(reward_correct_count: usize, min_attempts: usize, ratio: f64) -> Self {
        Self {
            reward_correct_count,
            min_attempts,
            ratio,
        }
    }

    /// Create a tracker from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.reward_correct_count,
            config.mastery_min_attempts,
            config.mastery_ratio,
        )
    }

    /// Record one answer for `topic`.
    pub fn record(
        &self,
        tally: &mut ReinforcementTally,
        mastery: &mut MasteryState,
        topic: &str,
        is_correct: bool,
    ) -> RecordOutcome {
        let outcomes = tally.push(topic, is_correct).to_vec();
        let total = outcomes.len();
        let corrects = outcomes.iter().filter(|c| **c).count();
        let mut outcome = RecordOutcome {
            tally: outcomes,
            ..Default::default()
        };

        // Exactly the threshold, once per session
        if corrects == self.reward_correct_count && !mastery.reward_given {
            mastery.reward_given = true;
            mastery.reward_topic = Some(topic.to_string());
            outcome.reward_delta = Some(topic.to_string());
            info!("Reward unlocked on {}", topic);
        }

        if total >= self.min_attempts
            && corrects as f64 / total as f64 >= self.ratio
            && mastery.mastered_topics.insert(topic.to_string())
        {
            outcome.mastery_delta = Some(topic.to_string());
            info!("Topic mastered: {} ({}/{})", topic, corrects, total);
        }

        outcome
    }
}

impl Default for MasteryTracker {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
