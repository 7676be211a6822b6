//! Engine events - what the presentation layer reacts to.

use crate::question::Question;
use serde::{Deserialize, Serialize};

/// Something the engine reports back after handling an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The last diagnostic question was answered.
    DiagnosticComplete {
        /// Topics chosen for reinforcement, weakest first
        weak_topics: Vec<String>,
    },

    /// A reinforcement answer was recorded.
    ReinforcementProgress {
        /// Topic answered
        topic: String,
        /// Outcomes for the topic in attempt order
        tally: Vec<bool>,
    },

    /// The one-time session reward was unlocked.
    RewardGranted {
        /// Topic that earned it
        topic: String,
    },

    /// A topic crossed the mastery threshold.
    TopicMastered {
        /// Topic mastered
        topic: String,
    },

    /// A spaced repetition question is ready to present.
    ReviewDue {
        /// Position in the pool
        index: usize,
        /// The question itself
        question: Question,
    },
}

impl EngineEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::DiagnosticComplete { .. } => "diagnostic_complete",
            EngineEvent::ReinforcementProgress { .. } => "reinforcement_progress",
            EngineEvent::RewardGranted { .. } => "reward_granted",
            EngineEvent::TopicMastered { .. } => "topic_mastered",
            EngineEvent::ReviewDue { .. } => "review_due",
        }
    }
}
