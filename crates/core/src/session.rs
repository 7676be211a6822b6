//! Session state - everything one student's session owns.

use crate::id::{SessionId, StudentId};
use crate::question::Question;
use crate::response::ResponseRecord;
use crate::scores::TraitScores;
use crate::Time;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where a session is in the diagnostic → reinforcement flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No pool loaded yet
    #[default]
    Idle,
    /// Answering diagnostic questions
    Diagnostic,
    /// All diagnostic questions answered
    DiagnosticComplete,
    /// Answering reinforcement questions
    Reinforcement,
    /// All reinforcement questions answered
    ReinforcementComplete,
}

/// Topic → outcomes in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementTally {
    outcomes: BTreeMap<String, Vec<bool>>,
}

impl ReinforcementTally {
    /// Append an outcome for a topic and return the topic's outcomes.
    pub fn push(&mut self, topic: &str, correct: bool) -> &[bool] {
        let entry = self.outcomes.entry(topic.to_string()).or_default();
        entry.push(correct);
        entry
    }

    /// Outcomes for a topic (empty if never attempted).
    pub fn outcomes(&self, topic: &str) -> &[bool] {
        self.outcomes.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of attempts for a topic.
    pub fn attempts(&self, topic: &str) -> usize {
        self.outcomes(topic).len()
    }

    /// Number of correct attempts for a topic.
    pub fn corrects(&self, topic: &str) -> usize {
        self.outcomes(topic).iter().filter(|c| **c).count()
    }

    /// Topics with at least one attempt.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.outcomes.keys().map(String::as_str)
    }

    /// Forget every outcome.
    pub fn clear(&mut self) {
        self.outcomes.clear();
    }
}

/// Mastery and reward achievements. Monotonic within a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryState {
    /// Topics that crossed the mastery threshold
    pub mastered_topics: BTreeSet<String>,

    /// Whether the session reward has been granted
    pub reward_given: bool,

    /// Topic that earned the reward
    pub reward_topic: Option<String>,
}

/// The full state of one session, threaded through every engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique identifier
    pub id: SessionId,

    /// Student working through the session
    pub student: Option<StudentId>,

    /// Current phase
    pub phase: SessionPhase,

    /// Diagnostic question pool
    pub pool: Vec<Question>,

    /// Next diagnostic question to answer
    pub diagnostic_cursor: usize,

    /// Diagnostic answers in submission order
    pub responses: Vec<ResponseRecord>,

    /// Weak topics found after the diagnostic
    pub weak_topics: Vec<String>,

    /// Sampled reinforcement questions
    pub reinforcement: Vec<Question>,

    /// Next reinforcement question to answer
    pub reinforcement_cursor: usize,

    /// Reinforcement outcomes per topic
    pub tally: ReinforcementTally,

    /// Mastery and reward state
    pub mastery: MasteryState,

    /// Trait scores shown on the radar
    pub scores: TraitScores,

    /// When created
    pub created_at: Time,
}

impl SessionState {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            student: None,
            phase: SessionPhase::Idle,
            pool: Vec::new(),
            diagnostic_cursor: 0,
            responses: Vec::new(),
            weak_topics: Vec::new(),
            reinforcement: Vec::new(),
            reinforcement_cursor: 0,
            tally: ReinforcementTally::default(),
            mastery: MasteryState::default(),
            scores: TraitScores::default(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Attach a student.
    pub fn with_student(mut self, student: StudentId) -> Self {
        self.student = Some(student);
        self
    }

    /// The diagnostic question awaiting an answer.
    pub fn current_diagnostic(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Diagnostic => self.pool.get(self.diagnostic_cursor),
            _ => None,
        }
    }

    /// The reinforcement question awaiting an answer.
    pub fn current_reinforcement(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Reinforcement => self.reinforcement.get(self.reinforcement_cursor),
            _ => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
