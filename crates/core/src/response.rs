//! Response records - one per answered question.

use serde::{Deserialize, Serialize};

/// Reference to the question a response answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRef {
    /// Position in the session's question pool
    pub index: usize,

    /// Prompt text at the time of answering
    pub prompt: String,
}

/// A single recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Which question was answered
    pub question: QuestionRef,

    /// Answer exactly as submitted
    pub answer: String,

    /// Topic of the question
    pub topic: String,

    /// Subject of the question
    pub subject: String,

    /// Grading result (None = ungraded)
    pub correct: Option<bool>,
}

impl ResponseRecord {
    /// Whether this response has been graded.
    pub fn is_graded(&self) -> bool {
        self.correct.is_some()
    }
}
