//! Graded worksheet runs.

use gamechanger_core::Question;
use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};
use crate::grading::Grader;

/// One graded worksheet answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetAnswer {
    /// Prompt shown
    pub question: String,
    /// What the student entered or selected
    pub user_answer: String,
    /// Expected answer
    pub correct_answer: String,
    /// Grading result
    pub is_correct: bool,
}

/// Immediate feedback after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetFeedback {
    /// Whether the answer was accepted
    pub correct: bool,
    /// Expected answer, for the "Oops!" message
    pub expected: String,
    /// Explanation, when the item has one
    pub explanation: Option<String>,
}

/// Final result of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetSummary {
    /// Correct answers
    pub score: usize,
    /// Questions in the worksheet
    pub total: usize,
    /// Every answer in order
    pub answers: Vec<WorksheetAnswer>,
}

impl WorksheetSummary {
    /// Incorrect answers.
    pub fn incorrect(&self) -> usize {
        self.total - self.score
    }
}

/// A sequential, graded pass over a worksheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksheetRun {
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<WorksheetAnswer>,
    score: usize,
}

impl WorksheetRun {
    /// Start a run over `questions`.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Default::default()
        }
    }

    /// The question awaiting an answer, with its index.
    pub fn current(&self) -> Option<(usize, &Question)> {
        self.questions
            .get(self.current_index)
            .map(|q| (self.current_index, q))
    }

    /// Number of questions.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Current score.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// Grade and record an answer to the current question.
    pub fn submit(&mut self, answer: &str, grader: &mut dyn Grader) -> Result<WorksheetFeedback> {
        let Some(question) = self.questions.get(self.current_index) else {
            return Err(ProgressError::InvalidState("worksheet already complete".to_string()));
        };

        let correct = grader.grade(question, answer);
        let feedback = WorksheetFeedback {
            correct,
            expected: question.answer.clone(),
            explanation: question.explanation.clone(),
        };
        self.answers.push(WorksheetAnswer {
            question: question.prompt.clone(),
            user_answer: answer.to_string(),
            correct_answer: question.answer.clone(),
            is_correct: correct,
        });

        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        Ok(feedback)
    }

    /// Score and answers so far.
    pub fn summary(&self) -> WorksheetSummary {
        WorksheetSummary {
            score: self.score,
            total: self.questions.len(),
            answers: self.answers.clone(),
        }
    }
}
