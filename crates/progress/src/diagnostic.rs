//! Diagnostic runner - sequential baseline pass over a pool.

use gamechanger_core::{Question, QuestionRef, ResponseRecord, SessionPhase, SessionState};
use tracing::debug;

use crate::error::{ProgressError, Result};
use crate::grading::Grader;

/// Walks a session through its diagnostic pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticRunner;

impl DiagnosticRunner {
    /// Load `pool` into the session and reset diagnostic progress.
    pub fn start(&self, state: &mut SessionState, pool: Vec<Question>) {
        state.pool = pool;
        state.diagnostic_cursor = 0;
        state.responses.clear();
        state.weak_topics.clear();
        state.phase = SessionPhase::Diagnostic;
        debug!("Diagnostic started with {} questions", state.pool.len());
    }

    /// Number of questions in the diagnostic.
    pub fn total(&self, state: &SessionState) -> usize {
        state.pool.len()
    }

    /// Questions not yet answered.
    pub fn remaining(&self, state: &SessionState) -> usize {
        state.pool.len().saturating_sub(state.diagnostic_cursor)
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self, state: &SessionState) -> bool {
        state.diagnostic_cursor >= state.pool.len()
    }

    /// Record an answer for the question at `question_index`, which must be
    /// the current cursor. The response is left ungraded unless a grader is
    /// supplied.
    pub fn submit(
        &self,
        state: &mut SessionState,
        question_index: usize,
        raw_answer: &str,
        grader: Option<&mut dyn Grader>,
    ) -> Result<ResponseRecord> {
        if state.phase != SessionPhase::Diagnostic {
            return Err(ProgressError::InvalidState(format!(
                "diagnostic answer submitted during {:?}",
                state.phase
            )));
        }
        if question_index != state.diagnostic_cursor {
            return Err(ProgressError::InvalidState(format!(
                "expected answer for question {}, got {}",
                state.diagnostic_cursor, question_index
            )));
        }
        let Some(question) = state.pool.get(question_index) else {
            return Err(ProgressError::InvalidState("diagnostic already complete".to_string()));
        };

        let correct = grader.map(|g| g.grade(question, raw_answer));
        let record = ResponseRecord {
            question: QuestionRef {
                index: question_index,
                prompt: question.prompt.clone(),
            },
            answer: raw_answer.to_string(),
            topic: question.topic.clone(),
            subject: question.subject.clone(),
            correct,
        };

        state.responses.push(record.clone());
        state.diagnostic_cursor += 1;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::ExactMatchGrader;
    use gamechanger_core::Difficulty;

    fn pool() -> Vec<Question> {
        vec![
            Question::new("Math", "Fractions", Difficulty::Easy, "1/2 of 4?", "2"),
            Question::new("Reading", "Main Idea", Difficulty::Medium, "Main idea?", "growth"),
        ]
    }

    #[test]
    fn test_submit_advances_cursor_ungraded() {
        let runner = DiagnosticRunner;
        let mut state = SessionState::new();
        runner.start(&mut state, pool());

        let record = runner.submit(&mut state, 0, "2", None).unwrap();
        assert_eq!(record.topic, "Fractions");
        assert_eq!(record.correct, None);
        assert_eq!(runner.remaining(&state), 1);

        runner.submit(&mut state, 1, "", None).unwrap();
        assert!(runner.is_complete(&state));
        assert_eq!(state.responses.len(), 2);
    }

    #[test]
    fn test_out_of_order_and_after_end_rejected() {
        let runner = DiagnosticRunner;
        let mut state = SessionState::new();
        runner.start(&mut state, pool());

        assert!(matches!(runner.submit(&mut state, 1, "x", None), Err(ProgressError::InvalidState(_))));
        runner.submit(&mut state, 0, "x", None).unwrap();
        runner.submit(&mut state, 1, "x", None).unwrap();
        assert!(runner.submit(&mut state, 2, "x", None).is_err());
        assert_eq!(state.responses.len(), 2);
    }

    #[test]
    fn test_grading_when_requested() {
        let runner = DiagnosticRunner;
        let mut state = SessionState::new();
        runner.start(&mut state, pool());
        let mut grader = ExactMatchGrader;

        let record = runner.submit(&mut state, 0, " 2 ", Some(&mut grader)).unwrap();
        assert_eq!(record.correct, Some(true));
    }

    #[test]
    fn test_empty_pool_is_complete() {
        let runner = DiagnosticRunner;
        let mut state = SessionState::new();
        runner.start(&mut state, Vec::new());
        assert_eq!(runner.total(&state), 0);
        assert!(runner.is_complete(&state));
    }

    #[test]
    fn test_not_started_rejected() {
        let mut state = SessionState::new();
        assert!(DiagnosticRunner.submit(&mut state, 0, "x", None).is_err());
    }
}
