//! Answer grading strategies.

use gamechanger_core::Question;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

const NUMBER_PATTERN: &str = r"-?\d+(?:\.\d+)?";

/// Decides whether an answer is correct.
pub trait Grader: Send {
    /// Grade `answer` against `question`.
    fn grade(&mut self, question: &Question, answer: &str) -> bool;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Lowercase, trim, and collapse inner whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case- and whitespace-insensitive text comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchGrader;

impl Grader for ExactMatchGrader {
    fn grade(&mut self, question: &Question, answer: &str) -> bool {
        normalize(answer) == normalize(&question.answer)
    }

    fn name(&self) -> &'static str {
        "exact_match"
    }
}

/// The selected option must equal the expected answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleChoiceGrader;

impl Grader for MultipleChoiceGrader {
    fn grade(&mut self, question: &Question, answer: &str) -> bool {
        answer.trim() == question.answer.trim()
    }

    fn name(&self) -> &'static str {
        "multiple_choice"
    }
}

/// Compares the first number in each string within a tolerance.
#[derive(Debug, Clone)]
pub struct NumericToleranceGrader {
    tolerance: f64,
    number: Option<Regex>,
}

impl NumericToleranceGrader {
    /// Create a grader accepting |expected - given| <= tolerance.
    pub fn new(tolerance: f64) -> Self {
        let number = match Regex::new(NUMBER_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Numeric pattern failed to compile: {}", e);
                None
            }
        };
        Self {
            tolerance: tolerance.abs(),
            number,
        }
    }

    fn first_number(&self, text: &str) -> Option<f64> {
        self.number
            .as_ref()?
            .find(text)
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl Grader for NumericToleranceGrader {
    fn grade(&mut self, question: &Question, answer: &str) -> bool {
        match (self.first_number(&question.answer), self.first_number(answer)) {
            (Some(expected), Some(given)) => (expected - given).abs() <= self.tolerance,
            _ => ExactMatchGrader.grade(question, answer),
        }
    }

    fn name(&self) -> &'static str {
        "numeric_tolerance"
    }
}

/// Multiple choice for items with options, exact match otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoGrader;

impl Grader for AutoGrader {
    fn grade(&mut self, question: &Question, answer: &str) -> bool {
        if question.is_multiple_choice() {
            MultipleChoiceGrader.grade(question, answer)
        } else {
            ExactMatchGrader.grade(question, answer)
        }
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}

/// Coin flip, ignoring the answer. Reproduces the simulated grading of the
/// early dashboards.
pub struct RandomGrader {
    rng: StdRng,
}

impl RandomGrader {
    /// Create from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create with a fixed seed (for testing).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGrader {
    fn default() -> Self {
        Self::new()
    }
}

impl Grader for RandomGrader {
    fn grade(&mut self, _question: &Question, _answer: &str) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
