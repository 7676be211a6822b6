//! Question model - immutable assessment items.

use serde::{Deserialize, Serialize};

/// A single assessment item loaded from a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Subject area (e.g. "Math", "Grammar")
    #[serde(default)]
    pub subject: String,

    /// Topic within the subject
    #[serde(default)]
    pub topic: String,

    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Prompt shown to the student
    #[serde(rename = "question", alias = "prompt")]
    pub prompt: String,

    /// Expected answer
    #[serde(default)]
    pub answer: String,

    /// Choices for multiple-choice items, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Explanation shown after grading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Create a free-text question.
    pub fn new(
        subject: impl Into<String>,
        topic: impl Into<String>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            topic: topic.into(),
            difficulty,
            prompt: prompt.into(),
            answer: answer.into(),
            options: None,
            explanation: None,
        }
    }

    /// Attach multiple-choice options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Whether this is a multiple-choice item.
    pub fn is_multiple_choice(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// Difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Introductory item
    Easy,
    /// Grade-level item
    #[default]
    Medium,
    /// Stretch item
    Hard,
}

impl Difficulty {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_diagnostic_item() {
        let json = r#"{
            "subject": "Math",
            "topic": "Fractions",
            "difficulty": "Hard",
            "question": "What is 1/2 + 1/4?",
            "answer": "3/4"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.topic, "Fractions");
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.prompt, "What is 1/2 + 1/4?");
        assert!(!q.is_multiple_choice());
    }

    #[test]
    fn test_deserialize_worksheet_item_defaults() {
        let json = r#"{
            "question": "Charles puts the books on the table. → _____ puts the books on the table.",
            "options": ["It", "Me", "Us", "He"],
            "answer": "He"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.subject.is_empty());
        assert!(q.topic.is_empty());
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert!(q.is_multiple_choice());
    }

    #[test]
    fn test_prompt_alias() {
        let q: Question = serde_json::from_str(r#"{"prompt": "2 + 2?", "answer": "4"}"#).unwrap();
        assert_eq!(q.prompt, "2 + 2?");
    }

    #[test]
    fn test_empty_options_is_not_multiple_choice() {
        let q = Question::new("Math", "Add", Difficulty::Easy, "1+1", "2").with_options(Vec::<String>::new());
        assert!(!q.is_multiple_choice());
    }
}
