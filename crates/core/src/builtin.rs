//! Built-in questions used when a catalog file is absent.

use crate::question::{Difficulty, Question};

/// The single generic fallback question.
pub fn sample_question() -> Question {
    Question::new(
        "Math",
        "Addition",
        Difficulty::Easy,
        "What is 2 + 3?",
        "5",
    )
    .with_explanation("Count three more after two: 3, 4, 5.")
}

/// Worksheet-specific samples, if any exist for this worksheet.
pub fn worksheet_samples(category: &str, worksheet: &str) -> Option<Vec<Question>> {
    let items = match worksheet {
        "Subject Pronouns" => vec![
            Question::new(category, worksheet, Difficulty::Easy, "_____ am a student. (I/She/They)", "I"),
            Question::new(category, worksheet, Difficulty::Medium, "_____ are family. (Mark and Daniel)", "They"),
        ],
        "Pronoun Replacement" => vec![Question::new(
            category,
            worksheet,
            Difficulty::Easy,
            "Charles puts the books on the table. → _____ puts the books on the table.",
            "He",
        )
        .with_options(["It", "Me", "Us", "He"])],
        _ => return None,
    };
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_worksheet_samples() {
        let items = worksheet_samples("Grammar", "Subject Pronouns").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|q| q.topic == "Subject Pronouns" && q.subject == "Grammar"));

        let mc = worksheet_samples("Grammar", "Pronoun Replacement").unwrap();
        assert!(mc[0].is_multiple_choice());
    }

    #[test]
    fn test_unknown_worksheet_has_no_samples() {
        assert!(worksheet_samples("Writing", "ABC Practice").is_none());
    }
}
