//! Weak topic detection from diagnostic responses.

use gamechanger_core::ResponseRecord;

/// Picks the least-answered topics of a diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct WeaknessAnalyzer {
    limit: usize,
}

impl WeaknessAnalyzer {
    /// Create an analyzer returning at most `limit` topics.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Topics with the lowest response counts, ascending by count.
    /// Ties keep the order in which topics first appear.
    pub fn analyze(&self, responses: &[ResponseRecord]) -> Vec<String> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for response in responses {
            match counts.iter_mut().find(|(topic, _)| *topic == response.topic) {
                Some(entry) => entry.1 += 1,
                None => counts.push((response.topic.as_str(), 1)),
            }
        }

        // Stable sort keeps first-encountered order among equal counts
        counts.sort_by_key(|(_, count)| *count);
        counts
            .into_iter()
            .take(self.limit)
            .map(|(topic, _)| topic.to_string())
            .collect()
    }
}

impl Default for WeaknessAnalyzer {
    fn default() -> Self {
        Self::new(5)
    }
}
