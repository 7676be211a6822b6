//! Self-report trait scores (the PQ radar).

use serde::{Deserialize, Serialize};

/// Default score for every trait.
pub const DEFAULT_TRAIT_SCORE: f32 = 5.0;

/// Trait names in radar order.
pub const DEFAULT_TRAITS: [&str; 5] = ["Participation", "Effort", "Mindset", "Growth", "Focus"];

/// The trait bumped when a reward is granted.
pub const GROWTH_TRAIT: &str = "Growth";

/// Ordered trait → score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    entries: Vec<(String, f32)>,
}

impl TraitScores {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Score of a trait, if tracked.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    /// Set a trait score, appending the trait if it is new.
    pub fn set(&mut self, name: impl Into<String>, score: f32) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((name, score)),
        }
    }

    /// Add `delta` to a trait, starting from the default score if untracked.
    pub fn bump(&mut self, name: &str, delta: f32) -> f32 {
        let next = self.get(name).unwrap_or(DEFAULT_TRAIT_SCORE) + delta;
        self.set(name, next);
        next
    }

    /// Trait names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// (name, score) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// Sum of all trait scores.
    pub fn aggregate(&self) -> f32 {
        self.entries.iter().map(|(_, s)| s).sum()
    }

    /// Number of tracked traits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no traits are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TraitScores {
    fn default() -> Self {
        Self {
            entries: DEFAULT_TRAITS
                .iter()
                .map(|n| (n.to_string(), DEFAULT_TRAIT_SCORE))
                .collect(),
        }
    }
}
