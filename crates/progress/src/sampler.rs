//! Reinforcement question sampling.

use gamechanger_core::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Draws a bounded practice set from weak-topic questions.
#[derive(Debug, Clone, Copy)]
pub struct ReinforcementSampler {
    size: usize,
}

impl ReinforcementSampler {
    /// Create a sampler drawing at most `size` questions.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Uniformly sample `min(size, matching)` questions whose topic is in
    /// `weak_topics`, without replacement. No matches yields an empty set.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        weak_topics: &[String],
        rng: &mut R,
    ) -> Vec<Question> {
        let filtered: Vec<&Question> = pool
            .iter()
            .filter(|q| weak_topics.iter().any(|t| *t == q.topic))
            .collect();

        let amount = self.size.min(filtered.len());
        debug!("Sampling {} of {} weak-topic questions", amount, filtered.len());

        filtered
            .choose_multiple(rng, amount)
            .map(|q| (*q).clone())
            .collect()
    }
}

impl Default for ReinforcementSampler {
    fn default() -> Self {
        Self::new(15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamechanger_core::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(per_topic: &[(&str, usize)]) -> Vec<Question> {
        let mut out = Vec::new();
        for (topic, n) in per_topic {
            for i in 0..*n {
                out.push(Question::new("Math", *topic, Difficulty::Medium, format!("{} #{}", topic, i), "1"));
            }
        }
        out
    }

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bounded_to_fifteen() {
        let pool = pool(&[("A", 10), ("B", 10), ("C", 10)]);
        let mut rng = StdRng::seed_from_u64(42);
        let sample = ReinforcementSampler::default().sample(&pool, &topics(&["A", "B"]), &mut rng);

        assert_eq!(sample.len(), 15);
        assert!(sample.iter().all(|q| q.topic == "A" || q.topic == "B"));

        let mut prompts: Vec<_> = sample.iter().map(|q| q.prompt.clone()).collect();
        prompts.sort();
        prompts.dedup();
        assert_eq!(prompts.len(), 15);
    }

    #[test]
    fn test_takes_everything_when_small() {
        let pool = pool(&[("A", 3), ("B", 4)]);
        let mut rng = StdRng::seed_from_u64(1);
        let sample = ReinforcementSampler::default().sample(&pool, &topics(&["A"]), &mut rng);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn test_no_matching_topics_is_empty() {
        let pool = pool(&[("A", 3)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ReinforcementSampler::default().sample(&pool, &topics(&["Z"]), &mut rng).is_empty());
        assert!(ReinforcementSampler::default().sample(&[], &topics(&["A"]), &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let pool = pool(&[("A", 20), ("B", 20)]);
        let weak = topics(&["A", "B"]);
        let first = ReinforcementSampler::default().sample(&pool, &weak, &mut StdRng::seed_from_u64(9));
        let second = ReinforcementSampler::default().sample(&pool, &weak, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
