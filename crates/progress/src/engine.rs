//! The session engine - explicit handlers over an owned session.
//!
//! Each handler takes the session by `&mut`, applies one interaction and
//! returns the events it produced:
//! ```text
//! Diagnostic → Weakness Analysis → Reinforcement → Mastery / Reward
//! ```
//! Every returned event is also dispatched to the registered subscribers.

use chrono::NaiveDate;
use gamechanger_core::{CatalogKey, EngineEvent, Question, SessionPhase, SessionState, GROWTH_TRAIT};
use gamechanger_storage::{ScoreRecord, Storage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::analyzer::WeaknessAnalyzer;
use crate::config::EngineConfig;
use crate::diagnostic::DiagnosticRunner;
use crate::error::{ProgressError, Result};
use crate::grading::{AutoGrader, Grader};
use crate::pool::load_pool;
use crate::sampler::ReinforcementSampler;
use crate::scheduler::{NextReview, ReviewDeck, ReviewScheduler};
use crate::tracker::MasteryTracker;

/// Receives engine events as they are produced.
pub trait EventSubscriber: Send {
    /// Handle one event. The subscriber may update the session.
    fn on_event(&mut self, event: &EngineEvent, session: &mut SessionState);
}

impl<F> EventSubscriber for F
where
    F: FnMut(&EngineEvent, &mut SessionState) + Send,
{
    fn on_event(&mut self, event: &EngineEvent, session: &mut SessionState) {
        self(event, session)
    }
}

/// Bumps a trait score whenever the session reward is granted.
#[derive(Debug, Clone)]
pub struct TraitGrowthSubscriber {
    trait_name: String,
    increment: f32,
}

impl TraitGrowthSubscriber {
    /// Bump `trait_name` by `increment` on each reward.
    pub fn new(trait_name: impl Into<String>, increment: f32) -> Self {
        Self {
            trait_name: trait_name.into(),
            increment,
        }
    }
}

impl Default for TraitGrowthSubscriber {
    fn default() -> Self {
        Self::new(GROWTH_TRAIT, EngineConfig::default().growth_increment)
    }
}

impl EventSubscriber for TraitGrowthSubscriber {
    fn on_event(&mut self, event: &EngineEvent, session: &mut SessionState) {
        if let EngineEvent::RewardGranted { topic } = event {
            let score = session.scores.bump(&self.trait_name, self.increment);
            info!("{} raised to {} after reward on {}", self.trait_name, score, topic);
        }
    }
}

/// Drives sessions through the progression flow.
pub struct SessionEngine {
    config: EngineConfig,
    grader: Box<dyn Grader>,
    rng: StdRng,
    subscribers: Vec<Box<dyn EventSubscriber>>,
    runner: DiagnosticRunner,
    analyzer: WeaknessAnalyzer,
    sampler: ReinforcementSampler,
    tracker: MasteryTracker,
    scheduler: ReviewScheduler,
}

impl SessionEngine {
    /// Create an engine with an entropy-seeded sampler.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed sampling seed (for testing).
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            runner: DiagnosticRunner,
            analyzer: WeaknessAnalyzer::new(config.weak_topic_count),
            sampler: ReinforcementSampler::new(config.reinforcement_size),
            tracker: MasteryTracker::from_config(&config),
            scheduler: ReviewScheduler::from_config(&config),
            grader: Box::new(AutoGrader),
            rng,
            subscribers: Vec::new(),
            config,
        }
    }

    /// Replace the grading strategy.
    pub fn with_grader(mut self, grader: Box<dyn Grader>) -> Self {
        self.grader = grader;
        self
    }

    /// Subscribe the Growth trait bump to reward events.
    pub fn with_growth_reward(mut self) -> Self {
        let subscriber = TraitGrowthSubscriber::new(GROWTH_TRAIT, self.config.growth_increment);
        self.subscribers.push(Box::new(subscriber));
        self
    }

    /// Register an event subscriber.
    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Diagnostic phase ===

    /// Load a grade's diagnostic from storage and start it. Never fails; a
    /// substituted or empty pool comes back as an advisory.
    pub async fn load_diagnostic<S: Storage + ?Sized>(
        &mut self,
        state: &mut SessionState,
        storage: &S,
        key: &CatalogKey,
    ) -> (Vec<EngineEvent>, Option<ProgressError>) {
        let loaded = load_pool(storage, key).await;
        let events = self.start_diagnostic(state, loaded.questions);
        (events, loaded.advisory)
    }

    /// Start a diagnostic over `pool`. An empty pool completes immediately.
    pub fn start_diagnostic(&mut self, state: &mut SessionState, pool: Vec<Question>) -> Vec<EngineEvent> {
        self.runner.start(state, pool);
        info!("Session {} started diagnostic ({} questions)", state.id, state.pool.len());

        if self.runner.is_complete(state) {
            let events = self.finish_diagnostic(state);
            self.dispatch(state, &events);
            return events;
        }
        Vec::new()
    }

    /// Answer the current diagnostic question.
    pub fn submit_diagnostic(&mut self, state: &mut SessionState, answer: &str) -> Result<Vec<EngineEvent>> {
        let index = state.diagnostic_cursor;
        let grader: Option<&mut dyn Grader> = if self.config.grade_diagnostic {
            Some(self.grader.as_mut())
        } else {
            None
        };
        self.runner.submit(state, index, answer, grader)?;
        debug!("Diagnostic {}/{} answered", index + 1, self.runner.total(state));

        let mut events = Vec::new();
        if self.runner.is_complete(state) {
            events = self.finish_diagnostic(state);
        }
        self.dispatch(state, &events);
        Ok(events)
    }

    fn finish_diagnostic(&mut self, state: &mut SessionState) -> Vec<EngineEvent> {
        state.weak_topics = self.analyzer.analyze(&state.responses);
        state.phase = SessionPhase::DiagnosticComplete;
        info!("Diagnostic complete, weak topics: {:?}", state.weak_topics);

        vec![EngineEvent::DiagnosticComplete {
            weak_topics: state.weak_topics.clone(),
        }]
    }

    // === Reinforcement phase ===

    /// Sample reinforcement questions from the weak topics and reset the
    /// tally. Mastered topics and the reward carry over.
    pub fn start_reinforcement(&mut self, state: &mut SessionState) -> Result<Vec<EngineEvent>> {
        if !matches!(
            state.phase,
            SessionPhase::DiagnosticComplete | SessionPhase::ReinforcementComplete
        ) {
            return Err(ProgressError::InvalidState(format!(
                "cannot start reinforcement during {:?}",
                state.phase
            )));
        }

        state.reinforcement = self.sampler.sample(&state.pool, &state.weak_topics, &mut self.rng);
        state.reinforcement_cursor = 0;
        state.tally.clear();

        if state.reinforcement.is_empty() {
            info!("No weak-topic questions to practise");
            state.phase = SessionPhase::ReinforcementComplete;
        } else {
            info!("Reinforcement started with {} questions", state.reinforcement.len());
            state.phase = SessionPhase::Reinforcement;
        }
        Ok(Vec::new())
    }

    /// Grade and record an answer to the current reinforcement question.
    pub fn submit_reinforcement(&mut self, state: &mut SessionState, answer: &str) -> Result<Vec<EngineEvent>> {
        let Some(question) = state.current_reinforcement() else {
            return Err(ProgressError::InvalidState(format!(
                "no reinforcement question pending during {:?}",
                state.phase
            )));
        };
        let topic = question.topic.clone();
        let correct = self.grader.grade(question, answer);
        debug!("Reinforcement on {} graded {} by {}", topic, correct, self.grader.name());

        let events = self.record_outcome(state, &topic, correct);
        state.reinforcement_cursor += 1;
        if state.reinforcement_cursor >= state.reinforcement.len() {
            state.phase = SessionPhase::ReinforcementComplete;
            info!("Reinforcement complete, mastered: {:?}", state.mastery.mastered_topics);
        }

        self.dispatch(state, &events);
        Ok(events)
    }

    fn record_outcome(&mut self, state: &mut SessionState, topic: &str, correct: bool) -> Vec<EngineEvent> {
        let outcome = self.tracker.record(&mut state.tally, &mut state.mastery, topic, correct);

        let mut events = vec![EngineEvent::ReinforcementProgress {
            topic: topic.to_string(),
            tally: outcome.tally,
        }];
        if let Some(topic) = outcome.reward_delta {
            events.push(EngineEvent::RewardGranted { topic });
        }
        if let Some(topic) = outcome.mastery_delta {
            events.push(EngineEvent::TopicMastered { topic });
        }
        events
    }

    // === Spaced repetition ===

    /// Build a review deck over `questions`.
    pub fn review_deck(&self, questions: Vec<Question>) -> ReviewDeck {
        ReviewDeck::new(questions)
    }

    /// Emit a review event for every question due on `today`.
    pub fn due_reviews(
        &mut self,
        state: &mut SessionState,
        deck: &ReviewDeck,
        today: NaiveDate,
    ) -> Vec<EngineEvent> {
        let events: Vec<EngineEvent> = deck
            .due_indices(today)
            .into_iter()
            .filter_map(|index| {
                deck.question(index).map(|question| EngineEvent::ReviewDue {
                    index,
                    question: question.clone(),
                })
            })
            .collect();
        info!("{} of {} review questions due", events.len(), deck.len());
        self.dispatch(state, &events);
        events
    }

    /// Present the next due review question, if any.
    pub fn next_review(
        &mut self,
        state: &mut SessionState,
        deck: &mut ReviewDeck,
        today: NaiveDate,
    ) -> (NextReview, Vec<EngineEvent>) {
        let next = deck.next_due(today);
        let mut events = Vec::new();
        if let NextReview::Due(index) = next {
            if let Some(question) = deck.question(index) {
                events.push(EngineEvent::ReviewDue {
                    index,
                    question: question.clone(),
                });
            }
        }
        self.dispatch(state, &events);
        (next, events)
    }

    /// Grade a review answer and reschedule the question. Returns whether
    /// the answer was correct.
    pub fn submit_review(
        &mut self,
        deck: &mut ReviewDeck,
        index: usize,
        answer: &str,
        today: NaiveDate,
    ) -> Result<bool> {
        let schedule = deck.answer(&self.scheduler, index, today)?;
        let correct = deck
            .question(index)
            .is_some_and(|question| self.grader.grade(question, answer));
        debug!(
            "Review {} attempt {} next {:?}",
            index, schedule.attempt_count, schedule.next_review_date
        );
        Ok(correct)
    }

    // === Persistence ===

    /// Append the session's trait scores to the ledger.
    pub async fn save_scores<S: Storage + ?Sized>(
        &self,
        state: &SessionState,
        storage: &mut S,
        date: NaiveDate,
    ) -> Result<ScoreRecord> {
        let Some(student) = state.student.clone() else {
            return Err(ProgressError::InvalidState("session has no student".to_string()));
        };
        let record = ScoreRecord::new(student, date, state.scores.clone());
        storage.append_scores(&record).await?;
        info!("Saved scores for {} (aggregate {})", record.student_id, record.aggregate);
        Ok(record)
    }

    fn dispatch(&mut self, state: &mut SessionState, events: &[EngineEvent]) {
        for event in events {
            debug!("Dispatching {}", event.name());
            for subscriber in self.subscribers.iter_mut() {
                subscriber.on_event(event, state);
            }
        }
    }
}
