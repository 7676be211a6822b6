//! Progression engine
//!
//! Diagnostic, weakness analysis, reinforcement sampling, mastery and
//! reward tracking, and spaced-repetition review.

#![warn(missing_docs)]

pub mod error;
pub mod config;
pub mod pool;
pub mod grading;
pub mod analyzer;
pub mod sampler;
pub mod tracker;
pub mod diagnostic;
pub mod scheduler;
pub mod worksheet;
pub mod engine;

pub use error::{ProgressError, Result};
pub use config::EngineConfig;
pub use pool::{load_pool, LoadedPool};
pub use grading::{
    AutoGrader, ExactMatchGrader, Grader, MultipleChoiceGrader, NumericToleranceGrader, RandomGrader,
};
pub use analyzer::WeaknessAnalyzer;
pub use sampler::ReinforcementSampler;
pub use tracker::{MasteryTracker, RecordOutcome};
pub use diagnostic::DiagnosticRunner;
pub use scheduler::{NextReview, ReviewDeck, ReviewEntry, ReviewScheduler};
pub use worksheet::{WorksheetAnswer, WorksheetFeedback, WorksheetRun, WorksheetSummary};
pub use engine::{EventSubscriber, SessionEngine, TraitGrowthSubscriber};
