//! Game Changer core data models.
//!
//! This crate defines the data structures shared by the progression
//! engine: questions, catalogs, responses, session state, review
//! schedules, trait scores and engine events.

#![warn(missing_docs)]

// Identities
mod id;

// Question pools
mod question;
mod catalog;
pub mod builtin;

// Session state
mod response;
mod session;
mod review;
mod scores;
mod event;

// Re-exports
pub use id::{SessionId, StudentId};

pub use question::{Question, Difficulty};
pub use catalog::{
    CatalogKey, CatalogError, GradeLevel, WorksheetCatalog, Category, Subcategory,
    DIAGNOSTIC_DIR, WORKSHEET_DIR,
};

pub use response::{ResponseRecord, QuestionRef};
pub use session::{SessionState, SessionPhase, ReinforcementTally, MasteryState};
pub use review::{ReviewSchedule, ReviewState};
pub use scores::{TraitScores, DEFAULT_TRAITS, DEFAULT_TRAIT_SCORE, GROWTH_TRAIT};
pub use event::EngineEvent;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
