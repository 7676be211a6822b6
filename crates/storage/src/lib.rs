//! Storage abstraction and implementations for Game Changer.
//!
//! This crate provides a trait-based storage interface with a JSON file
//! reference implementation and the append-only CSV score ledger.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod ledger;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::{JsonStorage, LEDGER_FILE};
pub use ledger::{ScoreLedger, ScoreRecord};
