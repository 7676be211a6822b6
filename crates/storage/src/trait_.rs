//! Storage trait abstraction.

use async_trait::async_trait;
use gamechanger_core::{CatalogKey, Question, SessionId, SessionState};

use crate::ledger::ScoreRecord;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed score ledger
    #[error("Ledger error at line {line}: {reason}")]
    Ledger {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for question catalogs, session snapshots and the
/// score ledger.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Catalog operations ===

    /// Load a question pool. `Ok(None)` means the file is absent.
    async fn load_catalog(&self, key: &CatalogKey) -> Result<Option<Vec<Question>>>;

    /// Save a question pool (create or replace).
    async fn save_catalog(&mut self, key: &CatalogKey, questions: &[Question]) -> Result<()>;

    // === Session operations ===

    /// Save a session snapshot (create or update).
    async fn save_session(&mut self, session: &SessionState) -> Result<()>;

    /// Load a session snapshot by ID.
    async fn load_session(&self, id: SessionId) -> Result<Option<SessionState>>;

    /// List all session snapshots, oldest first.
    async fn list_sessions(&self) -> Result<Vec<SessionState>>;

    /// Delete a session snapshot.
    async fn delete_session(&mut self, id: SessionId) -> Result<()>;

    // === Score ledger ===

    /// Append one row to the score ledger.
    async fn append_scores(&mut self, record: &ScoreRecord) -> Result<()>;

    /// Read every ledger row in file order.
    async fn list_scores(&self) -> Result<Vec<ScoreRecord>>;
}
