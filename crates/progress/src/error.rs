//! Progression engine errors.
//!
//! Every variant is recoverable: the engine reports it to the host and the
//! session carries on.

use gamechanger_storage::StorageError;

/// Error type for engine operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors raised by the progression engine.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// A pool or config file is absent; fallback content was used
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// A pool or config file could not be parsed
    #[error("Malformed resource {resource}: {reason}")]
    MalformedResource {
        /// Which resource
        resource: String,
        /// Parser message
        reason: String,
    },

    /// Nothing to sample from
    #[error("Question pool is empty")]
    EmptyPool,

    /// Operation not valid in the session's current phase
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
