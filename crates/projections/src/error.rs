//! Projection error types.

use thiserror::Error;

/// Errors surfaced by a read model store backend.
///
/// "Not present" is never an error: point lookups return `None` and
/// listings return empty collections. Only storage-level failures appear
/// here.
#[derive(Debug, Error)]
pub enum ReadModelError {
    /// The backing storage failed.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReadModelError {
    /// Wraps a backend error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Errors that can occur during projection processing.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] event_store::EventStoreError),

    /// An error occurred in the read model store.
    #[error("Read model store error: {0}")]
    ReadModel(#[from] ReadModelError),

    /// A stored event failed to decode (log or schema corruption).
    #[error("Event decode error: {0}")]
    Decode(#[from] domain::EventDecodeError),

    /// An event payload field failed to deserialize.
    #[error("Event payload error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
