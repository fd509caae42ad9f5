use thiserror::Error;

use crate::{AggregateId, ExpectedVersion, Version};

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// A concurrency conflict occurred when appending events.
    /// The expected version did not match the actual version.
    #[error(
        "Concurrency conflict for stream {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        aggregate_id: AggregateId,
        expected: ExpectedVersion,
        actual: Version,
    },

    /// A read was issued against a stream that has never been written.
    #[error("Stream not found: {0}")]
    StreamNotFound(AggregateId),

    /// An append was issued with no events in the batch.
    #[error("Cannot append an empty event batch")]
    EmptyAppend,

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
