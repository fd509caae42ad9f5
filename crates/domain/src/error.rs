//! Domain error types.

use thiserror::Error;

/// Errors that can occur while decoding a stored event.
///
/// Both variants are store-level failures: an unknown tag or a malformed
/// payload indicates log or schema corruption and must surface to the
/// caller. (Tolerating events from a *newer* writer is a projector-layer
/// policy, not a decode concern.)
#[derive(Debug, Error)]
pub enum EventDecodeError {
    /// The event-type tag is not part of the known vocabulary.
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// The payload does not deserialize into the shape the tag requires.
    #[error("Malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),
}
