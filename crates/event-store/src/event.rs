use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AggregateId;

/// Unique identifier for an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Version number for a stream, used for optimistic concurrency control.
///
/// A stream that has never been written is at version 0; the first event is
/// version 1 and each subsequent event increments by exactly 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) for an unwritten stream.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the first version (1) for the first event.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// Global position of an event in the full log, across all streams.
///
/// Positions are contiguous starting at 1; `Position::start()` (0) sorts
/// before every stored event and is the replay starting marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Creates a new position from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the marker before the first event in the log.
    pub fn start() -> Self {
        Self(0)
    }

    /// Returns the raw position value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller's assumption about a stream's current version.
///
/// Appends fail with [`ConcurrencyConflict`](crate::EventStoreError) unless
/// the assumption holds at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// The stream must not have been written yet.
    NoStream,

    /// The stream must be at exactly this version.
    Exact(Version),
}

impl ExpectedVersion {
    /// Returns whether `current` satisfies this expectation.
    pub fn matches(&self, current: Version) -> bool {
        match self {
            ExpectedVersion::NoStream => current == Version::initial(),
            ExpectedVersion::Exact(expected) => current == *expected,
        }
    }
}

impl std::fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedVersion::NoStream => write!(f, "no-stream"),
            ExpectedVersion::Exact(version) => write!(f, "{version}"),
        }
    }
}

/// A domain event prepared for appending.
///
/// The store assigns the stream version and global position at append time;
/// the caller only supplies the event-type tag and serialized payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    /// Unique identifier for this event record.
    pub event_id: EventId,

    /// The event-type tag (e.g. "PersonCreated", "FamilyChildAdded").
    pub event_type: String,

    /// The event payload as JSON, opaque to the store.
    pub payload: serde_json::Value,

    /// Wall-clock occurrence timestamp.
    pub timestamp: DateTime<Utc>,
}

impl NewEvent {
    /// Creates a new event with a fresh ID and the current timestamp.
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// A stored event: the immutable log entry shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier for this event record.
    pub event_id: EventId,

    /// The event-type tag.
    pub event_type: String,

    /// The stream this event belongs to.
    pub aggregate_id: AggregateId,

    /// The stream type (e.g. "Person", "Family").
    pub aggregate_type: String,

    /// The stream-relative version of the stream after this event.
    pub version: Version,

    /// The global position in the full log.
    pub position: Position,

    /// When the event occurred.
    pub timestamp: DateTime<Utc>,

    /// The event payload as JSON.
    pub payload: serde_json::Value,
}
