use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, ExpectedVersion, NewEvent, Position, Result,
    Version,
    store::EventStore,
};

#[derive(Default)]
struct Inner {
    log: Vec<EventEnvelope>,
    versions: HashMap<AggregateId, Version>,
}

/// In-memory event store implementation.
///
/// Backs the projector unit tests and the replay-determinism suite with the
/// same contract as the PostgreSQL implementation. Global positions are the
/// 1-based index into the log.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.inner.read().await.log.len()
    }

    /// Clears all events and stream versions.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.log.clear();
        inner.versions.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(
        &self,
        aggregate_id: AggregateId,
        aggregate_type: &str,
        events: Vec<NewEvent>,
        expected: ExpectedVersion,
    ) -> Result<Version> {
        if events.is_empty() {
            return Err(EventStoreError::EmptyAppend);
        }

        let mut inner = self.inner.write().await;

        let current = inner
            .versions
            .get(&aggregate_id)
            .copied()
            .unwrap_or_default();

        if !expected.matches(current) {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current,
            });
        }

        let mut version = current;
        for event in events {
            version = version.next();
            let position = Position::new(inner.log.len() as i64 + 1);
            inner.log.push(EventEnvelope {
                event_id: event.event_id,
                event_type: event.event_type,
                aggregate_id,
                aggregate_type: aggregate_type.to_string(),
                version,
                position,
                timestamp: event.timestamp,
                payload: event.payload,
            });
            metrics::counter!("event_store_events_appended").increment(1);
        }
        inner.versions.insert(aggregate_id, version);

        Ok(version)
    }

    async fn read_stream(&self, aggregate_id: AggregateId) -> Result<Vec<EventEnvelope>> {
        let inner = self.inner.read().await;
        let events: Vec<_> = inner
            .log
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect();
        if events.is_empty() {
            return Err(EventStoreError::StreamNotFound(aggregate_id));
        }
        // The log is position-ordered, so per-stream events are already in
        // version order.
        Ok(events)
    }

    async fn read_all(&self, from: Position, limit: usize) -> Result<Vec<EventEnvelope>> {
        let inner = self.inner.read().await;
        Ok(inner
            .log
            .iter()
            .filter(|e| e.position > from)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn stream_version(&self, aggregate_id: AggregateId) -> Result<Version> {
        let inner = self.inner.read().await;
        Ok(inner
            .versions
            .get(&aggregate_id)
            .copied()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_event(event_type: &str) -> NewEvent {
        NewEvent::new(event_type, serde_json::json!({"test": true}))
    }

    #[tokio::test]
    async fn append_single_event() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        let version = store
            .append(
                id,
                "Person",
                vec![create_event("PersonCreated")],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();
        assert_eq!(version, Version::first());

        let events = store.read_stream(id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].version, Version::first());
        assert_eq!(events[0].position, Position::new(1));
        assert_eq!(events[0].aggregate_type, "Person");
    }

    #[tokio::test]
    async fn append_batch_assigns_contiguous_versions() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        let version = store
            .append(
                id,
                "Person",
                vec![
                    create_event("PersonCreated"),
                    create_event("PersonUpdated"),
                    create_event("PersonUpdated"),
                ],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();
        assert_eq!(version, Version::new(3));

        let events = store.read_stream(id).await.unwrap();
        let versions: Vec<i64> = events.iter().map(|e| e.version.as_i64()).collect();
        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn append_monotonicity_across_calls() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        for n in 0..5i64 {
            store
                .append(
                    id,
                    "Person",
                    vec![create_event("PersonUpdated")],
                    if n == 0 {
                        ExpectedVersion::NoStream
                    } else {
                        ExpectedVersion::Exact(Version::new(n))
                    },
                )
                .await
                .unwrap();
        }

        assert_eq!(store.stream_version(id).await.unwrap(), Version::new(5));
        let events = store.read_stream(id).await.unwrap();
        assert_eq!(events.len(), 5);
        let versions: Vec<i64> = events.iter().map(|e| e.version.as_i64()).collect();
        assert_eq!(versions, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn stale_expected_version_is_rejected() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        store
            .append(
                id,
                "Person",
                vec![create_event("PersonCreated"), create_event("PersonUpdated")],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();

        // Stale (behind) and ahead expectations both fail.
        for expected in [
            ExpectedVersion::Exact(Version::new(1)),
            ExpectedVersion::Exact(Version::new(3)),
            ExpectedVersion::NoStream,
        ] {
            let result = store
                .append(id, "Person", vec![create_event("PersonUpdated")], expected)
                .await;
            assert!(matches!(
                result,
                Err(EventStoreError::ConcurrencyConflict { actual, .. })
                    if actual == Version::new(2)
            ));
        }

        // A rejected append leaves the stream untouched.
        assert_eq!(store.stream_version(id).await.unwrap(), Version::new(2));
        assert_eq!(store.event_count().await, 2);
    }

    #[tokio::test]
    async fn conflicting_batch_writes_nothing() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        let result = store
            .append(
                id,
                "Person",
                vec![create_event("PersonCreated")],
                ExpectedVersion::Exact(Version::new(7)),
            )
            .await;
        assert!(matches!(
            result,
            Err(EventStoreError::ConcurrencyConflict { .. })
        ));
        assert_eq!(store.event_count().await, 0);
        assert_eq!(store.stream_version(id).await.unwrap(), Version::initial());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let store = InMemoryEventStore::new();
        let result = store
            .append(
                AggregateId::new(),
                "Person",
                vec![],
                ExpectedVersion::NoStream,
            )
            .await;
        assert!(matches!(result, Err(EventStoreError::EmptyAppend)));
    }

    #[tokio::test]
    async fn read_stream_unknown_stream_is_not_found() {
        let store = InMemoryEventStore::new();
        let result = store.read_stream(AggregateId::new()).await;
        assert!(matches!(result, Err(EventStoreError::StreamNotFound(_))));
    }

    #[tokio::test]
    async fn stream_version_is_zero_for_unwritten_stream() {
        let store = InMemoryEventStore::new();
        let version = store.stream_version(AggregateId::new()).await.unwrap();
        assert_eq!(version, Version::initial());
    }

    #[tokio::test]
    async fn read_all_pages_by_global_position() {
        let store = InMemoryEventStore::new();

        // Interleave three streams so positions cross stream boundaries.
        let ids = [AggregateId::new(), AggregateId::new(), AggregateId::new()];
        for round in 0..2i64 {
            for id in ids {
                store
                    .append(
                        id,
                        "Person",
                        vec![create_event("PersonUpdated")],
                        if round == 0 {
                            ExpectedVersion::NoStream
                        } else {
                            ExpectedVersion::Exact(Version::new(round))
                        },
                    )
                    .await
                    .unwrap();
            }
        }

        let first_page = store.read_all(Position::start(), 4).await.unwrap();
        assert_eq!(first_page.len(), 4);
        let last_position = first_page.last().unwrap().position;

        let second_page = store.read_all(last_position, 4).await.unwrap();
        assert_eq!(second_page.len(), 2);

        let all: Vec<i64> = first_page
            .iter()
            .chain(second_page.iter())
            .map(|e| e.position.as_i64())
            .collect();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);
    }
}
