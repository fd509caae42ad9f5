use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;
use futures_util::TryStreamExt;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, ExpectedVersion, NewEvent, Position, Result,
    Version,
};

/// A stream of stored events, borrowed from the backing store.
pub type EventStream<'a> = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send + 'a>>;

/// Core trait for event store implementations.
///
/// An event store persists an append-only, per-stream ordered log of domain
/// events. It has no knowledge of event semantics: payloads are opaque JSON.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends a batch of events to one stream.
    ///
    /// The batch is all-or-nothing: if `expected` does not match the
    /// stream's current version the append fails with
    /// [`ConcurrencyConflict`](crate::EventStoreError) and writes nothing.
    /// On success events are assigned contiguous versions starting at
    /// `current + 1` and contiguous global positions continuing the log.
    ///
    /// Returns the new version of the stream after appending.
    async fn append(
        &self,
        aggregate_id: AggregateId,
        aggregate_type: &str,
        events: Vec<NewEvent>,
        expected: ExpectedVersion,
    ) -> Result<Version>;

    /// Retrieves all events for a specific stream, oldest first.
    ///
    /// A stream that has never been written is
    /// [`StreamNotFound`](crate::EventStoreError).
    async fn read_stream(&self, aggregate_id: AggregateId) -> Result<Vec<EventEnvelope>>;

    /// Retrieves up to `limit` events across all streams with
    /// `position > from`, in global position order.
    ///
    /// This is the full-rebuild/backfill entry point: callers page through
    /// the log by advancing `from` to the highest position returned, until a
    /// page comes back shorter than `limit`.
    async fn read_all(&self, from: Position, limit: usize) -> Result<Vec<EventEnvelope>>;

    /// Gets the current version of a stream, `Version::initial()` (0) if the
    /// stream has never been written.
    async fn stream_version(&self, aggregate_id: AggregateId) -> Result<Version>;
}

/// Extension trait providing convenience methods for event stores.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event to a stream.
    async fn append_event(
        &self,
        aggregate_id: AggregateId,
        aggregate_type: &str,
        event: NewEvent,
        expected: ExpectedVersion,
    ) -> Result<Version> {
        self.append(aggregate_id, aggregate_type, vec![event], expected)
            .await
    }

    /// Checks whether a stream exists (has any events).
    async fn stream_exists(&self, aggregate_id: AggregateId) -> Result<bool> {
        Ok(self.stream_version(aggregate_id).await? != Version::initial())
    }

    /// Streams all events with `position > from`, paging through the log
    /// `page_size` records at a time.
    fn stream_from(&self, from: Position, page_size: usize) -> EventStream<'_>
    where
        Self: Sized,
    {
        let pages = futures_util::stream::try_unfold(from, move |position| async move {
            let page = self.read_all(position, page_size).await?;
            match page.last() {
                None => Ok::<_, EventStoreError>(None),
                Some(last) => {
                    let next = last.position;
                    let events = page.into_iter().map(Ok::<EventEnvelope, EventStoreError>);
                    Ok(Some((futures_util::stream::iter(events), next)))
                }
            }
        });
        Box::pin(pages.try_flatten())
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEventStore;

    #[tokio::test]
    async fn stream_exists_reflects_appends() {
        let store = InMemoryEventStore::new();
        let id = AggregateId::new();

        assert!(!store.stream_exists(id).await.unwrap());

        store
            .append_event(
                id,
                "Person",
                NewEvent::new("PersonCreated", serde_json::json!({})),
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();

        assert!(store.stream_exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn stream_from_pages_through_the_log() {
        let store = InMemoryEventStore::new();

        for _ in 0..5 {
            let id = AggregateId::new();
            store
                .append_event(
                    id,
                    "Person",
                    NewEvent::new("PersonCreated", serde_json::json!({})),
                    ExpectedVersion::NoStream,
                )
                .await
                .unwrap();
        }

        let events: Vec<_> = store
            .stream_from(Position::start(), 2)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
        assert_eq!(events.len(), 5);
        let positions: Vec<i64> = events.iter().map(|e| e.position.as_i64()).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }
}
