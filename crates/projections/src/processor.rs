//! Catch-up and rebuild: feeding the event log through the projector.

use event_store::{EventStore, Position};

use crate::Result;
use crate::projector::Projector;
use crate::store::ReadModelStore;

/// Default number of events fetched per page during catch-up.
const DEFAULT_PAGE_SIZE: usize = 256;

/// Replays stored events into a projector, page by page.
///
/// Read models are disposable: a full rebuild is a catch-up from
/// [`Position::start()`] into a fresh read model store. The returned
/// position is the caller's resume marker.
pub struct ProjectionProcessor<E> {
    store: E,
    page_size: usize,
}

impl<E: EventStore> ProjectionProcessor<E> {
    /// Creates a processor over the given event store.
    pub fn new(store: E) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Overrides the catch-up page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Feeds every event after `from` through the projector, in global
    /// position order, and returns the position of the last event applied
    /// (or `from` when the log had nothing new).
    #[tracing::instrument(skip(self, projector), fields(from = %from))]
    pub async fn catch_up<S: ReadModelStore>(
        &self,
        projector: &Projector<S>,
        from: Position,
    ) -> Result<Position> {
        let mut position = from;
        loop {
            let page = self.store.read_all(position, self.page_size).await?;
            let page_len = page.len();
            for envelope in &page {
                projector.project_envelope(envelope).await?;
                metrics::counter!("projection_events_applied").increment(1);
                position = envelope.position;
            }
            if page_len < self.page_size {
                break;
            }
        }
        tracing::info!(position = %position, "catch-up complete");
        Ok(position)
    }

    /// Replays the full log from the beginning.
    pub async fn rebuild<S: ReadModelStore>(&self, projector: &Projector<S>) -> Result<Position> {
        self.catch_up(projector, Position::start()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryReadModelStore, ProjectionError};
    use common::AggregateId;
    use domain::DomainEvent;
    use domain::events::PersonCreatedData;
    use event_store::{EventStore, ExpectedVersion, InMemoryEventStore, NewEvent};

    fn person_created(person_id: AggregateId, name: &str) -> DomainEvent {
        DomainEvent::PersonCreated(PersonCreatedData {
            person_id,
            given_name: Some(name.to_string()),
            surname: None,
            gender: Default::default(),
            birth_date: None,
            birth_place: None,
            birth_coordinates: None,
            death_date: None,
            death_place: None,
            death_coordinates: None,
            notes: None,
            confidence: Default::default(),
        })
    }

    async fn append(store: &InMemoryEventStore, event: &DomainEvent) {
        store
            .append(
                event.aggregate_id(),
                event.aggregate_type(),
                vec![event.to_new_event().unwrap()],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn catch_up_pages_through_the_whole_log() {
        let events = InMemoryEventStore::new();
        let mut ids = Vec::new();
        for n in 0..5 {
            let id = AggregateId::new();
            ids.push(id);
            append(&events, &person_created(id, &format!("Person {n}"))).await;
        }

        let projector = Projector::new(InMemoryReadModelStore::new());
        let processor = ProjectionProcessor::new(events).with_page_size(2);

        let position = processor.rebuild(&projector).await.unwrap();
        assert_eq!(position.as_i64(), 5);
        for id in ids {
            assert!(projector.store().person(id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn catch_up_resumes_from_a_position_marker() {
        let events = InMemoryEventStore::new();
        let first = AggregateId::new();
        append(&events, &person_created(first, "First")).await;

        let projector = Projector::new(InMemoryReadModelStore::new());
        let processor = ProjectionProcessor::new(events.clone());
        let marker = processor.rebuild(&projector).await.unwrap();

        let second = AggregateId::new();
        append(&events, &person_created(second, "Second")).await;

        let resumed = processor.catch_up(&projector, marker).await.unwrap();
        assert_eq!(resumed.as_i64(), 2);
        assert!(projector.store().person(second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn empty_log_returns_the_starting_marker() {
        let processor = ProjectionProcessor::new(InMemoryEventStore::new());
        let projector = Projector::new(InMemoryReadModelStore::new());
        let position = processor.rebuild(&projector).await.unwrap();
        assert_eq!(position, Position::start());
    }

    #[tokio::test]
    async fn unknown_event_types_in_the_log_are_skipped() {
        let events = InMemoryEventStore::new();
        events
            .append(
                AggregateId::new(),
                "Person",
                vec![NewEvent::new(
                    "PersonPhotoTagged",
                    serde_json::json!({"photo": "portrait.jpg"}),
                )],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();
        let known = AggregateId::new();
        append(&events, &person_created(known, "Known")).await;

        let projector = Projector::new(InMemoryReadModelStore::new());
        let processor = ProjectionProcessor::new(events);
        let position = processor.rebuild(&projector).await.unwrap();

        assert_eq!(position.as_i64(), 2);
        assert!(projector.store().person(known).await.unwrap().is_some());
        assert_eq!(projector.store().state().await.persons.len(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_stops_the_replay() {
        let events = InMemoryEventStore::new();
        events
            .append(
                AggregateId::new(),
                "Person",
                vec![NewEvent::new(
                    "PersonCreated",
                    serde_json::json!({"person_id": 42}),
                )],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();

        let projector = Projector::new(InMemoryReadModelStore::new());
        let processor = ProjectionProcessor::new(events);
        let result = processor.rebuild(&projector).await;
        assert!(matches!(result, Err(ProjectionError::Decode(_))));
    }
}
