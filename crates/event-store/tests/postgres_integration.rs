//! PostgreSQL integration tests
//!
//! These tests need a local Docker daemon and share one PostgreSQL
//! container. Run with:
//!
//! ```bash
//! cargo test -p event-store --test postgres_integration -- --ignored
//! ```

use std::sync::Arc;

use event_store::{
    AggregateId, EventStore, EventStoreError, ExpectedVersion, NewEvent, Position,
    PostgresEventStore, Version,
};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for the schema
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_events_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn store() -> PostgresEventStore {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();
    PostgresEventStore::new(pool)
}

fn create_event(event_type: &str) -> NewEvent {
    NewEvent::new(event_type, serde_json::json!({"test": true}))
}

#[tokio::test]
#[serial]
#[ignore = "requires a local Docker daemon"]
async fn append_and_read_stream() {
    let store = store().await;
    let id = AggregateId::new();

    let version = store
        .append(
            id,
            "Person",
            vec![create_event("PersonCreated"), create_event("PersonUpdated")],
            ExpectedVersion::NoStream,
        )
        .await
        .unwrap();
    assert_eq!(version, Version::new(2));

    let events = store.read_stream(id).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].version, Version::first());
    assert_eq!(events[1].version, Version::new(2));
    assert!(events[0].position < events[1].position);
}

#[tokio::test]
#[serial]
#[ignore = "requires a local Docker daemon"]
async fn concurrency_conflict_on_stale_version() {
    let store = store().await;
    let id = AggregateId::new();

    store
        .append(
            id,
            "Person",
            vec![create_event("PersonCreated")],
            ExpectedVersion::NoStream,
        )
        .await
        .unwrap();

    let result = store
        .append(
            id,
            "Person",
            vec![create_event("PersonUpdated")],
            ExpectedVersion::NoStream,
        )
        .await;
    assert!(matches!(
        result,
        Err(EventStoreError::ConcurrencyConflict { .. })
    ));

    assert_eq!(store.stream_version(id).await.unwrap(), Version::first());
}

#[tokio::test]
#[serial]
#[ignore = "requires a local Docker daemon"]
async fn read_all_pages_in_position_order() {
    let store = store().await;

    for _ in 0..3 {
        store
            .append(
                AggregateId::new(),
                "Person",
                vec![create_event("PersonCreated")],
                ExpectedVersion::NoStream,
            )
            .await
            .unwrap();
    }

    let mut position = Position::start();
    let mut seen = 0usize;
    loop {
        let page = store.read_all(position, 2).await.unwrap();
        for pair in page.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
        seen += page.len();
        if let Some(last) = page.last() {
            position = last.position;
        }
        if page.len() < 2 {
            break;
        }
    }
    assert!(seen >= 3);
}

#[tokio::test]
#[serial]
#[ignore = "requires a local Docker daemon"]
async fn stream_version_zero_for_unwritten_stream() {
    let store = store().await;
    let version = store.stream_version(AggregateId::new()).await.unwrap();
    assert_eq!(version, Version::initial());
}
