use common::AggregateId;
use criterion::{Criterion, criterion_group, criterion_main};
use event_store::{
    EventStore, ExpectedVersion, InMemoryEventStore, NewEvent, Position, Version,
};

fn make_event() -> NewEvent {
    NewEvent::new(
        "PersonCreated",
        serde_json::json!({
            "person_id": "00000000-0000-0000-0000-000000000001",
            "given_name": "Ada",
            "surname": "Lovelace"
        }),
    )
}

fn bench_append_single_event(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_event", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                store
                    .append(
                        AggregateId::new(),
                        "Person",
                        vec![make_event()],
                        ExpectedVersion::NoStream,
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_append_batch_10(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_batch_10", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                let events: Vec<NewEvent> = (0..10).map(|_| make_event()).collect();
                store
                    .append(
                        AggregateId::new(),
                        "Person",
                        events,
                        ExpectedVersion::NoStream,
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_read_all_paged(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = InMemoryEventStore::new();
    rt.block_on(async {
        for _ in 0..1000 {
            store
                .append(
                    AggregateId::new(),
                    "Person",
                    vec![make_event()],
                    ExpectedVersion::NoStream,
                )
                .await
                .unwrap();
        }
    });

    c.bench_function("event_store/read_all_1000_paged_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut position = Position::start();
                loop {
                    let page = store.read_all(position, 100).await.unwrap();
                    if let Some(last) = page.last() {
                        position = last.position;
                    }
                    if page.len() < 100 {
                        break;
                    }
                }
                assert_eq!(position.as_i64(), 1000);
            });
        });
    });
}

fn bench_stream_version(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = InMemoryEventStore::new();
    let id = AggregateId::new();
    rt.block_on(async {
        store
            .append(id, "Person", vec![make_event()], ExpectedVersion::NoStream)
            .await
            .unwrap();
    });

    c.bench_function("event_store/stream_version", |b| {
        b.iter(|| {
            rt.block_on(async {
                assert_eq!(store.stream_version(id).await.unwrap(), Version::first());
            });
        });
    });
}

criterion_group!(
    benches,
    bench_append_single_event,
    bench_append_batch_10,
    bench_read_all_paged,
    bench_stream_version
);
criterion_main!(benches);
