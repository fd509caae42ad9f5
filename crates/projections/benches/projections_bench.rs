use common::AggregateId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::events::{FamilyChildAddedData, FamilyCreatedData, PersonCreatedData};
use domain::{ChildRelationship, DomainEvent, Gender, RelationshipType};
use event_store::Version;
use projections::{InMemoryReadModelStore, Projector};

fn person_created(person_id: AggregateId, gender: Gender) -> DomainEvent {
    DomainEvent::PersonCreated(PersonCreatedData {
        person_id,
        given_name: Some("Ada".to_string()),
        surname: Some("Lovelace".to_string()),
        gender,
        birth_date: Some("10 DEC 1815".to_string()),
        birth_place: Some("London".to_string()),
        birth_coordinates: None,
        death_date: None,
        death_place: None,
        death_coordinates: None,
        notes: None,
        confidence: Default::default(),
    })
}

fn bench_project_person_created(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("projections/person_created", |b| {
        b.iter(|| {
            rt.block_on(async {
                let projector = Projector::new(InMemoryReadModelStore::new());
                projector
                    .project(
                        &person_created(AggregateId::new(), Gender::Female),
                        Version::first(),
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_project_child_link(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("projections/family_child_added", |b| {
        b.iter(|| {
            rt.block_on(async {
                let projector = Projector::new(InMemoryReadModelStore::new());
                let father = AggregateId::new();
                let mother = AggregateId::new();
                let child = AggregateId::new();
                let family_id = AggregateId::new();

                projector
                    .project(&person_created(father, Gender::Male), Version::first())
                    .await
                    .unwrap();
                projector
                    .project(&person_created(mother, Gender::Female), Version::first())
                    .await
                    .unwrap();
                projector
                    .project(&person_created(child, Gender::Female), Version::first())
                    .await
                    .unwrap();
                projector
                    .project(
                        &DomainEvent::FamilyCreated(FamilyCreatedData {
                            family_id,
                            partner1_id: Some(father),
                            partner2_id: Some(mother),
                            relationship_type: RelationshipType::Married,
                            marriage_date: None,
                            marriage_place: None,
                        }),
                        Version::first(),
                    )
                    .await
                    .unwrap();
                projector
                    .project(
                        &DomainEvent::FamilyChildAdded(FamilyChildAddedData {
                            membership_id: AggregateId::new(),
                            family_id,
                            person_id: child,
                            relationship: ChildRelationship::Biological,
                            sequence: 0,
                        }),
                        Version::new(2),
                    )
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_project_person_created, bench_project_child_link);
criterion_main!(benches);
