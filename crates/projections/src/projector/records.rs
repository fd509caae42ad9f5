//! Handlers for the remaining record aggregates: media, life events,
//! attributes, notes, submitters, associations and LDS ordinances.

use domain::events::{
    AssociationCreatedData, AssociationDeletedData, AssociationUpdatedData, AttributeCreatedData,
    AttributeDeletedData, AttributeUpdatedData, EventCreatedData, EventDeletedData,
    EventUpdatedData, LdsOrdinanceCreatedData, LdsOrdinanceDeletedData, LdsOrdinanceUpdatedData,
    MediaCreatedData, MediaDeletedData, MediaUpdatedData, NoteCreatedData, NoteDeletedData,
    NoteUpdatedData, SubmitterCreatedData, SubmitterDeletedData, SubmitterUpdatedData,
};
use domain::gendate;
use event_store::Version;

use crate::Result;
use crate::models::{
    AssociationReadModel, AttributeReadModel, EventReadModel, LdsOrdinanceReadModel,
    MediaReadModel, NoteReadModel, SubmitterReadModel,
};
use crate::store::{ReadModelStore, WriteBatch, WriteOp};

use super::Projector;

impl<S: ReadModelStore> Projector<S> {
    async fn commit_one(&self, op: WriteOp) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.push(op);
        Ok(self.store().commit(batch).await?)
    }

    // -- Media ---------------------------------------------------------------

    pub(super) async fn media_created(
        &self,
        data: &MediaCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveMedia(MediaReadModel {
            id: data.media_id,
            owner_id: data.owner_id,
            file_name: data.file_name.clone(),
            title: data.title.clone(),
            media_type: data.media_type.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn media_updated(
        &self,
        data: &MediaUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut media) = self.store().media(data.media_id).await? else {
            return Ok(());
        };
        if let Some(Some(owner_id)) = data.changes.field("owner_id")? {
            media.owner_id = owner_id;
        }
        if let Some(Some(file_name)) = data.changes.field::<String>("file_name")? {
            media.file_name = file_name;
        }
        if let Some(value) = data.changes.field("title")? {
            media.title = value;
        }
        if let Some(value) = data.changes.field("media_type")? {
            media.media_type = value;
        }
        media.version = version;
        self.commit_one(WriteOp::SaveMedia(media)).await
    }

    pub(super) async fn media_deleted(&self, data: &MediaDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteMedia(data.media_id)).await
    }

    // -- Life events ---------------------------------------------------------

    pub(super) async fn event_created(
        &self,
        data: &EventCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveEvent(EventReadModel {
            id: data.event_id,
            owner_id: data.owner_id,
            kind: data.kind.clone(),
            date_sort: data.date.as_deref().and_then(gendate::parse_sortable),
            date: data.date.clone(),
            place: data.place.clone(),
            description: data.description.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn event_updated(
        &self,
        data: &EventUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut event) = self.store().event(data.event_id).await? else {
            return Ok(());
        };
        if let Some(Some(owner_id)) = data.changes.field("owner_id")? {
            event.owner_id = owner_id;
        }
        if let Some(Some(kind)) = data.changes.field::<String>("kind")? {
            event.kind = kind;
        }
        if let Some(value) = data.changes.field::<String>("date")? {
            event.date_sort = value.as_deref().and_then(gendate::parse_sortable);
            event.date = value;
        }
        if let Some(value) = data.changes.field("place")? {
            event.place = value;
        }
        if let Some(value) = data.changes.field("description")? {
            event.description = value;
        }
        event.version = version;
        self.commit_one(WriteOp::SaveEvent(event)).await
    }

    pub(super) async fn event_deleted(&self, data: &EventDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteEvent(data.event_id)).await
    }

    // -- Attributes ----------------------------------------------------------

    pub(super) async fn attribute_created(
        &self,
        data: &AttributeCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveAttribute(AttributeReadModel {
            id: data.attribute_id,
            person_id: data.person_id,
            kind: data.kind.clone(),
            value: data.value.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn attribute_updated(
        &self,
        data: &AttributeUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut attribute) = self.store().attribute(data.attribute_id).await? else {
            return Ok(());
        };
        if let Some(Some(kind)) = data.changes.field::<String>("kind")? {
            attribute.kind = kind;
        }
        if let Some(value) = data.changes.field("value")? {
            attribute.value = value;
        }
        attribute.version = version;
        self.commit_one(WriteOp::SaveAttribute(attribute)).await
    }

    pub(super) async fn attribute_deleted(&self, data: &AttributeDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteAttribute(data.attribute_id))
            .await
    }

    // -- Notes ---------------------------------------------------------------

    pub(super) async fn note_created(
        &self,
        data: &NoteCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveNote(NoteReadModel {
            id: data.note_id,
            owner_id: data.owner_id,
            text: data.text.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn note_updated(
        &self,
        data: &NoteUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut note) = self.store().note(data.note_id).await? else {
            return Ok(());
        };
        if let Some(value) = data.changes.field("owner_id")? {
            note.owner_id = value;
        }
        if let Some(Some(text)) = data.changes.field::<String>("text")? {
            note.text = text;
        }
        note.version = version;
        self.commit_one(WriteOp::SaveNote(note)).await
    }

    pub(super) async fn note_deleted(&self, data: &NoteDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteNote(data.note_id)).await
    }

    // -- Submitters ----------------------------------------------------------

    pub(super) async fn submitter_created(
        &self,
        data: &SubmitterCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveSubmitter(SubmitterReadModel {
            id: data.submitter_id,
            name: data.name.clone(),
            email: data.email.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn submitter_updated(
        &self,
        data: &SubmitterUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut submitter) = self.store().submitter(data.submitter_id).await? else {
            return Ok(());
        };
        if let Some(Some(name)) = data.changes.field::<String>("name")? {
            submitter.name = name;
        }
        if let Some(value) = data.changes.field("email")? {
            submitter.email = value;
        }
        submitter.version = version;
        self.commit_one(WriteOp::SaveSubmitter(submitter)).await
    }

    pub(super) async fn submitter_deleted(&self, data: &SubmitterDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteSubmitter(data.submitter_id))
            .await
    }

    // -- Associations --------------------------------------------------------

    pub(super) async fn association_created(
        &self,
        data: &AssociationCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveAssociation(AssociationReadModel {
            id: data.association_id,
            person_id: data.person_id,
            associate_id: data.associate_id,
            kind: data.kind.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn association_updated(
        &self,
        data: &AssociationUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut association) = self.store().association(data.association_id).await? else {
            return Ok(());
        };
        if let Some(Some(associate_id)) = data.changes.field("associate_id")? {
            association.associate_id = associate_id;
        }
        if let Some(Some(kind)) = data.changes.field::<String>("kind")? {
            association.kind = kind;
        }
        association.version = version;
        self.commit_one(WriteOp::SaveAssociation(association)).await
    }

    pub(super) async fn association_deleted(&self, data: &AssociationDeletedData) -> Result<()> {
        self.commit_one(WriteOp::DeleteAssociation(data.association_id))
            .await
    }

    // -- LDS ordinances ------------------------------------------------------

    pub(super) async fn lds_ordinance_created(
        &self,
        data: &LdsOrdinanceCreatedData,
        version: Version,
    ) -> Result<()> {
        self.commit_one(WriteOp::SaveLdsOrdinance(LdsOrdinanceReadModel {
            id: data.ordinance_id,
            person_id: data.person_id,
            kind: data.kind.clone(),
            date_sort: data.date.as_deref().and_then(gendate::parse_sortable),
            date: data.date.clone(),
            temple: data.temple.clone(),
            version,
        }))
        .await
    }

    pub(super) async fn lds_ordinance_updated(
        &self,
        data: &LdsOrdinanceUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut ordinance) = self.store().lds_ordinance(data.ordinance_id).await? else {
            return Ok(());
        };
        if let Some(Some(kind)) = data.changes.field::<String>("kind")? {
            ordinance.kind = kind;
        }
        if let Some(value) = data.changes.field::<String>("date")? {
            ordinance.date_sort = value.as_deref().and_then(gendate::parse_sortable);
            ordinance.date = value;
        }
        if let Some(value) = data.changes.field("temple")? {
            ordinance.temple = value;
        }
        ordinance.version = version;
        self.commit_one(WriteOp::SaveLdsOrdinance(ordinance)).await
    }

    pub(super) async fn lds_ordinance_deleted(
        &self,
        data: &LdsOrdinanceDeletedData,
    ) -> Result<()> {
        self.commit_one(WriteOp::DeleteLdsOrdinance(data.ordinance_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryReadModelStore;
    use common::AggregateId;
    use domain::{ChangeSet, DomainEvent};

    fn projector() -> Projector<InMemoryReadModelStore> {
        Projector::new(InMemoryReadModelStore::new())
    }

    #[tokio::test]
    async fn life_event_lifecycle() {
        let projector = projector();
        let event_id = AggregateId::new();
        let owner = AggregateId::new();

        projector
            .project(
                &DomainEvent::EventCreated(EventCreatedData {
                    event_id,
                    owner_id: owner,
                    kind: "residence".to_string(),
                    date: Some("JUN 1840".to_string()),
                    place: Some("London".to_string()),
                    description: None,
                }),
                Version::first(),
            )
            .await
            .unwrap();

        let event = projector.store().event(event_id).await.unwrap().unwrap();
        assert_eq!(event.kind, "residence");
        assert_eq!(event.date_sort, chrono::NaiveDate::from_ymd_opt(1840, 6, 1));

        projector
            .project(
                &DomainEvent::EventUpdated(EventUpdatedData {
                    event_id,
                    changes: ChangeSet::new().with("date", serde_json::Value::Null),
                }),
                Version::new(2),
            )
            .await
            .unwrap();
        let event = projector.store().event(event_id).await.unwrap().unwrap();
        assert_eq!(event.date, None);
        assert_eq!(event.date_sort, None);
        assert_eq!(event.version, Version::new(2));

        projector
            .project(
                &DomainEvent::EventDeleted(EventDeletedData { event_id }),
                Version::new(3),
            )
            .await
            .unwrap();
        assert!(projector.store().event(event_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn media_update_tolerates_absent_row() {
        let projector = projector();
        projector
            .project(
                &DomainEvent::MediaUpdated(MediaUpdatedData {
                    media_id: AggregateId::new(),
                    changes: ChangeSet::new().with("title", serde_json::json!("Portrait")),
                }),
                Version::new(2),
            )
            .await
            .unwrap();
        assert_eq!(projector.store().state().await, Default::default());
    }

    #[tokio::test]
    async fn attribute_and_note_lifecycle() {
        let projector = projector();
        let person_id = AggregateId::new();
        let attribute_id = AggregateId::new();
        let note_id = AggregateId::new();

        projector
            .project(
                &DomainEvent::AttributeCreated(AttributeCreatedData {
                    attribute_id,
                    person_id,
                    kind: "occupation".to_string(),
                    value: Some("mathematician".to_string()),
                }),
                Version::first(),
            )
            .await
            .unwrap();
        projector
            .project(
                &DomainEvent::NoteCreated(NoteCreatedData {
                    note_id,
                    owner_id: Some(person_id),
                    text: "First analytical engine program.".to_string(),
                }),
                Version::first(),
            )
            .await
            .unwrap();

        let attributes = projector
            .store()
            .attributes_for_person(person_id)
            .await
            .unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].value.as_deref(), Some("mathematician"));

        projector
            .project(
                &DomainEvent::NoteUpdated(NoteUpdatedData {
                    note_id,
                    changes: ChangeSet::new().with("owner_id", serde_json::Value::Null),
                }),
                Version::new(2),
            )
            .await
            .unwrap();
        let note = projector.store().note(note_id).await.unwrap().unwrap();
        assert_eq!(note.owner_id, None);
    }

    #[tokio::test]
    async fn submitter_association_and_ordinance_roundtrip() {
        let projector = projector();
        let submitter_id = AggregateId::new();
        let association_id = AggregateId::new();
        let ordinance_id = AggregateId::new();
        let person_id = AggregateId::new();

        projector
            .project(
                &DomainEvent::SubmitterCreated(SubmitterCreatedData {
                    submitter_id,
                    name: "A. Researcher".to_string(),
                    email: None,
                }),
                Version::first(),
            )
            .await
            .unwrap();
        projector
            .project(
                &DomainEvent::AssociationCreated(AssociationCreatedData {
                    association_id,
                    person_id,
                    associate_id: AggregateId::new(),
                    kind: "godparent".to_string(),
                }),
                Version::first(),
            )
            .await
            .unwrap();
        projector
            .project(
                &DomainEvent::LdsOrdinanceCreated(LdsOrdinanceCreatedData {
                    ordinance_id,
                    person_id,
                    kind: "baptism".to_string(),
                    date: Some("1988".to_string()),
                    temple: Some("SLAKE".to_string()),
                }),
                Version::first(),
            )
            .await
            .unwrap();

        assert!(projector.store().submitter(submitter_id).await.unwrap().is_some());
        assert!(
            projector
                .store()
                .association(association_id)
                .await
                .unwrap()
                .is_some()
        );
        let ordinance = projector
            .store()
            .lds_ordinance(ordinance_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ordinance.date_sort, chrono::NaiveDate::from_ymd_opt(1988, 1, 1));

        projector
            .project(
                &DomainEvent::SubmitterDeleted(SubmitterDeletedData { submitter_id }),
                Version::new(2),
            )
            .await
            .unwrap();
        assert!(projector.store().submitter(submitter_id).await.unwrap().is_none());
    }
}
