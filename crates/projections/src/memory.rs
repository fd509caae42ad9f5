use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::AggregateId;
use tokio::sync::RwLock;

use crate::models::{
    AssociationReadModel, AttributeReadModel, CitationReadModel, EventReadModel,
    FamilyChildReadModel, FamilyReadModel, LdsOrdinanceReadModel, MediaReadModel, NoteReadModel,
    PedigreeEdge, PersonNameReadModel, PersonReadModel, SourceReadModel, SubmitterReadModel,
};
use crate::store::{ReadModelStore, Result, WriteBatch, WriteOp};

/// The full contents of an in-memory read model store.
///
/// Exposed so tests can compare two stores field-for-field (replay
/// determinism).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadModelState {
    pub persons: HashMap<AggregateId, PersonReadModel>,
    pub person_names: HashMap<AggregateId, PersonNameReadModel>,
    pub families: HashMap<AggregateId, FamilyReadModel>,
    pub family_children: HashMap<AggregateId, FamilyChildReadModel>,
    pub pedigree_edges: HashMap<AggregateId, PedigreeEdge>,
    pub sources: HashMap<AggregateId, SourceReadModel>,
    pub citations: HashMap<AggregateId, CitationReadModel>,
    pub media: HashMap<AggregateId, MediaReadModel>,
    pub events: HashMap<AggregateId, EventReadModel>,
    pub attributes: HashMap<AggregateId, AttributeReadModel>,
    pub notes: HashMap<AggregateId, NoteReadModel>,
    pub submitters: HashMap<AggregateId, SubmitterReadModel>,
    pub associations: HashMap<AggregateId, AssociationReadModel>,
    pub lds_ordinances: HashMap<AggregateId, LdsOrdinanceReadModel>,
}

impl ReadModelState {
    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::SavePerson(m) => {
                self.persons.insert(m.id, m);
            }
            WriteOp::DeletePerson(id) => {
                self.persons.remove(&id);
            }
            WriteOp::SavePersonName(m) => {
                self.person_names.insert(m.id, m);
            }
            WriteOp::DeletePersonName(id) => {
                self.person_names.remove(&id);
            }
            WriteOp::SaveFamily(m) => {
                self.families.insert(m.id, m);
            }
            WriteOp::DeleteFamily(id) => {
                self.families.remove(&id);
            }
            WriteOp::SaveFamilyChild(m) => {
                self.family_children.insert(m.id, m);
            }
            WriteOp::DeleteFamilyChild(id) => {
                self.family_children.remove(&id);
            }
            WriteOp::SavePedigreeEdge(m) => {
                self.pedigree_edges.insert(m.person_id, m);
            }
            WriteOp::DeletePedigreeEdge(person_id) => {
                self.pedigree_edges.remove(&person_id);
            }
            WriteOp::SaveSource(m) => {
                self.sources.insert(m.id, m);
            }
            WriteOp::DeleteSource(id) => {
                self.sources.remove(&id);
            }
            WriteOp::SaveCitation(m) => {
                self.citations.insert(m.id, m);
            }
            WriteOp::DeleteCitation(id) => {
                self.citations.remove(&id);
            }
            WriteOp::SaveMedia(m) => {
                self.media.insert(m.id, m);
            }
            WriteOp::DeleteMedia(id) => {
                self.media.remove(&id);
            }
            WriteOp::SaveEvent(m) => {
                self.events.insert(m.id, m);
            }
            WriteOp::DeleteEvent(id) => {
                self.events.remove(&id);
            }
            WriteOp::SaveAttribute(m) => {
                self.attributes.insert(m.id, m);
            }
            WriteOp::DeleteAttribute(id) => {
                self.attributes.remove(&id);
            }
            WriteOp::SaveNote(m) => {
                self.notes.insert(m.id, m);
            }
            WriteOp::DeleteNote(id) => {
                self.notes.remove(&id);
            }
            WriteOp::SaveSubmitter(m) => {
                self.submitters.insert(m.id, m);
            }
            WriteOp::DeleteSubmitter(id) => {
                self.submitters.remove(&id);
            }
            WriteOp::SaveAssociation(m) => {
                self.associations.insert(m.id, m);
            }
            WriteOp::DeleteAssociation(id) => {
                self.associations.remove(&id);
            }
            WriteOp::SaveLdsOrdinance(m) => {
                self.lds_ordinances.insert(m.id, m);
            }
            WriteOp::DeleteLdsOrdinance(id) => {
                self.lds_ordinances.remove(&id);
            }
        }
    }
}

/// In-memory read model store.
///
/// A batch commit runs under a single write lock, so readers never observe
/// a half-applied event.
#[derive(Clone, Default)]
pub struct InMemoryReadModelStore {
    state: Arc<RwLock<ReadModelState>>,
}

impl InMemoryReadModelStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the full store contents.
    pub async fn state(&self) -> ReadModelState {
        self.state.read().await.clone()
    }

    /// Clears every table.
    pub async fn clear(&self) {
        *self.state.write().await = ReadModelState::default();
    }
}

#[async_trait]
impl ReadModelStore for InMemoryReadModelStore {
    async fn person(&self, id: AggregateId) -> Result<Option<PersonReadModel>> {
        Ok(self.state.read().await.persons.get(&id).cloned())
    }

    async fn person_name(&self, id: AggregateId) -> Result<Option<PersonNameReadModel>> {
        Ok(self.state.read().await.person_names.get(&id).cloned())
    }

    async fn names_for_person(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<PersonNameReadModel>> {
        let mut names: Vec<_> = self
            .state
            .read()
            .await
            .person_names
            .values()
            .filter(|n| n.person_id == person_id)
            .cloned()
            .collect();
        names.sort_by_key(|n| n.id);
        Ok(names)
    }

    async fn family(&self, id: AggregateId) -> Result<Option<FamilyReadModel>> {
        Ok(self.state.read().await.families.get(&id).cloned())
    }

    async fn families_with_partner(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<FamilyReadModel>> {
        let mut families: Vec<_> = self
            .state
            .read()
            .await
            .families
            .values()
            .filter(|f| f.partner1_id == Some(person_id) || f.partner2_id == Some(person_id))
            .cloned()
            .collect();
        families.sort_by_key(|f| f.id);
        Ok(families)
    }

    async fn children_of_family(
        &self,
        family_id: AggregateId,
    ) -> Result<Vec<FamilyChildReadModel>> {
        let mut children: Vec<_> = self
            .state
            .read()
            .await
            .family_children
            .values()
            .filter(|c| c.family_id == family_id)
            .cloned()
            .collect();
        children.sort_by_key(|c| (c.sequence, c.id));
        Ok(children)
    }

    async fn parent_families_for_person(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<FamilyChildReadModel>> {
        let mut memberships: Vec<_> = self
            .state
            .read()
            .await
            .family_children
            .values()
            .filter(|c| c.person_id == person_id)
            .cloned()
            .collect();
        memberships.sort_by_key(|c| c.id);
        Ok(memberships)
    }

    async fn pedigree_edge(&self, person_id: AggregateId) -> Result<Option<PedigreeEdge>> {
        Ok(self.state.read().await.pedigree_edges.get(&person_id).cloned())
    }

    async fn source(&self, id: AggregateId) -> Result<Option<SourceReadModel>> {
        Ok(self.state.read().await.sources.get(&id).cloned())
    }

    async fn citation(&self, id: AggregateId) -> Result<Option<CitationReadModel>> {
        Ok(self.state.read().await.citations.get(&id).cloned())
    }

    async fn citations_for_source(
        &self,
        source_id: AggregateId,
    ) -> Result<Vec<CitationReadModel>> {
        let mut citations: Vec<_> = self
            .state
            .read()
            .await
            .citations
            .values()
            .filter(|c| c.source_id == source_id)
            .cloned()
            .collect();
        citations.sort_by_key(|c| c.id);
        Ok(citations)
    }

    async fn citations_for_owner(
        &self,
        owner_id: AggregateId,
    ) -> Result<Vec<CitationReadModel>> {
        let mut citations: Vec<_> = self
            .state
            .read()
            .await
            .citations
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        citations.sort_by_key(|c| c.id);
        Ok(citations)
    }

    async fn media(&self, id: AggregateId) -> Result<Option<MediaReadModel>> {
        Ok(self.state.read().await.media.get(&id).cloned())
    }

    async fn media_for_owner(&self, owner_id: AggregateId) -> Result<Vec<MediaReadModel>> {
        let mut media: Vec<_> = self
            .state
            .read()
            .await
            .media
            .values()
            .filter(|m| m.owner_id == owner_id)
            .cloned()
            .collect();
        media.sort_by_key(|m| m.id);
        Ok(media)
    }

    async fn event(&self, id: AggregateId) -> Result<Option<EventReadModel>> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn events_for_owner(&self, owner_id: AggregateId) -> Result<Vec<EventReadModel>> {
        let mut events: Vec<_> = self
            .state
            .read()
            .await
            .events
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    async fn attribute(&self, id: AggregateId) -> Result<Option<AttributeReadModel>> {
        Ok(self.state.read().await.attributes.get(&id).cloned())
    }

    async fn attributes_for_person(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<AttributeReadModel>> {
        let mut attributes: Vec<_> = self
            .state
            .read()
            .await
            .attributes
            .values()
            .filter(|a| a.person_id == person_id)
            .cloned()
            .collect();
        attributes.sort_by_key(|a| a.id);
        Ok(attributes)
    }

    async fn note(&self, id: AggregateId) -> Result<Option<NoteReadModel>> {
        Ok(self.state.read().await.notes.get(&id).cloned())
    }

    async fn submitter(&self, id: AggregateId) -> Result<Option<SubmitterReadModel>> {
        Ok(self.state.read().await.submitters.get(&id).cloned())
    }

    async fn association(&self, id: AggregateId) -> Result<Option<AssociationReadModel>> {
        Ok(self.state.read().await.associations.get(&id).cloned())
    }

    async fn lds_ordinance(&self, id: AggregateId) -> Result<Option<LdsOrdinanceReadModel>> {
        Ok(self.state.read().await.lds_ordinances.get(&id).cloned())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut state = self.state.write().await;
        for op in batch.into_ops() {
            state.apply(op);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Gender;
    use event_store::Version;

    fn person(id: AggregateId, name: &str) -> PersonReadModel {
        PersonReadModel {
            id,
            given_name: Some(name.to_string()),
            surname: None,
            full_name: name.to_string(),
            gender: Gender::Unknown,
            birth_date: None,
            birth_date_sort: None,
            birth_place: None,
            birth_coordinates: None,
            death_date: None,
            death_date_sort: None,
            death_place: None,
            death_coordinates: None,
            notes: None,
            confidence: Default::default(),
            version: Version::first(),
        }
    }

    #[tokio::test]
    async fn absent_lookup_is_none_not_an_error() {
        let store = InMemoryReadModelStore::new();
        assert!(store.person(AggregateId::new()).await.unwrap().is_none());
        assert!(store.pedigree_edge(AggregateId::new()).await.unwrap().is_none());
        assert!(
            store
                .citations_for_owner(AggregateId::new())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn commit_applies_ops_in_order() {
        let store = InMemoryReadModelStore::new();
        let id = AggregateId::new();

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SavePerson(person(id, "Ada")));
        batch.push(WriteOp::SavePerson(person(id, "Augusta")));
        store.commit(batch).await.unwrap();

        // Second save wins: saves are upserts keyed by id.
        let stored = store.person(id).await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Augusta");

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeletePerson(id));
        store.commit(batch).await.unwrap();
        assert!(store.person(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_absent_record_is_a_noop() {
        let store = InMemoryReadModelStore::new();
        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeletePerson(AggregateId::new()));
        batch.push(WriteOp::DeletePedigreeEdge(AggregateId::new()));
        store.commit(batch).await.unwrap();
        assert_eq!(store.state().await, ReadModelState::default());
    }

    #[tokio::test]
    async fn children_of_family_ordered_by_sequence() {
        let store = InMemoryReadModelStore::new();
        let family_id = AggregateId::new();

        let mut batch = WriteBatch::new();
        for sequence in [2, 0, 1] {
            batch.push(WriteOp::SaveFamilyChild(FamilyChildReadModel {
                id: AggregateId::new(),
                family_id,
                person_id: AggregateId::new(),
                relationship: Default::default(),
                sequence,
                version: Version::first(),
            }));
        }
        store.commit(batch).await.unwrap();

        let children = store.children_of_family(family_id).await.unwrap();
        let sequences: Vec<i32> = children.iter().map(|c| c.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }
}
