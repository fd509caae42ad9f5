//! The read model store contract the projector depends on.
//!
//! The projector never talks to a concrete storage engine. It reads through
//! the point lookups and listings below, and writes by committing one
//! [`WriteBatch`] per projected event, so a backend can apply each event's
//! mutations as a single transaction.

use async_trait::async_trait;
use common::AggregateId;

use crate::error::ReadModelError;
use crate::models::{
    AssociationReadModel, AttributeReadModel, CitationReadModel, EventReadModel,
    FamilyChildReadModel, FamilyReadModel, LdsOrdinanceReadModel, MediaReadModel, NoteReadModel,
    PedigreeEdge, PersonNameReadModel, PersonReadModel, SourceReadModel, SubmitterReadModel,
};

/// Result type for read model store operations.
pub type Result<T> = std::result::Result<T, ReadModelError>;

/// One save-or-delete mutation against a single read model record.
///
/// Saves are upserts keyed by id; deletes of absent records are no-ops.
/// Pedigree edges are keyed by person id.
#[derive(Debug, Clone)]
pub enum WriteOp {
    SavePerson(PersonReadModel),
    DeletePerson(AggregateId),
    SavePersonName(PersonNameReadModel),
    DeletePersonName(AggregateId),
    SaveFamily(FamilyReadModel),
    DeleteFamily(AggregateId),
    SaveFamilyChild(FamilyChildReadModel),
    DeleteFamilyChild(AggregateId),
    SavePedigreeEdge(PedigreeEdge),
    DeletePedigreeEdge(AggregateId),
    SaveSource(SourceReadModel),
    DeleteSource(AggregateId),
    SaveCitation(CitationReadModel),
    DeleteCitation(AggregateId),
    SaveMedia(MediaReadModel),
    DeleteMedia(AggregateId),
    SaveEvent(EventReadModel),
    DeleteEvent(AggregateId),
    SaveAttribute(AttributeReadModel),
    DeleteAttribute(AggregateId),
    SaveNote(NoteReadModel),
    DeleteNote(AggregateId),
    SaveSubmitter(SubmitterReadModel),
    DeleteSubmitter(AggregateId),
    SaveAssociation(AssociationReadModel),
    DeleteAssociation(AggregateId),
    SaveLdsOrdinance(LdsOrdinanceReadModel),
    DeleteLdsOrdinance(AggregateId),
}

/// An ordered batch of mutations committed as one unit.
///
/// Every projector handler accumulates its writes here and commits once,
/// which gives a backend the scope it needs to apply a whole event — a
/// multi-record merge included — atomically.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mutation to the batch.
    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    /// Returns whether the batch holds no mutations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of mutations in the batch.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns the mutations in application order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consumes the batch into its mutations.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Abstraction over the keyed, versioned store of denormalized views.
///
/// Point lookups return `Ok(None)` for "not present" — absence is never an
/// error. Listings exist only for the traversals the projector performs
/// during cascades and merges. All implementations must be thread-safe.
#[async_trait]
pub trait ReadModelStore: Send + Sync {
    // -- Persons and names -------------------------------------------------

    /// Looks up a person by id.
    async fn person(&self, id: AggregateId) -> Result<Option<PersonReadModel>>;

    /// Looks up a person name by id.
    async fn person_name(&self, id: AggregateId) -> Result<Option<PersonNameReadModel>>;

    /// Lists all names owned by a person.
    async fn names_for_person(&self, person_id: AggregateId)
    -> Result<Vec<PersonNameReadModel>>;

    // -- Families, memberships, pedigree -----------------------------------

    /// Looks up a family by id.
    async fn family(&self, id: AggregateId) -> Result<Option<FamilyReadModel>>;

    /// Lists families in which the person appears as a partner.
    async fn families_with_partner(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<FamilyReadModel>>;

    /// Lists a family's child memberships, in sequence order.
    async fn children_of_family(
        &self,
        family_id: AggregateId,
    ) -> Result<Vec<FamilyChildReadModel>>;

    /// Lists memberships where the person is the child (their parent
    /// families).
    async fn parent_families_for_person(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<FamilyChildReadModel>>;

    /// Looks up a person's pedigree edge.
    async fn pedigree_edge(&self, person_id: AggregateId) -> Result<Option<PedigreeEdge>>;

    // -- Sources and citations ---------------------------------------------

    /// Looks up a source by id.
    async fn source(&self, id: AggregateId) -> Result<Option<SourceReadModel>>;

    /// Looks up a citation by id.
    async fn citation(&self, id: AggregateId) -> Result<Option<CitationReadModel>>;

    /// Lists citations referencing a source.
    async fn citations_for_source(
        &self,
        source_id: AggregateId,
    ) -> Result<Vec<CitationReadModel>>;

    /// Lists citations whose fact owner is the given entity.
    async fn citations_for_owner(
        &self,
        owner_id: AggregateId,
    ) -> Result<Vec<CitationReadModel>>;

    // -- Other entities ----------------------------------------------------

    /// Looks up a media item by id.
    async fn media(&self, id: AggregateId) -> Result<Option<MediaReadModel>>;

    /// Lists media items owned by an entity.
    async fn media_for_owner(&self, owner_id: AggregateId) -> Result<Vec<MediaReadModel>>;

    /// Looks up a life event by id.
    async fn event(&self, id: AggregateId) -> Result<Option<EventReadModel>>;

    /// Lists life events owned by an entity.
    async fn events_for_owner(&self, owner_id: AggregateId) -> Result<Vec<EventReadModel>>;

    /// Looks up an attribute by id.
    async fn attribute(&self, id: AggregateId) -> Result<Option<AttributeReadModel>>;

    /// Lists attributes owned by a person.
    async fn attributes_for_person(
        &self,
        person_id: AggregateId,
    ) -> Result<Vec<AttributeReadModel>>;

    /// Looks up a note by id.
    async fn note(&self, id: AggregateId) -> Result<Option<NoteReadModel>>;

    /// Looks up a submitter by id.
    async fn submitter(&self, id: AggregateId) -> Result<Option<SubmitterReadModel>>;

    /// Looks up an association by id.
    async fn association(&self, id: AggregateId) -> Result<Option<AssociationReadModel>>;

    /// Looks up an LDS ordinance by id.
    async fn lds_ordinance(&self, id: AggregateId) -> Result<Option<LdsOrdinanceReadModel>>;

    // -- Writes ------------------------------------------------------------

    /// Applies a batch of mutations as one unit.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;
}
