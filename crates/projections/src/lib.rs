//! Read models and the projector for the genealogy query side.
//!
//! This crate provides:
//! - the denormalized read model structures, each versioned by the stream
//!   of the last event applied to it
//! - the [`ReadModelStore`] contract the projector depends on (point
//!   lookups, cascade/merge listings, and a transactional [`WriteBatch`])
//! - [`InMemoryReadModelStore`], the reference store implementation
//! - the [`Projector`], which folds one decoded domain event into read
//!   model mutations
//! - the [`ProjectionProcessor`] catch-up/rebuild loop over the event log

pub mod error;
pub mod memory;
pub mod models;
pub mod processor;
pub mod projector;
pub mod store;

pub use error::{ProjectionError, ReadModelError, Result};
pub use memory::{InMemoryReadModelStore, ReadModelState};
pub use models::{
    AssociationReadModel, AttributeReadModel, CitationReadModel, EventReadModel,
    FamilyChildReadModel, FamilyReadModel, LdsOrdinanceReadModel, MediaReadModel, NoteReadModel,
    PedigreeEdge, PersonNameReadModel, PersonReadModel, SourceReadModel, SubmitterReadModel,
};
pub use processor::ProjectionProcessor;
pub use projector::Projector;
pub use store::{ReadModelStore, WriteBatch, WriteOp};
