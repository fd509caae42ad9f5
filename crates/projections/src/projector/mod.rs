//! The projector: deterministic fold of domain events into read models.
//!
//! One handler per event kind, grouped by aggregate:
//! - [`person`]: persons, person names, the merge operation
//! - [`family`]: families, child link/unlink, pedigree edge maintenance
//! - [`source`]: sources and citations with citation-count maintenance
//! - [`records`]: media, life events, attributes, notes, submitters,
//!   associations, LDS ordinances
//!
//! Handlers trust the event store's per-stream ordering and do not
//! re-validate it. Across streams there is no ordering guarantee, so every
//! handler that touches an entity from a foreign stream tolerates its
//! absence (no-op, not an error).

mod family;
mod person;
mod records;
mod source;

use domain::DomainEvent;
use event_store::{EventEnvelope, Version};

use crate::Result;
use crate::store::ReadModelStore;

/// Folds decoded domain events into read model mutations.
///
/// Each projected event commits exactly one [`WriteBatch`](crate::WriteBatch)
/// to the injected store, so the store can apply a whole event — the
/// multi-record merge included — as one transactional unit.
pub struct Projector<S> {
    store: S,
}

impl<S: ReadModelStore> Projector<S> {
    /// Creates a projector over the given read model store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies one decoded event, produced at `version` of its stream, to
    /// the read models.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type(), version = %version))]
    pub async fn project(&self, event: &DomainEvent, version: Version) -> Result<()> {
        match event {
            DomainEvent::PersonCreated(d) => self.person_created(d, version).await,
            DomainEvent::PersonUpdated(d) => self.person_updated(d, version).await,
            DomainEvent::PersonDeleted(d) => self.person_deleted(d).await,
            DomainEvent::PersonMerged(d) => self.person_merged(d, version).await,
            DomainEvent::PersonNameAdded(d) => self.person_name_added(d, version).await,
            DomainEvent::PersonNameUpdated(d) => self.person_name_updated(d, version).await,
            DomainEvent::PersonNameRemoved(d) => self.person_name_removed(d, version).await,
            DomainEvent::FamilyCreated(d) => self.family_created(d, version).await,
            DomainEvent::FamilyUpdated(d) => self.family_updated(d, version).await,
            DomainEvent::FamilyDeleted(d) => self.family_deleted(d).await,
            DomainEvent::FamilyChildAdded(d) => self.family_child_added(d, version).await,
            DomainEvent::FamilyChildRemoved(d) => self.family_child_removed(d, version).await,
            DomainEvent::SourceCreated(d) => self.source_created(d, version).await,
            DomainEvent::SourceUpdated(d) => self.source_updated(d, version).await,
            DomainEvent::SourceDeleted(d) => self.source_deleted(d).await,
            DomainEvent::CitationCreated(d) => self.citation_created(d, version).await,
            DomainEvent::CitationUpdated(d) => self.citation_updated(d, version).await,
            DomainEvent::CitationDeleted(d) => self.citation_deleted(d).await,
            DomainEvent::MediaCreated(d) => self.media_created(d, version).await,
            DomainEvent::MediaUpdated(d) => self.media_updated(d, version).await,
            DomainEvent::MediaDeleted(d) => self.media_deleted(d).await,
            DomainEvent::EventCreated(d) => self.event_created(d, version).await,
            DomainEvent::EventUpdated(d) => self.event_updated(d, version).await,
            DomainEvent::EventDeleted(d) => self.event_deleted(d).await,
            DomainEvent::AttributeCreated(d) => self.attribute_created(d, version).await,
            DomainEvent::AttributeUpdated(d) => self.attribute_updated(d, version).await,
            DomainEvent::AttributeDeleted(d) => self.attribute_deleted(d).await,
            DomainEvent::NoteCreated(d) => self.note_created(d, version).await,
            DomainEvent::NoteUpdated(d) => self.note_updated(d, version).await,
            DomainEvent::NoteDeleted(d) => self.note_deleted(d).await,
            DomainEvent::SubmitterCreated(d) => self.submitter_created(d, version).await,
            DomainEvent::SubmitterUpdated(d) => self.submitter_updated(d, version).await,
            DomainEvent::SubmitterDeleted(d) => self.submitter_deleted(d).await,
            DomainEvent::AssociationCreated(d) => self.association_created(d, version).await,
            DomainEvent::AssociationUpdated(d) => self.association_updated(d, version).await,
            DomainEvent::AssociationDeleted(d) => self.association_deleted(d).await,
            DomainEvent::LdsOrdinanceCreated(d) => self.lds_ordinance_created(d, version).await,
            DomainEvent::LdsOrdinanceUpdated(d) => self.lds_ordinance_updated(d, version).await,
            DomainEvent::LdsOrdinanceDeleted(d) => self.lds_ordinance_deleted(d).await,
        }
    }

    /// Decodes a stored envelope and applies it.
    ///
    /// An event-type tag outside the known vocabulary is skipped silently:
    /// old projector code must not fail on events introduced by a newer
    /// writer. A malformed payload for a *known* tag still propagates —
    /// that indicates log corruption, not a version skew.
    pub async fn project_envelope(&self, envelope: &EventEnvelope) -> Result<()> {
        match DomainEvent::from_envelope(envelope) {
            Ok(event) => self.project(&event, envelope.version).await,
            Err(domain::EventDecodeError::UnknownEventType(event_type)) => {
                tracing::debug!(%event_type, "skipping unrecognized event type");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Derives a display name from name parts.
pub(crate) fn full_name(given_name: Option<&str>, surname: Option<&str>) -> String {
    match (given_name, surname) {
        (Some(given), Some(surname)) => format!("{given} {surname}"),
        (Some(given), None) => given.to_string(),
        (None, Some(surname)) => surname.to_string(),
        (None, None) => String::new(),
    }
}
