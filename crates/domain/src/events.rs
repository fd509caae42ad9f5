//! The closed vocabulary of genealogy domain events.
//!
//! Every event kind is one variant of [`DomainEvent`], so projector dispatch
//! is an exhaustive match checked at compile time. The wire shape is the
//! event-type tag plus the serialized payload struct; the tag codec lives
//! here ([`DomainEvent::decode`]) and treats an unknown tag as an error —
//! skipping events from newer writers is a projector policy, not a decode
//! concern.

use common::AggregateId;
use event_store::{EventEnvelope, NewEvent};
use serde::{Deserialize, Serialize};

use crate::change::ChangeSet;
use crate::error::EventDecodeError;
use crate::values::{ChildRelationship, Confidence, Coordinates, Gender, RelationshipType};

/// Events that can occur across all genealogy aggregates.
///
/// Person name events are sub-entity events: they travel on the owning
/// Person stream and bump its version.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    PersonCreated(PersonCreatedData),
    PersonUpdated(PersonUpdatedData),
    PersonDeleted(PersonDeletedData),
    PersonMerged(PersonMergedData),
    PersonNameAdded(PersonNameAddedData),
    PersonNameUpdated(PersonNameUpdatedData),
    PersonNameRemoved(PersonNameRemovedData),

    FamilyCreated(FamilyCreatedData),
    FamilyUpdated(FamilyUpdatedData),
    FamilyDeleted(FamilyDeletedData),
    FamilyChildAdded(FamilyChildAddedData),
    FamilyChildRemoved(FamilyChildRemovedData),

    SourceCreated(SourceCreatedData),
    SourceUpdated(SourceUpdatedData),
    SourceDeleted(SourceDeletedData),

    CitationCreated(CitationCreatedData),
    CitationUpdated(CitationUpdatedData),
    CitationDeleted(CitationDeletedData),

    MediaCreated(MediaCreatedData),
    MediaUpdated(MediaUpdatedData),
    MediaDeleted(MediaDeletedData),

    EventCreated(EventCreatedData),
    EventUpdated(EventUpdatedData),
    EventDeleted(EventDeletedData),

    AttributeCreated(AttributeCreatedData),
    AttributeUpdated(AttributeUpdatedData),
    AttributeDeleted(AttributeDeletedData),

    NoteCreated(NoteCreatedData),
    NoteUpdated(NoteUpdatedData),
    NoteDeleted(NoteDeletedData),

    SubmitterCreated(SubmitterCreatedData),
    SubmitterUpdated(SubmitterUpdatedData),
    SubmitterDeleted(SubmitterDeletedData),

    AssociationCreated(AssociationCreatedData),
    AssociationUpdated(AssociationUpdatedData),
    AssociationDeleted(AssociationDeletedData),

    LdsOrdinanceCreated(LdsOrdinanceCreatedData),
    LdsOrdinanceUpdated(LdsOrdinanceUpdatedData),
    LdsOrdinanceDeleted(LdsOrdinanceDeletedData),
}

// ---- Person --------------------------------------------------------------

/// Data for PersonCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCreatedData {
    pub person_id: AggregateId,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub birth_coordinates: Option<Coordinates>,
    pub death_date: Option<String>,
    pub death_place: Option<String>,
    pub death_coordinates: Option<Coordinates>,
    pub notes: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

/// Data for PersonUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonUpdatedData {
    pub person_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for PersonDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDeletedData {
    pub person_id: AggregateId,
}

/// Data for PersonMerged: two persons reconciled into one survivor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonMergedData {
    pub survivor_id: AggregateId,
    pub merged_id: AggregateId,
    /// Field resolutions chosen during the merge, applied to the survivor
    /// exactly like an update.
    pub resolved: ChangeSet,
    /// Families in which the merged person appears as a partner.
    pub affected_families: Vec<AggregateId>,
}

/// Data for PersonNameAdded (travels on the Person stream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNameAddedData {
    pub name_id: AggregateId,
    pub person_id: AggregateId,
    pub name_type: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Data for PersonNameUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNameUpdatedData {
    pub name_id: AggregateId,
    pub person_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for PersonNameRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNameRemovedData {
    pub name_id: AggregateId,
    pub person_id: AggregateId,
}

// ---- Family --------------------------------------------------------------

/// Data for FamilyCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyCreatedData {
    pub family_id: AggregateId,
    pub partner1_id: Option<AggregateId>,
    pub partner2_id: Option<AggregateId>,
    #[serde(default)]
    pub relationship_type: RelationshipType,
    pub marriage_date: Option<String>,
    pub marriage_place: Option<String>,
}

/// Data for FamilyUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyUpdatedData {
    pub family_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for FamilyDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyDeletedData {
    pub family_id: AggregateId,
}

/// Data for FamilyChildAdded: a person linked into a family as a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyChildAddedData {
    pub membership_id: AggregateId,
    pub family_id: AggregateId,
    pub person_id: AggregateId,
    #[serde(default)]
    pub relationship: ChildRelationship,
    #[serde(default)]
    pub sequence: i32,
}

/// Data for FamilyChildRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyChildRemovedData {
    pub family_id: AggregateId,
    pub person_id: AggregateId,
}

// ---- Source & Citation ---------------------------------------------------

/// Data for SourceCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCreatedData {
    pub source_id: AggregateId,
    pub title: String,
    pub author: Option<String>,
    pub publication: Option<String>,
    pub repository: Option<String>,
}

/// Data for SourceUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUpdatedData {
    pub source_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for SourceDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDeletedData {
    pub source_id: AggregateId,
}

/// Data for CitationCreated: evidence a source provides for a fact,
/// where a fact is a (fact type, owning entity) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationCreatedData {
    pub citation_id: AggregateId,
    pub source_id: AggregateId,
    pub fact_type: String,
    pub owner_id: AggregateId,
    pub page: Option<String>,
    pub text: Option<String>,
}

/// Data for CitationUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationUpdatedData {
    pub citation_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for CitationDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationDeletedData {
    pub citation_id: AggregateId,
}

// ---- Media ---------------------------------------------------------------

/// Data for MediaCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaCreatedData {
    pub media_id: AggregateId,
    pub owner_id: AggregateId,
    pub file_name: String,
    pub title: Option<String>,
    pub media_type: Option<String>,
}

/// Data for MediaUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUpdatedData {
    pub media_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for MediaDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDeletedData {
    pub media_id: AggregateId,
}

// ---- Life events ---------------------------------------------------------

/// Data for EventCreated: a dated life event (birth, marriage, residence…)
/// owned by a person or family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreatedData {
    pub event_id: AggregateId,
    pub owner_id: AggregateId,
    pub kind: String,
    pub date: Option<String>,
    pub place: Option<String>,
    pub description: Option<String>,
}

/// Data for EventUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUpdatedData {
    pub event_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for EventDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDeletedData {
    pub event_id: AggregateId,
}

// ---- Attributes ----------------------------------------------------------

/// Data for AttributeCreated (occupation, religion, caste…).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeCreatedData {
    pub attribute_id: AggregateId,
    pub person_id: AggregateId,
    pub kind: String,
    pub value: Option<String>,
}

/// Data for AttributeUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeUpdatedData {
    pub attribute_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for AttributeDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDeletedData {
    pub attribute_id: AggregateId,
}

// ---- Notes ---------------------------------------------------------------

/// Data for NoteCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCreatedData {
    pub note_id: AggregateId,
    pub owner_id: Option<AggregateId>,
    pub text: String,
}

/// Data for NoteUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdatedData {
    pub note_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for NoteDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDeletedData {
    pub note_id: AggregateId,
}

// ---- Submitters ----------------------------------------------------------

/// Data for SubmitterCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitterCreatedData {
    pub submitter_id: AggregateId,
    pub name: String,
    pub email: Option<String>,
}

/// Data for SubmitterUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitterUpdatedData {
    pub submitter_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for SubmitterDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitterDeletedData {
    pub submitter_id: AggregateId,
}

// ---- Associations --------------------------------------------------------

/// Data for AssociationCreated (godparent, witness, neighbor…).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationCreatedData {
    pub association_id: AggregateId,
    pub person_id: AggregateId,
    pub associate_id: AggregateId,
    pub kind: String,
}

/// Data for AssociationUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationUpdatedData {
    pub association_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for AssociationDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationDeletedData {
    pub association_id: AggregateId,
}

// ---- LDS ordinances ------------------------------------------------------

/// Data for LdsOrdinanceCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdsOrdinanceCreatedData {
    pub ordinance_id: AggregateId,
    pub person_id: AggregateId,
    pub kind: String,
    pub date: Option<String>,
    pub temple: Option<String>,
}

/// Data for LdsOrdinanceUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdsOrdinanceUpdatedData {
    pub ordinance_id: AggregateId,
    pub changes: ChangeSet,
}

/// Data for LdsOrdinanceDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdsOrdinanceDeletedData {
    pub ordinance_id: AggregateId,
}

impl DomainEvent {
    /// Returns the event-type tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::PersonCreated(_) => "PersonCreated",
            DomainEvent::PersonUpdated(_) => "PersonUpdated",
            DomainEvent::PersonDeleted(_) => "PersonDeleted",
            DomainEvent::PersonMerged(_) => "PersonMerged",
            DomainEvent::PersonNameAdded(_) => "PersonNameAdded",
            DomainEvent::PersonNameUpdated(_) => "PersonNameUpdated",
            DomainEvent::PersonNameRemoved(_) => "PersonNameRemoved",
            DomainEvent::FamilyCreated(_) => "FamilyCreated",
            DomainEvent::FamilyUpdated(_) => "FamilyUpdated",
            DomainEvent::FamilyDeleted(_) => "FamilyDeleted",
            DomainEvent::FamilyChildAdded(_) => "FamilyChildAdded",
            DomainEvent::FamilyChildRemoved(_) => "FamilyChildRemoved",
            DomainEvent::SourceCreated(_) => "SourceCreated",
            DomainEvent::SourceUpdated(_) => "SourceUpdated",
            DomainEvent::SourceDeleted(_) => "SourceDeleted",
            DomainEvent::CitationCreated(_) => "CitationCreated",
            DomainEvent::CitationUpdated(_) => "CitationUpdated",
            DomainEvent::CitationDeleted(_) => "CitationDeleted",
            DomainEvent::MediaCreated(_) => "MediaCreated",
            DomainEvent::MediaUpdated(_) => "MediaUpdated",
            DomainEvent::MediaDeleted(_) => "MediaDeleted",
            DomainEvent::EventCreated(_) => "EventCreated",
            DomainEvent::EventUpdated(_) => "EventUpdated",
            DomainEvent::EventDeleted(_) => "EventDeleted",
            DomainEvent::AttributeCreated(_) => "AttributeCreated",
            DomainEvent::AttributeUpdated(_) => "AttributeUpdated",
            DomainEvent::AttributeDeleted(_) => "AttributeDeleted",
            DomainEvent::NoteCreated(_) => "NoteCreated",
            DomainEvent::NoteUpdated(_) => "NoteUpdated",
            DomainEvent::NoteDeleted(_) => "NoteDeleted",
            DomainEvent::SubmitterCreated(_) => "SubmitterCreated",
            DomainEvent::SubmitterUpdated(_) => "SubmitterUpdated",
            DomainEvent::SubmitterDeleted(_) => "SubmitterDeleted",
            DomainEvent::AssociationCreated(_) => "AssociationCreated",
            DomainEvent::AssociationUpdated(_) => "AssociationUpdated",
            DomainEvent::AssociationDeleted(_) => "AssociationDeleted",
            DomainEvent::LdsOrdinanceCreated(_) => "LdsOrdinanceCreated",
            DomainEvent::LdsOrdinanceUpdated(_) => "LdsOrdinanceUpdated",
            DomainEvent::LdsOrdinanceDeleted(_) => "LdsOrdinanceDeleted",
        }
    }

    /// Returns the stream type this event belongs to.
    pub fn aggregate_type(&self) -> &'static str {
        match self {
            DomainEvent::PersonCreated(_)
            | DomainEvent::PersonUpdated(_)
            | DomainEvent::PersonDeleted(_)
            | DomainEvent::PersonMerged(_)
            | DomainEvent::PersonNameAdded(_)
            | DomainEvent::PersonNameUpdated(_)
            | DomainEvent::PersonNameRemoved(_) => "Person",
            DomainEvent::FamilyCreated(_)
            | DomainEvent::FamilyUpdated(_)
            | DomainEvent::FamilyDeleted(_)
            | DomainEvent::FamilyChildAdded(_)
            | DomainEvent::FamilyChildRemoved(_) => "Family",
            DomainEvent::SourceCreated(_)
            | DomainEvent::SourceUpdated(_)
            | DomainEvent::SourceDeleted(_) => "Source",
            DomainEvent::CitationCreated(_)
            | DomainEvent::CitationUpdated(_)
            | DomainEvent::CitationDeleted(_) => "Citation",
            DomainEvent::MediaCreated(_)
            | DomainEvent::MediaUpdated(_)
            | DomainEvent::MediaDeleted(_) => "Media",
            DomainEvent::EventCreated(_)
            | DomainEvent::EventUpdated(_)
            | DomainEvent::EventDeleted(_) => "Event",
            DomainEvent::AttributeCreated(_)
            | DomainEvent::AttributeUpdated(_)
            | DomainEvent::AttributeDeleted(_) => "Attribute",
            DomainEvent::NoteCreated(_)
            | DomainEvent::NoteUpdated(_)
            | DomainEvent::NoteDeleted(_) => "Note",
            DomainEvent::SubmitterCreated(_)
            | DomainEvent::SubmitterUpdated(_)
            | DomainEvent::SubmitterDeleted(_) => "Submitter",
            DomainEvent::AssociationCreated(_)
            | DomainEvent::AssociationUpdated(_)
            | DomainEvent::AssociationDeleted(_) => "Association",
            DomainEvent::LdsOrdinanceCreated(_)
            | DomainEvent::LdsOrdinanceUpdated(_)
            | DomainEvent::LdsOrdinanceDeleted(_) => "LDSOrdinance",
        }
    }

    /// Returns the stream identifier this event belongs to.
    ///
    /// Sub-entity events (person names) and the merge event travel on the
    /// owning/surviving person's stream.
    pub fn aggregate_id(&self) -> AggregateId {
        match self {
            DomainEvent::PersonCreated(d) => d.person_id,
            DomainEvent::PersonUpdated(d) => d.person_id,
            DomainEvent::PersonDeleted(d) => d.person_id,
            DomainEvent::PersonMerged(d) => d.survivor_id,
            DomainEvent::PersonNameAdded(d) => d.person_id,
            DomainEvent::PersonNameUpdated(d) => d.person_id,
            DomainEvent::PersonNameRemoved(d) => d.person_id,
            DomainEvent::FamilyCreated(d) => d.family_id,
            DomainEvent::FamilyUpdated(d) => d.family_id,
            DomainEvent::FamilyDeleted(d) => d.family_id,
            DomainEvent::FamilyChildAdded(d) => d.family_id,
            DomainEvent::FamilyChildRemoved(d) => d.family_id,
            DomainEvent::SourceCreated(d) => d.source_id,
            DomainEvent::SourceUpdated(d) => d.source_id,
            DomainEvent::SourceDeleted(d) => d.source_id,
            DomainEvent::CitationCreated(d) => d.citation_id,
            DomainEvent::CitationUpdated(d) => d.citation_id,
            DomainEvent::CitationDeleted(d) => d.citation_id,
            DomainEvent::MediaCreated(d) => d.media_id,
            DomainEvent::MediaUpdated(d) => d.media_id,
            DomainEvent::MediaDeleted(d) => d.media_id,
            DomainEvent::EventCreated(d) => d.event_id,
            DomainEvent::EventUpdated(d) => d.event_id,
            DomainEvent::EventDeleted(d) => d.event_id,
            DomainEvent::AttributeCreated(d) => d.attribute_id,
            DomainEvent::AttributeUpdated(d) => d.attribute_id,
            DomainEvent::AttributeDeleted(d) => d.attribute_id,
            DomainEvent::NoteCreated(d) => d.note_id,
            DomainEvent::NoteUpdated(d) => d.note_id,
            DomainEvent::NoteDeleted(d) => d.note_id,
            DomainEvent::SubmitterCreated(d) => d.submitter_id,
            DomainEvent::SubmitterUpdated(d) => d.submitter_id,
            DomainEvent::SubmitterDeleted(d) => d.submitter_id,
            DomainEvent::AssociationCreated(d) => d.association_id,
            DomainEvent::AssociationUpdated(d) => d.association_id,
            DomainEvent::AssociationDeleted(d) => d.association_id,
            DomainEvent::LdsOrdinanceCreated(d) => d.ordinance_id,
            DomainEvent::LdsOrdinanceUpdated(d) => d.ordinance_id,
            DomainEvent::LdsOrdinanceDeleted(d) => d.ordinance_id,
        }
    }

    /// Serializes the payload struct.
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            DomainEvent::PersonCreated(d) => serde_json::to_value(d),
            DomainEvent::PersonUpdated(d) => serde_json::to_value(d),
            DomainEvent::PersonDeleted(d) => serde_json::to_value(d),
            DomainEvent::PersonMerged(d) => serde_json::to_value(d),
            DomainEvent::PersonNameAdded(d) => serde_json::to_value(d),
            DomainEvent::PersonNameUpdated(d) => serde_json::to_value(d),
            DomainEvent::PersonNameRemoved(d) => serde_json::to_value(d),
            DomainEvent::FamilyCreated(d) => serde_json::to_value(d),
            DomainEvent::FamilyUpdated(d) => serde_json::to_value(d),
            DomainEvent::FamilyDeleted(d) => serde_json::to_value(d),
            DomainEvent::FamilyChildAdded(d) => serde_json::to_value(d),
            DomainEvent::FamilyChildRemoved(d) => serde_json::to_value(d),
            DomainEvent::SourceCreated(d) => serde_json::to_value(d),
            DomainEvent::SourceUpdated(d) => serde_json::to_value(d),
            DomainEvent::SourceDeleted(d) => serde_json::to_value(d),
            DomainEvent::CitationCreated(d) => serde_json::to_value(d),
            DomainEvent::CitationUpdated(d) => serde_json::to_value(d),
            DomainEvent::CitationDeleted(d) => serde_json::to_value(d),
            DomainEvent::MediaCreated(d) => serde_json::to_value(d),
            DomainEvent::MediaUpdated(d) => serde_json::to_value(d),
            DomainEvent::MediaDeleted(d) => serde_json::to_value(d),
            DomainEvent::EventCreated(d) => serde_json::to_value(d),
            DomainEvent::EventUpdated(d) => serde_json::to_value(d),
            DomainEvent::EventDeleted(d) => serde_json::to_value(d),
            DomainEvent::AttributeCreated(d) => serde_json::to_value(d),
            DomainEvent::AttributeUpdated(d) => serde_json::to_value(d),
            DomainEvent::AttributeDeleted(d) => serde_json::to_value(d),
            DomainEvent::NoteCreated(d) => serde_json::to_value(d),
            DomainEvent::NoteUpdated(d) => serde_json::to_value(d),
            DomainEvent::NoteDeleted(d) => serde_json::to_value(d),
            DomainEvent::SubmitterCreated(d) => serde_json::to_value(d),
            DomainEvent::SubmitterUpdated(d) => serde_json::to_value(d),
            DomainEvent::SubmitterDeleted(d) => serde_json::to_value(d),
            DomainEvent::AssociationCreated(d) => serde_json::to_value(d),
            DomainEvent::AssociationUpdated(d) => serde_json::to_value(d),
            DomainEvent::AssociationDeleted(d) => serde_json::to_value(d),
            DomainEvent::LdsOrdinanceCreated(d) => serde_json::to_value(d),
            DomainEvent::LdsOrdinanceUpdated(d) => serde_json::to_value(d),
            DomainEvent::LdsOrdinanceDeleted(d) => serde_json::to_value(d),
        }
    }

    /// Decodes a stored event from its tag and payload.
    ///
    /// An unknown tag is [`EventDecodeError::UnknownEventType`]; a payload
    /// that does not match the tag's shape is
    /// [`EventDecodeError::Payload`].
    pub fn decode(
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<Self, EventDecodeError> {
        fn data<T: serde::de::DeserializeOwned>(
            payload: &serde_json::Value,
        ) -> Result<T, EventDecodeError> {
            Ok(serde_json::from_value(payload.clone())?)
        }

        match event_type {
            "PersonCreated" => Ok(Self::PersonCreated(data(payload)?)),
            "PersonUpdated" => Ok(Self::PersonUpdated(data(payload)?)),
            "PersonDeleted" => Ok(Self::PersonDeleted(data(payload)?)),
            "PersonMerged" => Ok(Self::PersonMerged(data(payload)?)),
            "PersonNameAdded" => Ok(Self::PersonNameAdded(data(payload)?)),
            "PersonNameUpdated" => Ok(Self::PersonNameUpdated(data(payload)?)),
            "PersonNameRemoved" => Ok(Self::PersonNameRemoved(data(payload)?)),
            "FamilyCreated" => Ok(Self::FamilyCreated(data(payload)?)),
            "FamilyUpdated" => Ok(Self::FamilyUpdated(data(payload)?)),
            "FamilyDeleted" => Ok(Self::FamilyDeleted(data(payload)?)),
            "FamilyChildAdded" => Ok(Self::FamilyChildAdded(data(payload)?)),
            "FamilyChildRemoved" => Ok(Self::FamilyChildRemoved(data(payload)?)),
            "SourceCreated" => Ok(Self::SourceCreated(data(payload)?)),
            "SourceUpdated" => Ok(Self::SourceUpdated(data(payload)?)),
            "SourceDeleted" => Ok(Self::SourceDeleted(data(payload)?)),
            "CitationCreated" => Ok(Self::CitationCreated(data(payload)?)),
            "CitationUpdated" => Ok(Self::CitationUpdated(data(payload)?)),
            "CitationDeleted" => Ok(Self::CitationDeleted(data(payload)?)),
            "MediaCreated" => Ok(Self::MediaCreated(data(payload)?)),
            "MediaUpdated" => Ok(Self::MediaUpdated(data(payload)?)),
            "MediaDeleted" => Ok(Self::MediaDeleted(data(payload)?)),
            "EventCreated" => Ok(Self::EventCreated(data(payload)?)),
            "EventUpdated" => Ok(Self::EventUpdated(data(payload)?)),
            "EventDeleted" => Ok(Self::EventDeleted(data(payload)?)),
            "AttributeCreated" => Ok(Self::AttributeCreated(data(payload)?)),
            "AttributeUpdated" => Ok(Self::AttributeUpdated(data(payload)?)),
            "AttributeDeleted" => Ok(Self::AttributeDeleted(data(payload)?)),
            "NoteCreated" => Ok(Self::NoteCreated(data(payload)?)),
            "NoteUpdated" => Ok(Self::NoteUpdated(data(payload)?)),
            "NoteDeleted" => Ok(Self::NoteDeleted(data(payload)?)),
            "SubmitterCreated" => Ok(Self::SubmitterCreated(data(payload)?)),
            "SubmitterUpdated" => Ok(Self::SubmitterUpdated(data(payload)?)),
            "SubmitterDeleted" => Ok(Self::SubmitterDeleted(data(payload)?)),
            "AssociationCreated" => Ok(Self::AssociationCreated(data(payload)?)),
            "AssociationUpdated" => Ok(Self::AssociationUpdated(data(payload)?)),
            "AssociationDeleted" => Ok(Self::AssociationDeleted(data(payload)?)),
            "LdsOrdinanceCreated" => Ok(Self::LdsOrdinanceCreated(data(payload)?)),
            "LdsOrdinanceUpdated" => Ok(Self::LdsOrdinanceUpdated(data(payload)?)),
            "LdsOrdinanceDeleted" => Ok(Self::LdsOrdinanceDeleted(data(payload)?)),
            unknown => Err(EventDecodeError::UnknownEventType(unknown.to_string())),
        }
    }

    /// Decodes a stored event envelope.
    pub fn from_envelope(envelope: &EventEnvelope) -> Result<Self, EventDecodeError> {
        Self::decode(&envelope.event_type, &envelope.payload)
    }

    /// Prepares this event for appending to the event store.
    pub fn to_new_event(&self) -> Result<NewEvent, serde_json::Error> {
        Ok(NewEvent::new(self.event_type(), self.payload()?))
    }
}
