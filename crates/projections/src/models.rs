//! Denormalized read model structures.
//!
//! Each read model carries a `version` mirroring the stream version of the
//! last event of its own stream the projector applied to it. Read models
//! are disposable: the full set is rebuildable by replaying the event log
//! from position zero.

use chrono::NaiveDate;
use common::AggregateId;
use domain::{ChildRelationship, Confidence, Coordinates, Gender, RelationshipType};
use event_store::Version;
use serde::{Deserialize, Serialize};

/// A person, with vitals denormalized for display and sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonReadModel {
    pub id: AggregateId,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    /// Derived from given name + surname on every touch.
    pub full_name: String,
    pub gender: Gender,
    /// Raw genealogical date text, kept verbatim.
    pub birth_date: Option<String>,
    /// Sortable date extracted from the raw text, absent when unparseable.
    pub birth_date_sort: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub birth_coordinates: Option<Coordinates>,
    pub death_date: Option<String>,
    pub death_date_sort: Option<NaiveDate>,
    pub death_place: Option<String>,
    pub death_coordinates: Option<Coordinates>,
    pub notes: Option<String>,
    pub confidence: Confidence,
    pub version: Version,
}

/// An alternate/variant name owned by a person.
///
/// At most one name per person is flagged primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNameReadModel {
    pub id: AggregateId,
    pub person_id: AggregateId,
    pub name_type: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub full_name: String,
    pub is_primary: bool,
    pub version: Version,
}

/// A family: up to two partners plus a maintained child count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyReadModel {
    pub id: AggregateId,
    pub partner1_id: Option<AggregateId>,
    /// Denormalized from the partner's person read model.
    pub partner1_name: Option<String>,
    pub partner2_id: Option<AggregateId>,
    pub partner2_name: Option<String>,
    pub relationship_type: RelationshipType,
    pub marriage_date: Option<String>,
    pub marriage_date_sort: Option<NaiveDate>,
    pub marriage_place: Option<String>,
    /// Always equals the number of live family-child rows for this family.
    pub child_count: i64,
    pub version: Version,
}

/// Family-person membership: a person linked into a family as a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyChildReadModel {
    pub id: AggregateId,
    pub family_id: AggregateId,
    pub person_id: AggregateId,
    pub relationship: ChildRelationship,
    /// Display ordering among the family's children.
    pub sequence: i32,
    pub version: Version,
}

/// Cached parent pointers for a person, derived from family membership.
///
/// One edge per person, present iff the person has a parent-family
/// membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedigreeEdge {
    pub person_id: AggregateId,
    pub father_id: Option<AggregateId>,
    pub father_name: Option<String>,
    pub mother_id: Option<AggregateId>,
    pub mother_name: Option<String>,
    pub version: Version,
}

/// A bibliographic source with a maintained citation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReadModel {
    pub id: AggregateId,
    pub title: String,
    pub author: Option<String>,
    pub publication: Option<String>,
    pub repository: Option<String>,
    /// Always equals the number of live citations referencing this source.
    pub citation_count: i64,
    pub version: Version,
}

/// Evidence a source provides for a fact — a (fact type, owner) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationReadModel {
    pub id: AggregateId,
    pub source_id: AggregateId,
    pub fact_type: String,
    pub owner_id: AggregateId,
    pub page: Option<String>,
    pub text: Option<String>,
    pub version: Version,
}

/// A media item attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReadModel {
    pub id: AggregateId,
    pub owner_id: AggregateId,
    pub file_name: String,
    pub title: Option<String>,
    pub media_type: Option<String>,
    pub version: Version,
}

/// A dated life event (birth, marriage, residence…) owned by a person or
/// family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReadModel {
    pub id: AggregateId,
    pub owner_id: AggregateId,
    pub kind: String,
    pub date: Option<String>,
    pub date_sort: Option<NaiveDate>,
    pub place: Option<String>,
    pub description: Option<String>,
    pub version: Version,
}

/// A person attribute (occupation, religion, caste…).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeReadModel {
    pub id: AggregateId,
    pub person_id: AggregateId,
    pub kind: String,
    pub value: Option<String>,
    pub version: Version,
}

/// A research note, optionally attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteReadModel {
    pub id: AggregateId,
    pub owner_id: Option<AggregateId>,
    pub text: String,
    pub version: Version,
}

/// A record submitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitterReadModel {
    pub id: AggregateId,
    pub name: String,
    pub email: Option<String>,
    pub version: Version,
}

/// A non-familial association between two persons (godparent, witness…).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationReadModel {
    pub id: AggregateId,
    pub person_id: AggregateId,
    pub associate_id: AggregateId,
    pub kind: String,
    pub version: Version,
}

/// An LDS ordinance recorded for a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdsOrdinanceReadModel {
    pub id: AggregateId,
    pub person_id: AggregateId,
    pub kind: String,
    pub date: Option<String>,
    pub date_sort: Option<NaiveDate>,
    pub temple: Option<String>,
    pub version: Version,
}
