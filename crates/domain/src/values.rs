//! Genealogy value types shared by events and read models.

use serde::{Deserialize, Serialize};

/// A person's gender, as recorded.
///
/// Drives the father/mother slot assignment when pedigree edges are derived
/// from a family's partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// How certain the researcher is about a person's recorded facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Certain,
    Probable,
    Rumored,
}

/// How a child is related to a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildRelationship {
    #[default]
    Biological,
    Adopted,
    Foster,
    Step,
    Unknown,
}

/// The kind of partnership a family is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    #[default]
    Married,
    CivilUnion,
    Unmarried,
    Unknown,
}

/// Geographic coordinates attached to a birth/death place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
