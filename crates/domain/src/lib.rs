//! Domain layer for the genealogy event-sourcing core.
//!
//! This crate defines:
//! - the closed vocabulary of domain events as one sum type ([`DomainEvent`])
//!   with its tag codec
//! - the change-set shape shared by every `*Updated` event
//! - genealogy value types (gender, confidence, relationship kinds)
//! - free-text genealogical date parsing

pub mod change;
pub mod error;
pub mod events;
pub mod gendate;
pub mod values;

pub use change::ChangeSet;
pub use error::EventDecodeError;
pub use events::DomainEvent;
pub use values::{ChildRelationship, Confidence, Coordinates, Gender, RelationshipType};
