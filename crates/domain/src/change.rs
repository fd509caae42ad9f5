//! Field-level change sets carried by `*Updated` events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A map of column-equivalent field names to replacement values.
///
/// Semantics, applied field-by-field by the projector:
/// - an absent key leaves the field untouched
/// - a key set to JSON `null` clears the field
/// - any other value replaces the field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(HashMap<String, serde_json::Value>);

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field to a raw JSON value (use `serde_json::Value::Null` to
    /// clear the field).
    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns whether the change set names this field at all.
    pub fn touches(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Reads a field as a typed value.
    ///
    /// Returns `Ok(None)` when the key is absent, `Ok(Some(None))` when the
    /// key clears the field, and `Ok(Some(Some(value)))` when it sets one. A
    /// value that does not deserialize as `T` is a payload error.
    pub fn field<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Option<T>>, serde_json::Error> {
        match self.0.get(key) {
            None => Ok(None),
            Some(serde_json::Value::Null) => Ok(Some(None)),
            Some(value) => Ok(Some(Some(serde_json::from_value(value.clone())?))),
        }
    }

    /// Returns whether the change set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields named by the change set.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let changes = ChangeSet::new();
        assert_eq!(changes.field::<String>("surname").unwrap(), None);
        assert!(!changes.touches("surname"));
    }

    #[test]
    fn null_clears_the_field() {
        let changes = ChangeSet::new().with("surname", serde_json::Value::Null);
        assert_eq!(changes.field::<String>("surname").unwrap(), Some(None));
        assert!(changes.touches("surname"));
    }

    #[test]
    fn value_sets_the_field() {
        let changes = ChangeSet::new().with("surname", serde_json::json!("Lovelace"));
        assert_eq!(
            changes.field::<String>("surname").unwrap(),
            Some(Some("Lovelace".to_string()))
        );
    }

    #[test]
    fn mistyped_value_is_an_error() {
        let changes = ChangeSet::new().with("surname", serde_json::json!(42));
        assert!(changes.field::<String>("surname").is_err());
    }

    #[test]
    fn serialization_is_transparent() {
        let changes = ChangeSet::new().with("given_name", serde_json::json!("Ada"));
        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json, serde_json::json!({"given_name": "Ada"}));
        let back: ChangeSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, changes);
    }
}
