//! Record snapshots
//!
//! A snapshot is an immutable, point-in-time copy of a record's attributes.
//! Update events produce two of them sharing the same subject id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Attributes;
use crate::error::{ActivityError, ActivityResult};

/// Immutable attribute map of a record at one point in time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default)]
    attributes: Attributes,
}

impl Snapshot {
    /// Create a snapshot without a subject id
    pub fn new(attributes: Attributes) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Create a snapshot for the given subject id
    pub fn with_id(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: Some(id.into()),
            attributes,
        }
    }

    /// Build a snapshot from a JSON object
    pub fn from_value(value: Value) -> ActivityResult<Self> {
        match value {
            Value::Object(attributes) => Ok(Self::new(attributes)),
            Value::Null => Ok(Self::default()),
            other => Err(ActivityError::Json(format!(
                "Snapshot attributes must be an object, got {}",
                other
            ))),
        }
    }

    /// Subject id this snapshot belongs to
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Borrow an attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Copy of an attribute, `null` when missing
    pub fn value(&self, name: &str) -> Value {
        self.attributes.get(name).cloned().unwrap_or(Value::Null)
    }

    /// All attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_attribute_is_null() {
        let snapshot = Snapshot::from_value(json!({"title": "A"})).unwrap();
        assert_eq!(snapshot.value("title"), json!("A"));
        assert_eq!(snapshot.value("missing"), Value::Null);
        assert!(snapshot.id().is_none());
    }

    #[test]
    fn test_with_id() {
        let attrs = json!({"title": "A"}).as_object().cloned().unwrap();
        let snapshot = Snapshot::with_id("42", attrs);
        assert_eq!(snapshot.id(), Some("42"));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_from_value_rejects_scalars() {
        assert!(Snapshot::from_value(json!("nope")).is_err());
        assert!(Snapshot::from_value(Value::Null).unwrap().is_empty());
    }
}
