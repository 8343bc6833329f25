//! JSON-backed tracked records
//!
//! A record described by a JSON document, as fed to the `record` command:
//!
//! ```json
//! {
//!   "id": "42",
//!   "attributes": {"title": "B", "cover": [{"url": "img.png"}]},
//!   "original": {"title": "A", "cover": []}
//! }
//! ```
//!
//! `original` holds the pre-change attributes of an update. When it is
//! missing the record is treated as unchanged.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Attributes;
use crate::binding::TrackedRecord;
use crate::error::{ActivityError, ActivityResult};

/// A record whose state is read from a JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    #[serde(skip)]
    subject_type: String,

    #[serde(deserialize_with = "id_as_string")]
    pub id: String,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<Attributes>,
}

/// Accept both `"id": 42` and `"id": "42"`
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "record id must be a string or number, got {}",
            other
        ))),
    }
}

impl JsonRecord {
    /// Create a record of the given type
    pub fn new(subject_type: impl Into<String>, id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            subject_type: subject_type.into(),
            id: id.into(),
            attributes,
            original: None,
        }
    }

    /// Attach the pre-change attributes
    pub fn with_original(mut self, original: Attributes) -> Self {
        self.original = Some(original);
        self
    }

    /// Parse a record document
    pub fn from_json(subject_type: impl Into<String>, json: &str) -> ActivityResult<Self> {
        let mut record: JsonRecord = serde_json::from_str(json)
            .map_err(|e| ActivityError::Json(format!("Invalid record document: {}", e)))?;
        record.subject_type = subject_type.into();
        Ok(record)
    }

    /// Read a record document from disk
    pub fn from_file(subject_type: impl Into<String>, path: &Path) -> ActivityResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ActivityError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(subject_type, &contents)
    }
}

impl TrackedRecord for JsonRecord {
    fn subject_type(&self) -> &str {
        &self.subject_type
    }

    fn subject_id(&self) -> String {
        self.id.clone()
    }

    fn attributes(&self) -> Attributes {
        self.attributes.clone()
    }

    fn original(&self) -> Attributes {
        self.original
            .clone()
            .unwrap_or_else(|| self.attributes.clone())
    }
}
