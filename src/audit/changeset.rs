//! Lifecycle events and changesets
//!
//! A changeset is the old/new attribute diff produced for one lifecycle
//! event. It is created per event, handed to the emitter, and never reused.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ActivityError;
use crate::models::Attributes;

/// Lifecycle events a record can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Record was created
    Created,
    /// Record was updated
    Updated,
    /// Record was deleted
    Deleted,
    /// Soft-deleted record was restored
    Restored,
}

impl EventKind {
    /// Every event kind, in lifecycle order
    pub const ALL: [EventKind; 4] = [
        EventKind::Created,
        EventKind::Updated,
        EventKind::Deleted,
        EventKind::Restored,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Created => "created",
            EventKind::Updated => "updated",
            EventKind::Deleted => "deleted",
            EventKind::Restored => "restored",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "create" => Ok(EventKind::Created),
            "updated" | "update" => Ok(EventKind::Updated),
            "deleted" | "delete" => Ok(EventKind::Deleted),
            "restored" | "restore" => Ok(EventKind::Restored),
            other => Err(ActivityError::Config(format!(
                "Unknown event '{}', expected one of created, updated, deleted, restored",
                other
            ))),
        }
    }
}

/// Stored payload of a changeset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub old: Attributes,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Old/new attribute diff for one lifecycle event
///
/// For `updated`, `old` and `attributes` always hold the same keys. For every
/// other event `old` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Changeset {
    pub event: EventKind,
    pub old: Attributes,
    pub attributes: Attributes,
}

impl Changeset {
    /// A changeset with no attribute payload
    pub fn empty(event: EventKind) -> Self {
        Self {
            event,
            old: Attributes::new(),
            attributes: Attributes::new(),
        }
    }

    /// Whether both maps are empty
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.attributes.is_empty()
    }

    /// Whether the old and new maps differ
    pub fn has_changes(&self) -> bool {
        self.old != self.attributes
    }

    /// Names of the fields carried by this changeset
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.attributes.keys().map(String::as_str).collect();
        for key in self.old.keys() {
            if !self.attributes.contains_key(key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Split off the storable payload
    pub fn into_properties(self) -> Properties {
        Properties {
            old: self.old,
            attributes: self.attributes,
        }
    }
}
