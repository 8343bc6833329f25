//! Record-access collaborator interfaces
//!
//! The host's data layer is described through two traits: a record *type*
//! answers which lifecycle events it can raise, and a tracked *record* exposes
//! its identity, current attributes and pre-change attributes.

use serde::{Deserialize, Serialize};

use crate::audit::EventKind;
use crate::models::Attributes;

/// A kind of record that raises lifecycle events
pub trait RecordType {
    /// Subject type name of records of this type
    fn subject_type(&self) -> &str;

    /// Whether records of this type can raise the event
    fn supports_event(&self, event: EventKind) -> bool;
}

/// A record instance whose lifecycle is observed
pub trait TrackedRecord {
    fn subject_type(&self) -> &str;

    fn subject_id(&self) -> String;

    /// Current attribute values
    fn attributes(&self) -> Attributes;

    /// Attribute values before the pending change was applied
    fn original(&self) -> Attributes;
}

/// Declarative record type: every record can be created, updated and
/// deleted; only soft-deleting types can be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub subject_type: String,
    #[serde(default)]
    pub soft_deletes: bool,
}

impl RecordSchema {
    pub fn new(subject_type: impl Into<String>) -> Self {
        Self {
            subject_type: subject_type.into(),
            soft_deletes: false,
        }
    }

    pub fn soft_deletes(mut self, soft_deletes: bool) -> Self {
        self.soft_deletes = soft_deletes;
        self
    }
}

impl RecordType for RecordSchema {
    fn subject_type(&self) -> &str {
        &self.subject_type
    }

    fn supports_event(&self, event: EventKind) -> bool {
        match event {
            EventKind::Created | EventKind::Updated | EventKind::Deleted => true,
            EventKind::Restored => self.soft_deletes,
        }
    }
}
