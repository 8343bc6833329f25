//! Event reduction
//!
//! Turns a lifecycle event and its snapshot(s) into a changeset by resolving
//! every tracked field against each snapshot.
//!
//! - `created` / `deleted`: every non-blank field value of the snapshot.
//! - `updated`: only the fields whose resolved values differ, in both maps.
//! - `restored`: an empty marker.
//!
//! Values are compared structurally after the field's declared cast. A field
//! that fails to resolve is left out of the changeset and logged; reduction
//! itself never fails.

use serde_json::Value;
use tracing::{debug, warn};

use super::changeset::{Changeset, EventKind};
use crate::fields::{FieldDescriptor, FieldSet};
use crate::models::{is_blank, Attributes, Snapshot};

/// Reduces lifecycle events over a field set
pub struct EventReducer<'a> {
    fields: &'a FieldSet,
}

impl<'a> EventReducer<'a> {
    pub fn new(fields: &'a FieldSet) -> Self {
        Self { fields }
    }

    /// Compute the changeset for an event
    ///
    /// `old` is only read for `updated`; a missing one is treated as an empty
    /// snapshot.
    pub fn reduce(&self, event: EventKind, old: Option<&Snapshot>, new: &Snapshot) -> Changeset {
        match event {
            EventKind::Created | EventKind::Deleted => Changeset {
                event,
                old: Attributes::new(),
                attributes: self.present_values(new),
            },
            EventKind::Updated => {
                let empty = Snapshot::default();
                let old = old.unwrap_or_else(|| {
                    debug!(logger = self.fields.logger(), "updated without original state");
                    &empty
                });
                self.changed_values(old, new)
            }
            EventKind::Restored => Changeset::empty(event),
        }
    }

    /// Non-blank resolved values of a snapshot
    fn present_values(&self, snapshot: &Snapshot) -> Attributes {
        let mut attributes = Attributes::new();

        for field in self.fields {
            if let Some(value) = self.resolve(field, snapshot) {
                if !is_blank(&value) {
                    attributes.insert(field.name().to_string(), value);
                }
            }
        }

        attributes
    }

    /// Fields whose resolved values differ between two snapshots
    fn changed_values(&self, old: &Snapshot, new: &Snapshot) -> Changeset {
        let mut changeset = Changeset::empty(EventKind::Updated);

        for field in self.fields {
            let (Some(before), Some(after)) = (self.resolve(field, old), self.resolve(field, new))
            else {
                continue;
            };

            if before != after {
                changeset.old.insert(field.name().to_string(), before);
                changeset.attributes.insert(field.name().to_string(), after);
            }
        }

        changeset
    }

    fn resolve(&self, field: &FieldDescriptor, snapshot: &Snapshot) -> Option<Value> {
        match field.storable_value(snapshot) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    logger = self.fields.logger(),
                    field = field.name(),
                    subject_id = snapshot.id().unwrap_or_default(),
                    "skipping field: {}",
                    err
                );
                None
            }
        }
    }
}
