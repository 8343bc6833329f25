//! Activity entry data structures
//!
//! Defines the record an emitted changeset is persisted as: the event, the
//! subject it concerns, who caused it, and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::changeset::{Changeset, EventKind, Properties};
use super::diff::summarize_changes;
use crate::models::SubjectRef;

/// A single activity log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Unique id of the entry
    pub id: Uuid,

    /// Name of the logger definition that produced it
    pub logger: String,

    /// Lifecycle event that was observed
    pub event: EventKind,

    /// Type of the affected record
    pub subject_type: String,

    /// ID of the affected record
    pub subject_id: String,

    /// Who caused the event, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,

    /// When the event occurred (UTC)
    pub occurred_at: DateTime<Utc>,

    /// The changeset payload
    pub properties: Properties,
}

impl ActivityEntry {
    /// Wrap a changeset, stamped now
    pub fn new(
        logger: impl Into<String>,
        changeset: Changeset,
        subject: &SubjectRef,
        actor_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            logger: logger.into(),
            event: changeset.event,
            subject_type: subject.subject_type.clone(),
            subject_id: subject.subject_id.clone(),
            actor_id,
            occurred_at: Utc::now(),
            properties: changeset.into_properties(),
        }
    }

    /// Reference to the affected record
    pub fn subject(&self) -> SubjectRef {
        SubjectRef::new(&self.subject_type, &self.subject_id)
    }

    /// Rebuild the changeset this entry carries
    pub fn changeset(&self) -> Changeset {
        Changeset {
            event: self.event,
            old: self.properties.old.clone(),
            attributes: self.properties.attributes.clone(),
        }
    }

    /// Format the entry as a single log line plus its changes
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.occurred_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event.as_str().to_uppercase(),
            self.subject_type,
            self.subject_id
        );

        if let Some(actor) = &self.actor_id {
            output.push_str(&format!(" by {}", actor));
        }

        if let Some(changes) = summarize_changes(&self.changeset()) {
            output.push_str(&format!("\n  Changes: {}", changes));
        }

        output
    }
}
