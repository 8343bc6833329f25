//! Logger definitions
//!
//! A logger definition ties a record type to the fields tracked on it and the
//! lifecycle events it listens to. Each definition carries its own event
//! list; there is no process-wide default to mutate.
//!
//! ```rust,ignore
//! let posts = LoggerDefinition::new("posts", "post")
//!     .field(Field::make("title"))?
//!     .field(Field::make("cover").media(false))?;
//! ```

use super::changeset::{Changeset, EventKind};
use super::reducer::EventReducer;
use crate::error::ActivityResult;
use crate::fields::{FieldBuilder, FieldDescriptor, FieldSet};
use crate::models::Snapshot;

#[derive(Debug, Clone)]
pub struct LoggerDefinition {
    name: String,
    subject_type: String,
    fields: FieldSet,
    events: Vec<EventKind>,
}

impl LoggerDefinition {
    /// Create a definition listening to every event kind
    pub fn new(name: impl Into<String>, subject_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            fields: FieldSet::new(name.clone()),
            name,
            subject_type: subject_type.into(),
            events: EventKind::ALL.to_vec(),
        }
    }

    /// Restrict the event kinds this logger listens to
    pub fn events(mut self, events: impl IntoIterator<Item = EventKind>) -> Self {
        let mut kinds: Vec<EventKind> = Vec::new();
        for kind in events {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        self.events = kinds;
        self
    }

    /// Build and register a field
    pub fn field(mut self, field: FieldBuilder) -> ActivityResult<Self> {
        self.add_field(field.build()?)?;
        Ok(self)
    }

    /// Register an already built field
    pub fn add_field(&mut self, field: FieldDescriptor) -> ActivityResult<()> {
        self.fields.add(field)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject_type(&self) -> &str {
        &self.subject_type
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Event kinds this logger listens to
    pub fn event_kinds(&self) -> &[EventKind] {
        &self.events
    }

    /// Reduce an event over this logger's fields
    pub fn reduce(&self, event: EventKind, old: Option<&Snapshot>, new: &Snapshot) -> Changeset {
        EventReducer::new(&self.fields).reduce(event, old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivityError;
    use crate::fields::Field;

    #[test]
    fn test_defaults_to_all_events() {
        let definition = LoggerDefinition::new("posts", "post");
        assert_eq!(definition.event_kinds(), &EventKind::ALL);
        assert!(definition.fields().is_empty());
        assert_eq!(definition.fields().logger(), "posts");
    }

    #[test]
    fn test_event_list_deduplicated() {
        let definition = LoggerDefinition::new("posts", "post").events([
            EventKind::Updated,
            EventKind::Created,
            EventKind::Updated,
        ]);
        assert_eq!(
            definition.event_kinds(),
            &[EventKind::Updated, EventKind::Created]
        );
    }

    #[test]
    fn test_fields_registered_in_order() {
        let definition = LoggerDefinition::new("posts", "post")
            .field(Field::make("title"))
            .unwrap()
            .field(Field::make("cover").media(false))
            .unwrap();

        assert_eq!(definition.fields().names(), vec!["title", "cover"]);
    }

    #[test]
    fn test_configuration_errors_surface() {
        let duplicate = LoggerDefinition::new("posts", "post")
            .field(Field::make("title"))
            .unwrap()
            .field(Field::make("title"));
        assert!(matches!(duplicate, Err(ActivityError::DuplicateField { .. })));

        let invalid = LoggerDefinition::new("posts", "post").field(Field::make("title").square());
        assert!(matches!(invalid, Err(ActivityError::InvalidField { .. })));
    }
}
