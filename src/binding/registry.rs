//! Event source binding
//!
//! [`ActivityLog`] subscribes logger definitions to record types and runs
//! each observed lifecycle event through reduction and emission. Binding
//! happens once at startup; dispatching only reads the bindings.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use super::source::{RecordType, TrackedRecord};
use crate::audit::{ActivityRecorder, ChangesetEmitter, EventKind, LoggerDefinition};
use crate::error::{ActivityError, ActivityResult};
use crate::models::{Snapshot, SubjectRef};

#[derive(Debug)]
struct Binding {
    definition: LoggerDefinition,
    events: Vec<EventKind>,
}

/// Routes lifecycle events of bound record types to their loggers
#[derive(Debug)]
pub struct ActivityLog {
    bindings: HashMap<String, Binding>,
    emitter: ChangesetEmitter,
}

impl ActivityLog {
    /// Create an activity log writing to the given recorder
    pub fn new(recorder: impl ActivityRecorder + 'static) -> Self {
        Self::with_emitter(ChangesetEmitter::new(Arc::new(recorder)))
    }

    pub fn with_emitter(emitter: ChangesetEmitter) -> Self {
        Self {
            bindings: HashMap::new(),
            emitter,
        }
    }

    /// Subscribe a logger definition to a record type's events
    ///
    /// Every event the definition lists and the record type supports is
    /// bound; the others are skipped. Returns the bound events.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the definition targets another
    /// subject type, or if the record type is already bound.
    pub fn bind(
        &mut self,
        record_type: &dyn RecordType,
        definition: LoggerDefinition,
    ) -> ActivityResult<Vec<EventKind>> {
        let subject_type = record_type.subject_type().to_string();

        if definition.subject_type() != subject_type {
            return Err(ActivityError::Config(format!(
                "Logger '{}' tracks '{}' and cannot be bound to '{}'",
                definition.name(),
                definition.subject_type(),
                subject_type
            )));
        }

        if let Some(existing) = self.bindings.get(&subject_type) {
            return Err(ActivityError::Config(format!(
                "Record type '{}' is already bound to logger '{}'",
                subject_type,
                existing.definition.name()
            )));
        }

        let mut events = Vec::new();
        for &event in definition.event_kinds() {
            match check_supported(record_type, event) {
                Ok(()) => events.push(event),
                Err(err) => debug!(logger = definition.name(), "not binding: {}", err),
            }
        }

        debug!(
            logger = definition.name(),
            subject_type = %subject_type,
            events = ?events,
            "bound logger"
        );

        self.bindings.insert(
            subject_type,
            Binding {
                definition,
                events: events.clone(),
            },
        );

        Ok(events)
    }

    /// Events bound for a subject type
    pub fn bound_events(&self, subject_type: &str) -> Option<&[EventKind]> {
        self.bindings
            .get(subject_type)
            .map(|binding| binding.events.as_slice())
    }

    /// Logger definition bound to a subject type
    pub fn definition(&self, subject_type: &str) -> Option<&LoggerDefinition> {
        self.bindings
            .get(subject_type)
            .map(|binding| &binding.definition)
    }

    /// Whether any logger is bound to the subject type
    pub fn is_bound(&self, subject_type: &str) -> bool {
        self.bindings.contains_key(subject_type)
    }

    /// Subject types with a bound logger, in no particular order
    pub fn subject_types(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Run a lifecycle event through its logger
    ///
    /// Returns `true` when an entry was recorded. Events the record type is
    /// not bound for are ignored.
    ///
    /// # Errors
    ///
    /// Returns `NotBound` for unknown subject types and recorder errors as
    /// they occur. Field resolution failures never surface here.
    pub fn dispatch(
        &self,
        event: EventKind,
        record: &dyn TrackedRecord,
        actor_id: Option<&str>,
    ) -> ActivityResult<bool> {
        let binding = self
            .bindings
            .get(record.subject_type())
            .ok_or_else(|| ActivityError::NotBound(record.subject_type().to_string()))?;

        if !binding.events.contains(&event) {
            debug!(
                logger = binding.definition.name(),
                "{} is not bound, ignoring",
                event
            );
            return Ok(false);
        }

        let (old, new) = snapshots(event, record);
        let changeset = binding.definition.reduce(event, old.as_ref(), &new);
        let subject = SubjectRef::new(record.subject_type(), record.subject_id());

        self.emitter
            .emit_if_needed(binding.definition.name(), changeset, &subject, actor_id)
    }

    /// Like [`dispatch`](Self::dispatch), but never fails
    ///
    /// Errors are logged and reported as `false`, so the operation that
    /// raised the event is never blocked by the activity log.
    pub fn notify(
        &self,
        event: EventKind,
        record: &dyn TrackedRecord,
        actor_id: Option<&str>,
    ) -> bool {
        match self.dispatch(event, record, actor_id) {
            Ok(recorded) => recorded,
            Err(err) => {
                error!(
                    subject_type = record.subject_type(),
                    subject_id = %record.subject_id(),
                    "failed to log {}: {}",
                    event,
                    err
                );
                false
            }
        }
    }
}

fn check_supported(record_type: &dyn RecordType, event: EventKind) -> ActivityResult<()> {
    if record_type.supports_event(event) {
        Ok(())
    } else {
        Err(ActivityError::UnsupportedEvent {
            subject_type: record_type.subject_type().to_string(),
            event,
        })
    }
}

/// Snapshots the reducer needs for an event
///
/// Updates get the original state as the old snapshot, sharing the record's
/// id. Every other event is reduced over the current state alone.
fn snapshots(event: EventKind, record: &dyn TrackedRecord) -> (Option<Snapshot>, Snapshot) {
    let id = record.subject_id();
    let new = Snapshot::with_id(id.clone(), record.attributes());

    match event {
        EventKind::Updated => (Some(Snapshot::with_id(id, record.original())), new),
        EventKind::Created | EventKind::Deleted | EventKind::Restored => (None, new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryRecorder;
    use crate::binding::RecordSchema;
    use crate::fields::Field;
    use crate::models::{Attributes, JsonRecord};
    use serde_json::{json, Value};

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    fn posts() -> LoggerDefinition {
        LoggerDefinition::new("posts", "post")
            .field(Field::make("title"))
            .unwrap()
            .field(Field::make("cover").media(false))
            .unwrap()
    }

    fn activity_log() -> (ActivityLog, MemoryRecorder) {
        let recorder = MemoryRecorder::new();
        (ActivityLog::new(recorder.clone()), recorder)
    }

    #[test]
    fn test_bind_skips_unsupported_events() {
        let (mut log, _) = activity_log();

        let events = log.bind(&RecordSchema::new("post"), posts()).unwrap();

        assert_eq!(
            events,
            vec![EventKind::Created, EventKind::Updated, EventKind::Deleted]
        );
        assert_eq!(log.bound_events("post"), Some(events.as_slice()));
    }

    #[test]
    fn test_bind_rejects_mismatched_subject() {
        let (mut log, _) = activity_log();
        let err = log.bind(&RecordSchema::new("tag"), posts()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_bind_twice_rejected() {
        let (mut log, _) = activity_log();
        log.bind(&RecordSchema::new("post"), posts()).unwrap();
        assert!(log.bind(&RecordSchema::new("post"), posts()).is_err());
    }

    #[test]
    fn test_update_builds_both_snapshots() {
        let (mut log, recorder) = activity_log();
        log.bind(&RecordSchema::new("post"), posts()).unwrap();

        let record = JsonRecord::new(
            "post",
            "42",
            attrs(json!({"title": "B", "cover": [{"url": "img.png"}]})),
        )
        .with_original(attrs(json!({"title": "A", "cover": []})));

        assert!(log.dispatch(EventKind::Updated, &record, Some("ann")).unwrap());

        let entry = &recorder.entries()[0];
        assert_eq!(entry.subject_id, "42");
        assert_eq!(
            Value::Object(entry.properties.old.clone()),
            json!({"title": "A", "cover": null})
        );
        assert_eq!(
            Value::Object(entry.properties.attributes.clone()),
            json!({"title": "B", "cover": "img.png"})
        );
    }

    #[test]
    fn test_custom_resolver_sees_shared_id() {
        let definition = LoggerDefinition::new("posts", "post")
            .field(Field::make("title"))
            .unwrap()
            .field(Field::make("ref").resolve_using(|s: &Snapshot| {
                Ok(json!(format!("post-{}", s.id().unwrap_or("?"))))
            }))
            .unwrap();

        let (mut log, recorder) = activity_log();
        log.bind(&RecordSchema::new("post"), definition).unwrap();

        let record = JsonRecord::new("post", "5", attrs(json!({"title": "B"})))
            .with_original(attrs(json!({"title": "A"})));
        log.dispatch(EventKind::Updated, &record, None).unwrap();

        // Same id on both snapshots, so the derived value does not change
        let entry = &recorder.entries()[0];
        assert!(entry.properties.attributes.get("ref").is_none());
    }

    #[test]
    fn test_noop_update_not_recorded() {
        let (mut log, recorder) = activity_log();
        log.bind(&RecordSchema::new("post"), posts()).unwrap();

        let record = JsonRecord::new("post", "1", attrs(json!({"title": "A"})));

        assert!(!log.dispatch(EventKind::Updated, &record, None).unwrap());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_unbound_event_ignored() {
        let (mut log, recorder) = activity_log();
        log.bind(&RecordSchema::new("post"), posts()).unwrap();

        let record = JsonRecord::new("post", "1", attrs(json!({"title": "A"})));

        assert!(!log.dispatch(EventKind::Restored, &record, None).unwrap());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_restored_recorded_for_soft_deletes() {
        let (mut log, recorder) = activity_log();
        log.bind(&RecordSchema::new("post").soft_deletes(true), posts())
            .unwrap();

        let record = JsonRecord::new("post", "1", attrs(json!({"title": "A"})));

        assert!(log.dispatch(EventKind::Restored, &record, None).unwrap());
        let entry = &recorder.entries()[0];
        assert!(entry.properties.old.is_empty());
        assert!(entry.properties.attributes.is_empty());
    }

    #[test]
    fn test_unknown_subject_type() {
        let (log, _) = activity_log();
        let record = JsonRecord::new("user", "1", Attributes::new());

        let err = log.dispatch(EventKind::Created, &record, None).unwrap_err();
        assert!(matches!(err, ActivityError::NotBound(_)));
        assert!(!log.notify(EventKind::Created, &record, None));
    }
}
