use std::sync::Arc;

use activity_log::audit::{
    ActivityEntry, ActivityRecorder, ChangesetEmitter, JsonlRecorder, MemoryRecorder,
};
use activity_log::binding::RecordSchema;
use activity_log::error::{ActivityError, ActivityResult};
use activity_log::models::{JsonRecord, SubjectRef, ValueType};
use activity_log::{ActivityLog, EventKind, Field, LoggerDefinition, Snapshot};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

fn snapshot(value: Value) -> Snapshot {
    Snapshot::from_value(value).unwrap()
}

fn attributes(value: Value) -> activity_log::models::Attributes {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn posts() -> LoggerDefinition {
    LoggerDefinition::new("posts", "post")
        .field(Field::make("title"))
        .unwrap()
        .field(Field::make("cover").media(false))
        .unwrap()
}

#[test]
fn update_with_new_cover_is_logged() {
    let recorder = MemoryRecorder::new();
    let emitter = ChangesetEmitter::new(Arc::new(recorder.clone()));

    let old = snapshot(json!({"id": "7", "title": "A", "cover": []}));
    let new = snapshot(json!({"id": "7", "title": "B", "cover": [{"url": "img.png"}]}));
    let changeset = posts().reduce(EventKind::Updated, Some(&old), &new);

    assert_eq!(
        serde_json::to_value(changeset.clone().into_properties()).unwrap(),
        json!({
            "old": {"title": "A", "cover": null},
            "attributes": {"title": "B", "cover": "img.png"}
        })
    );

    let recorded = emitter
        .emit_if_needed("posts", changeset, &SubjectRef::new("post", "7"), Some("u-1"))
        .unwrap();
    assert!(recorded);

    let entries = recorder.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event, EventKind::Updated);
    assert_eq!(entries[0].actor_id.as_deref(), Some("u-1"));
}

#[test]
fn media_gallery_contract() {
    let definition = LoggerDefinition::new("albums", "album")
        .field(Field::make("photos").media(true))
        .unwrap()
        .field(Field::make("cover").media(false))
        .unwrap()
        .field(Field::make("banner").media(false))
        .unwrap();

    let record = snapshot(json!({
        "photos": [{"url": "a"}, {"url": "b"}],
        "cover": [{"url": "a"}, {"url": "b"}],
        "banner": []
    }));
    let changeset = definition.reduce(EventKind::Updated, None, &record);

    assert_eq!(changeset.attributes.get("photos"), Some(&json!(["a", "b"])));
    assert_eq!(changeset.attributes.get("cover"), Some(&json!("a")));
    // null before and after
    assert!(!changeset.attributes.contains_key("banner"));
}

#[test]
fn relation_attribute_is_plucked() {
    let definition = LoggerDefinition::new("posts", "post")
        .field(Field::make("author").relation_attribute("name"))
        .unwrap()
        .field(Field::make("tags").relation_attribute("name"))
        .unwrap();

    let old = snapshot(json!({"author": {"id": 1, "name": "Ann"}, "tags": []}));
    let new = snapshot(json!({
        "author": {"id": 2, "name": "Bob"},
        "tags": [{"name": "rust"}]
    }));

    let changeset = definition.reduce(EventKind::Updated, Some(&old), &new);
    assert_eq!(
        Value::Object(changeset.old),
        json!({"author": "Ann", "tags": []})
    );
    assert_eq!(
        Value::Object(changeset.attributes),
        json!({"author": "Bob", "tags": ["rust"]})
    );
}

#[test]
fn failing_custom_resolver_does_not_abort_changeset() {
    let definition = LoggerDefinition::new("posts", "post")
        .field(Field::make("title"))
        .unwrap()
        .field(Field::make("score").resolve_using(|_| Err("service unavailable".into())))
        .unwrap();

    let changeset = definition.reduce(
        EventKind::Created,
        None,
        &snapshot(json!({"title": "Hello", "score": 3})),
    );

    assert_eq!(changeset.keys(), vec!["title"]);
}

#[test]
fn integer_cast_equates_string_and_number() {
    let definition = LoggerDefinition::new("items", "item")
        .field(Field::make("count").cast(ValueType::Integer))
        .unwrap()
        .field(Field::make("raw"))
        .unwrap();

    let old = snapshot(json!({"count": "0", "raw": "0"}));
    let new = snapshot(json!({"count": 0, "raw": 0}));
    let changeset = definition.reduce(EventKind::Updated, Some(&old), &new);

    assert_eq!(changeset.keys(), vec!["raw"]);
}

#[test]
fn restore_is_bound_only_for_soft_deletes() {
    let recorder = MemoryRecorder::new();
    let mut log = ActivityLog::new(recorder.clone());

    let bound = log
        .bind(&RecordSchema::new("post").soft_deletes(true), posts())
        .unwrap();
    assert!(bound.contains(&EventKind::Restored));

    let tags = LoggerDefinition::new("tags", "tag")
        .field(Field::make("name"))
        .unwrap();
    let bound = log.bind(&RecordSchema::new("tag"), tags).unwrap();
    assert!(!bound.contains(&EventKind::Restored));

    let post = JsonRecord::new("post", "1", attributes(json!({"title": "A"})));
    assert!(log.dispatch(EventKind::Restored, &post, None).unwrap());

    let tag = JsonRecord::new("tag", "2", attributes(json!({"name": "rust"})));
    assert!(!log.dispatch(EventKind::Restored, &tag, None).unwrap());

    let entries = recorder.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].properties.old.is_empty());
    assert!(entries[0].properties.attributes.is_empty());
}

#[test]
fn lifecycle_round_trips_through_jsonl() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("logs").join("activity.log");

    let mut log = ActivityLog::new(JsonlRecorder::new(path.clone()));
    log.bind(&RecordSchema::new("post"), posts()).unwrap();

    let created = JsonRecord::new("post", "9", attributes(json!({"title": "A", "cover": []})));
    assert!(log.notify(EventKind::Created, &created, Some("u-1")));

    let updated = JsonRecord::new(
        "post",
        "9",
        attributes(json!({"title": "B", "cover": [{"original_url": "full.png", "url": "t.png"}]})),
    )
    .with_original(attributes(json!({"title": "A", "cover": []})));
    assert!(log.notify(EventKind::Updated, &updated, Some("u-1")));

    // unchanged
    let touched = JsonRecord::new("post", "9", attributes(json!({"title": "B"})))
        .with_original(attributes(json!({"title": "B"})));
    let mut plain = ActivityLog::new(MemoryRecorder::new());
    plain
        .bind(
            &RecordSchema::new("post"),
            LoggerDefinition::new("posts", "post")
                .field(Field::make("title"))
                .unwrap(),
        )
        .unwrap();
    assert!(!plain.notify(EventKind::Updated, &touched, None));

    let entries = JsonlRecorder::new(path).read_for_subject("post", Some("9")).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        Value::Object(entries[0].properties.attributes.clone()),
        json!({"title": "A"})
    );
    assert_eq!(
        Value::Object(entries[1].properties.old.clone()),
        json!({"title": "A", "cover": null})
    );
    assert_eq!(
        Value::Object(entries[1].properties.attributes.clone()),
        json!({"title": "B", "cover": "full.png"})
    );
}

struct BrokenRecorder;

impl ActivityRecorder for BrokenRecorder {
    fn record(&self, _entry: &ActivityEntry) -> ActivityResult<()> {
        Err(ActivityError::Storage("disk full".into()))
    }
}

#[test]
fn notify_swallows_recorder_failures() {
    let mut log = ActivityLog::new(BrokenRecorder);
    log.bind(&RecordSchema::new("post"), posts()).unwrap();

    let record = JsonRecord::new("post", "1", attributes(json!({"title": "A"})));
    assert!(!log.notify(EventKind::Created, &record, None));
    assert!(matches!(
        log.dispatch(EventKind::Created, &record, None),
        Err(ActivityError::Storage(_))
    ));

    let stranger = JsonRecord::new("comment", "1", attributes(json!({})));
    assert!(!log.notify(EventKind::Created, &stranger, None));
}
