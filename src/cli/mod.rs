//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the activity log.

pub mod log;
pub mod loggers;
pub mod record;

pub use log::{handle_log_command, LogArgs};
pub use loggers::handle_loggers_command;
pub use record::{handle_record_command, RecordArgs};

use tracing::debug;

use crate::audit::JsonlRecorder;
use crate::binding::ActivityLog;
use crate::config::{ActivityPaths, DefinitionsFile, Settings};
use crate::error::ActivityResult;

/// Build an activity log from the definitions file, writing to the
/// configured log file
pub fn build_activity_log(paths: &ActivityPaths, settings: &Settings) -> ActivityResult<ActivityLog> {
    let definitions = DefinitionsFile::load(&paths.definitions_file())?;
    let recorder = JsonlRecorder::new(paths.activity_log(&settings.log_file));
    let mut log = ActivityLog::new(recorder);

    for (schema, definition) in definitions.build_all(&settings.default_events)? {
        log.bind(&schema, definition)?;
    }

    debug!(
        definitions = %paths.definitions_file().display(),
        loggers = definitions.loggers.len(),
        "activity log ready"
    );

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EventKind;
    use crate::models::JsonRecord;
    use tempfile::TempDir;

    fn setup(yaml: &str) -> (TempDir, ActivityPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ActivityPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.definitions_file(), yaml).unwrap();
        (temp_dir, paths)
    }

    #[test]
    fn test_build_from_definitions() {
        let (_temp, paths) = setup(
            "loggers:\n  - name: posts\n    subject_type: post\n    fields:\n      - name: title\n",
        );
        let settings = Settings {
            default_events: vec![EventKind::Created],
            ..Settings::default()
        };

        let log = build_activity_log(&paths, &settings).unwrap();
        assert!(log.is_bound("post"));
        assert_eq!(log.bound_events("post").unwrap(), &[EventKind::Created]);

        let record = JsonRecord::from_json("post", r#"{"id": 1, "attributes": {"title": "Hi"}}"#)
            .unwrap();
        assert!(log.dispatch(EventKind::Created, &record, None).unwrap());

        let written = JsonlRecorder::new(paths.activity_log(&settings.log_file))
            .read_all()
            .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].subject_id, "1");
    }

    #[test]
    fn test_no_definitions_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ActivityPaths::with_base_dir(temp_dir.path().to_path_buf());

        let log = build_activity_log(&paths, &Settings::default()).unwrap();
        assert!(log.subject_types().is_empty());
    }

    #[test]
    fn test_invalid_definition_is_config_error() {
        let (_temp, paths) = setup(
            "loggers:\n  - name: posts\n    subject_type: post\n    fields:\n      - name: title\n        rounded: circle\n",
        );

        assert!(build_activity_log(&paths, &Settings::default()).is_err());
    }
}
