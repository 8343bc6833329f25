//! User settings for activity-log
//!
//! Controls whether logging is enabled, where entries are written, and the
//! defaults applied to logger definitions that do not override them.

use serde::{Deserialize, Serialize};

use super::paths::ActivityPaths;
use crate::audit::EventKind;
use crate::error::ActivityError;

/// User settings for activity-log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether events are logged at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// File name of the activity log, relative to the base directory
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Actor recorded when a command does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_actor: Option<String>,

    /// Events a logger listens to when its definition lists none
    #[serde(default = "default_events")]
    pub default_events: Vec<EventKind>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

fn default_log_file() -> String {
    "activity.log".to_string()
}

fn default_events() -> Vec<EventKind> {
    EventKind::ALL.to_vec()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            enabled: default_enabled(),
            log_file: default_log_file(),
            default_actor: None,
            default_events: default_events(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &ActivityPaths) -> Result<Self, ActivityError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ActivityError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ActivityError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ActivityPaths) -> Result<(), ActivityError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ActivityError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ActivityError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), ActivityError> {
        if self.log_file.trim().is_empty() {
            return Err(ActivityError::Config("log_file cannot be empty".into()));
        }
        Ok(())
    }
}
