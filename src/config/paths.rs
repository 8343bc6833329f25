//! Path management for activity-log
//!
//! ## Path Resolution Order
//!
//! 1. `ACTIVITY_LOG_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/activity-log` on
//!    Linux, `~/Library/Application Support/activity-log` on macOS,
//!    `%APPDATA%\activity-log\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ActivityError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "ACTIVITY_LOG_DIR";

/// Manages all paths used by activity-log
#[derive(Debug, Clone)]
pub struct ActivityPaths {
    /// Base directory for all activity-log files
    base_dir: PathBuf,
}

impl ActivityPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ActivityError> {
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ActivityPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the logger definitions file
    pub fn definitions_file(&self) -> PathBuf {
        self.base_dir.join("loggers.yaml")
    }

    /// Path to the activity log, given the configured file name
    pub fn activity_log(&self, log_file: &str) -> PathBuf {
        self.base_dir.join(log_file)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ActivityError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ActivityError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Whether a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ActivityError> {
    ProjectDirs::from("", "", "activity-log")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            ActivityError::Config(format!(
                "Could not determine a home directory; set {}",
                DIR_ENV_VAR
            ))
        })
}
