//! Configuration module for activity-log
//!
//! This module provides configuration management including:
//! - Path resolution for the settings, definitions and log files
//! - User settings persistence
//! - YAML logger definitions

pub mod definitions;
pub mod paths;
pub mod settings;

pub use definitions::DefinitionsFile;
pub use paths::ActivityPaths;
pub use settings::Settings;
