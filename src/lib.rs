//! activity-log - Declarative audit trail for record lifecycle events
//!
//! This library turns create, update, delete and restore events on tracked
//! records into structured changesets, resolving each tracked attribute to a
//! storable value first, and records the changesets worth keeping.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Snapshots, subject references and value semantics
//! - `fields`: Field descriptors, builders and resolvers
//! - `audit`: Reduction, emission and the activity log file
//! - `binding`: Subscribing loggers to record types' lifecycle events
//! - `config`: Paths, settings and YAML logger definitions
//! - `cli`: Command handlers for the `actlog` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use activity_log::{ActivityLog, EventKind, Field, LoggerDefinition};
//! use activity_log::audit::JsonlRecorder;
//! use activity_log::binding::RecordSchema;
//!
//! let posts = LoggerDefinition::new("posts", "post")
//!     .field(Field::make("title"))?
//!     .field(Field::make("author").relation_attribute("name"))?;
//!
//! let mut log = ActivityLog::new(JsonlRecorder::new("activity.log".into()));
//! log.bind(&RecordSchema::new("post").soft_deletes(true), posts)?;
//! log.notify(EventKind::Updated, &post, Some("user-7"));
//! ```

pub mod audit;
pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod models;

pub use audit::{Changeset, EventKind, LoggerDefinition};
pub use binding::ActivityLog;
pub use error::{ActivityError, ActivityResult};
pub use fields::Field;
pub use models::Snapshot;
