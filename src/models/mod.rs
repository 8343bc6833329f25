//! Core data models for activity-log
//!
//! Snapshots of tracked records, subject references, and the value semantics
//! shared by resolvers and the reducer.

pub mod record;
pub mod snapshot;
pub mod subject;
pub mod value;

pub use record::JsonRecord;
pub use snapshot::Snapshot;
pub use subject::SubjectRef;
pub use value::{headline, is_blank, ValueType};

/// Flat attribute map, in field order
pub type Attributes = serde_json::Map<String, serde_json::Value>;
