//! Lifecycle event binding
//!
//! Connects the host's record-access layer to the activity logging core:
//! record types declare the events they raise, and [`ActivityLog`] turns each
//! observed event into snapshots, a changeset, and possibly an entry.

pub mod registry;
pub mod source;

pub use registry::ActivityLog;
pub use source::{RecordSchema, RecordType, TrackedRecord};
