//! Activity logging core
//!
//! Reduces lifecycle events on tracked records to changesets and records the
//! log-worthy ones in an append-only activity log.
//!
//! # Architecture
//!
//! - `EventKind` / `Changeset`: the lifecycle event and the old/new attribute
//!   diff it produced.
//! - `EventReducer`: resolves every tracked field against the event's
//!   snapshot(s) and keeps the minimal diff.
//! - `ChangesetEmitter`: drops no-op updates and wraps the rest in an
//!   `ActivityEntry` for the recorder.
//! - `ActivityRecorder`: the persistence port, implemented by `JsonlRecorder`
//!   (line-delimited JSON file) and `MemoryRecorder`.
//! - `LoggerDefinition`: the fields and events tracked for one record type.
//!
//! # Example
//!
//! ```rust,ignore
//! use activity_log::audit::{EventKind, LoggerDefinition};
//! use activity_log::fields::Field;
//!
//! let posts = LoggerDefinition::new("posts", "post")
//!     .field(Field::make("title"))?
//!     .field(Field::make("cover").media(false))?;
//!
//! let changeset = posts.reduce(EventKind::Updated, Some(&before), &after);
//! emitter.emit_if_needed(posts.name(), changeset, &subject, None)?;
//! ```

mod changeset;
mod definition;
mod diff;
mod emitter;
mod entry;
mod logger;
mod memory;
mod reducer;

pub use changeset::{Changeset, EventKind, Properties};
pub use definition::LoggerDefinition;
pub use diff::summarize_changes;
pub use emitter::ChangesetEmitter;
pub use entry::ActivityEntry;
pub use logger::{ActivityRecorder, JsonlRecorder};
pub use memory::MemoryRecorder;
pub use reducer::EventReducer;
