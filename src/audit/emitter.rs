//! Changeset emission
//!
//! Decides whether a changeset is worth logging and hands the ones that are
//! to the recorder. Updates are diffs and are dropped when nothing changed;
//! created, deleted and restored events are markers and always logged.

use std::sync::Arc;

use tracing::debug;

use super::changeset::{Changeset, EventKind};
use super::entry::ActivityEntry;
use super::logger::ActivityRecorder;
use crate::error::ActivityResult;
use crate::models::SubjectRef;

/// Filters changesets and forwards log-worthy ones to a recorder
#[derive(Clone)]
pub struct ChangesetEmitter {
    recorder: Arc<dyn ActivityRecorder>,
}

impl ChangesetEmitter {
    pub fn new(recorder: Arc<dyn ActivityRecorder>) -> Self {
        Self { recorder }
    }

    /// Whether a changeset should be logged
    pub fn is_log_worthy(changeset: &Changeset) -> bool {
        match changeset.event {
            EventKind::Updated => changeset.has_changes(),
            EventKind::Created | EventKind::Deleted | EventKind::Restored => true,
        }
    }

    /// Record the changeset if it is log-worthy
    ///
    /// Returns `true` when an entry was recorded.
    pub fn emit_if_needed(
        &self,
        logger: &str,
        changeset: Changeset,
        subject: &SubjectRef,
        actor_id: Option<&str>,
    ) -> ActivityResult<bool> {
        if !Self::is_log_worthy(&changeset) {
            debug!(logger, subject = %subject, "no changes, skipping {}", changeset.event);
            return Ok(false);
        }

        let entry = ActivityEntry::new(logger, changeset, subject, actor_id.map(str::to_string));
        self.recorder.record(&entry)?;

        debug!(logger, subject = %subject, entry_id = %entry.id, "recorded {}", entry.event);
        Ok(true)
    }
}

impl std::fmt::Debug for ChangesetEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangesetEmitter").finish_non_exhaustive()
    }
}
