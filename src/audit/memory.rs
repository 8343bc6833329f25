//! In-memory activity recorder
//!
//! Keeps emitted entries in a shared vector. Clones share the same storage,
//! so a host can keep one handle and give another to the activity log.

use std::sync::{Arc, Mutex};

use super::entry::ActivityEntry;
use super::logger::ActivityRecorder;
use crate::error::{ActivityError, ActivityResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    entries: Arc<Mutex<Vec<ActivityEntry>>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded entries, oldest first
    pub fn entries(&self) -> Vec<ActivityEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActivityRecorder for MemoryRecorder {
    fn record(&self, entry: &ActivityEntry) -> ActivityResult<()> {
        self.entries
            .lock()
            .map_err(|_| ActivityError::Storage("In-memory activity log is poisoned".into()))?
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::changeset::{Changeset, EventKind};
    use crate::models::SubjectRef;

    #[test]
    fn test_clones_share_entries() {
        let recorder = MemoryRecorder::new();
        let handle = recorder.clone();

        let entry = ActivityEntry::new(
            "posts",
            Changeset::empty(EventKind::Restored),
            &SubjectRef::new("post", "1"),
            None,
        );
        recorder.record(&entry).unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.entries()[0], entry);
    }
}
