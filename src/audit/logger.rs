//! Activity recorders
//!
//! The persistence side of the activity log. Emitted entries are handed to an
//! [`ActivityRecorder`]; [`JsonlRecorder`] appends them to a log file, one
//! JSON object per line, flushing after every write.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ActivityError, ActivityResult};

use super::entry::ActivityEntry;

/// Port receiving emitted activity entries
pub trait ActivityRecorder: Send + Sync {
    /// Persist a single entry
    fn record(&self, entry: &ActivityEntry) -> ActivityResult<()>;
}

/// Writes activity entries to a line-delimited JSON file
#[derive(Debug, Clone)]
pub struct JsonlRecorder {
    /// Path to the activity log file
    log_path: PathBuf,
}

impl JsonlRecorder {
    /// Create a recorder that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> ActivityResult<File> {
        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ActivityError::Io(format!("Failed to create log directory: {}", e))
                })?;
            }
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ActivityError::Io(format!("Failed to open activity log: {}", e)))
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> ActivityResult<Vec<ActivityEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ActivityError::Io(format!("Failed to open activity log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ActivityError::Io(format!(
                    "Failed to read activity log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ActivityEntry = serde_json::from_str(&line).map_err(|e| {
                ActivityError::Storage(format!(
                    "Failed to parse activity entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries
    pub fn read_recent(&self, count: usize) -> ActivityResult<Vec<ActivityEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Read the entries of one subject type, optionally one record
    pub fn read_for_subject(
        &self,
        subject_type: &str,
        subject_id: Option<&str>,
    ) -> ActivityResult<Vec<ActivityEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.subject_type == subject_type)
            .filter(|e| subject_id.map_or(true, |id| e.subject_id == id))
            .collect())
    }

    /// Path to the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl ActivityRecorder for JsonlRecorder {
    fn record(&self, entry: &ActivityEntry) -> ActivityResult<()> {
        let mut file = self.open_for_append()?;

        let json = serde_json::to_string(entry).map_err(|e| {
            ActivityError::Json(format!("Failed to serialize activity entry: {}", e))
        })?;

        writeln!(file, "{}", json)
            .map_err(|e| ActivityError::Io(format!("Failed to write activity entry: {}", e)))?;

        file.flush()
            .map_err(|e| ActivityError::Io(format!("Failed to flush activity log: {}", e)))?;

        Ok(())
    }
}
