//! Change summaries for activity entries
//!
//! Renders a changeset as a short, human-readable list of field changes.

use serde_json::Value;

use super::changeset::{Changeset, EventKind};

/// Summarize a changeset in one line
///
/// Returns `None` when the changeset carries no attributes.
pub fn summarize_changes(changeset: &Changeset) -> Option<String> {
    let changes: Vec<String> = match changeset.event {
        EventKind::Updated => changeset
            .attributes
            .iter()
            .map(|(key, after)| {
                let before = changeset.old.get(key).unwrap_or(&Value::Null);
                format!("{}: {} -> {}", key, format_value(before), format_value(after))
            })
            .collect(),
        EventKind::Created | EventKind::Deleted | EventKind::Restored => changeset
            .attributes
            .iter()
            .map(|(key, value)| format!("{}: {}", key, format_value(value)))
            .collect(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let truncated: String = s.chars().take(47).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
