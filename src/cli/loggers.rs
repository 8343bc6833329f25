//! Loggers CLI command
//!
//! Lists the configured logger definitions and the events bound for each.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::build_activity_log;
use crate::config::{ActivityPaths, Settings};
use crate::error::ActivityResult;
use crate::fields::FieldDescriptor;

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Resolver")]
    resolver: String,
    #[tabled(rename = "Cast")]
    cast: String,
    #[tabled(rename = "Style")]
    style: String,
}

impl From<&FieldDescriptor> for FieldRow {
    fn from(field: &FieldDescriptor) -> Self {
        let resolver = if field.is_gallery() {
            "media (gallery)".to_string()
        } else {
            field.resolver().name().to_string()
        };

        Self {
            name: field.name().to_string(),
            label: field.label().to_string(),
            resolver,
            cast: field.cast().to_string(),
            style: field
                .rounded()
                .map(|style| style.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Handle the loggers command
pub fn handle_loggers_command(paths: &ActivityPaths, settings: &Settings) -> ActivityResult<()> {
    let log = build_activity_log(paths, settings)?;
    let mut subject_types = log.subject_types();
    subject_types.sort_unstable();

    if subject_types.is_empty() {
        println!(
            "No loggers defined. Declare them in {}",
            paths.definitions_file().display()
        );
        return Ok(());
    }

    for subject_type in subject_types {
        let (Some(definition), Some(events)) =
            (log.definition(subject_type), log.bound_events(subject_type))
        else {
            continue;
        };

        let events: Vec<&str> = events.iter().map(|e| e.as_str()).collect();
        println!(
            "{} ({}) - events: {}",
            definition.name(),
            definition.subject_type(),
            if events.is_empty() {
                "none".to_string()
            } else {
                events.join(", ")
            }
        );

        let rows: Vec<FieldRow> = definition.fields().iter().map(FieldRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}\n", table);
    }

    Ok(())
}
