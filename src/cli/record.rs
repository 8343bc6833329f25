//! Record CLI command
//!
//! Feeds one lifecycle event, described by a JSON record document, through
//! the configured loggers.

use std::path::PathBuf;

use clap::Args;

use super::build_activity_log;
use crate::audit::EventKind;
use crate::binding::TrackedRecord;
use crate::config::{ActivityPaths, Settings};
use crate::error::ActivityResult;
use crate::models::JsonRecord;

/// Arguments of `actlog record`
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Path to the record document ({"id", "attributes", "original"})
    pub file: PathBuf,

    /// Subject type of the record (must match a configured logger)
    #[arg(short, long)]
    pub subject: String,

    /// Lifecycle event (created, updated, deleted, restored)
    #[arg(short, long)]
    pub event: String,

    /// Who caused the event
    #[arg(short, long, env = "ACTLOG_ACTOR")]
    pub actor: Option<String>,
}

/// Handle the record command
pub fn handle_record_command(
    paths: &ActivityPaths,
    settings: &Settings,
    args: RecordArgs,
) -> ActivityResult<()> {
    if !settings.enabled {
        println!("Activity logging is disabled in {}", paths.settings_file().display());
        return Ok(());
    }

    let event: EventKind = args.event.parse()?;
    let log = build_activity_log(paths, settings)?;

    let record = JsonRecord::from_file(&args.subject, &args.file)?;
    let actor = args.actor.as_deref().or(settings.default_actor.as_deref());

    if log.dispatch(event, &record, actor)? {
        println!(
            "Logged {} {} {}",
            event,
            record.subject_type(),
            record.subject_id()
        );
    } else {
        println!(
            "Nothing to log for {} {} {}",
            event,
            record.subject_type(),
            record.subject_id()
        );
    }

    Ok(())
}
