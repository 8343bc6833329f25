//! Log CLI command
//!
//! Prints recorded activity entries.

use clap::Args;

use crate::audit::JsonlRecorder;
use crate::config::{ActivityPaths, Settings};
use crate::error::ActivityResult;

/// Arguments of `actlog log`
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only entries about this subject type
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Only entries about this record (requires --subject)
    #[arg(long, requires = "subject")]
    pub id: Option<String>,

    /// Print raw JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Handle the log command
pub fn handle_log_command(
    paths: &ActivityPaths,
    settings: &Settings,
    args: LogArgs,
) -> ActivityResult<()> {
    let recorder = JsonlRecorder::new(paths.activity_log(&settings.log_file));

    let entries = match &args.subject {
        Some(subject_type) => {
            let mut entries = recorder.read_for_subject(subject_type, args.id.as_deref())?;
            let start = entries.len().saturating_sub(args.limit);
            entries.drain(..start);
            entries
        }
        None => recorder.read_recent(args.limit)?,
    };

    if entries.is_empty() {
        if !args.json {
            println!("No activity recorded.");
        }
        return Ok(());
    }

    for entry in &entries {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(())
}
