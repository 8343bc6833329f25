use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use activity_log::cli::{
    handle_log_command, handle_loggers_command, handle_record_command, LogArgs, RecordArgs,
};
use activity_log::config::{ActivityPaths, Settings};

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "ACTLOG_LOG";

#[derive(Parser)]
#[command(
    name = "actlog",
    version,
    about = "Declarative activity log for record lifecycle events",
    long_about = "actlog records what changed on tracked records. Loggers declared \
                  in loggers.yaml choose the fields to track; each created, updated, \
                  deleted or restored record is reduced to the fields that changed \
                  and appended to the activity log."
)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a lifecycle event for a record
    Record(RecordArgs),

    /// Show recorded activity
    Log(LogArgs),

    /// List configured loggers and their fields
    Loggers,

    /// Write the default settings file
    Init,

    /// Show configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = ActivityPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Record(args)) => {
            handle_record_command(&paths, &settings, args)?;
        }
        Some(Commands::Log(args)) => {
            handle_log_command(&paths, &settings, args)?;
        }
        Some(Commands::Loggers) => {
            handle_loggers_command(&paths, &settings)?;
        }
        Some(Commands::Init) => {
            println!("Initializing activity-log at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
            if !paths.definitions_file().exists() {
                println!(
                    "Declare loggers in {} to start tracking records.",
                    paths.definitions_file().display()
                );
            }
        }
        Some(Commands::Config) => {
            println!("activity-log Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Definitions file: {}", paths.definitions_file().display());
            println!(
                "Activity log:     {}",
                paths.activity_log(&settings.log_file).display()
            );
            println!();
            println!("Settings:");
            println!("  Enabled:        {}", settings.enabled);
            println!(
                "  Default actor:  {}",
                settings.default_actor.as_deref().unwrap_or("(none)")
            );
            let events: Vec<&str> = settings.default_events.iter().map(|e| e.as_str()).collect();
            println!("  Default events: {}", events.join(", "));
            println!();
            println!(
                "Initialized: {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
        }
        None => {
            println!("actlog - declarative activity log");
            println!();
            println!("Run 'actlog --help' for usage information.");
        }
    }

    Ok(())
}
