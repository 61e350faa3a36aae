/*!
# AllerEase - A Personal Allergy Desensitization Tracker

Command-line tool for logging daily medication intake, symptom severity,
exercise, and medication inventory, for viewing seasonal statistics, and
for running a foreground daily reminder.

This file contains the main application flow, coordinating the various
components to implement the tracker functionality.

## Usage

```text
allerease <COMMAND>

Commands:
  confirm   Confirm today's medication and dispense one dose from the inventory
  log       Record or amend today's log entry
  status    Show today's entry, elapsed treatment days, and inventory
  history   Show the season-grouped timeline of recorded days
  stats     Show seasonal symptom distributions
  settings  Show or update settings
  clear     Delete every log entry
  watch     Run the reminder poll loop in the foreground
  weather   Fetch advisory weather and air quality for a coordinate pair
```

## Configuration

The application can be configured with the following environment variables:
- `ALLEREASE_DIR`: The directory holding the state blob (defaults to "~/.local/share/allerease")
- `ALLEREASE_WEATHER_URL`: Base URL of the advisory weather endpoint (optional)
- `RUST_LOG`: Log filter (defaults to "info", or "debug" with --verbose)
*/

use allerease::app::App;
use allerease::cli::{CliArgs, Command};
use allerease::config::Config;
use allerease::constants::DEFAULT_LOG_FILTER;
use allerease::errors::AppResult;
use allerease::ops;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// The main entry point for the allerease application.
///
/// This function coordinates the overall application flow:
/// 1. Parses command-line arguments
/// 2. Initializes logging
/// 3. Loads and validates configuration
/// 4. Loads the persisted state (or defaults)
/// 5. Dispatches to the requested operation
///
/// # Errors
///
/// This function can return various types of errors, including:
/// - Configuration errors (missing or invalid configuration)
/// - Storage errors (the state blob could not be written)
/// - Tracker logic errors (invalid reminder time, refused destructive action)
fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;

    let mut app = App::load(&config);

    match &args.command {
        Command::Confirm => ops::quick_confirm(&mut app),
        Command::Log(log_args) => ops::record_log(&mut app, log_args),
        Command::Status => ops::show_status(&app),
        Command::History => ops::show_history(&app),
        Command::Stats => ops::show_stats(&app),
        Command::Settings(settings_args) => ops::configure(&mut app, settings_args),
        Command::Clear { yes } => ops::clear_logs(&mut app, *yes),
        Command::Watch { once } => ops::watch(&config, *once),
        Command::Weather { lat, lon } => ops::show_weather(&config, *lat, *lon),
    }
}
