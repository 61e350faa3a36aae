/*!
# AllerEase

AllerEase is a personal allergy-desensitization tracker. It keeps one log
entry per calendar day covering medication intake, auxiliary treatments,
symptom severity, and exercise, tracks the remaining medication inventory,
derives seasonal statistics, and runs a polled daily reminder with snooze.

All state lives in a single JSON blob on disk; there is no server and no
database.

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `tracker_core`: Pure domain logic (logs, settings, seasons, aggregation)
- `reminder`: The reminder state machine
- `app`: The state container that funnels mutations and persists
- `storage`: The state blob on disk
- `weather`: The advisory weather/AQI client
- `alarm`: The terminal alarm pulse
- `ops`: One module per user-facing operation

## Usage Example

```rust,no_run
use allerease::{App, Config};
use chrono::Local;

fn main() -> allerease::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let mut app = App::load(&config);
    app.quick_confirm_today(Local::now())?;
    Ok(())
}
```
*/

/// Terminal alarm pulse for active reminders
pub mod alarm;
/// The state container owning the aggregate
pub mod app;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// User-facing operations behind the CLI subcommands
pub mod ops;
/// The reminder state machine
pub mod reminder;
/// Persistence of the state blob
pub mod storage;
/// Pure tracker domain logic
pub mod tracker_core;
/// Advisory weather/AQI lookup
pub mod weather;

// Re-export important types for convenience
pub use app::{App, SettingsUpdate};
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use reminder::{ReminderMachine, ReminderState};
pub use tracker_core::{AppState, LogBook, LogPatch, MedicationLog, Season, Settings};
