//! Constants used throughout the application.
//!
//! This module contains all constants used in the AllerEase application,
//! organized into logical groups. Having constants centralized makes them
//! easier to find, modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "allerease";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal allergy desensitization tracker";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the AllerEase data directory.
pub const ENV_VAR_DATA_DIR: &str = "ALLEREASE_DIR";
/// Environment variable for the advisory weather/AQI endpoint base URL.
pub const ENV_VAR_WEATHER_URL: &str = "ALLEREASE_WEATHER_URL";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory for the state file within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/allerease";

// Persistence
/// File name of the persisted state blob. The `v3` suffix versions the
/// blob layout; older layouts are absorbed through field defaults on load.
pub const STATE_FILE_NAME: &str = "allerease_v3_data.json";
/// Sibling lock file guarding state-file replacement.
pub const STATE_LOCK_FILE_NAME: &str = "allerease_v3_data.json.lock";
/// Default POSIX permissions for the data directory (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for the state file (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Clock format used for the reminder time comparison (HH:MM).
pub const REMINDER_TIME_FORMAT: &str = "%H:%M";
/// Milliseconds in one day, used for the elapsed-day counter.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

// Medication Inventory
/// Amount of one dose, in bottles. Inventory moves in steps of this size.
pub const INVENTORY_STEP: f64 = 0.2;
/// Default remaining inventory for a fresh install, in bottles.
pub const DEFAULT_INVENTORY_COUNT: f64 = 5.0;
/// Default total bottle capacity.
pub const DEFAULT_TOTAL_BOTTLES: u32 = 10;

// Reminder
/// Default daily reminder time.
pub const DEFAULT_REMINDER_TIME: &str = "08:00";
/// Default alarm sound label shown while a reminder is ringing.
pub const DEFAULT_REMINDER_SOUND: &str = "经典闹铃";
/// Default snooze delay, in minutes.
pub const DEFAULT_SNOOZE_MINUTES: i64 = 15;
/// Reminder poll cadence, in seconds. The trigger condition is
/// minute-resolution, so this bounds trigger latency at five seconds.
pub const POLL_INTERVAL_SECS: u64 = 5;
/// Alarm bell pulse period while a reminder is ringing, in seconds.
pub const ALARM_PULSE_SECS: u64 = 2;

// Logging Configuration
/// Default log filter when RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";
