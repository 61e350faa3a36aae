//! Command-line interface for the tracker.

use crate::constants::{APP_DESCRIPTION, APP_NAME};
use crate::tracker_core::{CongestionLevel, ExerciseType, RunnyNoseLevel, SneezingLevel};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// A personal allergy desensitization tracker
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Print verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Confirm today's medication and dispense one dose from the inventory
    Confirm,

    /// Record or amend today's log entry
    Log(LogArgs),

    /// Show today's entry, elapsed treatment days, and inventory
    Status,

    /// Show the season-grouped timeline of recorded days
    History,

    /// Show seasonal symptom distributions
    Stats,

    /// Show or update settings
    Settings(SettingsArgs),

    /// Delete every log entry
    Clear {
        /// Actually delete; without this flag nothing happens
        #[arg(long)]
        yes: bool,
    },

    /// Run the reminder poll loop in the foreground
    Watch {
        /// Evaluate a single poll step and exit
        #[arg(long)]
        once: bool,
    },

    /// Fetch advisory weather and air quality for a coordinate pair
    Weather {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

/// Flags for recording today's entry. Severity flags merge over what is
/// already recorded for today; omitted axes keep their current value.
#[derive(Args, Debug, Default)]
pub struct LogArgs {
    /// Mark today's medication as taken
    #[arg(long)]
    pub medication: bool,

    /// Oral antihistamine taken
    #[arg(long)]
    pub antihistamine: bool,

    /// Nasal spray used
    #[arg(long)]
    pub nasal_spray: bool,

    /// Saline nasal wash done
    #[arg(long)]
    pub nasal_wash: bool,

    /// Sneezing severity: mild, bearable, dizzying
    #[arg(long)]
    pub sneezing: Option<SneezingLevel>,

    /// Runny nose severity: dry, half-pack, two-packs
    #[arg(long)]
    pub runny_nose: Option<RunnyNoseLevel>,

    /// Congestion severity: clear, one-side, blocked
    #[arg(long)]
    pub congestion: Option<CongestionLevel>,

    /// Exercise: running, swimming, cycling, strength, climbing, aerobics, none
    #[arg(long)]
    pub exercise: Option<ExerciseType>,
}

/// Settings flags; with no flags the current settings are printed.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Remaining inventory in bottles, clamped to [0, total bottles]
    #[arg(long)]
    pub inventory: Option<f64>,

    /// Total bottle capacity
    #[arg(long)]
    pub bottles: Option<u32>,

    /// Desensitization start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Daily reminder time (HH:MM)
    #[arg(long)]
    pub reminder_time: Option<String>,

    /// Alarm sound label
    #[arg(long)]
    pub sound: Option<String>,

    /// Enable or disable the alarm sound
    #[arg(long)]
    pub sound_enabled: Option<bool>,

    /// Enable or disable vibration
    #[arg(long)]
    pub vibration_enabled: Option<bool>,
}

impl SettingsArgs {
    /// Whether any update flag was given.
    pub fn is_update(&self) -> bool {
        self.inventory.is_some()
            || self.bottles.is_some()
            || self.start_date.is_some()
            || self.reminder_time.is_some()
            || self.sound.is_some()
            || self.sound_enabled.is_some()
            || self.vibration_enabled.is_some()
    }
}
