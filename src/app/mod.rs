//! The application state container.
//!
//! A single [`App`] owns the whole aggregate (daily logs, settings, and
//! reminder state) for the lifetime of a process. Every mutation funnels
//! through its methods and is followed by a synchronous save of the whole
//! blob, so each user action fully completes, persistence included, before
//! the next one is processed. Nothing outside this module mutates the
//! aggregate directly.
//!
//! Methods that depend on "today" or "now" take the instant as a
//! parameter: callers pass the wall clock at the moment of the call, and
//! tests pass simulated instants.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::reminder::{ReminderMachine, ReminderState};
use crate::storage::StateFile;
use crate::tracker_core::{
    parse_reminder_time, AppState, LogPatch, MedicationLog, SeasonalAggregate, Settings,
};
use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

/// A partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub inventory_count: Option<f64>,
    pub total_bottles: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub reminder_time: Option<String>,
    pub reminder_sound: Option<String>,
    pub sound_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
}

/// The root state container.
pub struct App {
    state: AppState,
    reminder: ReminderMachine,
    file: StateFile,
}

impl App {
    /// Loads the persisted aggregate (or defaults) from the configured data
    /// directory and reconstructs the reminder machine from its snooze
    /// fields.
    pub fn load(config: &Config) -> Self {
        let file = StateFile::new(&config.data_dir);
        let state = file.load();
        let reminder = ReminderMachine::from_persisted(state.is_snoozed, state.snooze_until);
        debug!("Loaded state with {} log entries", state.logs.len());
        App {
            state,
            reminder,
            file,
        }
    }

    /// Read access to the aggregate.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The settings object.
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// Today's entry, keyed by the calendar day of `now`.
    pub fn today_entry(&self, now: DateTime<Local>) -> Option<&MedicationLog> {
        self.state.logs.today(now)
    }

    /// The reminder's current disposition.
    pub fn reminder_state(&self) -> ReminderState {
        self.reminder.state()
    }

    /// Merges a log patch into today's entry (creating it if needed) and
    /// persists.
    pub fn upsert_today(&mut self, now: DateTime<Local>, patch: LogPatch) -> AppResult<MedicationLog> {
        let entry = self.state.logs.upsert(now, patch).clone();
        self.save()?;
        Ok(entry)
    }

    /// Quick confirm: mark today's medication taken, dispense one dose from
    /// the inventory, clear any pending snooze, and persist.
    ///
    /// Calling this again on an already-confirmed day dispenses another
    /// dose; the decrement deliberately has no taken-today guard.
    pub fn quick_confirm_today(&mut self, now: DateTime<Local>) -> AppResult<MedicationLog> {
        let entry = self.state.logs.confirm(now).clone();
        self.state.settings.decrement_inventory();
        self.reminder.confirm();
        info!(
            "Medication confirmed for {}; inventory at {:.1}",
            entry.date, self.state.settings.inventory_count
        );
        self.save()?;
        Ok(entry)
    }

    /// Removes every log entry and persists. Irreversible; the caller is
    /// responsible for confirming destructive intent before invoking this.
    pub fn clear_logs(&mut self) -> AppResult<()> {
        self.state.logs.clear();
        self.save()
    }

    /// Applies a partial settings update and persists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Tracker` if a provided reminder time is not of
    /// the form `HH:MM`. Numeric inputs are clamped rather than rejected.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> AppResult<()> {
        if let Some(time) = &update.reminder_time {
            if parse_reminder_time(time).is_none() {
                return Err(AppError::Tracker(format!(
                    "Invalid reminder time '{}', expected HH:MM",
                    time
                )));
            }
        }

        let settings = &mut self.state.settings;
        if let Some(total) = update.total_bottles {
            settings.set_total_bottles(total);
        }
        if let Some(count) = update.inventory_count {
            settings.set_inventory(count);
        }
        if let Some(date) = update.start_date {
            settings.start_date = date;
        }
        if let Some(time) = update.reminder_time {
            settings.reminder_time = time;
        }
        if let Some(sound) = update.reminder_sound {
            settings.reminder_sound = sound;
        }
        if let Some(enabled) = update.sound_enabled {
            settings.sound_enabled = enabled;
        }
        if let Some(enabled) = update.vibration_enabled {
            settings.vibration_enabled = enabled;
        }

        self.save()
    }

    /// Seasonal symptom distribution over all recorded days.
    pub fn seasonal_aggregate(&self) -> SeasonalAggregate {
        self.state.logs.seasonal_aggregate()
    }

    /// One reminder poll step. Reads the current settings and today's entry
    /// fresh on every call. Returns `true` when the reminder newly fires;
    /// the snooze fields are persisted whenever they change.
    pub fn reminder_tick(&mut self, now: DateTime<Local>) -> AppResult<bool> {
        let today_taken = self
            .state
            .logs
            .today(now)
            .map(|log| log.medication_taken)
            .unwrap_or(false);
        let fired = self
            .reminder
            .tick(now, &self.state.settings.reminder_time, today_taken);
        self.save_if_reminder_changed()?;
        Ok(fired)
    }

    /// Defers the reminder by `minutes` from `now` and persists.
    pub fn snooze(&mut self, now: DateTime<Local>, minutes: i64) -> AppResult<()> {
        self.reminder.snooze(now, minutes);
        info!("Reminder snoozed for {} minutes", minutes);
        self.save_if_reminder_changed()
    }

    /// Drops an active reminder prompt without confirming, and persists any
    /// snooze-field change.
    pub fn dismiss(&mut self) -> AppResult<()> {
        self.reminder.dismiss();
        self.save_if_reminder_changed()
    }

    fn save_if_reminder_changed(&mut self) -> AppResult<()> {
        let (is_snoozed, snooze_until) = self.reminder.persisted();
        if (is_snoozed, snooze_until) != (self.state.is_snoozed, self.state.snooze_until) {
            return self.save();
        }
        Ok(())
    }

    fn save(&mut self) -> AppResult<()> {
        let (is_snoozed, snooze_until) = self.reminder.persisted();
        self.state.is_snoozed = is_snoozed;
        self.state.snooze_until = snooze_until;
        self.file.save(&self.state)
    }
}
