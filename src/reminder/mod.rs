//! Reminder state machine.
//!
//! A wall-clock-driven machine with three states: `Idle`, `Snoozed`, and
//! `Triggered`. It computes nothing ahead of time and sets no timers of its
//! own; the caller polls [`ReminderMachine::tick`] on its own cadence
//! (every five seconds in the watch loop) and passes the current instant
//! in, so the machine always judges fresh state and tests can drive it with
//! simulated clocks.
//!
//! Polling rather than scheduling keeps the trigger correct across process
//! suspension: a tick after any amount of lost time still compares against
//! the real clock.

use crate::constants::REMINDER_TIME_FORMAT;
use chrono::{DateTime, Duration, Local, TimeZone};

/// The reminder's current disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// Nothing pending; the daily trigger condition is armed.
    Idle,
    /// A snooze is pending; the machine re-fires at `until` regardless of
    /// the configured daily time.
    Snoozed {
        /// The instant at which the snoozed reminder fires again.
        until: DateTime<Local>,
    },
    /// A reminder prompt is being shown. Ticks in this state report
    /// nothing further, so a visible prompt is never re-surfaced.
    Triggered,
}

/// The reminder state machine.
///
/// Transitions:
/// - `Idle -> Triggered` on a tick whose local `HH:MM` equals the
///   configured reminder time, unless today's medication is already taken.
/// - `Snoozed(until) -> Triggered` on a tick at or past `until`, even if
///   the clock has drifted past the configured minute.
/// - `Triggered -> Idle` on confirm or dismiss.
/// - `Idle/Triggered -> Snoozed(now + n)` on snooze.
/// - Confirming medication clears snooze state unconditionally, from any
///   state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMachine {
    state: ReminderState,
}

impl Default for ReminderMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderMachine {
    /// A machine in the `Idle` state.
    pub fn new() -> Self {
        ReminderMachine {
            state: ReminderState::Idle,
        }
    }

    /// Reconstructs the machine from the persisted snooze fields.
    ///
    /// `Triggered` is a transient prompt state and is never persisted; a
    /// restart while a prompt was up comes back as `Idle` (or `Snoozed`)
    /// and re-fires on its own.
    pub fn from_persisted(is_snoozed: bool, snooze_until_millis: Option<i64>) -> Self {
        let state = match snooze_until_millis {
            Some(millis) if is_snoozed => match Local.timestamp_millis_opt(millis).single() {
                Some(until) => ReminderState::Snoozed { until },
                None => ReminderState::Idle,
            },
            _ => ReminderState::Idle,
        };
        ReminderMachine { state }
    }

    /// The persisted snooze fields for the state blob.
    pub fn persisted(&self) -> (bool, Option<i64>) {
        match self.state {
            ReminderState::Snoozed { until } => (true, Some(until.timestamp_millis())),
            _ => (false, None),
        }
    }

    /// The current state.
    pub fn state(&self) -> ReminderState {
        self.state
    }

    /// Whether a prompt should currently be shown.
    pub fn is_triggered(&self) -> bool {
        self.state == ReminderState::Triggered
    }

    /// Evaluates the trigger conditions against `now`.
    ///
    /// Returns `true` only on the edge into `Triggered`; subsequent ticks
    /// within the same minute return `false` because the machine is already
    /// `Triggered`.
    pub fn tick(&mut self, now: DateTime<Local>, reminder_time: &str, today_taken: bool) -> bool {
        match self.state {
            ReminderState::Snoozed { until } => {
                if now >= until {
                    self.state = ReminderState::Triggered;
                    return true;
                }
                false
            }
            ReminderState::Idle => {
                let minute = now.format(REMINDER_TIME_FORMAT).to_string();
                if minute == reminder_time && !today_taken {
                    self.state = ReminderState::Triggered;
                    return true;
                }
                false
            }
            ReminderState::Triggered => false,
        }
    }

    /// Medication was confirmed: clear any snooze and return to `Idle`.
    pub fn confirm(&mut self) {
        self.state = ReminderState::Idle;
    }

    /// Defer the reminder by `minutes` from `now`.
    pub fn snooze(&mut self, now: DateTime<Local>, minutes: i64) {
        self.state = ReminderState::Snoozed {
            until: now + Duration::minutes(minutes),
        };
    }

    /// "Handle later": drop an active prompt without confirming.
    pub fn dismiss(&mut self) {
        if self.state == ReminderState::Triggered {
            self.state = ReminderState::Idle;
        }
    }
}
