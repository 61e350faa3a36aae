//! Reminder scenarios driven through the state container with simulated
//! clocks.

use allerease::app::{App, SettingsUpdate};
use allerease::{Config, ReminderState};
use chrono::{DateTime, Local, TimeZone};
use tempfile::tempdir;

fn config_for(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        weather_url: None,
    }
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 4, 10, h, m, s)
        .single()
        .expect("unambiguous local time")
}

fn app_with_reminder_at(dir: &std::path::Path, time: &str) -> App {
    let mut app = App::load(&config_for(dir));
    app.update_settings(SettingsUpdate {
        reminder_time: Some(time.to_string()),
        ..SettingsUpdate::default()
    })
    .unwrap();
    app
}

#[test]
fn test_polling_across_the_target_minute_fires_once() {
    let dir = tempdir().unwrap();
    let mut app = app_with_reminder_at(dir.path(), "08:00");

    let mut fired = Vec::new();
    let mut clock = at(7, 59, 55);
    for _ in 0..3 {
        if app.reminder_tick(clock).unwrap() {
            fired.push(clock);
        }
        clock = clock + chrono::Duration::seconds(5);
    }

    assert_eq!(fired, vec![at(8, 0, 0)]);
    assert_eq!(app.reminder_state(), ReminderState::Triggered);
}

#[test]
fn test_existing_unconfirmed_entry_still_triggers() {
    let dir = tempdir().unwrap();
    let mut app = app_with_reminder_at(dir.path(), "08:00");

    // A symptom-only entry does not count as taking the medication.
    app.upsert_today(at(7, 30, 0), allerease::LogPatch::default())
        .unwrap();
    assert!(app.reminder_tick(at(8, 0, 0)).unwrap());
}

#[test]
fn test_snooze_fires_at_deadline_regardless_of_reminder_time() {
    let dir = tempdir().unwrap();
    let mut app = app_with_reminder_at(dir.path(), "08:00");

    assert!(app.reminder_tick(at(8, 0, 0)).unwrap());
    app.snooze(at(8, 0, 0), 15).unwrap();

    // Even with the configured time moved far away, the deadline fires.
    app.update_settings(SettingsUpdate {
        reminder_time: Some("22:30".to_string()),
        ..SettingsUpdate::default()
    })
    .unwrap();

    assert!(!app.reminder_tick(at(8, 14, 55)).unwrap());
    assert!(app.reminder_tick(at(8, 15, 0)).unwrap());
}

#[test]
fn test_confirm_while_snoozed_returns_to_idle() {
    let dir = tempdir().unwrap();
    let mut app = app_with_reminder_at(dir.path(), "08:00");

    app.snooze(at(8, 0, 0), 15).unwrap();
    app.quick_confirm_today(at(8, 5, 0)).unwrap();

    assert_eq!(app.reminder_state(), ReminderState::Idle);
    assert!(!app.state().is_snoozed);
    assert!(app.state().snooze_until.is_none());

    // The cleared snooze never comes back: the deadline passes silently
    // and the daily condition is off because today is confirmed.
    assert!(!app.reminder_tick(at(8, 15, 0)).unwrap());
}

#[test]
fn test_snooze_survives_process_restart() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());

    {
        let mut app = App::load(&config);
        app.snooze(at(8, 0, 0), 15).unwrap();
    }

    let mut app = App::load(&config);
    assert!(matches!(
        app.reminder_state(),
        ReminderState::Snoozed { .. }
    ));
    assert!(app.reminder_tick(at(8, 15, 0)).unwrap());
}

#[test]
fn test_dismissed_prompt_refires_next_matching_minute() {
    let dir = tempdir().unwrap();
    let mut app = app_with_reminder_at(dir.path(), "08:00");

    assert!(app.reminder_tick(at(8, 0, 0)).unwrap());
    app.dismiss().unwrap();

    // Still inside the matching minute and still unconfirmed, so the next
    // poll surfaces the prompt again.
    assert!(app.reminder_tick(at(8, 0, 5)).unwrap());
}
