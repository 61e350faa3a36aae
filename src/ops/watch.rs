//! The foreground reminder loop.
//!
//! Polls the reminder machine every five seconds against the wall clock.
//! Every tick reloads the state blob, so settings changes or a
//! confirmation made from another terminal are picked up on the next poll
//! rather than being shadowed by a stale snapshot. When the reminder
//! fires, an alarm pulse rings until the prompt below is answered.

use crate::alarm::AlarmPulse;
use crate::app::App;
use crate::config::Config;
use crate::constants::{DEFAULT_SNOOZE_MINUTES, POLL_INTERVAL_SECS};
use crate::errors::AppResult;
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::info;

/// What the user chose at the reminder prompt.
#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Confirm,
    Snooze(i64),
    Later,
}

/// Runs the poll loop, or a single poll step with `once`.
pub fn watch(config: &Config, once: bool) -> AppResult<()> {
    if once {
        return tick_once(config);
    }

    info!(
        "Reminder watch started; polling every {} seconds",
        POLL_INTERVAL_SECS
    );
    println!("等待每日提醒中 (Ctrl-C 退出)...");
    loop {
        let mut app = App::load(config);
        if app.reminder_tick(Local::now())? {
            handle_trigger(&mut app)?;
        }
        thread::sleep(Duration::from_secs(POLL_INTERVAL_SECS));
    }
}

/// One poll step without the interactive prompt: reports whether the
/// reminder is due and leaves the machine idle again, so the next
/// invocation inside the same minute re-fires just like the looped poll.
fn tick_once(config: &Config) -> AppResult<()> {
    let mut app = App::load(config);
    if app.reminder_tick(Local::now())? {
        println!("用药时间到");
        app.dismiss()?;
    } else {
        println!("暂无提醒");
    }
    Ok(())
}

fn handle_trigger(app: &mut App) -> AppResult<()> {
    let sound_label = app.settings().reminder_sound.clone();
    let ring = app.settings().sound_enabled || app.settings().vibration_enabled;

    // The bell doubles as the terminal's visual-bell channel, so it covers
    // both the sound and the vibration preference.
    let pulse = AlarmPulse::start(ring);
    let action = prompt_action(&sound_label, io::stdin().lock());
    pulse.stop();

    match action {
        PromptAction::Confirm => {
            let now = Local::now();
            app.quick_confirm_today(now)?;
            println!(
                "今日已完成 ✓ (库存 {:.1} 瓶)",
                app.settings().inventory_count
            );
        }
        PromptAction::Snooze(minutes) => {
            app.snooze(Local::now(), minutes)?;
            println!("将在 {} 分钟后再提醒", minutes);
        }
        PromptAction::Later => {
            app.dismiss()?;
            println!("稍后处理");
        }
    }
    Ok(())
}

/// Asks what to do about the ringing reminder. End of input counts as
/// "handle later" so a closed stdin can never wedge the loop.
fn prompt_action(sound_label: &str, mut input: impl BufRead) -> PromptAction {
    println!("\n用药时间到！正在播放：{}", sound_label);
    println!(
        "  [c] 确认滴药   [s [分钟]] {} 分钟后再响   [l] 稍后处理",
        DEFAULT_SNOOZE_MINUTES
    );

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return PromptAction::Later,
            Ok(_) => {}
        }

        let answer = line.trim().to_lowercase();
        match answer.as_str() {
            "c" | "confirm" => return PromptAction::Confirm,
            "l" | "later" | "" => return PromptAction::Later,
            other => {
                let mut parts = other.split_whitespace();
                match parts.next() {
                    Some("s") | Some("snooze") => {
                        let minutes = parts
                            .next()
                            .and_then(|raw| raw.parse::<i64>().ok())
                            .filter(|&m| m > 0)
                            .unwrap_or(DEFAULT_SNOOZE_MINUTES);
                        return PromptAction::Snooze(minutes);
                    }
                    _ => println!("请输入 c、s 或 l。"),
                }
            }
        }
    }
}
