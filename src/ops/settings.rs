//! Showing and updating settings.

use crate::app::{App, SettingsUpdate};
use crate::cli::SettingsArgs;
use crate::errors::AppResult;

/// Applies any given settings flags, then prints the current settings.
pub fn configure(app: &mut App, args: &SettingsArgs) -> AppResult<()> {
    if args.is_update() {
        app.update_settings(SettingsUpdate {
            inventory_count: args.inventory,
            total_bottles: args.bottles,
            start_date: args.start_date,
            reminder_time: args.reminder_time.clone(),
            reminder_sound: args.sound.clone(),
            sound_enabled: args.sound_enabled,
            vibration_enabled: args.vibration_enabled,
        })?;
        println!("设置已更新");
    }

    let settings = app.settings();
    println!("剩余瓶数: {:.1} / {} 瓶", settings.inventory_count, settings.total_bottles);
    println!("脱敏起始日期: {}", settings.start_date);
    println!("系统闹铃时间: {}", settings.reminder_time);
    println!("闹铃声音: {}", settings.reminder_sound);
    println!(
        "声音: {}  震动: {}",
        if settings.sound_enabled { "开" } else { "关" },
        if settings.vibration_enabled { "开" } else { "关" }
    );
    Ok(())
}
