//! Quick medication confirmation.

use crate::app::App;
use crate::errors::AppResult;
use chrono::Local;

/// Marks today's medication as taken and dispenses one dose.
pub fn quick_confirm(app: &mut App) -> AppResult<()> {
    let entry = app.quick_confirm_today(Local::now())?;
    println!("滴药确认 ✓ {}", entry.date);

    let remaining = app.settings().inventory_count;
    println!("药量实时库存: {:.1} 瓶", remaining);
    if remaining <= 1.0 {
        println!("库存不足，记得补货。");
    }
    Ok(())
}
