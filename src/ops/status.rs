//! Today's dashboard: entry, elapsed days, inventory, reminder.

use crate::app::App;
use crate::errors::AppResult;
use crate::reminder::ReminderState;
use crate::tracker_core::days_elapsed;
use chrono::Local;

/// Prints the current day's view of the tracker.
pub fn show_status(app: &App) -> AppResult<()> {
    let now = Local::now();
    let settings = app.settings();

    println!(
        "已坚持脱敏治疗 {} 天 (自 {})",
        days_elapsed(settings.start_date, now),
        settings.start_date
    );

    match app.today_entry(now) {
        Some(entry) => {
            println!(
                "今日滴药: {}",
                if entry.medication_taken {
                    "已完成 ✓"
                } else {
                    "还没滴药"
                }
            );
            let mut tags = Vec::new();
            if entry.treatments.anti_histamine {
                tags.push("抗阻药");
            }
            if entry.treatments.nasal_spray {
                tags.push("鼻喷");
            }
            if entry.treatments.nasal_wash {
                tags.push("洗鼻");
            }
            if !tags.is_empty() {
                println!("辅助治疗: {}", tags.join(" "));
            }
            match &entry.symptoms {
                Some(symptoms) => println!(
                    "症状: 打喷嚏 {} / 流鼻涕 {} / 鼻塞 {}",
                    symptoms.sneezing, symptoms.runny_nose, symptoms.congestion
                ),
                None => println!("症状: 未记录"),
            }
            println!("运动: {}", entry.exercise);
        }
        None => println!("今日滴药: 还没滴药 (无记录)"),
    }

    println!(
        "药量实时库存: {:.1} / {} 瓶",
        settings.inventory_count, settings.total_bottles
    );
    println!("系统闹铃时间: {}", settings.reminder_time);
    if let ReminderState::Snoozed { until } = app.reminder_state() {
        println!("提醒已推迟至 {}", until.format("%H:%M"));
    }
    Ok(())
}
