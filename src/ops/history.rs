//! The season-grouped timeline of recorded days.

use crate::app::App;
use crate::errors::AppResult;

/// Prints every recorded day, newest first, grouped by season.
pub fn show_history(app: &App) -> AppResult<()> {
    let timeline = app.state().logs.season_timeline();
    if timeline.is_empty() {
        println!("暂无历史记录");
        return Ok(());
    }

    for (season, logs) in timeline {
        println!("== {}季总结 ==", season);
        for log in logs {
            let mark = if log.medication_taken { "✓" } else { "○" };
            let mut tags = Vec::new();
            if log.treatments.anti_histamine {
                tags.push("抗阻药");
            }
            if log.treatments.nasal_spray {
                tags.push("鼻喷");
            }
            if log.treatments.nasal_wash {
                tags.push("洗鼻");
            }
            let tag_text = if tags.is_empty() {
                String::new()
            } else {
                format!("  [{}]", tags.join(" "))
            };
            println!("{} {}{}", mark, log.date, tag_text);
            match &log.symptoms {
                Some(symptoms) => println!(
                    "    打喷嚏 {} / 流鼻涕 {} / 鼻塞 {}",
                    symptoms.sneezing, symptoms.runny_nose, symptoms.congestion
                ),
                None => println!("    未记录具体症状"),
            }
        }
    }
    Ok(())
}
