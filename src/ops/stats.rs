//! Seasonal symptom distributions.

use crate::app::App;
use crate::errors::AppResult;
use crate::tracker_core::{CongestionLevel, LevelCounts, RunnyNoseLevel, SneezingLevel};

/// Prints, for each season with symptom data, the share of days at each
/// severity level per symptom axis.
pub fn show_stats(app: &App) -> AppResult<()> {
    let aggregate = app.seasonal_aggregate();
    let mut any = false;

    for (season, stats) in aggregate.seasons() {
        any = true;
        println!("== {}季 ({} 天有症状记录) ==", season, stats.symptom_total);
        print_axis("打喷嚏", &stats.sneezing, stats.symptom_total, |i| {
            SneezingLevel::ALL[i].label()
        });
        print_axis("流鼻涕", &stats.runny_nose, stats.symptom_total, |i| {
            RunnyNoseLevel::ALL[i].label()
        });
        print_axis("鼻塞", &stats.congestion, stats.symptom_total, |i| {
            CongestionLevel::ALL[i].label()
        });
    }

    if !any {
        println!("暂无症状记录");
    }
    Ok(())
}

/// A level with zero count contributes no visible segment.
fn print_axis(
    name: &str,
    counts: &LevelCounts,
    total: u32,
    label: impl Fn(usize) -> &'static str,
) {
    let percentages = counts.percentages(total);
    let segments: Vec<String> = (0..3)
        .filter(|&i| counts.get(i) > 0)
        .map(|i| format!("{} {}%", label(i), percentages[i]))
        .collect();
    println!("  {}: {}", name, segments.join(" / "));
}
