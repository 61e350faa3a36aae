//! Recording or amending today's log entry.

use crate::app::App;
use crate::cli::LogArgs;
use crate::errors::AppResult;
use crate::tracker_core::{LogPatch, MedicationLog};
use chrono::Local;

/// Builds the patch from the CLI flags and merges it into today's entry.
pub fn record_log(app: &mut App, args: &LogArgs) -> AppResult<()> {
    let now = Local::now();
    let existing = app.today_entry(now).cloned();
    let patch = build_patch(existing.as_ref(), args);
    let entry = app.upsert_today(now, patch)?;

    println!("已保存 {} 的记录", entry.date);
    println!(
        "  滴药: {}",
        if entry.medication_taken { "✓" } else { "—" }
    );
    match &entry.symptoms {
        Some(symptoms) => println!(
            "  症状: 打喷嚏 {} / 流鼻涕 {} / 鼻塞 {}",
            symptoms.sneezing, symptoms.runny_nose, symptoms.congestion
        ),
        None => println!("  症状: 未记录"),
    }
    println!("  运动: {}", entry.exercise);
    Ok(())
}

/// Translates the flags into a full patch over today's entry.
///
/// Flags are additive: treatment switches turn on what is already
/// recorded, severity flags overwrite only their axis (the merged symptom
/// object is built here before the wholesale replacement in the store),
/// and anything omitted keeps its current value.
fn build_patch(existing: Option<&MedicationLog>, args: &LogArgs) -> LogPatch {
    let mut treatments = existing.map(|log| log.treatments).unwrap_or_default();
    if args.antihistamine {
        treatments.anti_histamine = true;
    }
    if args.nasal_spray {
        treatments.nasal_spray = true;
    }
    if args.nasal_wash {
        treatments.nasal_wash = true;
    }

    let symptom_flag_given =
        args.sneezing.is_some() || args.runny_nose.is_some() || args.congestion.is_some();
    let symptoms = if symptom_flag_given {
        let mut merged = existing.and_then(|log| log.symptoms).unwrap_or_default();
        if let Some(level) = args.sneezing {
            merged.sneezing = level;
        }
        if let Some(level) = args.runny_nose {
            merged.runny_nose = level;
        }
        if let Some(level) = args.congestion {
            merged.congestion = level;
        }
        Some(merged)
    } else {
        existing.and_then(|log| log.symptoms)
    };

    LogPatch {
        medication_taken: args.medication
            || existing.map(|log| log.medication_taken).unwrap_or(false),
        treatments,
        symptoms,
        exercise: args
            .exercise
            .unwrap_or_else(|| existing.map(|log| log.exercise).unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker_core::{
        CongestionLevel, ExerciseType, LogBook, SneezingLevel, Symptoms, Treatments,
    };
    use chrono::{Local, TimeZone};

    fn existing_entry() -> MedicationLog {
        let now = Local
            .with_ymd_and_hms(2024, 4, 10, 9, 0, 0)
            .single()
            .unwrap();
        let mut book = LogBook::default();
        book.upsert(
            now,
            LogPatch {
                medication_taken: true,
                treatments: Treatments {
                    anti_histamine: true,
                    ..Treatments::default()
                },
                symptoms: Some(Symptoms {
                    sneezing: SneezingLevel::Dizzying,
                    ..Symptoms::default()
                }),
                exercise: ExerciseType::Swimming,
            },
        )
        .clone()
    }

    #[test]
    fn test_patch_from_nothing_uses_defaults() {
        let patch = build_patch(None, &LogArgs::default());
        assert_eq!(patch, LogPatch::default());
    }

    #[test]
    fn test_patch_preserves_existing_fields() {
        let existing = existing_entry();
        let patch = build_patch(Some(&existing), &LogArgs::default());

        assert!(patch.medication_taken);
        assert!(patch.treatments.anti_histamine);
        assert_eq!(patch.symptoms.unwrap().sneezing, SneezingLevel::Dizzying);
        assert_eq!(patch.exercise, ExerciseType::Swimming);
    }

    #[test]
    fn test_severity_flag_overwrites_only_its_axis() {
        let existing = existing_entry();
        let args = LogArgs {
            congestion: Some(CongestionLevel::Blocked),
            ..LogArgs::default()
        };
        let patch = build_patch(Some(&existing), &args);

        let symptoms = patch.symptoms.unwrap();
        assert_eq!(symptoms.congestion, CongestionLevel::Blocked);
        assert_eq!(symptoms.sneezing, SneezingLevel::Dizzying);
    }

    #[test]
    fn test_severity_flag_without_existing_symptoms_starts_mild() {
        let args = LogArgs {
            sneezing: Some(SneezingLevel::Bearable),
            ..LogArgs::default()
        };
        let patch = build_patch(None, &args);

        let symptoms = patch.symptoms.unwrap();
        assert_eq!(symptoms.sneezing, SneezingLevel::Bearable);
        assert_eq!(symptoms.congestion, CongestionLevel::Clear);
    }

    #[test]
    fn test_treatment_flags_are_additive() {
        let existing = existing_entry();
        let args = LogArgs {
            nasal_wash: true,
            ..LogArgs::default()
        };
        let patch = build_patch(Some(&existing), &args);

        assert!(patch.treatments.anti_histamine);
        assert!(patch.treatments.nasal_wash);
        assert!(!patch.treatments.nasal_spray);
    }
}
