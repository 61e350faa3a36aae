//! Core tracker domain logic without I/O operations.
//!
//! This module contains the pure data model of the tracker: the per-day
//! medication log and its fixed enumerations, the keyed log collection with
//! merge-on-write semantics, seasonal aggregation, and the settings object
//! with its inventory arithmetic. Nothing here touches the filesystem or
//! the network; "now" is always passed in by the caller so the logic can be
//! driven with simulated clocks in tests.

use crate::constants::{
    DEFAULT_INVENTORY_COUNT, DEFAULT_REMINDER_SOUND, DEFAULT_REMINDER_TIME, DEFAULT_TOTAL_BOTTLES,
    INVENTORY_STEP, MILLIS_PER_DAY, REMINDER_TIME_FORMAT,
};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a CLI token does not name a known enumeration value.
#[derive(Debug, Clone, Error)]
#[error("unrecognized value '{0}'")]
pub struct ParseValueError(pub String);

/// Sneezing severity for one day.
///
/// The serialized form keeps the original label strings so existing state
/// blobs stay readable; the CLI accepts the English tokens from [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SneezingLevel {
    /// 轻微
    #[serde(rename = "轻微")]
    Mild,
    /// 能忍
    #[serde(rename = "能忍")]
    Bearable,
    /// 打到头晕
    #[serde(rename = "打到头晕")]
    Dizzying,
}

impl SneezingLevel {
    /// All levels, mildest first. The order is the display order and the
    /// index order used by [`LevelCounts`].
    pub const ALL: [SneezingLevel; 3] =
        [SneezingLevel::Mild, SneezingLevel::Bearable, SneezingLevel::Dizzying];

    /// Position of this level within [`Self::ALL`].
    pub fn index(self) -> usize {
        match self {
            SneezingLevel::Mild => 0,
            SneezingLevel::Bearable => 1,
            SneezingLevel::Dizzying => 2,
        }
    }

    /// The user-facing label, as shown in status and history output.
    pub fn label(self) -> &'static str {
        match self {
            SneezingLevel::Mild => "轻微",
            SneezingLevel::Bearable => "能忍",
            SneezingLevel::Dizzying => "打到头晕",
        }
    }
}

impl fmt::Display for SneezingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SneezingLevel {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mild" => Ok(SneezingLevel::Mild),
            "bearable" => Ok(SneezingLevel::Bearable),
            "dizzying" => Ok(SneezingLevel::Dizzying),
            other => Err(ParseValueError(other.to_string())),
        }
    }
}

/// Runny-nose severity for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnyNoseLevel {
    /// 干爽的一天
    #[serde(rename = "干爽的一天")]
    Dry,
    /// 半包纸巾
    #[serde(rename = "半包纸巾")]
    HalfPack,
    /// 干翻了两包
    #[serde(rename = "干翻了两包")]
    TwoPacks,
}

impl RunnyNoseLevel {
    /// All levels, mildest first.
    pub const ALL: [RunnyNoseLevel; 3] =
        [RunnyNoseLevel::Dry, RunnyNoseLevel::HalfPack, RunnyNoseLevel::TwoPacks];

    /// Position of this level within [`Self::ALL`].
    pub fn index(self) -> usize {
        match self {
            RunnyNoseLevel::Dry => 0,
            RunnyNoseLevel::HalfPack => 1,
            RunnyNoseLevel::TwoPacks => 2,
        }
    }

    /// The user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            RunnyNoseLevel::Dry => "干爽的一天",
            RunnyNoseLevel::HalfPack => "半包纸巾",
            RunnyNoseLevel::TwoPacks => "干翻了两包",
        }
    }
}

impl fmt::Display for RunnyNoseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RunnyNoseLevel {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dry" => Ok(RunnyNoseLevel::Dry),
            "half-pack" => Ok(RunnyNoseLevel::HalfPack),
            "two-packs" => Ok(RunnyNoseLevel::TwoPacks),
            other => Err(ParseValueError(other.to_string())),
        }
    }
}

/// Nasal congestion severity for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CongestionLevel {
    /// 几乎是正常人
    #[serde(rename = "几乎是正常人")]
    Clear,
    /// 一只可用
    #[serde(rename = "一只可用")]
    OneSide,
    /// 憋死我了
    #[serde(rename = "憋死我了")]
    Blocked,
}

impl CongestionLevel {
    /// All levels, mildest first.
    pub const ALL: [CongestionLevel; 3] =
        [CongestionLevel::Clear, CongestionLevel::OneSide, CongestionLevel::Blocked];

    /// Position of this level within [`Self::ALL`].
    pub fn index(self) -> usize {
        match self {
            CongestionLevel::Clear => 0,
            CongestionLevel::OneSide => 1,
            CongestionLevel::Blocked => 2,
        }
    }

    /// The user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            CongestionLevel::Clear => "几乎是正常人",
            CongestionLevel::OneSide => "一只可用",
            CongestionLevel::Blocked => "憋死我了",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CongestionLevel {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => Ok(CongestionLevel::Clear),
            "one-side" => Ok(CongestionLevel::OneSide),
            "blocked" => Ok(CongestionLevel::Blocked),
            other => Err(ParseValueError(other.to_string())),
        }
    }
}

/// Exercise performed on a given day. Defaults to no exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseType {
    /// 跑步
    #[serde(rename = "跑步")]
    Running,
    /// 游泳
    #[serde(rename = "游泳")]
    Swimming,
    /// 骑车
    #[serde(rename = "骑车")]
    Cycling,
    /// 力量
    #[serde(rename = "力量")]
    Strength,
    /// 爬坡
    #[serde(rename = "爬坡")]
    Climbing,
    /// 健身操
    #[serde(rename = "健身操")]
    Aerobics,
    /// 未运动
    #[default]
    #[serde(rename = "未运动")]
    None,
}

impl ExerciseType {
    /// The user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            ExerciseType::Running => "跑步",
            ExerciseType::Swimming => "游泳",
            ExerciseType::Cycling => "骑车",
            ExerciseType::Strength => "力量",
            ExerciseType::Climbing => "爬坡",
            ExerciseType::Aerobics => "健身操",
            ExerciseType::None => "未运动",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExerciseType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(ExerciseType::Running),
            "swimming" => Ok(ExerciseType::Swimming),
            "cycling" => Ok(ExerciseType::Cycling),
            "strength" => Ok(ExerciseType::Strength),
            "climbing" => Ok(ExerciseType::Climbing),
            "aerobics" => Ok(ExerciseType::Aerobics),
            "none" => Ok(ExerciseType::None),
            other => Err(ParseValueError(other.to_string())),
        }
    }
}

/// One of the four meteorological season buckets.
///
/// A log's season is derived once from its creation month and never
/// recomputed afterwards: it is a creation-time fact, so a record created
/// late on the last day of winter stays a winter record even when the
/// collection is next touched in spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    /// 春 (March through May)
    #[serde(rename = "春")]
    Spring,
    /// 夏 (June through August)
    #[serde(rename = "夏")]
    Summer,
    /// 秋 (September through November)
    #[serde(rename = "秋")]
    Autumn,
    /// 冬 (December through February)
    #[serde(rename = "冬")]
    Winter,
}

impl Season {
    /// All seasons in display order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Derives the season bucket for a calendar date.
    pub fn of(date: NaiveDate) -> Season {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// The user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "春",
            Season::Summer => "夏",
            Season::Autumn => "秋",
            Season::Winter => "冬",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Auxiliary treatments taken alongside the desensitization drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Treatments {
    /// Oral antihistamine taken today.
    pub anti_histamine: bool,
    /// Nasal spray used today.
    pub nasal_spray: bool,
    /// Saline nasal wash done today.
    pub nasal_wash: bool,
}

/// Symptom severities for one day. Absent on a log means "not recorded."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptoms {
    pub sneezing: SneezingLevel,
    pub runny_nose: RunnyNoseLevel,
    pub congestion: CongestionLevel,
}

impl Default for Symptoms {
    /// The mildest level on every axis, matching the pre-selected state of
    /// a fresh symptom form.
    fn default() -> Self {
        Symptoms {
            sneezing: SneezingLevel::Mild,
            runny_nose: RunnyNoseLevel::Dry,
            congestion: CongestionLevel::Clear,
        }
    }
}

/// One calendar day's recorded medication, treatment, symptom, and exercise
/// data.
///
/// `date` is the natural key within the collection; `id`, `timestamp`, and
/// `season` are assigned at creation and never change, even when the record
/// is later amended through [`LogBook::upsert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLog {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Creation instant, milliseconds since the epoch.
    pub timestamp: i64,
    /// Local calendar date at creation; the natural key.
    #[serde(rename = "dateString")]
    pub date: NaiveDate,
    /// Whether the desensitization drops were taken. Independent of
    /// symptom data.
    #[serde(default)]
    pub medication_taken: bool,
    #[serde(default)]
    pub treatments: Treatments,
    #[serde(default)]
    pub symptoms: Option<Symptoms>,
    #[serde(default)]
    pub exercise: ExerciseType,
    /// Season bucket derived from the creation month.
    pub season: Season,
}

impl MedicationLog {
    /// Creates a fresh log for the calendar day of `now`, stamped with a new
    /// id, the creation instant, and the creation season.
    fn create(now: DateTime<Local>, patch: LogPatch) -> Self {
        let date = now.date_naive();
        MedicationLog {
            id: Uuid::new_v4().to_string(),
            timestamp: now.timestamp_millis(),
            date,
            medication_taken: patch.medication_taken,
            treatments: patch.treatments,
            symptoms: patch.symptoms,
            exercise: patch.exercise,
            season: Season::of(date),
        }
    }

    /// Overlays the patch fields onto this log. Identity fields (`id`,
    /// `timestamp`, `date`, `season`) are left untouched; `symptoms` is
    /// replaced wholesale, not deep-merged.
    fn apply(&mut self, patch: LogPatch) {
        self.medication_taken = patch.medication_taken;
        self.treatments = patch.treatments;
        self.symptoms = patch.symptoms;
        self.exercise = patch.exercise;
    }
}

/// The mutable portion of a day's log, as submitted by the presentation
/// layer. Applied over an existing entry or used to seed a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPatch {
    pub medication_taken: bool,
    pub treatments: Treatments,
    pub symptoms: Option<Symptoms>,
    pub exercise: ExerciseType,
}

/// The daily log collection, keyed by calendar date.
///
/// Keying by date makes duplicate-day entries impossible by construction;
/// the newest-first feed the history view wants falls out of iterating the
/// keys in reverse. The persisted form is the plain newest-first array the
/// state blob has always carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<MedicationLog>", from = "Vec<MedicationLog>")]
pub struct LogBook {
    entries: BTreeMap<NaiveDate, MedicationLog>,
}

impl From<Vec<MedicationLog>> for LogBook {
    /// Rebuilds the keyed collection from a persisted newest-first array.
    /// Should a legacy blob carry duplicate entries for one day, the first
    /// (newest) occurrence wins.
    fn from(logs: Vec<MedicationLog>) -> Self {
        let mut entries = BTreeMap::new();
        for log in logs {
            entries.entry(log.date).or_insert(log);
        }
        LogBook { entries }
    }
}

impl From<LogBook> for Vec<MedicationLog> {
    fn from(book: LogBook) -> Self {
        book.entries.into_values().rev().collect()
    }
}

impl LogBook {
    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no day has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry for a specific calendar date.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&MedicationLog> {
        self.entries.get(&date)
    }

    /// Looks up the entry for the calendar day of `now`.
    ///
    /// The key is derived from the passed instant at every call, never
    /// cached, so calls on either side of a local midnight resolve to
    /// different days.
    pub fn today(&self, now: DateTime<Local>) -> Option<&MedicationLog> {
        self.entry_for(now.date_naive())
    }

    /// Merges `patch` into today's entry, creating the entry if the day has
    /// none yet. Returns the resulting entry. Always succeeds.
    pub fn upsert(&mut self, now: DateTime<Local>, patch: LogPatch) -> &MedicationLog {
        match self.entries.entry(now.date_naive()) {
            Entry::Occupied(occupied) => {
                let log = occupied.into_mut();
                log.apply(patch);
                log
            }
            Entry::Vacant(vacant) => vacant.insert(MedicationLog::create(now, patch)),
        }
    }

    /// Marks today's medication as taken without touching treatments,
    /// symptoms, or exercise; creates a minimal entry if the day has none.
    pub fn confirm(&mut self, now: DateTime<Local>) -> &MedicationLog {
        match self.entries.entry(now.date_naive()) {
            Entry::Occupied(occupied) => {
                let log = occupied.into_mut();
                log.medication_taken = true;
                log
            }
            Entry::Vacant(vacant) => vacant.insert(MedicationLog::create(
                now,
                LogPatch {
                    medication_taken: true,
                    ..LogPatch::default()
                },
            )),
        }
    }

    /// Removes every entry. Irreversible; callers are responsible for
    /// confirming destructive intent first.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, newest first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &MedicationLog> {
        self.entries.values().rev()
    }

    /// The newest-first timeline grouped by season, in season display
    /// order. Seasons without entries are omitted. Entries without symptom
    /// data are included; only the aggregate excludes them.
    pub fn season_timeline(&self) -> Vec<(Season, Vec<&MedicationLog>)> {
        Season::ALL
            .iter()
            .filter_map(|&season| {
                let logs: Vec<&MedicationLog> = self
                    .iter_newest_first()
                    .filter(|log| log.season == season)
                    .collect();
                if logs.is_empty() {
                    None
                } else {
                    Some((season, logs))
                }
            })
            .collect()
    }

    /// Counts symptom-bearing entries per season and per-level entries per
    /// symptom axis. Entries with no symptom record are excluded from all
    /// axis counts.
    pub fn seasonal_aggregate(&self) -> SeasonalAggregate {
        let mut per_season: BTreeMap<Season, SeasonStats> = BTreeMap::new();
        for log in self.entries.values() {
            if let Some(symptoms) = &log.symptoms {
                let stats = per_season.entry(log.season).or_default();
                stats.symptom_total += 1;
                stats.sneezing.record(symptoms.sneezing.index());
                stats.runny_nose.record(symptoms.runny_nose.index());
                stats.congestion.record(symptoms.congestion.index());
            }
        }
        SeasonalAggregate { per_season }
    }
}

/// Per-level counts along one symptom axis, indexed mildest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts([u32; 3]);

impl LevelCounts {
    fn record(&mut self, index: usize) {
        self.0[index] += 1;
    }

    /// Count for the level at `index` (see the level enums' `ALL` order).
    pub fn get(&self, index: usize) -> u32 {
        self.0[index]
    }

    /// Rounded whole percentages of `total` per level. A zero total yields
    /// all zeros rather than dividing by zero.
    pub fn percentages(&self, total: u32) -> [u32; 3] {
        if total == 0 {
            return [0; 3];
        }
        let mut out = [0u32; 3];
        for (slot, &count) in out.iter_mut().zip(self.0.iter()) {
            *slot = ((count as f64 / total as f64) * 100.0).round() as u32;
        }
        out
    }
}

/// Symptom distribution for a single season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonStats {
    /// Number of entries in this season that carry symptom data.
    pub symptom_total: u32,
    pub sneezing: LevelCounts,
    pub runny_nose: LevelCounts,
    pub congestion: LevelCounts,
}

/// Symptom distributions for every season that has symptom-bearing entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonalAggregate {
    per_season: BTreeMap<Season, SeasonStats>,
}

impl SeasonalAggregate {
    /// Stats for one season, if any of its entries carried symptoms.
    pub fn stats(&self, season: Season) -> Option<&SeasonStats> {
        self.per_season.get(&season)
    }

    /// Seasons with symptom-bearing entries, in display order.
    pub fn seasons(&self) -> impl Iterator<Item = (Season, &SeasonStats)> {
        self.per_season.iter().map(|(&season, stats)| (season, stats))
    }
}

/// Rounds to one decimal place using decimal semantics, so repeated
/// inventory steps land on exact tenths instead of drifting through binary
/// fractions (0.2 - 0.2 is exactly 0.0, never -1e-17).
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Number of days the desensitization course has been running, counting any
/// started day as a full one.
pub fn days_elapsed(start: NaiveDate, now: DateTime<Local>) -> i64 {
    let start_instant = start
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis());
    let elapsed = (now.timestamp_millis() - start_instant).abs();
    (elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Parses a reminder time of the form `HH:MM`.
pub fn parse_reminder_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, REMINDER_TIME_FORMAT).ok()
}

/// The single mutable configuration object of the tracker.
///
/// Every field is individually defaulted so partial blobs from older
/// versions load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Remaining inventory, in bottles. Moves in steps of 0.2 and is kept
    /// within `[0, total_bottles]`.
    pub inventory_count: f64,
    /// Total bottle capacity.
    pub total_bottles: u32,
    /// First day of the desensitization course.
    pub start_date: NaiveDate,
    /// Daily reminder time, `HH:MM`.
    pub reminder_time: String,
    /// Label of the alarm sound announced while a reminder rings.
    pub reminder_sound: String,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            inventory_count: DEFAULT_INVENTORY_COUNT,
            total_bottles: DEFAULT_TOTAL_BOTTLES,
            start_date: Local::now().date_naive(),
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
            reminder_sound: DEFAULT_REMINDER_SOUND.to_string(),
            sound_enabled: true,
            vibration_enabled: true,
        }
    }
}

impl Settings {
    /// Takes one dose out of the inventory: down by 0.2, floored at zero,
    /// rounded to one decimal. Called on every quick confirm, including a
    /// repeated confirm on an already-taken day; re-confirming dispenses
    /// another dose.
    pub fn decrement_inventory(&mut self) {
        self.inventory_count = round_to_tenth((self.inventory_count - INVENTORY_STEP).max(0.0));
    }

    /// Sets the inventory to an explicit value, clamped to
    /// `[0, total_bottles]` and rounded to one decimal.
    pub fn set_inventory(&mut self, value: f64) {
        let clamped = value.clamp(0.0, self.total_bottles as f64);
        self.inventory_count = round_to_tenth(clamped);
    }

    /// Sets the bottle capacity and re-clamps the inventory beneath it.
    pub fn set_total_bottles(&mut self, total: u32) {
        self.total_bottles = total.max(1);
        if self.inventory_count > self.total_bottles as f64 {
            self.inventory_count = self.total_bottles as f64;
        }
    }
}

/// The root aggregate persisted as the state blob: the daily logs, the
/// settings, and the reminder's snooze fields.
///
/// Field names and layout match the blob as it has always been written;
/// every field defaults independently so older or partial blobs load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub logs: LogBook,
    pub settings: Settings,
    /// Whether a snooze is pending.
    pub is_snoozed: bool,
    /// Snooze deadline, milliseconds since the epoch, when snoozed.
    pub snooze_until: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("unambiguous local time")
    }

    fn symptom_patch(sneezing: SneezingLevel) -> LogPatch {
        LogPatch {
            symptoms: Some(Symptoms {
                sneezing,
                ..Symptoms::default()
            }),
            ..LogPatch::default()
        }
    }

    #[test]
    fn test_season_of_months() {
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()), Season::Spring);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()), Season::Autumn);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()), Season::Winter);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), Season::Winter);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()), Season::Winter);
    }

    #[test]
    fn test_upsert_creates_one_entry_per_day() {
        let mut book = LogBook::default();
        let morning = at(2024, 4, 10, 8, 0, 0);
        let evening = at(2024, 4, 10, 21, 30, 0);

        book.upsert(morning, LogPatch::default());
        book.upsert(
            evening,
            LogPatch {
                medication_taken: true,
                ..LogPatch::default()
            },
        );

        assert_eq!(book.len(), 1);
        let entry = book.today(evening).unwrap();
        assert!(entry.medication_taken);
        assert_eq!(entry.season, Season::Spring);
    }

    #[test]
    fn test_upsert_last_patch_wins_over_defaults() {
        let mut book = LogBook::default();
        let now = at(2024, 4, 10, 9, 0, 0);

        book.upsert(now, symptom_patch(SneezingLevel::Dizzying));
        book.upsert(
            now,
            LogPatch {
                medication_taken: true,
                treatments: Treatments {
                    nasal_spray: true,
                    ..Treatments::default()
                },
                symptoms: Some(Symptoms {
                    sneezing: SneezingLevel::Bearable,
                    ..Symptoms::default()
                }),
                exercise: ExerciseType::Running,
            },
        );

        let entry = book.today(now).unwrap();
        assert!(entry.medication_taken);
        assert!(entry.treatments.nasal_spray);
        assert_eq!(entry.symptoms.unwrap().sneezing, SneezingLevel::Bearable);
        assert_eq!(entry.exercise, ExerciseType::Running);
    }

    #[test]
    fn test_upsert_preserves_identity_fields() {
        let mut book = LogBook::default();
        let now = at(2024, 4, 10, 9, 0, 0);

        let (id, timestamp) = {
            let created = book.upsert(now, LogPatch::default());
            (created.id.clone(), created.timestamp)
        };

        let later = at(2024, 4, 10, 23, 59, 0);
        let amended = book.upsert(later, symptom_patch(SneezingLevel::Mild));
        assert_eq!(amended.id, id);
        assert_eq!(amended.timestamp, timestamp);
    }

    #[test]
    fn test_symptoms_replaced_wholesale() {
        let mut book = LogBook::default();
        let now = at(2024, 4, 10, 9, 0, 0);

        book.upsert(
            now,
            LogPatch {
                symptoms: Some(Symptoms {
                    sneezing: SneezingLevel::Dizzying,
                    runny_nose: RunnyNoseLevel::TwoPacks,
                    congestion: CongestionLevel::Blocked,
                }),
                ..LogPatch::default()
            },
        );
        book.upsert(now, symptom_patch(SneezingLevel::Mild));

        let symptoms = book.today(now).unwrap().symptoms.unwrap();
        assert_eq!(symptoms.runny_nose, RunnyNoseLevel::Dry);
        assert_eq!(symptoms.congestion, CongestionLevel::Clear);
    }

    #[test]
    fn test_upsert_can_clear_symptoms() {
        let mut book = LogBook::default();
        let now = at(2024, 4, 10, 9, 0, 0);

        book.upsert(now, symptom_patch(SneezingLevel::Mild));
        book.upsert(now, LogPatch::default());
        assert!(book.today(now).unwrap().symptoms.is_none());
    }

    #[test]
    fn test_confirm_creates_minimal_entry() {
        let mut book = LogBook::default();
        let now = at(2024, 7, 2, 8, 0, 5);

        let entry = book.confirm(now);
        assert!(entry.medication_taken);
        assert_eq!(entry.treatments, Treatments::default());
        assert!(entry.symptoms.is_none());
        assert_eq!(entry.exercise, ExerciseType::None);
        assert_eq!(entry.season, Season::Summer);
    }

    #[test]
    fn test_confirm_leaves_existing_fields_alone() {
        let mut book = LogBook::default();
        let now = at(2024, 7, 2, 8, 0, 5);

        book.upsert(now, symptom_patch(SneezingLevel::Bearable));
        book.confirm(now);

        let entry = book.today(now).unwrap();
        assert!(entry.medication_taken);
        assert_eq!(entry.symptoms.unwrap().sneezing, SneezingLevel::Bearable);
    }

    #[test]
    fn test_season_is_a_creation_time_fact() {
        let mut book = LogBook::default();
        let winter_evening = at(2024, 2, 28, 23, 50, 0);
        book.upsert(winter_evening, LogPatch::default());

        // Editing after midnight lands on the next day's entry; the winter
        // record keeps its season and stays untouched.
        let spring_morning = at(2024, 3, 1, 0, 10, 0);
        book.upsert(spring_morning, symptom_patch(SneezingLevel::Mild));

        assert_eq!(book.len(), 2);
        let winter_entry = book.entry_for(winter_evening.date_naive()).unwrap();
        assert_eq!(winter_entry.season, Season::Winter);
        assert!(winter_entry.symptoms.is_none());
        let spring_entry = book.entry_for(spring_morning.date_naive()).unwrap();
        assert_eq!(spring_entry.season, Season::Spring);
    }

    #[test]
    fn test_iteration_is_newest_first() {
        let mut book = LogBook::default();
        book.upsert(at(2024, 4, 8, 9, 0, 0), LogPatch::default());
        book.upsert(at(2024, 4, 10, 9, 0, 0), LogPatch::default());
        book.upsert(at(2024, 4, 9, 9, 0, 0), LogPatch::default());

        let dates: Vec<NaiveDate> = book.iter_newest_first().map(|log| log.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
            ]
        );
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut book = LogBook::default();
        book.upsert(at(2024, 4, 8, 9, 0, 0), LogPatch::default());
        book.clear();
        assert!(book.is_empty());
    }

    #[test]
    fn test_duplicate_days_merge_on_load_newest_wins() {
        let now = at(2024, 4, 10, 9, 0, 0);
        let mut newer = MedicationLog::create(now, LogPatch::default());
        newer.medication_taken = true;
        let older = MedicationLog::create(now, LogPatch::default());

        // Persisted order is newest first.
        let book = LogBook::from(vec![newer.clone(), older]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.entry_for(newer.date).unwrap().id, newer.id);
    }

    #[test]
    fn test_seasonal_aggregate_counts_and_percentages() {
        let mut book = LogBook::default();
        book.upsert(at(2024, 4, 8, 9, 0, 0), symptom_patch(SneezingLevel::Mild));
        book.upsert(at(2024, 4, 9, 9, 0, 0), symptom_patch(SneezingLevel::Mild));
        book.upsert(at(2024, 4, 10, 9, 0, 0), symptom_patch(SneezingLevel::Bearable));
        // A medication-only day is excluded from the axis counts.
        book.upsert(at(2024, 4, 11, 9, 0, 0), LogPatch::default());

        let aggregate = book.seasonal_aggregate();
        let spring = aggregate.stats(Season::Spring).unwrap();
        assert_eq!(spring.symptom_total, 3);
        assert_eq!(spring.sneezing.get(0), 2);
        assert_eq!(spring.sneezing.get(1), 1);
        assert_eq!(spring.sneezing.get(2), 0);
        assert_eq!(spring.sneezing.percentages(spring.symptom_total), [67, 33, 0]);
        assert!(aggregate.stats(Season::Summer).is_none());
    }

    #[test]
    fn test_season_timeline_includes_symptomless_entries() {
        let mut book = LogBook::default();
        book.upsert(at(2024, 4, 8, 9, 0, 0), LogPatch::default());
        book.upsert(at(2024, 7, 1, 9, 0, 0), symptom_patch(SneezingLevel::Mild));

        let timeline = book.season_timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].0, Season::Spring);
        assert_eq!(timeline[0].1.len(), 1);
        assert_eq!(timeline[1].0, Season::Summer);
    }

    #[test]
    fn test_percentages_with_zero_total() {
        let counts = LevelCounts::default();
        assert_eq!(counts.percentages(0), [0, 0, 0]);
    }

    #[test]
    fn test_decrement_inventory_is_exact() {
        let mut settings = Settings {
            inventory_count: 0.2,
            ..Settings::default()
        };
        settings.decrement_inventory();
        assert_eq!(settings.inventory_count, 0.0);
    }

    #[test]
    fn test_decrement_inventory_floors_at_zero() {
        let mut settings = Settings {
            inventory_count: 1.0,
            ..Settings::default()
        };
        for _ in 0..30 {
            settings.decrement_inventory();
        }
        assert_eq!(settings.inventory_count, 0.0);
    }

    #[test]
    fn test_decrement_walks_exact_tenths() {
        let mut settings = Settings {
            inventory_count: 1.0,
            ..Settings::default()
        };
        let expected = [0.8, 0.6, 0.4, 0.2, 0.0];
        for want in expected {
            settings.decrement_inventory();
            assert_eq!(settings.inventory_count, want);
        }
    }

    #[test]
    fn test_set_inventory_clamps_to_capacity() {
        let mut settings = Settings {
            total_bottles: 10,
            ..Settings::default()
        };
        settings.set_inventory(12.5);
        assert_eq!(settings.inventory_count, 10.0);
        settings.set_inventory(-3.0);
        assert_eq!(settings.inventory_count, 0.0);
        settings.set_inventory(4.26);
        assert_eq!(settings.inventory_count, 4.3);
    }

    #[test]
    fn test_set_total_bottles_reclamps_inventory() {
        let mut settings = Settings {
            inventory_count: 8.0,
            total_bottles: 10,
            ..Settings::default()
        };
        settings.set_total_bottles(5);
        assert_eq!(settings.total_bottles, 5);
        assert_eq!(settings.inventory_count, 5.0);
    }

    #[test]
    fn test_days_elapsed_counts_started_days() {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(days_elapsed(start, at(2024, 4, 1, 0, 0, 0)), 0);
        assert_eq!(days_elapsed(start, at(2024, 4, 1, 10, 0, 0)), 1);
        assert_eq!(days_elapsed(start, at(2024, 4, 3, 0, 0, 1)), 3);
    }

    #[test]
    fn test_parse_reminder_time() {
        assert!(parse_reminder_time("08:00").is_some());
        assert!(parse_reminder_time("23:59").is_some());
        assert!(parse_reminder_time("24:00").is_none());
        assert!(parse_reminder_time("8am").is_none());
    }

    #[test]
    fn test_log_serializes_with_original_field_names() {
        let now = at(2024, 4, 10, 9, 0, 0);
        let mut book = LogBook::default();
        book.upsert(now, symptom_patch(SneezingLevel::Bearable));

        let json = serde_json::to_value(&book).unwrap();
        let entry = &json.as_array().unwrap()[0];
        assert_eq!(entry["dateString"], "2024-04-10");
        assert_eq!(entry["medicationTaken"], false);
        assert_eq!(entry["season"], "春");
        assert_eq!(entry["symptoms"]["sneezing"], "能忍");
        assert_eq!(entry["exercise"], "未运动");
        assert_eq!(entry["treatments"]["antiHistamine"], false);
    }

    #[test]
    fn test_app_state_fills_missing_fields_from_defaults() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert!(state.logs.is_empty());
        assert_eq!(state.settings.total_bottles, DEFAULT_TOTAL_BOTTLES);
        assert!(!state.is_snoozed);
        assert!(state.snooze_until.is_none());

        let state: AppState =
            serde_json::from_str(r#"{"settings":{"inventoryCount":2.4}}"#).unwrap();
        assert_eq!(state.settings.inventory_count, 2.4);
        assert_eq!(state.settings.reminder_time, DEFAULT_REMINDER_TIME);
    }

    #[test]
    fn test_app_state_round_trips() {
        let mut state = AppState::default();
        state.logs.confirm(at(2024, 4, 10, 9, 0, 0));
        state.is_snoozed = true;
        state.snooze_until = Some(1_712_712_000_000);

        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
