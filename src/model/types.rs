//! Core data types for the Cadence analytics engine
//!
//! This module defines the fundamental types shared by every engine:
//! - `MoodEntry`: one mood check-in for a calendar day
//! - `HabitEvent`: a completed/skipped interaction, optionally carrying mood
//! - `Habit`: the habit roster entry supplied by the host
//! - `Timeframe`: a caller-chosen analysis window, part of the cache key
//! - `DataSnapshot`: the read-only bundle the host hands to the engine

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use uuid::Uuid;

/// Valid intensity range for self-reported moods (inclusive)
pub const INTENSITY_MIN: u8 = 1;
pub const INTENSITY_MAX: u8 = 10;

/// How many recent completion clock-times a habit retains
pub const COMPLETION_TIME_WINDOW: usize = 10;

/// Self-reported emotional state, fixed 7-value vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    Happy,
    Sad,
    Anxious,
    Energetic,
    Tired,
    Stressed,
    Calm,
}

impl MoodState {
    /// Get all mood states for iteration
    pub fn all() -> &'static [MoodState] {
        &[
            MoodState::Happy,
            MoodState::Sad,
            MoodState::Anxious,
            MoodState::Energetic,
            MoodState::Tired,
            MoodState::Stressed,
            MoodState::Calm,
        ]
    }
}

impl std::fmt::Display for MoodState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoodState::Happy => write!(f, "happy"),
            MoodState::Sad => write!(f, "sad"),
            MoodState::Anxious => write!(f, "anxious"),
            MoodState::Energetic => write!(f, "energetic"),
            MoodState::Tired => write!(f, "tired"),
            MoodState::Stressed => write!(f, "stressed"),
            MoodState::Calm => write!(f, "calm"),
        }
    }
}

/// A mood observation: state plus 1-10 intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodSnapshot {
    pub state: MoodState,
    /// Self-reported strength, valid range 1-10
    pub intensity: u8,
}

impl MoodSnapshot {
    pub fn new(state: MoodState, intensity: u8) -> Self {
        Self { state, intensity }
    }

    /// Check the intensity is within the valid 1-10 range
    pub fn is_valid(&self) -> bool {
        (INTENSITY_MIN..=INTENSITY_MAX).contains(&self.intensity)
    }
}

/// A mood observation taken after a habit interaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostMoodSnapshot {
    pub state: MoodState,
    pub intensity: u8,
    /// How long after the interaction the mood was recorded
    pub minutes_after: u32,
}

impl PostMoodSnapshot {
    pub fn new(state: MoodState, intensity: u8, minutes_after: u32) -> Self {
        Self {
            state,
            intensity,
            minutes_after,
        }
    }

    pub fn snapshot(&self) -> MoodSnapshot {
        MoodSnapshot::new(self.state, self.intensity)
    }

    pub fn is_valid(&self) -> bool {
        (INTENSITY_MIN..=INTENSITY_MAX).contains(&self.intensity)
    }
}

/// Trigger tag attached to a mood entry or habit event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Work,
    Sleep,
    Exercise,
    Weather,
    Social,
    Health,
    Family,
    Finance,
    Other(String),
}

impl Trigger {
    /// The environmental subset used for weather/sleep/exercise correlation
    pub fn environmental() -> &'static [Trigger] {
        &[Trigger::Weather, Trigger::Sleep, Trigger::Exercise]
    }

    pub fn is_environmental(&self) -> bool {
        Self::environmental().contains(self)
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Work => write!(f, "work"),
            Trigger::Sleep => write!(f, "sleep"),
            Trigger::Exercise => write!(f, "exercise"),
            Trigger::Weather => write!(f, "weather"),
            Trigger::Social => write!(f, "social"),
            Trigger::Health => write!(f, "health"),
            Trigger::Family => write!(f, "family"),
            Trigger::Finance => write!(f, "finance"),
            Trigger::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// One mood check-in
///
/// The host keeps at most one canonical entry per calendar day; later writes
/// update rather than duplicate. The ingestion boundary enforces this for
/// snapshots that have not been deduplicated yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub id: Uuid,
    /// The calendar day this entry is canonical for
    pub date: NaiveDate,
    pub mood: MoodSnapshot,
    /// When the check-in was actually recorded
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub note: Option<String>,
}

impl MoodEntry {
    /// Create a new entry timestamped now
    pub fn new(date: NaiveDate, state: MoodState, intensity: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            mood: MoodSnapshot::new(state, intensity),
            timestamp: Utc::now(),
            triggers: Vec::new(),
            note: None,
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method: add a trigger tag
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Builder method: attach a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// What happened to a habit on a given interaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitAction {
    Completed,
    Skipped,
}

impl HabitAction {
    pub fn is_completed(&self) -> bool {
        matches!(self, HabitAction::Completed)
    }
}

impl std::fmt::Display for HabitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitAction::Completed => write!(f, "completed"),
            HabitAction::Skipped => write!(f, "skipped"),
        }
    }
}

/// An append-only habit interaction record
///
/// Immutable once created; `habit_id` must reference a habit in the roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitEvent {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub action: HabitAction,
    /// Mood recorded just before the interaction
    #[serde(default)]
    pub pre_mood: Option<MoodSnapshot>,
    /// Mood recorded some minutes after the interaction
    #[serde(default)]
    pub post_mood: Option<PostMoodSnapshot>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub note: Option<String>,
}

impl HabitEvent {
    /// Create a new event timestamped now
    pub fn new(habit_id: Uuid, date: NaiveDate, action: HabitAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            date,
            timestamp: Utc::now(),
            action,
            pre_mood: None,
            post_mood: None,
            triggers: Vec::new(),
            note: None,
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method: attach the pre-interaction mood
    pub fn pre_mood(mut self, state: MoodState, intensity: u8) -> Self {
        self.pre_mood = Some(MoodSnapshot::new(state, intensity));
        self
    }

    /// Builder method: attach the post-interaction mood
    pub fn post_mood(mut self, state: MoodState, intensity: u8, minutes_after: u32) -> Self {
        self.post_mood = Some(PostMoodSnapshot::new(state, intensity, minutes_after));
        self
    }

    /// Builder method: add a trigger tag
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Builder method: attach a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A habit in the host's roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: Uuid,
    pub title: String,
    /// Current consecutive-day completion count, never below 0
    pub streak: u32,
    pub best_streak: u32,
    /// Days on which the habit was completed
    pub completed_dates: BTreeSet<NaiveDate>,
    /// Clock-times of the most recent completions (bounded ring)
    pub completion_times: VecDeque<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            streak: 0,
            best_streak: 0,
            completed_dates: BTreeSet::new(),
            completion_times: VecDeque::with_capacity(COMPLETION_TIME_WINDOW),
            created_at: Utc::now(),
        }
    }

    /// Record a completion: marks the date and pushes the clock-time into
    /// the bounded ring, evicting the oldest when full.
    pub fn record_completion(&mut self, date: NaiveDate, time: NaiveTime) {
        self.completed_dates.insert(date);
        if self.completion_times.len() >= COMPLETION_TIME_WINDOW {
            self.completion_times.pop_front();
        }
        self.completion_times.push_back(time);
        self.streak = self.streak_as_of(date);
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Explicitly remove a completion (the one case where `completed_dates`
    /// shrinks) and recompute the streak.
    pub fn uncomplete(&mut self, date: NaiveDate) {
        self.completed_dates.remove(&date);
        let today = self.completed_dates.iter().next_back().copied();
        self.streak = today.map(|d| self.streak_as_of(d)).unwrap_or(0);
    }

    /// Count consecutive completed days ending at `as_of`
    pub fn streak_as_of(&self, as_of: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut day = as_of;
        while self.completed_dates.contains(&day) {
            streak += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        streak
    }

    /// Completions in the 7 calendar days ending at `as_of` (inclusive)
    pub fn completions_in_last_7_days(&self, as_of: NaiveDate) -> u32 {
        let window_start = as_of - chrono::Duration::days(6);
        self.completed_dates
            .iter()
            .filter(|d| **d >= window_start && **d <= as_of)
            .count() as u32
    }
}

/// Analysis window, part of the cache key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    /// Get all timeframes for iteration
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::Quarter,
            Timeframe::Year,
        ]
    }

    /// Window length in days
    pub fn days(&self) -> i64 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Quarter => 90,
            Timeframe::Year => 365,
        }
    }

    /// Earliest timestamp included in this window, relative to `now`
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - chrono::Duration::days(self.days())
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Week => write!(f, "week"),
            Timeframe::Month => write!(f, "month"),
            Timeframe::Quarter => write!(f, "quarter"),
            Timeframe::Year => write!(f, "year"),
        }
    }
}

/// The read-only input bundle the host supplies per computation
///
/// The engine never mutates any of these collections; it only reads them and
/// produces derived, disposable value objects.
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub habits: Vec<Habit>,
    pub mood_entries: Vec<MoodEntry>,
    pub habit_events: Vec<HabitEvent>,
    /// The subject's mood right now, when known
    pub current_mood: Option<MoodSnapshot>,
}

impl DataSnapshot {
    pub fn new(habits: Vec<Habit>, mood_entries: Vec<MoodEntry>, habit_events: Vec<HabitEvent>) -> Self {
        Self {
            habits,
            mood_entries,
            habit_events,
            current_mood: None,
        }
    }

    /// Builder method: set the current mood
    pub fn current_mood(mut self, state: MoodState, intensity: u8) -> Self {
        self.current_mood = Some(MoodSnapshot::new(state, intensity));
        self
    }

    /// Restrict logs to the given timeframe ending at `now`
    ///
    /// The habit roster is kept whole; only the two event logs are windowed.
    pub fn restrict_to(&self, timeframe: Timeframe, now: DateTime<Utc>) -> Self {
        let cutoff = timeframe.cutoff(now);
        Self {
            habits: self.habits.clone(),
            mood_entries: self
                .mood_entries
                .iter()
                .filter(|e| e.timestamp >= cutoff)
                .cloned()
                .collect(),
            habit_events: self
                .habit_events
                .iter()
                .filter(|e| e.timestamp >= cutoff)
                .cloned()
                .collect(),
            current_mood: self.current_mood,
        }
    }

    /// Events for one habit, in log order
    pub fn events_for(&self, habit_id: Uuid) -> Vec<&HabitEvent> {
        self.habit_events
            .iter()
            .filter(|e| e.habit_id == habit_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mood_snapshot_validation() {
        assert!(MoodSnapshot::new(MoodState::Calm, 1).is_valid());
        assert!(MoodSnapshot::new(MoodState::Calm, 10).is_valid());
        assert!(!MoodSnapshot::new(MoodState::Calm, 0).is_valid());
        assert!(!MoodSnapshot::new(MoodState::Calm, 11).is_valid());
    }

    #[test]
    fn test_mood_state_serialization() {
        let json = serde_json::to_string(&MoodState::Energetic).unwrap();
        assert_eq!(json, "\"energetic\"");
        let restored: MoodState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, MoodState::Energetic);
    }

    #[test]
    fn test_trigger_environmental_subset() {
        assert!(Trigger::Weather.is_environmental());
        assert!(Trigger::Sleep.is_environmental());
        assert!(Trigger::Exercise.is_environmental());
        assert!(!Trigger::Work.is_environmental());
        assert!(!Trigger::Other("caffeine".to_string()).is_environmental());
    }

    #[test]
    fn test_habit_event_builder() {
        let habit_id = Uuid::new_v4();
        let event = HabitEvent::new(habit_id, date(2025, 6, 1), HabitAction::Completed)
            .pre_mood(MoodState::Calm, 7)
            .post_mood(MoodState::Happy, 8, 30)
            .trigger(Trigger::Exercise);

        assert_eq!(event.habit_id, habit_id);
        assert!(event.action.is_completed());
        assert_eq!(event.pre_mood.unwrap().state, MoodState::Calm);
        assert_eq!(event.post_mood.unwrap().minutes_after, 30);
        assert_eq!(event.triggers, vec![Trigger::Exercise]);
    }

    #[test]
    fn test_habit_completion_ring_is_bounded() {
        let mut habit = Habit::new("meditate");
        for day in 1..=15 {
            habit.record_completion(
                date(2025, 6, day),
                NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            );
        }
        assert_eq!(habit.completion_times.len(), COMPLETION_TIME_WINDOW);
        assert_eq!(habit.completed_dates.len(), 15);
    }

    #[test]
    fn test_habit_streak() {
        let mut habit = Habit::new("journal");
        let time = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
        habit.record_completion(date(2025, 6, 1), time);
        habit.record_completion(date(2025, 6, 2), time);
        habit.record_completion(date(2025, 6, 3), time);
        assert_eq!(habit.streak, 3);
        assert_eq!(habit.best_streak, 3);

        // A gap resets the run
        habit.record_completion(date(2025, 6, 5), time);
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.best_streak, 3);

        habit.uncomplete(date(2025, 6, 5));
        assert_eq!(habit.streak, 3);
    }

    #[test]
    fn test_completions_in_last_7_days() {
        let mut habit = Habit::new("run");
        let time = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
        habit.record_completion(date(2025, 6, 1), time);
        habit.record_completion(date(2025, 6, 8), time);
        habit.record_completion(date(2025, 6, 10), time);

        // Window 2025-06-04..=2025-06-10 includes the 8th and 10th only
        assert_eq!(habit.completions_in_last_7_days(date(2025, 6, 10)), 2);
    }

    #[test]
    fn test_timeframe_days() {
        assert_eq!(Timeframe::Week.days(), 7);
        assert_eq!(Timeframe::Month.days(), 30);
        assert_eq!(Timeframe::Quarter.days(), 90);
        assert_eq!(Timeframe::Year.days(), 365);
    }

    #[test]
    fn test_snapshot_restrict_to_windows_logs() {
        let now = Utc::now();
        let habit = Habit::new("read");
        let recent = MoodEntry::new(date(2025, 6, 10), MoodState::Happy, 7)
            .timestamp(now - chrono::Duration::days(2));
        let old = MoodEntry::new(date(2025, 1, 1), MoodState::Sad, 3)
            .timestamp(now - chrono::Duration::days(200));

        let snapshot = DataSnapshot::new(vec![habit], vec![recent, old], vec![]);
        let windowed = snapshot.restrict_to(Timeframe::Week, now);

        assert_eq!(windowed.mood_entries.len(), 1);
        assert_eq!(windowed.mood_entries[0].mood.state, MoodState::Happy);
        // Roster is kept whole
        assert_eq!(windowed.habits.len(), 1);
    }

    #[test]
    fn test_mood_entry_round_trip() {
        let entry = MoodEntry::new(date(2025, 6, 1), MoodState::Anxious, 6)
            .trigger(Trigger::Work)
            .note("deadline day");
        let json = serde_json::to_string(&entry).unwrap();
        let restored: MoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, restored);
    }
}
