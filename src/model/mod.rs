//! Domain model
//!
//! Types supplied by the host (mood check-ins, habit events, the habit
//! roster) and the ingestion boundary that normalizes them before any engine
//! sees them.

mod ingest;
mod types;

pub use ingest::{sanitize_events, sanitize_mood_entries, IngestStats};
pub use types::{
    DataSnapshot, Habit, HabitAction, HabitEvent, MoodEntry, MoodSnapshot, MoodState,
    PostMoodSnapshot, Timeframe, Trigger, COMPLETION_TIME_WINDOW, INTENSITY_MAX, INTENSITY_MIN,
};
