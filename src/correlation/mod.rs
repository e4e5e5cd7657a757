//! Habit-mood correlation analysis
//!
//! Per-habit reduction of interaction events into success/mood statistics,
//! with an optional time-of-day profile and a ranking-only strength scalar
//! for multi-habit batches.

mod engine;

pub use engine::{
    CorrelationEngine, CorrelationOptions, CorrelationReport, HabitTimeProfile, HourBucket,
    MoodSuccessRate, WeekdayBucket,
};
