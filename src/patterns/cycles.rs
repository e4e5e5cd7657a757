//! Mood cycle detection
//!
//! Sliding 7-day windows (step 1) over the date-sorted mood log. Each window
//! reports its average mood and an endpoint trend. Fewer than 7 entries
//! yield no windows at all.

use crate::model::MoodEntry;
use crate::patterns::rhythm::Trend;
use crate::stats;
use chrono::NaiveDate;
use serde::Serialize;

/// Window length in entries
pub const CYCLE_WINDOW: usize = 7;

/// One detected 7-day mood window
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodCycle {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average_mood: f64,
    /// Day-7 vs day-1 intensity comparison
    pub trend: Trend,
}

/// Detect mood cycles; N entries yield N − 6 windows, fewer than 7 yield none.
pub fn detect_cycles(entries: &[MoodEntry]) -> Vec<MoodCycle> {
    if entries.len() < CYCLE_WINDOW {
        return Vec::new();
    }

    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    sorted
        .windows(CYCLE_WINDOW)
        .map(|window| {
            let intensities: Vec<f64> = window.iter().map(|e| e.mood.intensity as f64).collect();
            MoodCycle {
                start_date: window[0].date,
                end_date: window[CYCLE_WINDOW - 1].date,
                average_mood: stats::mean(&intensities),
                trend: Trend::from_endpoints(intensities[0], intensities[CYCLE_WINDOW - 1]),
            }
        })
        .collect()
}
