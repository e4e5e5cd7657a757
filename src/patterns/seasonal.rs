//! Cyclical/seasonal pattern analysis
//!
//! Monthly buckets of habit completion rate and mood, with a confidence
//! figure derived from how much the months disagree: higher dispersion
//! across months means lower confidence, capped at 0.9.

use crate::model::{HabitEvent, MoodEntry};
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Confidence never exceeds this, even on perfectly uniform months
const MAX_CONFIDENCE: f64 = 0.9;

/// One calendar month of aggregated activity
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    /// 1 = January
    pub month: u32,
    pub interactions: usize,
    pub completion_rate: f64,
    pub mood_samples: usize,
    pub average_mood: f64,
}

/// Monthly view of completions and mood
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct SeasonalPattern {
    pub months: Vec<MonthBucket>,
    /// [0, 0.9]; low when months disperse widely
    pub confidence: f64,
}

/// Compute the seasonal pattern; empty input yields an empty pattern with
/// zero confidence.
pub fn seasonal_pattern(mood_entries: &[MoodEntry], events: &[HabitEvent]) -> SeasonalPattern {
    use chrono::Datelike;

    let mut event_buckets: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for event in events {
        let key = (event.date.year(), event.date.month());
        let entry = event_buckets.entry(key).or_insert((0, 0));
        entry.0 += 1;
        if event.action.is_completed() {
            entry.1 += 1;
        }
    }

    let mut mood_buckets: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for entry in mood_entries {
        mood_buckets
            .entry((entry.date.year(), entry.date.month()))
            .or_default()
            .push(entry.mood.intensity as f64);
    }

    let mut keys: Vec<(i32, u32)> = event_buckets
        .keys()
        .chain(mood_buckets.keys())
        .copied()
        .collect();
    keys.sort();
    keys.dedup();

    let months: Vec<MonthBucket> = keys
        .into_iter()
        .map(|key| {
            let (total, completed) = event_buckets.get(&key).copied().unwrap_or((0, 0));
            let moods = mood_buckets.get(&key).map(Vec::as_slice).unwrap_or(&[]);
            MonthBucket {
                year: key.0,
                month: key.1,
                interactions: total,
                completion_rate: stats::safe_rate(completed, total),
                mood_samples: moods.len(),
                average_mood: stats::mean(moods),
            }
        })
        .collect();

    let confidence = if months.is_empty() {
        0.0
    } else {
        let rates: Vec<f64> = months.iter().map(|m| m.completion_rate).collect();
        let dispersion = stats::coefficient_of_variation(&rates);
        (1.0 - dispersion).clamp(0.0, MAX_CONFIDENCE)
    };

    SeasonalPattern { months, confidence }
}
