//! Weekly mood pattern
//!
//! Average intensity per day-of-week (0 = Sunday), with per-day sample
//! variance so the host can show how settled each day's mood is.

use crate::model::MoodEntry;
use crate::stats;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mood statistics for one day of the week
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekdayMood {
    /// 0 = Sunday .. 6 = Saturday
    pub weekday: u32,
    pub samples: usize,
    pub average_intensity: f64,
    /// Sample variance of intensity within this weekday
    pub variance: f64,
}

/// Average intensity grouped by day-of-week
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct WeeklyPattern {
    pub days: Vec<WeekdayMood>,
}

/// Compute the weekly pattern; empty input yields an empty pattern.
pub fn weekly_pattern(entries: &[MoodEntry]) -> WeeklyPattern {
    let mut buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for entry in entries {
        buckets
            .entry(entry.date.weekday().num_days_from_sunday())
            .or_default()
            .push(entry.mood.intensity as f64);
    }

    let days = buckets
        .into_iter()
        .map(|(weekday, intensities)| WeekdayMood {
            weekday,
            samples: intensities.len(),
            average_intensity: stats::mean(&intensities),
            variance: stats::sample_variance(&intensities),
        })
        .collect();

    WeeklyPattern { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoodState;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32, intensity: u8) -> MoodEntry {
        MoodEntry::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            MoodState::Happy,
            intensity,
        )
    }

    #[test]
    fn test_empty_log_yields_empty_pattern() {
        assert!(weekly_pattern(&[]).days.is_empty());
    }

    #[test]
    fn test_sunday_is_day_zero() {
        // 2025-06-01 is a Sunday
        let entries = vec![entry(2025, 6, 1, 6)];
        let pattern = weekly_pattern(&entries);
        assert_eq!(pattern.days.len(), 1);
        assert_eq!(pattern.days[0].weekday, 0);
    }

    #[test]
    fn test_average_and_variance_per_day() {
        // Two Mondays (2025-06-02 and 2025-06-09)
        let entries = vec![entry(2025, 6, 2, 4), entry(2025, 6, 9, 8)];
        let pattern = weekly_pattern(&entries);

        let monday = pattern.days.iter().find(|d| d.weekday == 1).unwrap();
        assert_eq!(monday.samples, 2);
        assert_eq!(monday.average_intensity, 6.0);
        // Sample variance of {4, 8} is 8
        assert_eq!(monday.variance, 8.0);
    }
}
