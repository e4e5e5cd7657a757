//! Daily rhythm analysis
//!
//! Average mood intensity grouped by hour-of-day, each bucket labelled with
//! a trend derived from an endpoint comparison.

use crate::model::MoodEntry;
use crate::stats;
use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Direction label for a bucketed series
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Label from a first-vs-last comparison.
    ///
    /// This is an endpoint comparison, not a regression; it is cheap and
    /// noisy on small buckets. Known limitation.
    pub fn from_endpoints(first: f64, last: f64) -> Self {
        if last > first {
            Trend::Improving
        } else if last < first {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Mood statistics for one hour-of-day bucket
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourMood {
    pub hour: u32,
    pub samples: usize,
    pub average_intensity: f64,
    pub trend: Trend,
}

/// Average intensity per hour-of-day across the whole log
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct DailyRhythm {
    pub hours: Vec<HourMood>,
}

/// Compute the daily rhythm; empty input yields an empty rhythm.
pub fn daily_rhythm(entries: &[MoodEntry]) -> DailyRhythm {
    let mut buckets: BTreeMap<u32, Vec<&MoodEntry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.timestamp.hour()).or_default().push(entry);
    }

    let hours = buckets
        .into_iter()
        .map(|(hour, mut bucket)| {
            bucket.sort_by_key(|e| e.timestamp);
            let intensities: Vec<f64> = bucket.iter().map(|e| e.mood.intensity as f64).collect();
            let first = intensities.first().copied().unwrap_or(0.0);
            let last = intensities.last().copied().unwrap_or(0.0);
            HourMood {
                hour,
                samples: bucket.len(),
                average_intensity: stats::mean(&intensities),
                trend: Trend::from_endpoints(first, last),
            }
        })
        .collect();

    DailyRhythm { hours }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoodState;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn entry(day: u32, hour: u32, intensity: u8) -> MoodEntry {
        MoodEntry::new(
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            MoodState::Calm,
            intensity,
        )
        .timestamp(Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_log_yields_empty_rhythm() {
        assert!(daily_rhythm(&[]).hours.is_empty());
    }

    #[test]
    fn test_hour_bucketing_and_average() {
        let entries = vec![entry(1, 9, 4), entry(2, 9, 8), entry(1, 21, 6)];
        let rhythm = daily_rhythm(&entries);

        assert_eq!(rhythm.hours.len(), 2);
        let nine = rhythm.hours.iter().find(|h| h.hour == 9).unwrap();
        assert_eq!(nine.samples, 2);
        assert_eq!(nine.average_intensity, 6.0);
    }

    #[test]
    fn test_trend_is_endpoint_comparison() {
        // 4 then 8 within the same hour: improving regardless of the middle
        let entries = vec![entry(1, 9, 4), entry(2, 9, 2), entry(3, 9, 8)];
        let rhythm = daily_rhythm(&entries);
        assert_eq!(rhythm.hours[0].trend, Trend::Improving);

        let entries = vec![entry(1, 9, 7), entry(2, 9, 3)];
        assert_eq!(daily_rhythm(&entries).hours[0].trend, Trend::Declining);

        let entries = vec![entry(1, 9, 5)];
        assert_eq!(daily_rhythm(&entries).hours[0].trend, Trend::Stable);
    }
}
