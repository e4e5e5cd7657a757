//! Trigger frequency analysis
//!
//! Counts and average intensity per trigger tag. Environmental scope
//! restricts the vocabulary to weather/sleep/exercise for environmental
//! correlation; general scope counts everything.

use crate::model::{MoodEntry, Trigger};
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which trigger vocabulary to count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerScope {
    /// All trigger tags, including free-form `Other` tags
    #[default]
    General,
    /// Only the weather/sleep/exercise vocabulary
    Environmental,
}

/// Occurrence statistics for one trigger tag
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TriggerFrequency {
    pub trigger: Trigger,
    pub count: usize,
    pub average_intensity: f64,
}

/// Count trigger occurrences across the mood log, most frequent first.
pub fn trigger_frequency(entries: &[MoodEntry], scope: TriggerScope) -> Vec<TriggerFrequency> {
    let mut buckets: BTreeMap<Trigger, Vec<f64>> = BTreeMap::new();
    for entry in entries {
        for trigger in &entry.triggers {
            if scope == TriggerScope::Environmental && !trigger.is_environmental() {
                continue;
            }
            buckets
                .entry(trigger.clone())
                .or_default()
                .push(entry.mood.intensity as f64);
        }
    }

    let mut frequencies: Vec<TriggerFrequency> = buckets
        .into_iter()
        .map(|(trigger, intensities)| TriggerFrequency {
            trigger,
            count: intensities.len(),
            average_intensity: stats::mean(&intensities),
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoodState;
    use chrono::NaiveDate;

    fn entry(day: u32, intensity: u8, triggers: Vec<Trigger>) -> MoodEntry {
        let mut e = MoodEntry::new(
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            MoodState::Anxious,
            intensity,
        );
        for t in triggers {
            e = e.trigger(t);
        }
        e
    }

    #[test]
    fn test_empty_log_yields_no_frequencies() {
        assert!(trigger_frequency(&[], TriggerScope::General).is_empty());
    }

    #[test]
    fn test_general_scope_counts_everything() {
        let entries = vec![
            entry(1, 4, vec![Trigger::Work, Trigger::Sleep]),
            entry(2, 8, vec![Trigger::Work]),
            entry(3, 6, vec![Trigger::Other("caffeine".to_string())]),
        ];
        let freqs = trigger_frequency(&entries, TriggerScope::General);

        assert_eq!(freqs.len(), 3);
        // Sorted by count: work first
        assert_eq!(freqs[0].trigger, Trigger::Work);
        assert_eq!(freqs[0].count, 2);
        assert_eq!(freqs[0].average_intensity, 6.0);
    }

    #[test]
    fn test_environmental_scope_restricts_vocabulary() {
        let entries = vec![
            entry(1, 4, vec![Trigger::Work, Trigger::Weather]),
            entry(2, 8, vec![Trigger::Exercise, Trigger::Other("noise".to_string())]),
        ];
        let freqs = trigger_frequency(&entries, TriggerScope::Environmental);

        let tags: Vec<&Trigger> = freqs.iter().map(|f| &f.trigger).collect();
        assert!(tags.contains(&&Trigger::Weather));
        assert!(tags.contains(&&Trigger::Exercise));
        assert_eq!(freqs.len(), 2);
    }
}
