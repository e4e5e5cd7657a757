//! Pattern detector facade
//!
//! Runs all temporal analyses over a mood/interaction log and bundles the
//! results. Every analysis is total and degrades to an empty or neutral
//! result on insufficient data.

use crate::model::{HabitEvent, MoodEntry};
use crate::patterns::cycles::{detect_cycles, MoodCycle};
use crate::patterns::rhythm::{daily_rhythm, DailyRhythm};
use crate::patterns::seasonal::{seasonal_pattern, SeasonalPattern};
use crate::patterns::triggers::{trigger_frequency, TriggerFrequency, TriggerScope};
use crate::patterns::weekly::{weekly_pattern, WeeklyPattern};
use serde::Serialize;

/// All temporal analyses for one subject and window
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct PatternBundle {
    pub weekly: WeeklyPattern,
    pub rhythm: DailyRhythm,
    pub cycles: Vec<MoodCycle>,
    pub triggers: Vec<TriggerFrequency>,
    pub environmental_triggers: Vec<TriggerFrequency>,
    pub seasonal: SeasonalPattern,
}

/// Reduces mood/interaction events into temporal patterns
#[derive(Debug, Clone, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Run every analysis and bundle the results
    pub fn detect(&self, mood_entries: &[MoodEntry], events: &[HabitEvent]) -> PatternBundle {
        let bundle = PatternBundle {
            weekly: weekly_pattern(mood_entries),
            rhythm: daily_rhythm(mood_entries),
            cycles: detect_cycles(mood_entries),
            triggers: trigger_frequency(mood_entries, TriggerScope::General),
            environmental_triggers: trigger_frequency(mood_entries, TriggerScope::Environmental),
            seasonal: seasonal_pattern(mood_entries, events),
        };

        tracing::debug!(
            mood_entries = mood_entries.len(),
            events = events.len(),
            cycles = bundle.cycles.len(),
            "Detected patterns"
        );

        bundle
    }
}
