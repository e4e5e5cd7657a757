//! Correlation Engine
//!
//! Reduces habit interaction events into per-habit mood/success statistics.
//! Reports are only produced once a habit has enough history; under-sampled
//! habits are excluded from reporting, which is not an error.

use crate::config::CorrelationConfig;
use crate::model::{Habit, HabitEvent, MoodState};
use crate::stats;
use chrono::{Datelike, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Cold-start defaults when no mood group exists. These are placeholders,
/// not computed values; callers must not treat them as evidence.
const DEFAULT_BEST_MOOD: MoodState = MoodState::Calm;
const DEFAULT_WORST_MOOD: MoodState = MoodState::Stressed;

/// Weights for the ranking-only strength scalar (mood, hour, weekday)
const STRENGTH_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Per-mood success statistics within one habit's history
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodSuccessRate {
    pub mood: MoodState,
    pub total: usize,
    pub completed: usize,
    /// completed / total for this mood group
    pub success_rate: f64,
}

/// Completion rate within one hour-of-day bucket
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourBucket {
    pub hour: u32,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

/// Completion rate within one day-of-week bucket (0 = Sunday)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeekdayBucket {
    pub weekday: u32,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

/// Optional time-of-day / day-of-week sub-analysis, attached on request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HabitTimeProfile {
    pub hourly: Vec<HourBucket>,
    pub weekdays: Vec<WeekdayBucket>,
}

/// Per-habit summary of how mood relates to completion success
///
/// Derived and disposable; never persisted by the engine.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorrelationReport {
    pub habit_id: Uuid,
    pub habit_title: String,
    pub total_entries: usize,
    pub completion_rate: f64,
    pub avg_pre_mood_intensity: f64,
    pub avg_post_mood_intensity: f64,
    /// avg(post) − avg(pre) over events carrying both moods; 0 when none do
    pub mood_improvement: f64,
    /// Mood groups with success rate above the success threshold
    pub successful_moods: Vec<MoodSuccessRate>,
    /// Mood groups with success rate below the failure threshold
    pub failed_moods: Vec<MoodSuccessRate>,
    pub best_mood_for_success: MoodState,
    pub worst_mood_for_success: MoodState,
    /// Pearson coefficient between pre-mood intensity and completion
    /// (completion coded 0/1) over events carrying a pre-mood
    pub intensity_correlation: f64,
    /// Ranking-only scalar combining mood/time/day signal spreads.
    /// Not a probability; never surface it as one.
    pub correlation_strength: f64,
    /// Attached only when requested, to bound cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_profile: Option<HabitTimeProfile>,
}

/// Options for a correlation run
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationOptions {
    /// Attach hour-of-day and day-of-week sub-analyses to each report
    pub include_time_profile: bool,
}

/// Reduces interaction events into per-habit success/mood statistics
#[derive(Debug, Clone)]
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl CorrelationEngine {
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Compute the correlation report for one habit
    ///
    /// Returns `None` when the habit has fewer than `min_sample` events.
    pub fn compute_correlation(
        &self,
        habit: &Habit,
        events: &[HabitEvent],
        options: CorrelationOptions,
    ) -> Option<CorrelationReport> {
        let own: Vec<&HabitEvent> = events.iter().filter(|e| e.habit_id == habit.id).collect();
        if own.len() < self.config.min_sample {
            return None;
        }

        let total = own.len();
        let completed = own.iter().filter(|e| e.action.is_completed()).count();
        let completion_rate = stats::safe_rate(completed, total);

        // Group by pre-mood state; events without a pre-mood still count
        // toward the totals above but not toward mood grouping.
        let mut groups: BTreeMap<MoodState, (usize, usize)> = BTreeMap::new();
        for event in &own {
            if let Some(pre) = event.pre_mood {
                let entry = groups.entry(pre.state).or_insert((0, 0));
                entry.0 += 1;
                if event.action.is_completed() {
                    entry.1 += 1;
                }
            }
        }

        let rates: Vec<MoodSuccessRate> = groups
            .iter()
            .map(|(mood, (n, ok))| MoodSuccessRate {
                mood: *mood,
                total: *n,
                completed: *ok,
                success_rate: stats::safe_rate(*ok, *n),
            })
            .collect();

        let successful_moods: Vec<MoodSuccessRate> = rates
            .iter()
            .filter(|r| r.success_rate > self.config.success_threshold)
            .cloned()
            .collect();
        let failed_moods: Vec<MoodSuccessRate> = rates
            .iter()
            .filter(|r| r.success_rate < self.config.failure_threshold)
            .cloned()
            .collect();

        let best_mood_for_success = rates
            .iter()
            .max_by(|a, b| a.success_rate.total_cmp(&b.success_rate))
            .map(|r| r.mood)
            .unwrap_or(DEFAULT_BEST_MOOD);
        let worst_mood_for_success = rates
            .iter()
            .min_by(|a, b| a.success_rate.total_cmp(&b.success_rate))
            .map(|r| r.mood)
            .unwrap_or(DEFAULT_WORST_MOOD);

        let pre_intensities: Vec<f64> = own
            .iter()
            .filter_map(|e| e.pre_mood.map(|m| m.intensity as f64))
            .collect();
        let post_intensities: Vec<f64> = own
            .iter()
            .filter_map(|e| e.post_mood.map(|m| m.intensity as f64))
            .collect();

        // Improvement is measured only over events carrying both moods, so
        // the two averages come from the same interactions.
        let paired: Vec<(f64, f64)> = own
            .iter()
            .filter_map(|e| match (e.pre_mood, e.post_mood) {
                (Some(pre), Some(post)) => Some((pre.intensity as f64, post.intensity as f64)),
                _ => None,
            })
            .collect();
        let mood_improvement = if paired.is_empty() {
            0.0
        } else {
            let pre: Vec<f64> = paired.iter().map(|(p, _)| *p).collect();
            let post: Vec<f64> = paired.iter().map(|(_, q)| *q).collect();
            stats::mean(&post) - stats::mean(&pre)
        };

        let with_pre: Vec<(f64, f64)> = own
            .iter()
            .filter_map(|e| {
                e.pre_mood.map(|m| {
                    (
                        m.intensity as f64,
                        if e.action.is_completed() { 1.0 } else { 0.0 },
                    )
                })
            })
            .collect();
        let intensities: Vec<f64> = with_pre.iter().map(|(i, _)| *i).collect();
        let outcomes: Vec<f64> = with_pre.iter().map(|(_, o)| *o).collect();
        let intensity_correlation = stats::pearson_correlation(&intensities, &outcomes);

        let hourly = hour_buckets(&own);
        let weekdays = weekday_buckets(&own);
        let correlation_strength = strength_scalar(&rates, &hourly, &weekdays);

        let time_profile = options
            .include_time_profile
            .then(|| HabitTimeProfile { hourly, weekdays });

        Some(CorrelationReport {
            habit_id: habit.id,
            habit_title: habit.title.clone(),
            total_entries: total,
            completion_rate,
            avg_pre_mood_intensity: stats::mean(&pre_intensities),
            avg_post_mood_intensity: stats::mean(&post_intensities),
            mood_improvement,
            successful_moods,
            failed_moods,
            best_mood_for_success,
            worst_mood_for_success,
            intensity_correlation,
            correlation_strength,
            time_profile,
        })
    }

    /// Compute reports for a whole roster, ranked strongest-signal first
    ///
    /// Under-sampled habits are excluded.
    pub fn compute_reports(
        &self,
        habits: &[Habit],
        events: &[HabitEvent],
        options: CorrelationOptions,
    ) -> Vec<CorrelationReport> {
        let mut reports: Vec<CorrelationReport> = habits
            .iter()
            .filter_map(|h| self.compute_correlation(h, events, options))
            .collect();

        reports.sort_by(|a, b| {
            b.correlation_strength
                .abs()
                .total_cmp(&a.correlation_strength.abs())
        });

        tracing::debug!(
            habits = habits.len(),
            reported = reports.len(),
            "Computed correlation reports"
        );

        reports
    }
}

fn hour_buckets(events: &[&HabitEvent]) -> Vec<HourBucket> {
    let mut buckets: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for event in events {
        let entry = buckets.entry(event.timestamp.hour()).or_insert((0, 0));
        entry.0 += 1;
        if event.action.is_completed() {
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(hour, (n, ok))| HourBucket {
            hour,
            total: n,
            completed: ok,
            completion_rate: stats::safe_rate(ok, n),
        })
        .collect()
}

fn weekday_buckets(events: &[&HabitEvent]) -> Vec<WeekdayBucket> {
    let mut buckets: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for event in events {
        // num_days_from_sunday gives 0 = Sunday
        let day = event.date.weekday().num_days_from_sunday();
        let entry = buckets.entry(day).or_insert((0, 0));
        entry.0 += 1;
        if event.action.is_completed() {
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(weekday, (n, ok))| WeekdayBucket {
            weekday,
            total: n,
            completed: ok,
            completion_rate: stats::safe_rate(ok, n),
        })
        .collect()
}

/// Weighted max of the mood/hour/weekday success-rate spreads.
///
/// Each spread is max-minus-min completion rate across populated buckets;
/// a wide spread means that dimension discriminates success well.
fn strength_scalar(
    moods: &[MoodSuccessRate],
    hours: &[HourBucket],
    weekdays: &[WeekdayBucket],
) -> f64 {
    let mood_spread = spread(moods.iter().map(|r| r.success_rate));
    let hour_spread = spread(hours.iter().map(|b| b.completion_rate));
    let weekday_spread = spread(weekdays.iter().map(|b| b.completion_rate));

    let [wm, wh, wd] = STRENGTH_WEIGHTS;
    (wm * mood_spread).max(wh * hour_spread).max(wd * weekday_spread)
}

fn spread(rates: impl Iterator<Item = f64>) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for r in rates {
        any = true;
        min = min.min(r);
        max = max.max(r);
    }
    if any {
        max - min
    } else {
        0.0
    }
}
