//! Predictive Scoring Engine
//!
//! Answers "should I attempt this habit now?" by blending the habit's
//! mood-conditioned history with live context into a weighted success
//! probability, a confidence figure, and structured reason codes. The host
//! composes any user-facing text from the codes; no copy is produced here.

use crate::config::ScoringConfig;
use crate::model::{Habit, HabitEvent, MoodSnapshot};
use crate::stats;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Streak length treated as full momentum
const STREAK_CEILING: f64 = 30.0;

/// Sample count treated as full data-volume confidence
const CONFIDENCE_CEILING: f64 = 50.0;

/// How many most-recent events feed the recent-pattern factor
const RECENT_WINDOW: usize = 7;

/// Component considered strong/weak for reason-code purposes
const STRONG_COMPONENT: f64 = 0.7;
const WEAK_COMPONENT: f64 = 0.3;

/// What the caller should do with the habit right now
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Proceed,
    Wait,
    ModifyApproach,
}

/// Structured explanation codes; the host localizes and renders them
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    InsufficientData,
    StrongMoodAlignment,
    WeakMoodAlignment,
    OptimalTimeOfDay,
    SuboptimalTimeOfDay,
    StrongRecentPattern,
    WeakRecentPattern,
    StrongStreakMomentum,
    WeakStreakMomentum,
    FavorableDayOfWeek,
    UnfavorableDayOfWeek,
    MixedSignals,
}

/// The five component scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct FactorBreakdown {
    pub mood_alignment: f64,
    pub time_optimality: f64,
    pub recent_pattern: f64,
    pub streak_momentum: f64,
    pub contextual: f64,
}

impl FactorBreakdown {
    fn as_array(&self) -> [f64; 5] {
        [
            self.mood_alignment,
            self.time_optimality,
            self.recent_pattern,
            self.streak_momentum,
            self.contextual,
        ]
    }
}

/// Live context for a prediction
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ContextualFactors {
    /// 0-23
    pub hour_of_day: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
}

impl ContextualFactors {
    pub fn new(hour_of_day: u32, day_of_week: u32) -> Self {
        Self {
            hour_of_day,
            day_of_week,
        }
    }

    /// Derive the context from a wall-clock instant
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            hour_of_day: at.hour(),
            day_of_week: at.date_naive().weekday().num_days_from_sunday(),
        }
    }
}

/// A point-in-time probability estimate for one habit
///
/// Stateless value object; no identity or lifecycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuccessPrediction {
    pub habit_id: Uuid,
    pub mood_context: MoodSnapshot,
    /// [0, 1]
    pub predicted_success_rate: f64,
    /// [0, 1]; from sample size and factor agreement
    pub confidence: f64,
    pub factors: FactorBreakdown,
    pub recommendation: Recommendation,
    pub reasoning: Vec<ReasonCode>,
}

/// Scores "attempt now?" for a single habit
#[derive(Debug, Clone)]
pub struct PredictiveScoringEngine {
    config: ScoringConfig,
}

impl PredictiveScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Predict success for attempting `habit` right now
    ///
    /// Below `min_sample` historical events this returns the fixed
    /// low-confidence cold-start result instead of the threshold mapping.
    pub fn predict(
        &self,
        habit: &Habit,
        current_mood: MoodSnapshot,
        context: ContextualFactors,
        events: &[HabitEvent],
    ) -> SuccessPrediction {
        let own: Vec<&HabitEvent> = events.iter().filter(|e| e.habit_id == habit.id).collect();

        if own.len() < self.config.min_sample {
            return SuccessPrediction {
                habit_id: habit.id,
                mood_context: current_mood,
                predicted_success_rate: 0.5,
                confidence: 0.3,
                factors: FactorBreakdown::default(),
                recommendation: Recommendation::Proceed,
                reasoning: vec![ReasonCode::InsufficientData],
            };
        }

        let factors = self.component_scores(habit, current_mood, context, &own);
        let predicted_success_rate = self.combine(&factors);
        let confidence = self.confidence(own.len(), &factors);
        let recommendation = self.recommend(predicted_success_rate);
        let reasoning = reason_codes(&factors);

        tracing::debug!(
            habit = %habit.title,
            rate = predicted_success_rate,
            confidence,
            ?recommendation,
            "Predicted habit success"
        );

        SuccessPrediction {
            habit_id: habit.id,
            mood_context: current_mood,
            predicted_success_rate,
            confidence,
            factors,
            recommendation,
            reasoning,
        }
    }

    fn component_scores(
        &self,
        habit: &Habit,
        current_mood: MoodSnapshot,
        context: ContextualFactors,
        own: &[&HabitEvent],
    ) -> FactorBreakdown {
        let successes: Vec<&&HabitEvent> =
            own.iter().filter(|e| e.action.is_completed()).collect();

        // Mood alignment: fraction of successes sharing the current mood
        // state, averaged with their intensity closeness to now.
        let matching: Vec<&&&HabitEvent> = successes
            .iter()
            .filter(|e| e.pre_mood.map(|m| m.state) == Some(current_mood.state))
            .collect();
        let base_fraction = stats::safe_rate(matching.len(), successes.len());
        let closeness: Vec<f64> = matching
            .iter()
            .filter_map(|e| e.pre_mood)
            .map(|m| 1.0 - (m.intensity as f64 - current_mood.intensity as f64).abs() / 10.0)
            .collect();
        let mood_alignment = (base_fraction + stats::mean(&closeness)) / 2.0;

        // Time optimality: how close past successes sit to the current hour
        let hour_scores: Vec<f64> = successes
            .iter()
            .map(|e| {
                let delta = (e.timestamp.hour() as f64 - context.hour_of_day as f64).abs();
                (1.0 - delta / 12.0).max(0.0)
            })
            .collect();
        let time_optimality = stats::mean(&hour_scores);

        // Recent pattern: completion rate over the last RECENT_WINDOW events
        // (event count, not calendar days).
        let mut by_time: Vec<&&HabitEvent> = own.iter().collect();
        by_time.sort_by_key(|e| e.timestamp);
        let recent: Vec<&&&HabitEvent> =
            by_time.iter().rev().take(RECENT_WINDOW).collect();
        let recent_completed = recent.iter().filter(|e| e.action.is_completed()).count();
        let recent_pattern = stats::safe_rate(recent_completed, recent.len());

        let streak_momentum = (habit.streak as f64 / STREAK_CEILING).min(1.0);

        // Contextual: completion rate on this day of the week
        let same_day: Vec<&&HabitEvent> = own
            .iter()
            .filter(|e| e.date.weekday().num_days_from_sunday() == context.day_of_week)
            .collect();
        let same_day_completed = same_day.iter().filter(|e| e.action.is_completed()).count();
        let contextual = stats::safe_rate(same_day_completed, same_day.len());

        FactorBreakdown {
            mood_alignment,
            time_optimality,
            recent_pattern,
            streak_momentum,
            contextual,
        }
    }

    fn combine(&self, factors: &FactorBreakdown) -> f64 {
        let w = &self.config.weights;
        let total = w.total();
        if total == 0.0 {
            return 0.0;
        }
        let sum = w.mood_alignment * factors.mood_alignment
            + w.time_optimality * factors.time_optimality
            + w.recent_pattern * factors.recent_pattern
            + w.streak_momentum * factors.streak_momentum
            + w.contextual * factors.contextual;
        (sum / total).clamp(0.0, 1.0)
    }

    fn confidence(&self, sample_count: usize, factors: &FactorBreakdown) -> f64 {
        let data_volume = (sample_count as f64 / CONFIDENCE_CEILING).min(1.0);
        let variance_confidence = 1.0 - stats::stddev(&factors.as_array());
        ((data_volume + variance_confidence) / 2.0).clamp(0.0, 1.0)
    }

    fn recommend(&self, rate: f64) -> Recommendation {
        if rate >= self.config.proceed_threshold {
            Recommendation::Proceed
        } else if rate < self.config.wait_threshold {
            Recommendation::Wait
        } else {
            Recommendation::ModifyApproach
        }
    }
}

fn reason_codes(factors: &FactorBreakdown) -> Vec<ReasonCode> {
    use ReasonCode::*;

    let components = [
        (factors.mood_alignment, StrongMoodAlignment, WeakMoodAlignment),
        (factors.time_optimality, OptimalTimeOfDay, SuboptimalTimeOfDay),
        (factors.recent_pattern, StrongRecentPattern, WeakRecentPattern),
        (factors.streak_momentum, StrongStreakMomentum, WeakStreakMomentum),
        (factors.contextual, FavorableDayOfWeek, UnfavorableDayOfWeek),
    ];

    let mut codes = Vec::new();
    for (score, strong, weak) in components {
        if score >= STRONG_COMPONENT {
            codes.push(strong);
        } else if score <= WEAK_COMPONENT {
            codes.push(weak);
        }
    }
    if codes.is_empty() {
        codes.push(MixedSignals);
    }
    codes
}
