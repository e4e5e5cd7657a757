//! Risk Assessment Engine
//!
//! Ranks habits by how likely they are to be skipped or to break their
//! streak soon, given the subject's current mood and recent activity.
//! Only habits scoring above the alert threshold produce alerts.

use crate::config::RiskConfig;
use crate::model::{Habit, HabitEvent, MoodSnapshot};
use crate::stats;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Streak length treated as fully vulnerable
const STREAK_CEILING: f64 = 30.0;

/// Days in the recent-skips window
const SKIP_WINDOW: f64 = 7.0;

/// Severity band of an alert
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// How soon the subject should act
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    Today,
    ThisWeek,
}

/// Fixed suggestion menu; content for the host to localize, not logic
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    TrySmallerVersion,
    WaitForBetterMood,
    ChangeEnvironment,
    SetReminder,
}

impl Suggestion {
    pub fn menu() -> &'static [Suggestion] {
        &[
            Suggestion::TrySmallerVersion,
            Suggestion::WaitForBetterMood,
            Suggestion::ChangeEnvironment,
            Suggestion::SetReminder,
        ]
    }
}

/// The three weighted risk components, each in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RiskFactors {
    /// 1 − success rate for the current mood (0.8 default when unobserved)
    pub mood_mismatch: f64,
    /// (7 − completions in the last 7 days) / 7
    pub recent_skips: f64,
    /// min(streak / 30, 1); long streaks have more to lose
    pub streak_vulnerability: f64,
}

/// A flag that a habit is likely to be skipped or streak-broken soon
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskAlert {
    pub habit_id: Uuid,
    pub habit_title: String,
    pub risk_level: RiskLevel,
    /// [0, 1]; always above the alert threshold
    pub risk_score: f64,
    pub factors: RiskFactors,
    pub suggestions: Vec<Suggestion>,
    pub urgency: Urgency,
}

/// Ranks habits at risk of abandonment
#[derive(Debug, Clone)]
pub struct RiskAssessmentEngine {
    config: RiskConfig,
}

impl RiskAssessmentEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Assess every habit, returning alerts sorted descending by score
    ///
    /// Habits at or below the alert threshold are silently fine.
    pub fn assess(
        &self,
        habits: &[Habit],
        current_mood: Option<MoodSnapshot>,
        events: &[HabitEvent],
        as_of: NaiveDate,
    ) -> Vec<RiskAlert> {
        let mut alerts: Vec<RiskAlert> = habits
            .iter()
            .filter_map(|habit| self.assess_one(habit, current_mood, events, as_of))
            .collect();

        alerts.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

        tracing::debug!(
            habits = habits.len(),
            alerts = alerts.len(),
            "Assessed habit risks"
        );

        alerts
    }

    fn assess_one(
        &self,
        habit: &Habit,
        current_mood: Option<MoodSnapshot>,
        events: &[HabitEvent],
        as_of: NaiveDate,
    ) -> Option<RiskAlert> {
        let factors = RiskFactors {
            mood_mismatch: self.mood_mismatch(habit, current_mood, events),
            recent_skips: (SKIP_WINDOW - habit.completions_in_last_7_days(as_of) as f64).max(0.0)
                / SKIP_WINDOW,
            streak_vulnerability: (habit.streak as f64 / STREAK_CEILING).min(1.0),
        };

        let risk_score = self.config.mood_mismatch_weight * factors.mood_mismatch
            + self.config.recent_skips_weight * factors.recent_skips
            + self.config.streak_vulnerability_weight * factors.streak_vulnerability;

        if risk_score <= self.config.alert_threshold {
            return None;
        }

        let (risk_level, urgency) = classify(risk_score);

        Some(RiskAlert {
            habit_id: habit.id,
            habit_title: habit.title.clone(),
            risk_level,
            risk_score,
            factors,
            suggestions: Suggestion::menu().to_vec(),
            urgency,
        })
    }

    /// 1 − observed success rate for the current mood. When the mood was
    /// never observed for this habit (or no mood is known at all) the
    /// configured pessimistic default applies.
    fn mood_mismatch(
        &self,
        habit: &Habit,
        current_mood: Option<MoodSnapshot>,
        events: &[HabitEvent],
    ) -> f64 {
        let Some(mood) = current_mood else {
            return self.config.unobserved_mood_mismatch;
        };

        let observed: Vec<&HabitEvent> = events
            .iter()
            .filter(|e| {
                e.habit_id == habit.id && e.pre_mood.map(|m| m.state) == Some(mood.state)
            })
            .collect();

        if observed.is_empty() {
            return self.config.unobserved_mood_mismatch;
        }

        let completed = observed.iter().filter(|e| e.action.is_completed()).count();
        1.0 - stats::safe_rate(completed, observed.len())
    }
}

fn classify(score: f64) -> (RiskLevel, Urgency) {
    if score > 0.8 {
        (RiskLevel::Critical, Urgency::Immediate)
    } else if score > 0.7 {
        (RiskLevel::High, Urgency::Today)
    } else if score > 0.6 {
        (RiskLevel::Medium, Urgency::Today)
    } else {
        (RiskLevel::Low, Urgency::ThisWeek)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HabitAction, MoodState};
    use chrono::NaiveTime;

    fn engine() -> RiskAssessmentEngine {
        RiskAssessmentEngine::new(RiskConfig::default())
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    /// Habit with streak 25 and 2 completions in the trailing week
    fn vulnerable_habit() -> Habit {
        let mut habit = Habit::new("morning pages");
        habit.streak = 25;
        let time = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        habit.record_completion(date(24), time);
        habit.record_completion(date(26), time);
        habit.streak = 25;
        habit
    }

    /// Events giving a 0.1 success rate under the stressed mood
    fn mismatch_events(habit: &Habit) -> Vec<HabitEvent> {
        let mut events = Vec::new();
        events.push(
            HabitEvent::new(habit.id, date(1), HabitAction::Completed)
                .pre_mood(MoodState::Stressed, 8),
        );
        for d in 2..=10 {
            events.push(
                HabitEvent::new(habit.id, date(d), HabitAction::Skipped)
                    .pre_mood(MoodState::Stressed, 8),
            );
        }
        events
    }

    #[test]
    fn test_worked_scenario_is_critical_and_immediate() {
        let habit = vulnerable_habit();
        let events = mismatch_events(&habit);

        let alerts = engine().assess(
            &[habit],
            Some(MoodSnapshot::new(MoodState::Stressed, 8)),
            &events,
            date(28),
        );

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        // 0.4*0.9 + 0.3*(5/7) + 0.3*(25/30) ≈ 0.824
        assert!((alert.risk_score - 0.8243).abs() < 0.001);
        assert_eq!(alert.risk_level, RiskLevel::Critical);
        assert_eq!(alert.urgency, Urgency::Immediate);
        assert!((alert.factors.mood_mismatch - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_safe_habit_emits_no_alert() {
        let mut habit = Habit::new("brush teeth");
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        for d in 10..=16 {
            habit.record_completion(date(d), time);
        }
        habit.streak = 0;

        // Mood observed with perfect success: mismatch 0, skips 0, streak 0
        let events: Vec<HabitEvent> = (10..=16)
            .map(|d| {
                HabitEvent::new(habit.id, date(d), HabitAction::Completed)
                    .pre_mood(MoodState::Calm, 6)
            })
            .collect();

        let alerts = engine().assess(
            &[habit],
            Some(MoodSnapshot::new(MoodState::Calm, 6)),
            &events,
            date(16),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_unobserved_mood_uses_pessimistic_default() {
        let habit = vulnerable_habit();
        // History never saw the energetic mood
        let events = mismatch_events(&habit);

        let alerts = engine().assess(
            &[habit],
            Some(MoodSnapshot::new(MoodState::Energetic, 9)),
            &events,
            date(28),
        );

        assert_eq!(alerts.len(), 1);
        assert!((alerts[0].factors.mood_mismatch - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_alerts_sorted_descending_and_all_above_threshold() {
        let risky = vulnerable_habit();
        let events = mismatch_events(&risky);

        let mut milder = Habit::new("water plants");
        milder.streak = 0;

        let alerts = engine().assess(
            &[milder, risky.clone()],
            Some(MoodSnapshot::new(MoodState::Stressed, 8)),
            &events,
            date(28),
        );

        assert!(!alerts.is_empty());
        assert_eq!(alerts[0].habit_id, risky.id);
        for pair in alerts.windows(2) {
            assert!(pair[0].risk_score >= pair[1].risk_score);
        }
        for alert in &alerts {
            assert!(alert.risk_score > 0.5);
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(classify(0.85), (RiskLevel::Critical, Urgency::Immediate));
        assert_eq!(classify(0.75), (RiskLevel::High, Urgency::Today));
        assert_eq!(classify(0.65), (RiskLevel::Medium, Urgency::Today));
        assert_eq!(classify(0.55), (RiskLevel::Low, Urgency::ThisWeek));
    }

    #[test]
    fn test_alert_serializes() {
        let habit = vulnerable_habit();
        let events = mismatch_events(&habit);
        let alerts = engine().assess(
            &[habit],
            Some(MoodSnapshot::new(MoodState::Stressed, 8)),
            &events,
            date(28),
        );

        let json = serde_json::to_string(&alerts[0]).unwrap();
        assert!(json.contains("\"risk_level\":\"critical\""));
        assert!(json.contains("\"urgency\":\"immediate\""));
        assert!(json.contains("\"try_smaller_version\""));
    }
}
