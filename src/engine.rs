//! Analytics engine facade
//!
//! The single object a host constructs and keeps. It owns its cache and the
//! four computation engines, and exposes the library's boundary operations.
//! Every operation is total: with no data it returns empty reports, neutral
//! predictions, and no alerts, never an error.
//!
//! Engines are injected with their configuration at construction; there are
//! no process-wide singletons, so isolated instances behave independently
//! (including in tests).

use crate::cache::{AnalyticsBundle, AnalyticsCache, CacheKey};
use crate::config::AnalyticsConfig;
use crate::correlation::{CorrelationEngine, CorrelationOptions, CorrelationReport};
use crate::model::{
    sanitize_events, sanitize_mood_entries, DataSnapshot, MoodSnapshot, Timeframe,
};
use crate::patterns::{PatternBundle, PatternDetector};
use crate::predict::{
    ContextualFactors, PredictiveScoringEngine, ReasonCode, Recommendation, RiskAlert,
    RiskAssessmentEngine, SuccessPrediction,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Habit-mood analytics over host-supplied event logs
pub struct AnalyticsEngine {
    correlation: CorrelationEngine,
    patterns: PatternDetector,
    scoring: PredictiveScoringEngine,
    risk: RiskAssessmentEngine,
    cache: AnalyticsCache,
}

impl AnalyticsEngine {
    /// Create an engine from explicit configuration
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            correlation: CorrelationEngine::new(config.correlation.clone()),
            patterns: PatternDetector::new(),
            scoring: PredictiveScoringEngine::new(config.scoring.clone()),
            risk: RiskAssessmentEngine::new(config.risk.clone()),
            cache: AnalyticsCache::new(config.cache.ttl_secs),
        }
    }

    /// Create an engine with default configuration
    pub fn with_defaults() -> Self {
        Self::new(AnalyticsConfig::default())
    }

    /// Ranked correlation reports for the snapshot's roster
    ///
    /// Under-sampled habits are excluded; an empty snapshot yields an empty
    /// list.
    pub fn compute_correlation_reports(
        &self,
        snapshot: &DataSnapshot,
        options: CorrelationOptions,
    ) -> Vec<CorrelationReport> {
        let (events, _) = sanitize_events(snapshot.habit_events.clone());
        self.correlation
            .compute_reports(&snapshot.habits, &events, options)
    }

    /// Predict success for attempting one habit right now
    ///
    /// An unknown habit id behaves like a habit with no history: the fixed
    /// cold-start prediction comes back rather than an error.
    pub fn predict_success(
        &self,
        habit_id: Uuid,
        current_mood: MoodSnapshot,
        context: ContextualFactors,
        snapshot: &DataSnapshot,
    ) -> SuccessPrediction {
        let Some(habit) = snapshot.habits.iter().find(|h| h.id == habit_id) else {
            tracing::debug!(%habit_id, "Prediction requested for unknown habit");
            return SuccessPrediction {
                habit_id,
                mood_context: current_mood,
                predicted_success_rate: 0.5,
                confidence: 0.3,
                factors: Default::default(),
                recommendation: Recommendation::Proceed,
                reasoning: vec![ReasonCode::InsufficientData],
            };
        };

        let (events, _) = sanitize_events(snapshot.habit_events.clone());
        self.scoring.predict(habit, current_mood, context, &events)
    }

    /// Risk alerts for the snapshot's roster, highest risk first
    pub fn assess_risks(&self, snapshot: &DataSnapshot) -> Vec<RiskAlert> {
        let (events, _) = sanitize_events(snapshot.habit_events.clone());
        self.risk.assess(
            &snapshot.habits,
            snapshot.current_mood,
            &events,
            Utc::now().date_naive(),
        )
    }

    /// Temporal patterns over the snapshot's mood/interaction logs
    pub fn detect_patterns(&self, snapshot: &DataSnapshot) -> PatternBundle {
        let (mood_entries, _) = sanitize_mood_entries(snapshot.mood_entries.clone());
        let (events, _) = sanitize_events(snapshot.habit_events.clone());
        self.patterns.detect(&mood_entries, &events)
    }

    /// The full analytics bundle for one subject and window, cached
    ///
    /// A fresh cache entry is returned unchanged without touching the
    /// snapshot; otherwise the bundle is recomputed from the snapshot
    /// restricted to the timeframe.
    pub fn get_cached_analytics(
        &self,
        subject_id: Uuid,
        timeframe: Timeframe,
        snapshot: &DataSnapshot,
    ) -> Arc<AnalyticsBundle> {
        let key = CacheKey::new(subject_id, timeframe);
        self.cache
            .get_or_compute(key, || self.compute_bundle(subject_id, timeframe, snapshot))
    }

    /// Drop cached bundles: one subject's, or all of them
    pub fn invalidate_cache(&self, subject_id: Option<Uuid>) {
        self.cache.invalidate(subject_id);
    }

    fn compute_bundle(
        &self,
        subject_id: Uuid,
        timeframe: Timeframe,
        snapshot: &DataSnapshot,
    ) -> AnalyticsBundle {
        let now = Utc::now();
        let windowed = snapshot.restrict_to(timeframe, now);
        let (mood_entries, _) = sanitize_mood_entries(windowed.mood_entries.clone());
        let (events, _) = sanitize_events(windowed.habit_events.clone());

        let reports =
            self.correlation
                .compute_reports(&windowed.habits, &events, CorrelationOptions::default());
        let patterns = self.patterns.detect(&mood_entries, &events);

        // Predictions are only meaningful against a known current mood;
        // nothing is fabricated from a neutral placeholder.
        let predictions = match windowed.current_mood {
            Some(mood) => {
                let context = ContextualFactors::from_datetime(now);
                windowed
                    .habits
                    .iter()
                    .map(|habit| self.scoring.predict(habit, mood, context, &events))
                    .collect()
            }
            None => Vec::new(),
        };

        let risks = self.risk.assess(
            &windowed.habits,
            windowed.current_mood,
            &events,
            now.date_naive(),
        );

        tracing::debug!(
            subject = %subject_id,
            timeframe = %timeframe,
            reports = reports.len(),
            predictions = predictions.len(),
            risks = risks.len(),
            "Computed analytics bundle"
        );

        AnalyticsBundle {
            subject_id,
            timeframe,
            reports,
            patterns,
            predictions,
            risks,
            computed_at: now,
        }
    }
}
