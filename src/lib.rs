//! # Cadence Analytics
//!
//! Habit-Mood Correlation & Predictive Analytics - a pure computation engine
//! that turns two append-only event logs (mood check-ins and habit
//! completion/skip events) into correlation reports, success predictions,
//! risk alerts, and temporal patterns, behind a short-TTL cache.
//!
//! The host application owns storage, rendering, and localization; this
//! crate only reads the collections it is handed and produces derived,
//! disposable value objects.
//!
//! ## Modules
//!
//! - [`model`]: domain types and the ingestion/normalization boundary
//! - [`correlation`]: per-habit mood/success statistics
//! - [`patterns`]: weekly, daily-rhythm, cycle, trigger, seasonal analyses
//! - [`predict`]: success scoring and risk ranking
//! - [`cache`]: TTL-cached analytics bundles per (subject, timeframe)
//! - [`engine`]: the facade a host constructs and keeps
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cadence_analytics::{AnalyticsEngine, DataSnapshot, MoodState, Timeframe};
//! use uuid::Uuid;
//!
//! let engine = AnalyticsEngine::with_defaults();
//!
//! // The host loads these from its own store
//! let snapshot = DataSnapshot::new(vec![], vec![], vec![])
//!     .current_mood(MoodState::Calm, 6);
//!
//! let subject = Uuid::new_v4();
//! let bundle = engine.get_cached_analytics(subject, Timeframe::Month, &snapshot);
//!
//! println!(
//!     "{} reports, {} risk alerts",
//!     bundle.reports.len(),
//!     bundle.risks.len()
//! );
//! ```

pub mod cache;
pub mod config;
pub mod correlation;
pub mod engine;
pub mod model;
pub mod patterns;
pub mod predict;
pub mod stats;

// Re-export top-level types for convenience
pub use model::{
    DataSnapshot, Habit, HabitAction, HabitEvent, IngestStats, MoodEntry, MoodSnapshot, MoodState,
    PostMoodSnapshot, Timeframe, Trigger,
};

pub use correlation::{
    CorrelationEngine, CorrelationOptions, CorrelationReport, HabitTimeProfile, MoodSuccessRate,
};

pub use patterns::{
    DailyRhythm, MoodCycle, PatternBundle, PatternDetector, SeasonalPattern, Trend,
    TriggerFrequency, TriggerScope, WeeklyPattern,
};

pub use predict::{
    ContextualFactors, FactorBreakdown, PredictiveScoringEngine, ReasonCode, Recommendation,
    RiskAlert, RiskAssessmentEngine, RiskFactors, RiskLevel, SuccessPrediction, Suggestion,
    Urgency,
};

pub use cache::{AnalyticsBundle, AnalyticsCache, CacheKey};

pub use engine::AnalyticsEngine;

pub use config::{
    AnalyticsConfig, CacheConfig, ConfigError, CorrelationConfig, RiskConfig, ScoringConfig,
    ScoringWeights,
};
