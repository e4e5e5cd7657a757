//! Predictive analytics
//!
//! Forward-looking engines built on the habit history: success scoring for
//! "attempt this habit now?" and risk ranking for habits likely to break
//! their streak.

mod risk;
mod scoring;

pub use risk::{
    RiskAlert, RiskAssessmentEngine, RiskFactors, RiskLevel, Suggestion, Urgency,
};
pub use scoring::{
    ContextualFactors, FactorBreakdown, PredictiveScoringEngine, ReasonCode, Recommendation,
    SuccessPrediction,
};
