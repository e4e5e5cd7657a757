//! Configuration System
//!
//! Handles loading analytics configuration from files and environment
//! variables. Supports TOML config files and environment variable overrides.
//! Every tunable the engines use (sample thresholds, weight vectors, cache
//! TTL) lives here so product owners can adjust behavior without a code
//! change.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main analytics configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub correlation: CorrelationConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Correlation engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationConfig {
    /// Minimum interaction events before a habit is reported on
    #[serde(default = "default_min_sample")]
    pub min_sample: usize,

    /// Mood groups above this success rate are "successful moods"
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,

    /// Mood groups below this success rate are "failed moods"
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: f64,
}

fn default_min_sample() -> usize {
    10
}

fn default_success_threshold() -> f64 {
    0.7
}

fn default_failure_threshold() -> f64 {
    0.3
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_sample: default_min_sample(),
            success_threshold: default_success_threshold(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

/// Weight vector for the success-prediction combination
///
/// This is the canonical five-factor vector; the upstream product carried a
/// divergent four-factor variant in one call path, which is deliberately not
/// preserved. Overriding these from config is the supported way to change
/// the blend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScoringWeights {
    #[serde(default = "default_w_mood")]
    pub mood_alignment: f64,
    #[serde(default = "default_w_time")]
    pub time_optimality: f64,
    #[serde(default = "default_w_recent")]
    pub recent_pattern: f64,
    #[serde(default = "default_w_streak")]
    pub streak_momentum: f64,
    #[serde(default = "default_w_context")]
    pub contextual: f64,
}

fn default_w_mood() -> f64 {
    0.35
}

fn default_w_time() -> f64 {
    0.25
}

fn default_w_recent() -> f64 {
    0.20
}

fn default_w_streak() -> f64 {
    0.15
}

fn default_w_context() -> f64 {
    0.05
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            mood_alignment: default_w_mood(),
            time_optimality: default_w_time(),
            recent_pattern: default_w_recent(),
            streak_momentum: default_w_streak(),
            contextual: default_w_context(),
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.mood_alignment
            + self.time_optimality
            + self.recent_pattern
            + self.streak_momentum
            + self.contextual
    }
}

/// Predictive scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Below this many events the fixed cold-start prediction is returned
    #[serde(default = "default_min_sample")]
    pub min_sample: usize,

    #[serde(default)]
    pub weights: ScoringWeights,

    /// Combined rate at or above this recommends proceeding
    #[serde(default = "default_proceed_threshold")]
    pub proceed_threshold: f64,

    /// Combined rate below this recommends waiting
    #[serde(default = "default_wait_threshold")]
    pub wait_threshold: f64,
}

fn default_proceed_threshold() -> f64 {
    0.7
}

fn default_wait_threshold() -> f64 {
    0.4
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_sample: default_min_sample(),
            weights: ScoringWeights::default(),
            proceed_threshold: default_proceed_threshold(),
            wait_threshold: default_wait_threshold(),
        }
    }
}

/// Risk assessment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    #[serde(default = "default_w_mismatch")]
    pub mood_mismatch_weight: f64,

    #[serde(default = "default_w_skips")]
    pub recent_skips_weight: f64,

    #[serde(default = "default_w_vulnerability")]
    pub streak_vulnerability_weight: f64,

    /// Alerts are only emitted above this score
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,

    /// Pessimistic mismatch assumed when the current mood was never
    /// observed for a habit. A default, not measured evidence.
    #[serde(default = "default_unobserved_mismatch")]
    pub unobserved_mood_mismatch: f64,
}

fn default_w_mismatch() -> f64 {
    0.4
}

fn default_w_skips() -> f64 {
    0.3
}

fn default_w_vulnerability() -> f64 {
    0.3
}

fn default_alert_threshold() -> f64 {
    0.5
}

fn default_unobserved_mismatch() -> f64 {
    0.8
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            mood_mismatch_weight: default_w_mismatch(),
            recent_skips_weight: default_w_skips(),
            streak_vulnerability_weight: default_w_vulnerability(),
            alert_threshold: default_alert_threshold(),
            unobserved_mood_mismatch: default_unobserved_mismatch(),
        }
    }
}

/// Analytics cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Freshness window in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: AnalyticsConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = AnalyticsConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("cadence").join("analytics.toml")),
            Some(PathBuf::from("./analytics.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded analytics config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load analytics config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default analytics config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(ttl) = std::env::var("CADENCE_CACHE_TTL_SECS") {
            if let Ok(secs) = ttl.parse() {
                self.cache.ttl_secs = secs;
            }
        }
        if let Ok(sample) = std::env::var("CADENCE_MIN_SAMPLE") {
            if let Ok(n) = sample.parse::<usize>() {
                self.correlation.min_sample = n;
                self.scoring.min_sample = n;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Cadence analytics configuration
#
# Environment variables override these settings:
# - CADENCE_CACHE_TTL_SECS
# - CADENCE_MIN_SAMPLE

[correlation]
# Minimum interaction events before a habit is reported on
min_sample = 10

# Mood groups above/below these success rates become successful/failed moods
success_threshold = 0.7
failure_threshold = 0.3

[scoring]
# Cold-start threshold for predictions
min_sample = 10

# Recommendation thresholds on the combined success rate
proceed_threshold = 0.7
wait_threshold = 0.4

[scoring.weights]
# Canonical five-factor blend
mood_alignment = 0.35
time_optimality = 0.25
recent_pattern = 0.20
streak_momentum = 0.15
contextual = 0.05

[risk]
mood_mismatch_weight = 0.4
recent_skips_weight = 0.3
streak_vulnerability_weight = 0.3

# Alerts are emitted only above this score
alert_threshold = 0.5

# Mismatch assumed when the current mood was never observed for a habit
unobserved_mood_mismatch = 0.8

[cache]
# Analytics bundle freshness window (seconds)
ttl_secs = 300
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_match_product_constants() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.correlation.min_sample, 10);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.risk.alert_threshold, 0.5);
        assert_eq!(config.risk.unobserved_mood_mismatch, 0.8);
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: AnalyticsConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.scoring.weights, ScoringWeights::default());
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cache]\nttl_secs = 60").unwrap();

        let config = AnalyticsConfig::load(file.path()).unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        // Unlisted sections fall back to defaults
        assert_eq!(config.correlation.min_sample, 10);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = AnalyticsConfig::load(Path::new("/nonexistent/analytics.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        let result = AnalyticsConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
