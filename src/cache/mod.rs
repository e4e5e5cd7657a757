//! Analytics cache
//!
//! Memoizes the bundled analytics output per (subject, timeframe) behind a
//! short TTL. A fresh hit returns the stored bundle unchanged; a miss or
//! stale entry recomputes and replaces it. Slots are locked per key, so
//! concurrent cold lookups of one key compute at most once per refresh
//! while other keys proceed unblocked.

use crate::correlation::CorrelationReport;
use crate::model::Timeframe;
use crate::patterns::PatternBundle;
use crate::predict::{RiskAlert, SuccessPrediction};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Cache key: one subject analyzed over one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub subject_id: Uuid,
    pub timeframe: Timeframe,
}

impl CacheKey {
    pub fn new(subject_id: Uuid, timeframe: Timeframe) -> Self {
        Self {
            subject_id,
            timeframe,
        }
    }
}

/// The full analytics output for one subject and window
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsBundle {
    pub subject_id: Uuid,
    pub timeframe: Timeframe,
    pub reports: Vec<CorrelationReport>,
    pub patterns: PatternBundle,
    /// Per-habit predictions; empty when the snapshot carried no current mood
    pub predictions: Vec<SuccessPrediction>,
    pub risks: Vec<RiskAlert>,
    pub computed_at: DateTime<Utc>,
}

type Slot = Arc<Mutex<Option<Arc<AnalyticsBundle>>>>;

/// TTL cache over analytics bundles
pub struct AnalyticsCache {
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl AnalyticsCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached bundle for `key`, recomputing via `compute` when
    /// the entry is missing or stale.
    ///
    /// The slot lock is held across `compute`, so a cold key is computed at
    /// most once per refresh no matter how many threads race on it.
    pub fn get_or_compute<F>(&self, key: CacheKey, compute: F) -> Arc<AnalyticsBundle>
    where
        F: FnOnce() -> AnalyticsBundle,
    {
        let slot = {
            let mut slots = self.slots.lock().expect("cache map lock poisoned");
            slots.entry(key).or_default().clone()
        };

        let mut entry = slot.lock().expect("cache slot lock poisoned");
        if let Some(bundle) = entry.as_ref() {
            let age = Utc::now() - bundle.computed_at;
            if age < self.ttl {
                tracing::debug!(
                    subject = %key.subject_id,
                    timeframe = %key.timeframe,
                    age_secs = age.num_seconds(),
                    "Analytics cache hit"
                );
                return Arc::clone(bundle);
            }
            tracing::debug!(
                subject = %key.subject_id,
                timeframe = %key.timeframe,
                "Analytics cache entry stale, recomputing"
            );
        } else {
            tracing::debug!(
                subject = %key.subject_id,
                timeframe = %key.timeframe,
                "Analytics cache miss, computing"
            );
        }

        let bundle = Arc::new(compute());
        *entry = Some(Arc::clone(&bundle));
        bundle
    }

    /// Evict entries: all of one subject's, or everything when `None`
    pub fn invalidate(&self, subject_id: Option<Uuid>) {
        let mut slots = self.slots.lock().expect("cache map lock poisoned");
        match subject_id {
            Some(subject) => {
                slots.retain(|key, _| key.subject_id != subject);
                tracing::debug!(subject = %subject, "Invalidated subject cache entries");
            }
            None => {
                slots.clear();
                tracing::debug!("Cleared analytics cache");
            }
        }
    }

    /// Number of keyed entries currently held (fresh or stale)
    pub fn len(&self) -> usize {
        self.slots.lock().expect("cache map lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
