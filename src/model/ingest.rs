//! Ingestion boundary
//!
//! All malformed-input handling and default resolution happens here, once,
//! instead of ad hoc inside scoring code. Records that fail validation are
//! skipped and counted; a bad record never aborts a batch.

use crate::model::types::{HabitEvent, MoodEntry};
use std::collections::HashMap;

/// Outcome of sanitizing one input batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: usize,
    pub dropped: usize,
    pub deduplicated: usize,
}

/// Sanitize mood entries: drop out-of-range intensities, collapse to one
/// canonical entry per calendar day (the later timestamp wins), and return
/// the survivors sorted by date.
pub fn sanitize_mood_entries(entries: Vec<MoodEntry>) -> (Vec<MoodEntry>, IngestStats) {
    let mut stats = IngestStats::default();
    let total = entries.len();

    let mut canonical: HashMap<chrono::NaiveDate, MoodEntry> = HashMap::new();
    for entry in entries {
        if !entry.mood.is_valid() {
            stats.dropped += 1;
            continue;
        }
        match canonical.get(&entry.date) {
            Some(existing) if existing.timestamp >= entry.timestamp => {
                stats.deduplicated += 1;
            }
            Some(_) => {
                stats.deduplicated += 1;
                canonical.insert(entry.date, entry);
            }
            None => {
                canonical.insert(entry.date, entry);
            }
        }
    }

    let mut result: Vec<MoodEntry> = canonical.into_values().collect();
    result.sort_by_key(|e| e.date);
    stats.accepted = result.len();

    if stats.dropped > 0 || stats.deduplicated > 0 {
        tracing::debug!(
            total,
            accepted = stats.accepted,
            dropped = stats.dropped,
            deduplicated = stats.deduplicated,
            "Sanitized mood entries"
        );
    }

    (result, stats)
}

/// Sanitize habit events: drop events whose pre- or post-mood intensity is
/// out of range, keep everything else in timestamp order.
///
/// Events are append-only and immutable, so there is no dedup step here.
pub fn sanitize_events(events: Vec<HabitEvent>) -> (Vec<HabitEvent>, IngestStats) {
    let mut stats = IngestStats::default();
    let total = events.len();

    let mut result: Vec<HabitEvent> = events
        .into_iter()
        .filter(|e| {
            let pre_ok = e.pre_mood.map(|m| m.is_valid()).unwrap_or(true);
            let post_ok = e.post_mood.map(|m| m.is_valid()).unwrap_or(true);
            if pre_ok && post_ok {
                true
            } else {
                stats.dropped += 1;
                false
            }
        })
        .collect();
    result.sort_by_key(|e| e.timestamp);
    stats.accepted = result.len();

    if stats.dropped > 0 {
        tracing::debug!(
            total,
            accepted = stats.accepted,
            dropped = stats.dropped,
            "Sanitized habit events"
        );
    }

    (result, stats)
}
