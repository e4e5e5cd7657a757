//! Benchmarks for the Cadence analytics engines
//!
//! Run with: cargo bench

use cadence_analytics::{
    ContextualFactors, CorrelationEngine, CorrelationOptions, Habit, HabitAction, HabitEvent,
    MoodEntry, MoodSnapshot, MoodState, PatternDetector, PredictiveScoringEngine,
};
use cadence_analytics::config::{CorrelationConfig, ScoringConfig};
use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn synthetic_events(habit: &Habit, count: usize) -> Vec<HabitEvent> {
    let now = Utc::now();
    let moods = MoodState::all();
    (0..count)
        .map(|i| {
            let at = now - Duration::hours(i as i64 * 7);
            let action = if i % 4 == 0 {
                HabitAction::Skipped
            } else {
                HabitAction::Completed
            };
            HabitEvent::new(habit.id, at.date_naive(), action)
                .timestamp(at)
                .pre_mood(moods[i % moods.len()], 1 + (i % 10) as u8)
        })
        .collect()
}

fn synthetic_moods(count: usize) -> Vec<MoodEntry> {
    let now = Utc::now();
    let moods = MoodState::all();
    (0..count)
        .map(|i| {
            let at = now - Duration::days(i as i64);
            MoodEntry::new(at.date_naive(), moods[i % moods.len()], 1 + (i % 10) as u8)
                .timestamp(at)
        })
        .collect()
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");
    let engine = CorrelationEngine::new(CorrelationConfig::default());

    for size in [100, 1000, 10000] {
        let habit = Habit::new("bench");
        let events = synthetic_events(&habit, size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("report_{}", size), |b| {
            b.iter(|| {
                engine.compute_correlation(
                    black_box(&habit),
                    black_box(&events),
                    CorrelationOptions {
                        include_time_profile: true,
                    },
                )
            })
        });
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");
    let engine = PredictiveScoringEngine::new(ScoringConfig::default());

    for size in [100, 1000] {
        let mut habit = Habit::new("bench");
        habit.streak = 12;
        let events = synthetic_events(&habit, size);
        let mood = MoodSnapshot::new(MoodState::Calm, 6);
        let context = ContextualFactors::new(9, 1);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("predict_{}", size), |b| {
            b.iter(|| {
                engine.predict(
                    black_box(&habit),
                    black_box(mood),
                    black_box(context),
                    black_box(&events),
                )
            })
        });
    }

    group.finish();
}

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");
    let detector = PatternDetector::new();

    for size in [30, 365] {
        let moods = synthetic_moods(size);
        let habit = Habit::new("bench");
        let events = synthetic_events(&habit, size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("detect_{}", size), |b| {
            b.iter(|| detector.detect(black_box(&moods), black_box(&events)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_correlation, bench_prediction, bench_patterns);
criterion_main!(benches);
