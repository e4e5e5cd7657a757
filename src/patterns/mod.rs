//! Temporal pattern detection
//!
//! Independent, total analyses over the mood/interaction log:
//!
//! - **weekly**: average intensity per day-of-week with variance
//! - **rhythm**: average intensity per hour-of-day with endpoint trends
//! - **cycles**: sliding 7-day mood windows
//! - **triggers**: tag frequency, general or environmental vocabulary
//! - **seasonal**: monthly completion/mood buckets with a dispersion-based
//!   confidence figure

mod cycles;
mod detector;
mod rhythm;
mod seasonal;
mod triggers;
mod weekly;

pub use cycles::{detect_cycles, MoodCycle, CYCLE_WINDOW};
pub use detector::{PatternBundle, PatternDetector};
pub use rhythm::{daily_rhythm, DailyRhythm, HourMood, Trend};
pub use seasonal::{seasonal_pattern, MonthBucket, SeasonalPattern};
pub use triggers::{trigger_frequency, TriggerFrequency, TriggerScope};
pub use weekly::{weekly_pattern, WeekdayMood, WeeklyPattern};
