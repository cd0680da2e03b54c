use chrono::{DateTime, Duration, Utc};

use super::types::{EaseFactor, MasteryLevel};

const MIN_INTERVAL_DAYS: i64 = 1;
const MAX_INTERVAL_DAYS: i64 = 36500;

/// Days until the next review. Ease only applies from MATURE upwards.
pub fn interval_days(level: MasteryLevel, ease_factor: EaseFactor) -> i64 {
    let base = level.base_interval_days();
    if level < MasteryLevel::Mature {
        return base;
    }

    let scaled = (base as f64 * ease_factor.get()).round();
    if !scaled.is_finite() {
        return MAX_INTERVAL_DAYS;
    }
    (scaled.min(MAX_INTERVAL_DAYS as f64) as i64).clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}

pub fn next_review_date(
    level: MasteryLevel,
    ease_factor: EaseFactor,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    now + Duration::days(interval_days(level, ease_factor))
}
