//! Human-friendly "3 hours ago" phrases.
//!
//! Both instants are handled in UTC. AniList timestamps are Unix epochs, so
//! no local-time conversion is involved on either side.

use chrono::{DateTime, Utc};
use tracing::warn;

/// Ratios between consecutive units, seconds up to years.
/// A month is a twelfth of a 365-day year, expressed in weeks.
const UNIT_STEPS: [f64; 6] = [60.0, 60.0, 24.0, 7.0, 365.0 / 7.0 / 12.0, 12.0];
const UNIT_NAMES: [&str; 7] = ["second", "minute", "hour", "day", "week", "month", "year"];

/// Phrase for how long ago `then` was, seen from `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then).num_seconds();
    let future = elapsed < 0;

    let mut value = elapsed.unsigned_abs() as f64;
    let mut unit = 0;
    while unit < UNIT_STEPS.len() && value >= UNIT_STEPS[unit] {
        value /= UNIT_STEPS[unit];
        unit += 1;
    }
    let count = value as u64;

    if unit == 0 && count < 10 {
        return if future { "right now" } else { "just now" }.to_string();
    }

    let name = UNIT_NAMES[unit];
    let phrase = if count > 1 {
        format!("{} {}s", count, name)
    } else {
        format!("1 {}", name)
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Phrase for an epoch timestamp relative to the current time.
pub fn time_ago_from_epoch(epoch_secs: i64) -> String {
    let now = Utc::now();
    let then = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_else(|| {
        warn!(epoch_secs, "timestamp out of range, treating it as now");
        now
    });
    time_ago(then, now)
}
