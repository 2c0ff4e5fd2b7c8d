//! Human-readable block ages ("1d 2h 3m 4s")

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Render a duration in whole seconds as its non-zero `d`/`h`/`m`/`s` units.
///
/// Zero renders as the empty string.
pub fn format_age(total_secs: u64) -> String {
    let units = [
        (total_secs / SECONDS_PER_DAY, 'd'),
        ((total_secs % SECONDS_PER_DAY) / SECONDS_PER_HOUR, 'h'),
        ((total_secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE, 'm'),
        (total_secs % SECONDS_PER_MINUTE, 's'),
    ];

    units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an ISO-8601 creation timestamp.
///
/// Timestamps without an offset are taken as UTC. Date-only values resolve
/// to midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole seconds elapsed from `created_at` to `now`, clamped at zero
pub fn age_seconds(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - created_at).num_seconds().max(0) as u64
}

/// Relative age of a raw timestamp; unparseable input yields an empty age
pub fn relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(created_at) {
        Some(ts) => format_age(age_seconds(ts, now)),
        None => {
            debug!(created_at, "unparseable block timestamp");
            String::new()
        }
    }
}
