//! Wall-clock helpers that work in the browser and on the server.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::OffsetDateTime;
use time::macros::format_description;

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        i64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
    }
}

/// Format an epoch-millis timestamp as `YYYY-MM-DD` (UTC). Out-of-range
/// timestamps render as an empty string.
#[must_use]
pub fn format_date(ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|dt| dt.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_default()
}
