use chrono::{DateTime, Utc};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC time, truncated to millisecond precision.
///
/// Registration dates are persisted as RFC 3339 strings with millisecond
/// precision, so truncating here keeps in-memory and reloaded records equal.
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(now_millis()).unwrap_or_else(Utc::now)
}
