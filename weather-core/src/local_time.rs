use chrono::{DateTime, Duration, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock time right now at a place `utc_offset_seconds` away from UTC.
pub fn format_local_time(utc_offset_seconds: i32) -> String {
    format_local_time_at(Utc::now(), utc_offset_seconds)
}

/// Same as [`format_local_time`] but for a given UTC instant. Plain offset
/// arithmetic, no timezone database.
pub fn format_local_time_at(now: DateTime<Utc>, utc_offset_seconds: i32) -> String {
    let shifted = now + Duration::seconds(i64::from(utc_offset_seconds));
    shifted.format(DISPLAY_FORMAT).to_string()
}
