use chrono::{DateTime, Duration, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// `1h 02m 03s`, `4m 05s` or `6s`. Negative durations show as `0s`.
#[must_use]
pub fn format_elapsed(value: Duration) -> String {
    let total = value.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
