//! Time formatting helpers.

use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;

/// Format a duration to a short human-readable string.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < SECONDS_PER_DAY {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!(
            "{}d {}h",
            secs / SECONDS_PER_DAY,
            (secs % SECONDS_PER_DAY) / 3600
        )
    }
}

/// "1 day", "30 days".
pub fn format_days(days: u64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
