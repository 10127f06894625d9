//! Human-readable retry descriptions for throttled clients.

use std::time::Duration;

/// Whole seconds until retry, rounded up.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0)
}

/// Describes a wait such as `"4 minutes and 30 seconds"` or `"1 minute"`.
///
/// Falls back to `"a moment"` when the wait rounds to zero seconds.
pub fn describe_wait(retry_after: Duration) -> String {
    let total = retry_after_secs(retry_after);
    let minutes = total / 60;
    let seconds = total % 60;

    let mut parts = Vec::with_capacity(2);
    if minutes > 0 {
        parts.push(pluralize(minutes, "minute"));
    }
    if seconds > 0 {
        parts.push(pluralize(seconds, "second"));
    }

    if parts.is_empty() {
        "a moment".to_string()
    } else {
        parts.join(" and ")
    }
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
