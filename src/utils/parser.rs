//! Parsers for configuration values.

use std::time::Duration;

/// Parse duration string (e.g., "45", "30s", "5m", "1h", "250ms").
///
/// A bare number is seconds. Supported units:
/// - ms: milliseconds
/// - s: seconds
/// - m: minutes
/// - h: hours
/// - d: days
/// - w: weeks
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(digits) = input.strip_suffix("ms") {
        return digits.trim().parse().ok().map(Duration::from_millis);
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok().map(Duration::from_secs);
    }

    let unit_start = input.len() - input.chars().last()?.len_utf8();
    let (digits, unit) = input.split_at(unit_start);
    let amount: u64 = digits.trim().parse().ok()?;

    let seconds = match unit {
        "s" => amount,
        "m" => amount.checked_mul(60)?,
        "h" => amount.checked_mul(3600)?,
        "d" => amount.checked_mul(86400)?,
        "w" => amount.checked_mul(604800)?,
        _ => return None,
    };

    Some(Duration::from_secs(seconds))
}

/// Parse a boolean flag ("true/false", "1/0", "yes/no", "on/off").
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated list, dropping blank items.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole seconds, rounded to nearest.
pub fn round_secs(duration: Duration) -> u64 {
    duration.as_secs_f64().round() as u64
}
