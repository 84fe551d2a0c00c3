//! Time formatting helpers shared by the UI.

use std::time::Duration;

/// Format a number of seconds as `M:SS`.
///
/// Non-finite or negative input renders as `0:00`, matching what the
/// server sends for tracks whose duration could not be determined.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a `Duration` as `M:SS`.
pub fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_renders_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_time_degrades_on_bad_input() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn format_duration_matches_seconds_formatting() {
        assert_eq!(format_duration(Duration::from_secs(75)), "1:15");
        assert_eq!(format_duration(Duration::ZERO), "0:00");
    }
}
