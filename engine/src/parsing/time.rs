// Durations entered as "H:MM" or as decimal hours, carried around as minutes
use shared::utils::russian_format::{parse_float, parse_strict};

use crate::config::DayForms;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

pub fn is_valid_time(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if text.contains(':') {
        let mut parts = text.split(':');
        let hours = parse_strict(parts.next().unwrap_or(""));
        let minutes = parse_strict(parts.next().unwrap_or(""));
        !hours.is_nan() && !minutes.is_nan() && (0.0..60.0).contains(&minutes)
    } else {
        !parse_float(text).is_nan()
    }
}

/// Converts "H:MM" or decimal hours ("1,5") to minutes.
/// Components that do not parse count as 0.
pub fn parse_time(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let normalized = text.replacen(',', ".", 1);
    if normalized.contains(':') {
        let mut parts = normalized.split(':').map(|part| or_zero(parse_float(part)));
        let hours = parts.next().unwrap_or(0.0);
        let minutes = parts.next().unwrap_or(0.0);
        hours * 60.0 + minutes
    } else {
        or_zero(parse_float(&normalized)) * 60.0
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Renders minutes as `[-]HH:MM`, adding a day breakdown for a day or more.
pub fn format_time(minutes: f64, day_forms: &DayForms) -> String {
    let sign = if minutes < 0.0 && minutes.round() != 0.0 { "-" } else { "" };
    let total = minutes.abs().round() as u64;

    let days = total / MINUTES_PER_DAY;
    let hours = (total % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let mins = total % MINUTES_PER_HOUR;

    let basic = format!("{}{:02}:{:02}", sign, hours, mins);
    if days > 0 {
        format!("{} ({} {}, {} h, {} min)", basic, days, day_forms.select(days), hours, mins)
    } else {
        basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_time_colon_form() {
        assert!(is_valid_time("1:30"));
        assert!(is_valid_time("25:00"));
        assert!(is_valid_time(":45"));
        assert!(!is_valid_time("1:60"));
        assert!(!is_valid_time("1:-5"));
        assert!(!is_valid_time("a:30"));
    }

    #[test]
    fn test_is_valid_time_decimal_form() {
        assert!(is_valid_time("1.5"));
        assert!(is_valid_time("2"));
        assert!(!is_valid_time("abc"));
        assert!(!is_valid_time(""));
        assert!(!is_valid_time("   "));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("1:30"), 90.0);
        assert_eq!(parse_time("0:45"), 45.0);
        assert_eq!(parse_time("1,5"), 90.0);
        assert_eq!(parse_time("2"), 120.0);
        assert_eq!(parse_time(""), 0.0);
    }

    #[test]
    fn test_parse_time_malformed_components_are_zero() {
        assert_eq!(parse_time("x:15"), 15.0);
        assert_eq!(parse_time("2:y"), 120.0);
        assert_eq!(parse_time("zz"), 0.0);
    }

    #[test]
    fn test_format_time_basic() {
        let forms = DayForms::default();
        assert_eq!(format_time(135.0, &forms), "02:15");
        assert_eq!(format_time(0.0, &forms), "00:00");
        assert_eq!(format_time(-60.0, &forms), "-01:00");
    }

    #[test]
    fn test_format_time_rounds_before_splitting() {
        let forms = DayForms::default();
        assert_eq!(format_time(59.6, &forms), "01:00");
        assert_eq!(format_time(-0.2, &forms), "00:00");
    }

    #[test]
    fn test_format_time_day_rollover() {
        let forms = DayForms::default();
        assert_eq!(format_time(1500.0, &forms), "01:00 (1 day, 1 h, 0 min)");
        assert_eq!(format_time(3.0 * 1440.0 + 5.0, &forms), "00:05 (3 days, 0 h, 5 min)");
        assert_eq!(format_time(-(2.0 * 1440.0), &forms), "-00:00 (2 days, 0 h, 0 min)");
    }
}
