use std::sync::OnceLock;

use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Regex;

use shared_config::EngineConfig;

use crate::error::EngineError;

// Upstream systems emit appointment times in several shapes: "09:00:00",
// "9:00 AM", "9:00AM", "9:00 A M", "9:00A M". Two normalization passes bring
// the meridiem marker into canonical "HH:MM AM" form before parsing.
fn missing_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{1,2}:\d{2})(AM|PM)").expect("valid regex"))
}

fn split_am_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{1,2}:\d{2})\s*A\s*M").expect("valid regex"))
}

fn split_pm_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{1,2}:\d{2})\s*P\s*M").expect("valid regex"))
}

/// Canonicalize the spacing and casing of a trailing AM/PM marker.
///
/// Does not validate the time itself; strings without a meridiem marker pass
/// through untouched (modulo trimming).
pub fn normalize_meridiem(raw: &str) -> String {
    let trimmed = raw.trim();
    let spaced = missing_space_re().replace_all(trimmed, "$1 $2");
    let am = split_am_re().replace_all(&spaced, "$1 AM");
    let pm = split_pm_re().replace_all(&am, "$1 PM");
    pm.trim().to_string()
}

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%I:%M %p", "%H:%M"];

/// Parse a heterogeneous time-of-day value into a canonical `NaiveTime`.
///
/// Accepts 24-hour form and (normalized) 12-hour form. Anything else fails
/// with the raw value and the field it came from; no guessing.
pub fn parse_time_of_day(raw: &str, context: &str) -> Result<NaiveTime, EngineError> {
    let normalized = normalize_meridiem(raw);

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(&normalized, format) {
            return Ok(time);
        }
    }

    Err(EngineError::MalformedTime {
        value: raw.to_string(),
        context: context.to_string(),
    })
}

/// Compute an appointment's end time as `start + units * duration` minutes.
///
/// Null `units`/`duration` fall back to the configured defaults. An end time
/// past midnight is rejected; overnight appointments are unsupported.
pub fn appointment_end_time(
    date: NaiveDate,
    start: NaiveTime,
    units: Option<u32>,
    duration_minutes: Option<u32>,
    config: &EngineConfig,
) -> Result<NaiveTime, EngineError> {
    let units = units.unwrap_or(config.default_appointment_units);
    let duration = duration_minutes.unwrap_or(config.default_appointment_duration_minutes);
    let total_minutes = i64::from(units) * i64::from(duration);

    let (end, wrapped_secs) = start.overflowing_add_signed(Duration::minutes(total_minutes));
    if wrapped_secs != 0 {
        return Err(EngineError::OvernightAppointment {
            date,
            start,
            minutes: total_minutes,
        });
    }

    Ok(end)
}

/// Render a time in 12-hour clock form with zero-padded hour, e.g. "09:00 AM".
pub fn fmt_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn normalizes_missing_space_before_meridiem() {
        assert_eq!(normalize_meridiem("9:00AM"), "9:00 AM");
        assert_eq!(normalize_meridiem("  12:30PM "), "12:30 PM");
    }

    #[test]
    fn normalizes_split_meridiem() {
        assert_eq!(normalize_meridiem("9:00 A M"), "9:00 AM");
        assert_eq!(normalize_meridiem("9:00A M"), "9:00 AM");
        assert_eq!(normalize_meridiem("4:15 P M"), "4:15 PM");
    }

    #[test]
    fn normalizes_lower_case_meridiem() {
        assert_eq!(normalize_meridiem("9:00am"), "9:00 AM");
        assert_eq!(normalize_meridiem("9:00 p m"), "9:00 PM");
    }

    #[test]
    fn parses_24_hour_and_12_hour_forms() {
        assert_eq!(parse_time_of_day("09:00:00", "work_start").unwrap(), t(9, 0));
        assert_eq!(parse_time_of_day("17:30", "work_end").unwrap(), t(17, 30));
        assert_eq!(parse_time_of_day("9:00AM", "start_time").unwrap(), t(9, 0));
        assert_eq!(parse_time_of_day("4:15 P M", "start_time").unwrap(), t(16, 15));
        assert_eq!(parse_time_of_day("12:00 PM", "start_time").unwrap(), t(12, 0));
        assert_eq!(parse_time_of_day("12:00 AM", "start_time").unwrap(), t(0, 0));
    }

    #[test]
    fn rejects_unparseable_times() {
        let err = parse_time_of_day("25:00", "start_time").unwrap_err();
        assert_matches!(err, EngineError::MalformedTime { ref value, ref context }
            if value == "25:00" && context == "start_time");

        assert_matches!(
            parse_time_of_day("13:00 PM", "start_time"),
            Err(EngineError::MalformedTime { .. })
        );
        assert_matches!(
            parse_time_of_day("soonish", "start_time"),
            Err(EngineError::MalformedTime { .. })
        );
    }

    #[test]
    fn end_time_uses_configured_defaults() {
        let config = EngineConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

        // defaults: 1 unit x 10 minutes
        let end = appointment_end_time(date, t(9, 0), None, None, &config).unwrap();
        assert_eq!(end, t(9, 10));

        let end = appointment_end_time(date, t(9, 0), Some(3), Some(15), &config).unwrap();
        assert_eq!(end, t(9, 45));
    }

    #[test]
    fn end_time_rejects_midnight_rollover() {
        let config = EngineConfig::default();
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

        let err = appointment_end_time(date, t(23, 50), Some(2), Some(10), &config).unwrap_err();
        assert_matches!(err, EngineError::OvernightAppointment { minutes: 20, .. });
    }

    #[test]
    fn formats_12_hour_with_zero_padding() {
        assert_eq!(fmt_12h(t(9, 0)), "09:00 AM");
        assert_eq!(fmt_12h(t(13, 0)), "01:00 PM");
        assert_eq!(fmt_12h(t(0, 5)), "12:05 AM");
        assert_eq!(fmt_12h(t(12, 15)), "12:15 PM");
    }
}
