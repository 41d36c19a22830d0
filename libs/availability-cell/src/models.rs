use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A time-of-day range within a single calendar day.
///
/// Invariant: `start <= end`. No overnight wraparound; inputs that would
/// produce one are rejected at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Interval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        debug_assert!(start <= end, "interval start must not exceed end");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusySource {
    Appointment,
    Break,
}

/// A busy interval tagged with where it came from. The tag only matters while
/// merging; merged output drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub interval: Interval,
    pub source: BusySource,
}

/// One appointment row as supplied by the data-access layer.
///
/// `start_time` is free text: 24-hour form or 12-hour form with inconsistent
/// spacing/casing around the meridiem marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub provider_code: i64,
    pub appointment_date: NaiveDate,
    pub start_time: String,
    pub units: Option<u32>,
    pub duration_minutes: Option<u32>,
}

/// Working window and break for one date, as 24-hour free text.
///
/// Break fields are both present or both absent; an absent break simply does
/// not participate in the merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHoursRow {
    pub date: NaiveDate,
    pub work_start: String,
    pub work_end: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

/// One entry of a provider's recurring weekly schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    /// ISO weekday number, 1 = Monday .. 7 = Sunday.
    pub weekday: u32,
    pub active: bool,
}

/// Provider's default schedule record: four 24-hour time fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDefaultTime {
    pub work_start: String,
    pub break_start: String,
    pub break_end: String,
    pub work_end: String,
}

/// Consolidated availability for one date.
///
/// `busy` is sorted, merged and non-overlapping; `free` together with the
/// clamped busy intervals exactly partitions `[work_start, work_end]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Upper-case weekday label, always derived from `date`.
    pub weekday: String,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
    pub busy: Vec<Interval>,
    pub free: Vec<Interval>,
}

/// Recurring per-weekday on/off designation, independent of specific dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyPattern {
    active: HashMap<u32, bool>,
}

impl WeeklyPattern {
    pub fn from_entries(entries: &[WeeklyScheduleEntry]) -> Self {
        Self {
            active: entries.iter().map(|e| (e.weekday, e.active)).collect(),
        }
    }

    /// Weekdays missing from the schedule are treated as inactive.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let iso_weekday = date.weekday().number_from_monday();
        self.active.get(&iso_weekday).copied().unwrap_or(false)
    }
}

/// Fallback time ranges used to synthesize availability for active days that
/// have no explicit summary. Ranges are pre-rendered 12-hour text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTemplate {
    pub ranges: Vec<String>,
}

pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn interval_duration() {
        assert_eq!(Interval::new(t(9, 0), t(9, 45)).duration_minutes(), 45);
    }

    #[test]
    fn weekly_pattern_defaults_to_inactive() {
        let pattern = WeeklyPattern::from_entries(&[WeeklyScheduleEntry {
            weekday: 1,
            active: true,
        }]);
        // 2025-05-05 is a Monday, 2025-05-06 a Tuesday
        assert!(pattern.is_active_on(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()));
        assert!(!pattern.is_active_on(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()));
    }

    #[test]
    fn weekday_label_is_upper_case() {
        assert_eq!(
            weekday_label(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()),
            "MONDAY"
        );
    }
}
