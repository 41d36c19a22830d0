use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use shared_config::EngineConfig;

use crate::error::EngineError;
use crate::models::{weekday_label, DaySummary, DefaultTemplate, Interval, ProviderDefaultTime, WeeklyPattern};
use crate::services::normalize::{fmt_12h, parse_time_of_day};

/// First line of every calendar; downstream consumers pattern-match on it.
pub const CALENDAR_HEADER: &str = "Provider's Availability:";

/// Body emitted when there is no availability data at all.
pub const NO_AVAILABILITY_LINE: &str = "No valid availability data provided.";

impl DefaultTemplate {
    /// Build the template from a provider's default schedule record: the
    /// morning block runs work start to break start, the afternoon block
    /// break end to work end.
    pub fn from_provider_default(record: &ProviderDefaultTime) -> Result<Self, EngineError> {
        let work_start = parse_time_of_day(&record.work_start, "default_work_start")?;
        let break_start = parse_time_of_day(&record.break_start, "default_break_start")?;
        let break_end = parse_time_of_day(&record.break_end, "default_break_end")?;
        let work_end = parse_time_of_day(&record.work_end, "default_work_end")?;

        Ok(Self {
            ranges: vec![
                format!("{} to {}", fmt_12h(work_start), fmt_12h(break_start)),
                format!("{} to {}", fmt_12h(break_end), fmt_12h(work_end)),
            ],
        })
    }

    /// Hardcoded pair used when the provider has no default schedule record.
    pub fn fallback(config: &EngineConfig) -> Self {
        Self {
            ranges: config.fallback_time_ranges.clone(),
        }
    }
}

/// Render free intervals as comma-joined "start to end" 12-hour ranges.
pub fn render_ranges(intervals: &[Interval]) -> String {
    intervals
        .iter()
        .map(|i| format!("{} to {}", fmt_12h(i.start), fmt_12h(i.end)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn calendar_line(date: NaiveDate, ranges: &str) -> String {
    format!(
        "On {}, {}, the provider is available at: {}",
        weekday_label(date),
        date.format("%Y-%m-%d"),
        ranges
    )
}

fn no_availability_calendar() -> String {
    format!("{CALENDAR_HEADER}\n{NO_AVAILABILITY_LINE}")
}

/// Extrapolate sparse per-date summaries into a contiguous day-by-day
/// calendar.
///
/// Every date from the earliest to the latest summary date is visited in
/// order. Dates with an explicit summary are emitted verbatim; dates whose
/// weekday is active in the weekly pattern are synthesized from the template;
/// everything else is omitted. Weekday labels always come from the iterated
/// date.
pub fn extrapolate_calendar(
    summaries: &[DaySummary],
    pattern: &WeeklyPattern,
    template: &DefaultTemplate,
) -> String {
    if summaries.is_empty() {
        return no_availability_calendar();
    }

    let mut start_date = summaries[0].date;
    let mut end_date = summaries[0].date;
    for summary in summaries {
        start_date = start_date.min(summary.date);
        end_date = end_date.max(summary.date);
    }

    let by_date: HashMap<NaiveDate, &DaySummary> =
        summaries.iter().map(|s| (s.date, s)).collect();

    debug!("extrapolating calendar from {} to {}", start_date, end_date);

    let mut lines = vec![CALENDAR_HEADER.to_string()];
    let mut current = start_date;
    loop {
        if let Some(summary) = by_date.get(&current) {
            lines.push(calendar_line(current, &render_ranges(&summary.free)));
        } else if pattern.is_active_on(current) {
            lines.push(calendar_line(current, &template.ranges.join(", ")));
        }

        if current >= end_date {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    lines.join("\n")
}
