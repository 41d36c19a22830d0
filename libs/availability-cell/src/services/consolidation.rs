use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use shared_config::EngineConfig;

use crate::error::EngineError;
use crate::models::{
    weekday_label, AppointmentRow, BusyInterval, BusySource, DaySummary, Interval, WorkingHoursRow,
};
use crate::services::normalize::{appointment_end_time, parse_time_of_day};

/// Merge busy intervals into maximal disjoint intervals.
///
/// Intervals are sorted ascending by (start, end); ties keep insertion order.
/// An interval whose start is not strictly greater than the end of the last
/// accumulated interval extends it, so touching intervals merge into one.
pub fn merge_busy_intervals(mut busy: Vec<BusyInterval>) -> Vec<Interval> {
    busy.sort_by_key(|b| (b.interval.start, b.interval.end));

    let mut merged: Vec<Interval> = Vec::new();
    for entry in busy {
        match merged.last_mut() {
            Some(last) if entry.interval.start <= last.end => {
                if entry.interval.end > last.end {
                    last.end = entry.interval.end;
                }
            }
            _ => merged.push(entry.interval),
        }
    }

    merged
}

/// Subtract a merged busy set from the working window.
///
/// Walks a cursor from `work_start`, emitting a free interval ahead of each
/// busy interval that starts past the cursor. Busy bounds are never clamped;
/// only the cursor is bounded by where it starts and by `work_end`.
pub fn free_intervals(busy: &[Interval], work_start: NaiveTime, work_end: NaiveTime) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut cursor = work_start;

    for interval in busy {
        if interval.start > cursor {
            free.push(Interval::new(cursor, interval.start));
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < work_end {
        free.push(Interval::new(cursor, work_end));
    }

    free
}

/// Consolidate appointment rows into one `DaySummary` per date, ascending.
///
/// Each date needs a working-hours row; when a date has several, the first in
/// input order wins (callers supply rows ordered most-recently-modified
/// first).
pub fn build_day_summaries(
    appointments: &[AppointmentRow],
    working_hours: &[WorkingHoursRow],
    config: &EngineConfig,
) -> Result<Vec<DaySummary>, EngineError> {
    if appointments.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let mut windows: HashMap<NaiveDate, &WorkingHoursRow> = HashMap::new();
    for row in working_hours {
        windows.entry(row.date).or_insert(row);
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<&AppointmentRow>> = BTreeMap::new();
    for row in appointments {
        by_date.entry(row.appointment_date).or_default().push(row);
    }

    let mut summaries = Vec::with_capacity(by_date.len());
    for (date, rows) in by_date {
        let window = windows
            .get(&date)
            .copied()
            .ok_or_else(|| EngineError::MissingRequiredField {
                date,
                field: "working_hours".to_string(),
            })?;

        summaries.push(summarize_date(date, &rows, window, config)?);
    }

    Ok(summaries)
}

fn summarize_date(
    date: NaiveDate,
    rows: &[&AppointmentRow],
    window: &WorkingHoursRow,
    config: &EngineConfig,
) -> Result<DaySummary, EngineError> {
    let work_start = parse_time_of_day(&window.work_start, "work_start")?;
    let work_end = parse_time_of_day(&window.work_end, "work_end")?;
    if work_start > work_end {
        return Err(EngineError::InconsistentWorkingWindow {
            date,
            window: "working".to_string(),
            start: work_start,
            end: work_end,
        });
    }

    let break_interval = match (&window.break_start, &window.break_end) {
        (Some(raw_start), Some(raw_end)) => {
            let start = parse_time_of_day(raw_start, "break_start")?;
            let end = parse_time_of_day(raw_end, "break_end")?;
            if start > end {
                return Err(EngineError::InconsistentWorkingWindow {
                    date,
                    window: "break".to_string(),
                    start,
                    end,
                });
            }
            Some(Interval::new(start, end))
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(EngineError::MissingRequiredField {
                date,
                field: "break_end".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(EngineError::MissingRequiredField {
                date,
                field: "break_start".to_string(),
            })
        }
    };

    let mut appointment_spans = Vec::with_capacity(rows.len());
    for row in rows {
        let start = parse_time_of_day(&row.start_time, "start_time")?;
        let end = appointment_end_time(date, start, row.units, row.duration_minutes, config)?;
        appointment_spans.push(Interval::new(start, end));
    }
    // identical bookings (same start and end) count once
    appointment_spans.sort();
    appointment_spans.dedup();

    let mut busy: Vec<BusyInterval> = appointment_spans
        .into_iter()
        .map(|interval| BusyInterval {
            interval,
            source: BusySource::Appointment,
        })
        .collect();
    if let Some(interval) = break_interval {
        busy.push(BusyInterval {
            interval,
            source: BusySource::Break,
        });
    }

    let busy = merge_busy_intervals(busy);
    let free = free_intervals(&busy, work_start, work_end);

    debug!(
        "consolidated {}: {} busy, {} free intervals",
        date,
        busy.len(),
        free.len()
    );

    Ok(DaySummary {
        date,
        weekday: weekday_label(date),
        work_start,
        work_end,
        break_start: break_interval.map(|b| b.start),
        break_end: break_interval.map(|b| b.end),
        busy,
        free,
    })
}
