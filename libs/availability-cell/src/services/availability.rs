use tracing::{debug, warn};

use shared_config::EngineConfig;

use crate::error::EngineError;
use crate::models::{
    AppointmentRow, DaySummary, DefaultTemplate, ProviderDefaultTime, WeeklyPattern,
    WeeklyScheduleEntry, WorkingHoursRow,
};
use crate::services::calendar::{extrapolate_calendar, CALENDAR_HEADER, NO_AVAILABILITY_LINE};
use crate::services::consolidation::build_day_summaries;

/// Entry point for the availability pipeline.
///
/// Purely synchronous, CPU-only work over the supplied rows; nothing is
/// persisted and no shared state is held, so independent invocations can run
/// on separate worker threads without coordination.
pub struct AvailabilityService {
    config: EngineConfig,
}

impl AvailabilityService {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Consolidate appointment rows into per-date summaries.
    pub fn day_summaries(
        &self,
        appointments: &[AppointmentRow],
        working_hours: &[WorkingHoursRow],
    ) -> Result<Vec<DaySummary>, EngineError> {
        build_day_summaries(appointments, working_hours, &self.config)
    }

    /// Full pipeline: consolidate per-date availability, then extrapolate a
    /// contiguous calendar using the weekly schedule and the provider's
    /// default template (or the configured fallback).
    ///
    /// An empty appointment set is a valid degenerate outcome and resolves to
    /// the no-availability calendar rather than an error.
    pub fn availability_calendar(
        &self,
        appointments: &[AppointmentRow],
        working_hours: &[WorkingHoursRow],
        weekly_schedule: &[WeeklyScheduleEntry],
        default_time: Option<&ProviderDefaultTime>,
    ) -> Result<String, EngineError> {
        debug!(
            "building availability calendar from {} appointment rows",
            appointments.len()
        );

        if appointments.is_empty() {
            warn!("no appointment rows supplied, returning no-availability calendar");
            return Ok(format!("{CALENDAR_HEADER}\n{NO_AVAILABILITY_LINE}"));
        }

        let summaries = self.day_summaries(appointments, working_hours)?;
        let pattern = WeeklyPattern::from_entries(weekly_schedule);
        let template = match default_time {
            Some(record) => DefaultTemplate::from_provider_default(record)?,
            None => DefaultTemplate::fallback(&self.config),
        };

        Ok(extrapolate_calendar(&summaries, &pattern, &template))
    }
}
