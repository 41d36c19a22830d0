use std::env;
use tracing::warn;

/// Engine-level defaults for the availability pipeline.
///
/// Appointment rows frequently arrive with null `units`/`duration` columns;
/// these values fill the gaps. They are passed explicitly so tests can vary
/// them without touching process-wide state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_appointment_units: u32,
    pub default_appointment_duration_minutes: u32,
    /// Time ranges used for active days with no explicit data when the
    /// provider has no default schedule record of their own.
    pub fallback_time_ranges: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_appointment_units: 1,
            default_appointment_duration_minutes: 10,
            fallback_time_ranges: vec![
                "09:00 AM to 12:15 PM".to_string(),
                "01:00 PM to 05:00 PM".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_appointment_units: env::var("DEFAULT_APPOINTMENT_UNITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("DEFAULT_APPOINTMENT_UNITS not set or invalid, using default");
                    defaults.default_appointment_units
                }),
            default_appointment_duration_minutes: env::var("DEFAULT_APPOINTMENT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("DEFAULT_APPOINTMENT_DURATION_MINUTES not set or invalid, using default");
                    defaults.default_appointment_duration_minutes
                }),
            fallback_time_ranges: defaults.fallback_time_ranges,
        }
    }
}
