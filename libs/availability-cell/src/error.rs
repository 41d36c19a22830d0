use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed time value '{value}' in {context}")]
    MalformedTime { value: String, context: String },

    #[error("Missing required field '{field}' for {date}")]
    MissingRequiredField { date: NaiveDate, field: String },

    #[error("No appointment rows supplied")]
    EmptyInput,

    #[error("Inconsistent {window} window on {date}: {start} > {end}")]
    InconsistentWorkingWindow {
        date: NaiveDate,
        window: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    // Overnight appointments are unsupported; rejecting them is the recorded
    // decision for the open question in DESIGN.md.
    #[error("Appointment on {date} starting {start} runs {minutes} minutes past midnight")]
    OvernightAppointment {
        date: NaiveDate,
        start: NaiveTime,
        minutes: i64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
