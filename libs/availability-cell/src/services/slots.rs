use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DaySummary, Interval};

/// Per-date slot record as persisted in session logs.
///
/// Stored slot text is data with an explicit schema, parsed through serde and
/// never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDaySlots {
    pub date: NaiveDate,
    pub free: Vec<Interval>,
}

impl From<&DaySummary> for StoredDaySlots {
    fn from(summary: &DaySummary) -> Self {
        Self {
            date: summary.date,
            free: summary.free.clone(),
        }
    }
}

/// Slot recommendations as they appear in stored responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSlots {
    #[serde(rename = "Recommended_Slots", default)]
    pub slots: Vec<String>,
}

pub fn encode_day_slots(summary: &DaySummary) -> Result<String, EngineError> {
    Ok(serde_json::to_string(&StoredDaySlots::from(summary))?)
}

pub fn decode_day_slots(raw: &str) -> Result<StoredDaySlots, EngineError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn decode_recommended_slots(raw: &str) -> Result<RecommendedSlots, EngineError> {
    Ok(serde_json::from_str(raw)?)
}
