use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    /// Countdown reached zero.
    Completed,
    /// User ended the flight early.
    Aborted,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Completed => "completed",
            FlightStatus::Aborted => "aborted",
        }
    }

    /// Exact match only; any other spelling is not a known outcome.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(FlightStatus::Completed),
            "aborted" => Some(FlightStatus::Aborted),
            _ => None,
        }
    }
}

/// One finished flight, as written to the `flights` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    pub origin: String,
    pub destination: String,
    /// Planned length in minutes.
    pub duration_minutes: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub status: FlightStatus,
}
