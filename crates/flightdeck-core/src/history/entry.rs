//! Normalization of stored flight records.
//!
//! The stored list may hold records from older builds (`duration` instead of
//! `durationMinutes`), partial records, or plain garbage. Everything is
//! coerced here, once, into [`HistoryEntry`]; callers never look at raw
//! JSON fields themselves.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{FlightRecord, FlightStatus};

/// A stored flight that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub origin: String,
    pub destination: String,
    pub duration_minutes: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// `None` when the stored status is missing or not a known outcome.
    pub status: Option<FlightStatus>,
}

/// Field-tolerant view of one stored element.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlight {
    #[serde(default)]
    origin: Option<Value>,
    #[serde(default)]
    destination: Option<Value>,
    #[serde(default)]
    duration_minutes: Option<Value>,
    /// Legacy name for `durationMinutes`.
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    started_at: Option<Value>,
    #[serde(default)]
    ended_at: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
}

impl HistoryEntry {
    /// Normalize one stored element, or `None` if it cannot be counted.
    ///
    /// Requires a finite non-negative numeric duration (current field first,
    /// legacy field when the current one is absent or null) and a parseable
    /// `startedAt` string. Only JSON objects qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let raw = RawFlight::deserialize(value).ok()?;

        let duration_minutes = raw
            .duration_minutes
            .or(raw.duration)
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|d| d.is_finite() && *d >= 0.0)?;

        let started_at = raw
            .started_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_timestamp)?;

        let ended_at = raw
            .ended_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_timestamp);

        let status = raw
            .status
            .as_ref()
            .and_then(Value::as_str)
            .and_then(FlightStatus::parse);

        Some(Self {
            origin: string_or_empty(raw.origin),
            destination: string_or_empty(raw.destination),
            duration_minutes,
            started_at,
            ended_at,
            status,
        })
    }

    /// Timestamp used for "most recent" ordering.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.ended_at.unwrap_or(self.started_at)
    }
}

impl From<&FlightRecord> for HistoryEntry {
    fn from(record: &FlightRecord) -> Self {
        Self {
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            duration_minutes: record.duration_minutes,
            started_at: record.started_at,
            ended_at: Some(record.ended_at),
            status: Some(record.status),
        }
    }
}

/// Normalize a whole stored list, dropping what fails validation.
pub fn normalize(values: &[Value]) -> Vec<HistoryEntry> {
    values.iter().filter_map(HistoryEntry::from_value).collect()
}

/// Parse an RFC 3339 timestamp, falling back to naive date-times and bare
/// dates interpreted as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn string_or_empty(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}
