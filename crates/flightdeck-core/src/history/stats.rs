//! History aggregation.
//!
//! Pure functions over normalized entries. Nothing here touches storage;
//! see [`FlightLog::stats`](super::FlightLog::stats) for the read path.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use super::entry::{normalize, HistoryEntry};
use super::record::FlightStatus;
use crate::display::format_minutes;

/// How many entries `recent` keeps.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStats {
    pub flight_count: usize,
    pub total_minutes: f64,
    pub completed_count: usize,
    pub aborted_count: usize,
    /// Distinct calendar days with at least one departure, in the time zone
    /// the stats were computed for (UTC unless stated).
    ///
    /// This is a count of days, not a run of consecutive days.
    pub streak_days: usize,
    /// Most recent flights first.
    pub recent: Vec<HistoryEntry>,
}

impl FlightStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        Self::from_entries_in(entries, &Utc)
    }

    /// Like [`from_entries`](Self::from_entries), with departure days taken
    /// in `tz`.
    pub fn from_entries_in<Tz: TimeZone>(entries: &[HistoryEntry], tz: &Tz) -> Self {
        let mut stats = Self {
            flight_count: entries.len(),
            ..Self::default()
        };

        let mut days = HashSet::new();
        for entry in entries {
            stats.total_minutes += entry.duration_minutes;
            match entry.status {
                Some(FlightStatus::Completed) => stats.completed_count += 1,
                Some(FlightStatus::Aborted) => stats.aborted_count += 1,
                None => {}
            }
            days.insert(entry.started_at.with_timezone(tz).date_naive());
        }
        stats.streak_days = days.len();

        let mut recent = entries.to_vec();
        // Stable sort keeps insertion order among equal timestamps.
        recent.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        recent.truncate(RECENT_LIMIT);
        stats.recent = recent;

        stats
    }

    /// Total time as `"Xh Ym"`, or `"Ym"` under an hour.
    pub fn formatted_total(&self) -> String {
        format_minutes(self.total_minutes)
    }

    pub fn is_empty(&self) -> bool {
        self.flight_count == 0
    }
}

/// Aggregate a raw stored list.
pub fn aggregate(values: &[Value]) -> FlightStats {
    FlightStats::from_entries(&normalize(values))
}

/// Aggregate the raw `flights` value as stored. Absent, malformed, or
/// non-array input yields empty statistics.
pub fn aggregate_json(stored: Option<&str>) -> FlightStats {
    let values = stored
        .and_then(|s| serde_json::from_str::<Value>(s).ok())
        .and_then(|v| match v {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default();
    aggregate(&values)
}
