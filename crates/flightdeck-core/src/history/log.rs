//! Append-only flight history over a [`KeyValueStore`].
//!
//! The whole list lives under one key as a JSON array, so appending is a
//! read-modify-write. There is a single writer per device; concurrent
//! writers would be last-writer-wins.

use chrono::TimeZone;
use serde_json::Value;

use super::entry::{normalize, HistoryEntry};
use super::record::FlightRecord;
use super::stats::FlightStats;
use crate::error::Result;
use crate::storage::{KeyValueStore, FLIGHTS_KEY};

pub struct FlightLog<S> {
    store: S,
}

impl<S: KeyValueStore> FlightLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored list as raw JSON values.
    ///
    /// An absent key, invalid JSON, or a top-level value that isn't an array
    /// all read as an empty list.
    ///
    /// # Errors
    /// Returns an error only if the store itself fails.
    pub fn load_raw(&self) -> Result<Vec<Value>> {
        let Some(stored) = self.store.get(FLIGHTS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&stored) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "stored flights is not an array");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::debug!(error = %e, "stored flights is not valid JSON");
                Ok(Vec::new())
            }
        }
    }

    /// Append a finished flight and return the new list length.
    ///
    /// Existing elements are written back untouched, including ones that
    /// would not pass normalization.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn append(&self, record: &FlightRecord) -> Result<usize> {
        let mut items = self.load_raw()?;
        items.push(serde_json::to_value(record)?);
        let encoded = serde_json::to_string(&items)?;
        self.store.set(FLIGHTS_KEY, &encoded)?;
        tracing::debug!(len = items.len(), status = record.status.as_str(), "flight appended");
        Ok(items.len())
    }

    /// Normalized entries. A failed read is logged and treated as no history.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        match self.load_raw() {
            Ok(items) => normalize(&items),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load flight history");
                Vec::new()
            }
        }
    }

    /// Statistics over the stored history. Never fails.
    pub fn stats(&self) -> FlightStats {
        FlightStats::from_entries(&self.entries())
    }

    /// [`stats`](Self::stats) with departure days counted in `tz`.
    pub fn stats_in<Tz: TimeZone>(&self, tz: &Tz) -> FlightStats {
        FlightStats::from_entries_in(&self.entries(), tz)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
