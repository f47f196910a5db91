//! Flight history: the persisted record list and what is computed from it.

mod entry;
mod log;
mod record;
mod stats;

pub use entry::{normalize, parse_timestamp, HistoryEntry};
pub use log::FlightLog;
pub use record::{FlightRecord, FlightStatus};
pub use stats::{aggregate, aggregate_json, FlightStats, RECENT_LIMIT};
