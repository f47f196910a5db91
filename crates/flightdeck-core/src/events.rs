use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::SessionState;
use crate::history::FlightRecord;

/// Every state change of a flight session produces an Event.
/// The CLI prints them; the controller reacts to `Ended`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlightEvent {
    Departed {
        origin: String,
        destination: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Ticked {
        remaining_secs: u64,
        progress: f64,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Emitted once per session, on the transition into `Ended`.
    Ended { record: FlightRecord },
    Snapshot {
        state: SessionState,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl FlightEvent {
    pub fn is_ended(&self) -> bool {
        matches!(self, FlightEvent::Ended { .. })
    }
}
