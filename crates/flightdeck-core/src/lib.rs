//! # Flightdeck Core Library
//!
//! This library provides the core logic for Flightdeck, a focus timer themed
//! as flight tracking. A user plans a flight (origin, destination, minutes),
//! a per-second countdown runs until landing or an early abort, and every
//! finished flight is appended to a locally persisted history.
//!
//! ## Architecture
//!
//! - **Flight Session**: A tick-counting state machine; the caller (or the
//!   controller's tick loop) invokes `tick()` once per second
//! - **Controller**: Drives the session on a tokio interval and finalizes the
//!   flight exactly once (persist, then leave the screen)
//! - **Storage**: A key-value seam with SQLite and in-memory backends
//! - **History**: Normalization of stored records and statistics
//!
//! ## Key Components
//!
//! - [`FlightSession`]: Countdown state machine
//! - [`FlightController`]: Tick loop and finalization
//! - [`FlightLog`]: Append-only flight history over a [`KeyValueStore`]
//! - [`FlightStats`]: Aggregated history statistics
//! - [`Config`]: Application configuration management

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod flight;
pub mod history;
pub mod preferences;
pub mod storage;

pub use config::Config;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::FlightEvent;
pub use flight::{
    progress_fraction, FlightCommand, FlightController, FlightPlan, FlightSession, Navigator,
    NoopNavigator, SessionState,
};
pub use history::{FlightLog, FlightRecord, FlightStats, FlightStatus, HistoryEntry};
pub use preferences::{MapStyle, Palette, Preferences};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
