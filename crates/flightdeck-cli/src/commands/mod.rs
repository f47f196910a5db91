pub mod config;
pub mod fly;
pub mod stats;
pub mod style;

use flightdeck_core::{Config, SqliteStore, StorageError};

/// Open the store named by the config, or the default one.
pub fn open_store(config: &Config) -> Result<SqliteStore, StorageError> {
    match &config.storage.database {
        Some(path) => SqliteStore::open_at(path),
        None => SqliteStore::open(),
    }
}
