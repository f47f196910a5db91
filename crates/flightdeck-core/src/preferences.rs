//! Map style preference.
//!
//! Purely cosmetic. The stored value is free-form text; it is interpreted
//! only when a palette is needed, and anything unrecognized looks like
//! `Standard`.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::{KeyValueStore, MAP_STYLE_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapStyle {
    Terra,
    Monochrome,
    #[default]
    Standard,
    Satellite,
}

/// Hex colors a view paints for a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub accent: &'static str,
    pub background: &'static str,
    pub globe: &'static str,
}

impl MapStyle {
    pub const ALL: [MapStyle; 4] = [
        MapStyle::Terra,
        MapStyle::Monochrome,
        MapStyle::Standard,
        MapStyle::Satellite,
    ];

    /// Case-insensitive; unknown names fall back to `Standard`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "terra" => MapStyle::Terra,
            "monochrome" => MapStyle::Monochrome,
            "satellite" => MapStyle::Satellite,
            _ => MapStyle::Standard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MapStyle::Terra => "Terra",
            MapStyle::Monochrome => "Monochrome",
            MapStyle::Standard => "Standard",
            MapStyle::Satellite => "Satellite",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MapStyle::Terra => "Dark-globe night-style map",
            MapStyle::Monochrome => "Grayscale map",
            MapStyle::Standard => "Normal map",
            MapStyle::Satellite => "Satellite imagery",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            MapStyle::Terra => Palette {
                accent: "#14b8a6",
                background: "#050816",
                globe: "#0b1220",
            },
            MapStyle::Monochrome => Palette {
                accent: "#a3e635",
                background: "#0b0d10",
                globe: "#0f1115",
            },
            MapStyle::Standard => Palette {
                accent: "#3b82f6",
                background: "#0c1522",
                globe: "#0d253f",
            },
            MapStyle::Satellite => Palette {
                accent: "#16a34a",
                background: "#0c140f",
                globe: "#0f1a12",
            },
        }
    }
}

pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored style name, or the default label when absent or unreadable.
    pub fn map_style_name(&self) -> String {
        match self.store.get(MAP_STYLE_KEY) {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => MapStyle::default().label().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load map style");
                MapStyle::default().label().to_string()
            }
        }
    }

    pub fn map_style(&self) -> MapStyle {
        MapStyle::from_name(&self.map_style_name())
    }

    /// Store a style name as given.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn set_map_style(&self, name: &str) -> Result<(), StorageError> {
        self.store.set(MAP_STYLE_KEY, name.trim())
    }
}
