//! Persisted map view (last center and zoom).
//!
//! The map component receives a [`SettingsStore`] instead of reaching for
//! browser storage itself; the web crate supplies a `localStorage` store.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Zoom used when nothing has been saved yet.
pub const DEFAULT_ZOOM: u8 = 3;

/// Last map position shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            center: GeoPoint::new(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapSettings {
    /// Decode stored JSON, falling back to defaults on anything unreadable.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(serde_json::from_str::<MapSettings>) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Stored map settings unreadable, using defaults: {}", e);
                MapSettings::default()
            }
            None => MapSettings::default(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Load/save of the last map view.
pub trait SettingsStore {
    fn load(&self) -> MapSettings;
    fn save(&self, settings: &MapSettings);
}

/// Store kept in memory; used by tests and native tools.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    stored: RefCell<Option<String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, as if a previous session had saved it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemorySettingsStore {
            stored: RefCell::new(Some(raw.into())),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> MapSettings {
        MapSettings::from_json_or_default(self.stored.borrow().as_deref())
    }

    fn save(&self, settings: &MapSettings) {
        *self.stored.borrow_mut() = Some(settings.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_saved_view_gives_default() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load(), MapSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemorySettingsStore::new();
        let settings = MapSettings {
            center: GeoPoint::new(-0.2105, -78.4935),
            zoom: 9,
        };
        store.save(&settings);
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let store = MemorySettingsStore::with_raw("{\"center\": 12");
        assert_eq!(store.load(), MapSettings::default());
    }

    #[test]
    fn test_json_shape() {
        let settings = MapSettings {
            center: GeoPoint::new(1.5, 2.5),
            zoom: 4,
        };
        assert_eq!(
            settings.to_json(),
            r#"{"center":{"lat":1.5,"lon":2.5},"zoom":4}"#
        );
    }
}
