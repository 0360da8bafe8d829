//! `localStorage`-backed map settings.

use gnss_core::map_settings::{MapSettings, SettingsStore};

/// Storage key for the last map view.
pub const MAP_VIEW_KEY: &str = "gnss.map.view";

/// Keeps the last map view in the browser's `localStorage`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStorageSettingsStore {
    key: String,
}

impl LocalStorageSettingsStore {
    pub fn new(key: impl Into<String>) -> Self {
        LocalStorageSettingsStore { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl Default for LocalStorageSettingsStore {
    fn default() -> Self {
        Self::new(MAP_VIEW_KEY)
    }
}

impl SettingsStore for LocalStorageSettingsStore {
    fn load(&self) -> MapSettings {
        let raw = Self::storage().and_then(|storage| storage.get_item(&self.key).ok().flatten());
        MapSettings::from_json_or_default(raw.as_deref())
    }

    fn save(&self, settings: &MapSettings) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable, map view not saved");
            return;
        };
        if let Err(e) = storage.set_item(&self.key, &settings.to_json()) {
            log::warn!("Failed to save map view: {:?}", e);
        }
    }
}
