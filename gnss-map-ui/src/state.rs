//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use gnss_core::station::{NearbyStation, Station};

/// Shared application state for the station map.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Full station inventory
    pub stations: Signal<Vec<Station>>,
    /// Result of the last radius search, nearest first
    pub search_results: Signal<Vec<NearbyStation>>,
    /// Validation message for the radius search form
    pub search_error: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            stations: Signal::new(Vec::new()),
            search_results: Signal::new(Vec::new()),
            search_error: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
