//! GNSS Station Map
//!
//! Operator view over the station inventory:
//! - radius search around a point, listed nearest first
//! - calendar date <-> day-of-year converter
//! - Leaflet map with station markers and a displacement arrow
//!
//! Data flow:
//! 1. `build.rs` copies `fixtures/stations.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds the CSV into the WASM binary.
//! 3. On mount, the CSV is parsed into `AppState::stations`.
//! 4. Components read and filter the inventory from `AppState`.

use dioxus::prelude::*;
use gnss_core::station::Station;
use gnss_map_ui::components::{
    DisplacementPanel, DoyConverter, ErrorDisplay, LoadingSpinner, RadiusSearch, StationTable,
};
use gnss_map_ui::state::AppState;

/// Station inventory.
const STATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/stations.csv"));

/// Map container DOM element ID used by Leaflet to render into.
const MAP_ID: &str = "gnss-station-map";

const SECTION_TITLE_STYLE: &str = "margin: 16px 0 4px 0; font-size: 14px; color: #1565C0;";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("station-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load the station inventory on mount
    use_effect(move || {
        match Station::parse_station_csv(STATIONS_CSV) {
            Ok(stations) => {
                log::info!("Loaded {} stations", stations.len());
                state.stations.set(stations);
            }
            Err(e) => {
                log::error!("Failed to load stations: {}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load station data: {}", e)));
            }
        }
        state.loading.set(false);
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h2 { style: "margin: 0 0 8px 0;", "GNSS Stations" }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                h4 { style: SECTION_TITLE_STYLE, "Stations near a point" }
                RadiusSearch {}
                StationTable {}

                h4 { style: SECTION_TITLE_STYLE, "Day of year" }
                DoyConverter {}

                h4 { style: SECTION_TITLE_STYLE, "Displacement" }
                DisplacementPanel { map_id: MAP_ID.to_string() }
            }
        }
    }
}
