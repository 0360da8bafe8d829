//! Table of radius search results.

use crate::state::AppState;
use dioxus::prelude::*;

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

/// Stations from the last radius search, nearest first.
#[component]
pub fn StationTable() -> Element {
    let state = use_context::<AppState>();
    let rows: Vec<(String, String, String, String, String)> = state
        .search_results
        .read()
        .iter()
        .map(|nearby| {
            let station = &nearby.station;
            (
                station.code(),
                station.name.clone().unwrap_or_default(),
                format_coordinate(station.latitude),
                format_coordinate(station.longitude),
                format!("{:.2}", nearby.distance_km()),
            )
        })
        .collect();

    if rows.is_empty() {
        return rsx! {
            div {
                style: "margin: 8px 0; color: #757575; font-size: 13px;",
                "No stations in range."
            }
        };
    }

    rsx! {
        table {
            style: "border-collapse: collapse; margin: 8px 0; font-size: 13px;",
            thead {
                tr {
                    th { style: "text-align: left; padding: 4px 8px;", "Station" }
                    th { style: "text-align: left; padding: 4px 8px;", "Name" }
                    th { style: "text-align: right; padding: 4px 8px;", "Latitude" }
                    th { style: "text-align: right; padding: 4px 8px;", "Longitude" }
                    th { style: "text-align: right; padding: 4px 8px;", "Distance (km)" }
                }
            }
            tbody {
                for (code, name, lat, lon, distance) in rows {
                    tr {
                        key: "{code}",
                        td { style: "padding: 4px 8px;", "{code}" }
                        td { style: "padding: 4px 8px;", "{name}" }
                        td { style: "text-align: right; padding: 4px 8px;", "{lat}" }
                        td { style: "text-align: right; padding: 4px 8px;", "{lon}" }
                        td { style: "text-align: right; padding: 4px 8px;", "{distance}" }
                    }
                }
            }
        }
    }
}
