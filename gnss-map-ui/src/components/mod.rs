//! Reusable Dioxus RSX components for the GNSS station map.

mod displacement_panel;
mod doy_converter;
mod error_display;
mod loading_spinner;
mod map_container;
mod radius_search;
mod station_table;

pub use displacement_panel::DisplacementPanel;
pub use doy_converter::DoyConverter;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use radius_search::RadiusSearch;
pub use station_table::StationTable;
