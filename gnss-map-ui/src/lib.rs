//! Shared Dioxus components and Leaflet bridge for the GNSS station map.
//!
//! This crate provides:
//! - `leaflet_bridge`: Rust wrappers for the Leaflet map, including a `MapHost`
//! - `settings_store`: `localStorage` persistence of the last map view
//! - `form_hook`: the form-state reducer as a Dioxus hook
//! - `forms`: field maps for the search, converter and displacement forms
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components

pub mod components;
pub mod form_hook;
pub mod forms;
pub mod leaflet_bridge;
pub mod settings_store;
pub mod state;
