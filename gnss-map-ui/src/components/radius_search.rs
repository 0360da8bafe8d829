//! Radius search form: stations within N km of a point.

use crate::components::ErrorDisplay;
use crate::form_hook::use_form_reducer;
use crate::forms::{RadiusField, RadiusSearchForm};
use crate::state::AppState;
use dioxus::prelude::*;
use gnss_core::form_state::FormAction;
use gnss_core::station::stations_within_radius;

/// Latitude/longitude/radius inputs that fill `AppState::search_results`.
#[component]
pub fn RadiusSearch() -> Element {
    let mut state = use_context::<AppState>();
    let mut form = use_form_reducer(RadiusSearchForm::default);
    let current = form.value();

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        match form.value().to_query() {
            Ok(query) => {
                let results = stations_within_radius(
                    &state.stations.read(),
                    &query.center,
                    query.radius_km,
                );
                log::info!(
                    "{} stations within {} km of ({}, {})",
                    results.len(),
                    query.radius_km,
                    query.center.lat,
                    query.center.lon
                );
                state.search_results.set(results);
                state.search_error.set(None);
            }
            Err(msg) => state.search_error.set(Some(msg)),
        }
    };

    let on_clear = move |_: Event<MouseData>| {
        form.dispatch(FormAction::Clear);
        state.search_results.set(Vec::new());
        state.search_error.set(None);
    };

    rsx! {
        form {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            onsubmit: on_submit,
            label {
                style: "font-weight: bold;",
                "Latitude: "
                input {
                    r#type: "text",
                    value: "{current.latitude}",
                    style: "width: 90px;",
                    oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                        input_name: RadiusField::Latitude,
                        input_value: evt.value(),
                    }),
                }
            }
            label {
                style: "font-weight: bold;",
                "Longitude: "
                input {
                    r#type: "text",
                    value: "{current.longitude}",
                    style: "width: 90px;",
                    oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                        input_name: RadiusField::Longitude,
                        input_value: evt.value(),
                    }),
                }
            }
            label {
                style: "font-weight: bold;",
                "Radius: "
                input {
                    r#type: "number",
                    value: "{current.radius_km}",
                    min: "0",
                    style: "width: 70px;",
                    oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                        input_name: RadiusField::RadiusKm,
                        input_value: evt.value(),
                    }),
                }
                " km"
            }
            button { r#type: "submit", "Search" }
            button { r#type: "button", onclick: on_clear, "Clear" }
        }
        if let Some(msg) = (state.search_error)() {
            ErrorDisplay { message: msg, inline: true }
        }
    }
}
