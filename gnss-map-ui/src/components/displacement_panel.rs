//! Station map with a co/post-seismic displacement arrow.
//!
//! The arrow is recomputed whenever the displacement inputs change and
//! whenever Leaflet reports a zoom or pan; every redraw removes the
//! previous strokes first.

use crate::components::{ErrorDisplay, MapContainer};
use crate::form_hook::use_form_reducer;
use crate::forms::{DisplacementField, DisplacementForm};
use crate::leaflet_bridge::{self, LeafletHost};
use crate::settings_store::LocalStorageSettingsStore;
use crate::state::AppState;
use dioxus::prelude::*;
use gnss_core::displacement::DisplacementArrow;
use gnss_core::form_state::FormAction;
use gnss_core::map_settings::SettingsStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Arrow color on the map.
const ARROW_COLOR: &str = "#C62828";

type SharedArrow = Rc<RefCell<Option<DisplacementArrow>>>;

fn redraw(arrow: &SharedArrow, map_id: &str) {
    let mut host = LeafletHost::new(map_id);
    if let Some(arrow) = arrow.borrow_mut().as_mut() {
        if arrow.redraw(&mut host).is_none() {
            log::debug!("Map {} not ready, arrow deferred", map_id);
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct DisplacementPanelProps {
    /// DOM id of the map container
    pub map_id: String,
}

/// Leaflet map, station markers and the displacement form.
#[component]
pub fn DisplacementPanel(props: DisplacementPanelProps) -> Element {
    let state = use_context::<AppState>();
    let mut form = use_form_reducer(DisplacementForm::default);
    let arrow: SharedArrow = use_hook(|| Rc::new(RefCell::new(None)));
    let mut input_error = use_signal(|| None::<String>);
    let current = form.value();

    // Create the map once, at the last saved view, and follow zoom/pan
    let map_id = props.map_id.clone();
    let view_arrow = arrow.clone();
    use_effect(move || {
        let store = LocalStorageSettingsStore::default();
        leaflet_bridge::load_map_scripts();
        leaflet_bridge::init_map(&map_id, &store.load());

        let callback_id = map_id.clone();
        let view_arrow = view_arrow.clone();
        leaflet_bridge::on_view_change(&map_id, move || {
            redraw(&view_arrow, &callback_id);
            if let Some(view) = leaflet_bridge::current_view(&callback_id) {
                store.save(&view);
            }
        });
    });

    // Station markers follow the loaded inventory
    let map_id = props.map_id.clone();
    use_effect(move || {
        leaflet_bridge::set_stations(&map_id, &state.stations.read());
    });

    // Redraw whenever the displacement inputs change
    let map_id = props.map_id.clone();
    let input_arrow = arrow.clone();
    use_effect(move || {
        let values = form.value();
        let all_blank = values.north_m.trim().is_empty() && values.east_m.trim().is_empty();
        match values.to_vector() {
            Ok(vector) => {
                input_error.set(None);
                {
                    let mut slot = input_arrow.borrow_mut();
                    match slot.as_mut() {
                        Some(existing) => existing.set_vector(vector),
                        None => *slot = Some(DisplacementArrow::new(vector, ARROW_COLOR)),
                    }
                }
                redraw(&input_arrow, &map_id);
            }
            Err(msg) => {
                if let Some(mut existing) = input_arrow.borrow_mut().take() {
                    existing.clear(&mut LeafletHost::new(map_id.as_str()));
                }
                input_error.set(if all_blank { None } else { Some(msg) });
            }
        }
    });

    let field_input = move |label: &'static str, field: DisplacementField, value: String| {
        rsx! {
            label {
                style: "font-weight: bold;",
                "{label} "
                input {
                    r#type: "text",
                    value: "{value}",
                    style: "width: 80px;",
                    oninput: move |evt: Event<FormData>| form.dispatch(FormAction::ChangeValue {
                        input_name: field,
                        input_value: evt.value(),
                    }),
                }
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            {field_input("Lat:", DisplacementField::Latitude, current.latitude.clone())}
            {field_input("Lon:", DisplacementField::Longitude, current.longitude.clone())}
            {field_input("North (m):", DisplacementField::NorthM, current.north_m.clone())}
            {field_input("East (m):", DisplacementField::EastM, current.east_m.clone())}
            {field_input("Magnitude:", DisplacementField::Magnitude, current.magnitude.clone())}
            button {
                r#type: "button",
                onclick: move |_: Event<MouseData>| form.dispatch(FormAction::Clear),
                "Clear"
            }
        }
        if let Some(msg) = input_error() {
            ErrorDisplay { message: msg, inline: true }
        }
        MapContainer { id: props.map_id.clone() }
    }
}
