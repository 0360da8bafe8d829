//! Typed wrappers around the Leaflet map via `js_sys`.
//!
//! Map helpers live in `assets/js/leaflet-bridge.js` and are evaluated as
//! globals (no ES modules) and exposed via `window.*`. Fire-and-forget calls
//! go through `js_sys::eval()`; calls that return data look the global
//! function up and apply it directly.

use gnss_core::displacement::{LayerId, MapHost, PixelPoint, StrokeStyle};
use gnss_core::geo::GeoPoint;
use gnss_core::map_settings::MapSettings;
use gnss_core::station::Station;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Embed the bridge at compile time
static LEAFLET_BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('GNSS JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Call a global function by name, returning `None` when it is missing or
/// throws.
fn call_global(name: &str, args: &[JsValue]) -> Option<JsValue> {
    let func = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name)).ok()?;
    let func: js_sys::Function = func.dyn_into().ok()?;
    let args: js_sys::Array = args.iter().collect();
    match func.apply(&JsValue::NULL, &args) {
        Ok(value) if value.is_null() || value.is_undefined() => None,
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} failed: {:?}", name, e);
            None
        }
    }
}

/// Call a global returning a JSON string and decode it.
fn call_global_json<T: serde::de::DeserializeOwned>(name: &str, args: &[JsValue]) -> Option<T> {
    let text = call_global(name, args)?.as_string()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} returned unexpected JSON: {}", name, e);
            None
        }
    }
}

/// Evaluate the bridge script and start loading Leaflet. Call once at app
/// startup.
pub fn load_map_scripts() {
    let _ = js_sys::eval(LEAFLET_BRIDGE_JS);
    call_js("window.gnssEnsureLeaflet();");
}

/// Create the Leaflet map in `container_id` at the given view.
///
/// Uses a polling loop to wait for Leaflet to load and the container DOM
/// element to exist before creating the map.
pub fn init_map(container_id: &str, view: &MapSettings) {
    let (lat, lon, zoom) = (view.center.lat, view.center.lon, view.zoom);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__gnssBridgeReady &&
                    typeof L !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.gnssInitMap('{container_id}', {lat}, {lon}, {zoom});
                    }} catch(e) {{ console.error('[GNSS] gnssInitMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Run `callback` whenever the map is zoomed or panned, and once as soon as
/// the map exists.
pub fn on_view_change(container_id: &str, callback: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    let _ = call_global(
        "gnssOnViewChange",
        &[JsValue::from_str(container_id), closure.as_ref().clone()],
    );
    log::debug!("Registered view callback for {}", container_id);
    // the map keeps calling this for the page's lifetime
    closure.forget();
}

/// Current center and zoom, or `None` before the map exists.
pub fn current_view(container_id: &str) -> Option<MapSettings> {
    call_global_json("gnssMapView", &[JsValue::from_str(container_id)])
}

/// Replace the station markers shown on the map.
pub fn set_stations(container_id: &str, stations: &[Station]) {
    let stations_json = serde_json::to_string(stations).unwrap_or_default();
    let _ = call_global(
        "gnssSetStations",
        &[JsValue::from_str(container_id), JsValue::from_str(&stations_json)],
    );
}

/// [`MapHost`] backed by a Leaflet map created with [`init_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeafletHost {
    container_id: String,
}

impl LeafletHost {
    pub fn new(container_id: impl Into<String>) -> Self {
        LeafletHost {
            container_id: container_id.into(),
        }
    }
}

impl MapHost for LeafletHost {
    fn lat_lng_to_container_point(&self, point: GeoPoint) -> Option<PixelPoint> {
        call_global_json(
            "gnssProject",
            &[
                JsValue::from_str(&self.container_id),
                JsValue::from_f64(point.lat),
                JsValue::from_f64(point.lon),
            ],
        )
    }

    fn container_point_to_lat_lng(&self, pixel: PixelPoint) -> Option<GeoPoint> {
        call_global_json(
            "gnssUnproject",
            &[
                JsValue::from_str(&self.container_id),
                JsValue::from_f64(pixel.x),
                JsValue::from_f64(pixel.y),
            ],
        )
    }

    fn add_polyline(&mut self, points: &[GeoPoint], style: &StrokeStyle) -> Option<LayerId> {
        let points_json = serde_json::to_string(points).ok()?;
        let id = call_global(
            "gnssAddPolyline",
            &[
                JsValue::from_str(&self.container_id),
                JsValue::from_str(&points_json),
                JsValue::from_str(&style.color),
                JsValue::from_f64(style.weight),
            ],
        )?
        .as_f64()?;
        Some(LayerId(id as u32))
    }

    fn remove_layer(&mut self, layer: LayerId) {
        let _ = call_global("gnssRemoveLayer", &[JsValue::from_f64(f64::from(layer.0))]);
    }
}
