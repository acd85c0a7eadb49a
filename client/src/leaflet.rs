use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::console;

use wattmap_shared::Coordinate;

use crate::wait;

/// How often to re-check for the Leaflet widget while it initializes.
pub const WIDGET_POLL_INTERVAL_MS: u32 = 100;

/// Handle to the embedded Leaflet map, consumed as an opaque capability:
/// center/zoom, layer enumeration, and pixel-to-coordinate projection.
#[derive(Clone)]
pub struct MapWidget {
    map: JsValue,
}

impl MapWidget {
    /// Look up the folium container and its attached native handle. Returns
    /// `None` until the widget has finished initializing.
    pub fn find(document: &web_sys::Document) -> Option<Self> {
        let container = document.query_selector(".folium-map").ok()??;
        let handle = Reflect::get(container.as_ref(), &JsValue::from_str("_leaflet_map")).ok()?;
        if handle.is_undefined() || handle.is_null() {
            return None;
        }
        Some(Self { map: handle })
    }

    fn method(&self, name: &str) -> Result<Function, JsValue> {
        Reflect::get(&self.map, &JsValue::from_str(name))?
            .dyn_into::<Function>()
            .map_err(|_| JsValue::from_str(&format!("map.{name} is not a function")))
    }

    /// Center the map on `center` at the given zoom level.
    pub fn set_view(&self, center: Coordinate, zoom: f64) {
        let point = Array::of2(&JsValue::from_f64(center.lat), &JsValue::from_f64(center.lon));
        let result = self
            .method("setView")
            .and_then(|set_view| set_view.call2(&self.map, point.as_ref(), &JsValue::from_f64(zoom)));
        if let Err(err) = result {
            console::warn_2(&"wattmap: setView failed".into(), &err);
        }
    }

    /// Every layer currently attached to the map, in enumeration order.
    pub fn layers(&self) -> Vec<JsValue> {
        let collected = Rc::new(RefCell::new(Vec::new()));
        let sink = collected.clone();
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |layer: JsValue| {
            sink.borrow_mut().push(layer);
        });
        let result = self
            .method("eachLayer")
            .and_then(|each_layer| each_layer.call1(&self.map, callback.as_ref().unchecked_ref()));
        if let Err(err) = result {
            console::warn_2(&"wattmap: eachLayer failed".into(), &err);
        }
        drop(callback);
        collected.take()
    }

    /// Project a container pixel back to a map coordinate.
    pub fn container_point_to_coordinate(&self, x: f64, y: f64) -> Result<Coordinate, JsValue> {
        let point = Array::of2(&JsValue::from_f64(x), &JsValue::from_f64(y));
        let latlng = self
            .method("containerPointToLatLng")?
            .call1(&self.map, point.as_ref())?;
        let lat = Reflect::get(&latlng, &JsValue::from_str("lat"))
            .ok()
            .and_then(|v| v.as_f64());
        let lng = Reflect::get(&latlng, &JsValue::from_str("lng"))
            .ok()
            .and_then(|v| v.as_f64());
        match (lat, lng) {
            (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(JsValue::from_str("projection returned no lat/lng")),
        }
    }
}

thread_local! {
    static MAP_WIDGET: RefCell<Option<MapWidget>> = const { RefCell::new(None) };
}

pub fn installed() -> bool {
    MAP_WIDGET.with(|slot| slot.borrow().is_some())
}

pub fn with_widget<R>(f: impl FnOnce(&MapWidget) -> R) -> Option<R> {
    MAP_WIDGET.with(|slot| slot.borrow().as_ref().map(f))
}

/// Poll the document until the Leaflet widget materializes, then install it
/// process-wide. Runs until found: an absent widget is not an error.
pub async fn discover() {
    loop {
        let found = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| MapWidget::find(&document));
        if let Some(widget) = found {
            MAP_WIDGET.with(|slot| *slot.borrow_mut() = Some(widget));
            console::info_1(&"wattmap: map widget attached".into());
            return;
        }
        wait::sleep(WIDGET_POLL_INTERVAL_MS).await;
    }
}
