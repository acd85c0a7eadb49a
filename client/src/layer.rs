use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::console;

use wattmap_shared::{Coordinate, RankedCandidate, rank_by_distance};

/// Capability boundary for anything the locator can rank and activate.
/// Leaflet layers are adapted to this at the widget boundary; tests use
/// stubs.
pub trait LocatableLayer {
    fn coordinate(&self) -> Coordinate;

    /// Attempt the layer's "open" action. Returns `false` when the layer
    /// has no such capability or the action throws; never propagates.
    fn try_activate(&self) -> bool;
}

/// A Leaflet layer that carries a coordinate (`_latlng` expando).
pub struct MarkerLayer {
    raw: JsValue,
    coordinate: Coordinate,
}

impl MarkerLayer {
    /// Adapt a raw layer. Tile panes and other layers without `_latlng`
    /// are not locatable and yield `None`.
    pub fn adapt(raw: JsValue) -> Option<Self> {
        let latlng = Reflect::get(&raw, &JsValue::from_str("_latlng")).ok()?;
        if latlng.is_undefined() || latlng.is_null() {
            return None;
        }
        let lat = Reflect::get(&latlng, &JsValue::from_str("lat"))
            .ok()?
            .as_f64()?;
        let lon = Reflect::get(&latlng, &JsValue::from_str("lng"))
            .ok()?
            .as_f64()?;
        Some(Self {
            raw,
            coordinate: Coordinate::new(lat, lon),
        })
    }
}

impl LocatableLayer for MarkerLayer {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn try_activate(&self) -> bool {
        let Ok(open_popup) = Reflect::get(&self.raw, &JsValue::from_str("openPopup")) else {
            return false;
        };
        // A layer without an openPopup capability is a no-op, not an error.
        let Some(open_popup) = open_popup.dyn_ref::<Function>() else {
            return false;
        };
        match open_popup.call0(&self.raw) {
            Ok(_) => true,
            Err(err) => {
                console::warn_2(&"wattmap: openPopup failed".into(), &err);
                false
            }
        }
    }
}

/// Rank coordinate-bearing layers nearest-first relative to `target`.
pub fn rank_layers<L: LocatableLayer>(
    target: Coordinate,
    layers: Vec<L>,
) -> Vec<RankedCandidate<L>> {
    let items = layers
        .into_iter()
        .map(|layer| {
            let coordinate = layer.coordinate();
            (layer, coordinate)
        })
        .collect();
    rank_by_distance(target, items)
}

/// Primary activation: open the closest candidate, if any.
pub fn activate_closest<L: LocatableLayer>(ranked: &[RankedCandidate<L>]) -> bool {
    match ranked.first() {
        Some(closest) => closest.item.try_activate(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StubLayer {
        coordinate: Coordinate,
        can_open: bool,
        activations: Rc<Cell<u32>>,
    }

    impl StubLayer {
        fn new(lat: f64, lon: f64, can_open: bool) -> Self {
            Self {
                coordinate: Coordinate::new(lat, lon),
                can_open,
                activations: Rc::new(Cell::new(0)),
            }
        }
    }

    impl LocatableLayer for StubLayer {
        fn coordinate(&self) -> Coordinate {
            self.coordinate
        }

        fn try_activate(&self) -> bool {
            if !self.can_open {
                return false;
            }
            self.activations.set(self.activations.get() + 1);
            true
        }
    }

    #[test]
    fn only_the_closest_layer_is_activated() {
        let target = Coordinate::new(10.0, 20.0);
        let near = StubLayer::new(10.0, 20.0, true);
        let far = StubLayer::new(13.0, 24.0, true);
        let near_count = near.activations.clone();
        let far_count = far.activations.clone();

        let ranked = rank_layers(target, vec![far, near]);
        assert_eq!(ranked[0].distance, 0.0);
        assert_eq!(ranked[1].distance, 5.0);

        assert!(activate_closest(&ranked));
        assert_eq!(near_count.get(), 1);
        assert_eq!(far_count.get(), 0);
    }

    #[test]
    fn closest_layer_without_open_capability_is_a_no_op() {
        let target = Coordinate::new(0.0, 0.0);
        let silent = StubLayer::new(0.0, 0.0, false);
        let ranked = rank_layers(target, vec![silent]);
        assert!(!activate_closest(&ranked));
    }

    #[test]
    fn empty_ranking_activates_nothing() {
        let ranked: Vec<RankedCandidate<StubLayer>> = Vec::new();
        assert!(!activate_closest(&ranked));
    }
}
