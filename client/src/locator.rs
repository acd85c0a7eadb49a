use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

use wattmap_shared::Coordinate;

use crate::layer::{MarkerLayer, activate_closest, rank_layers};
use crate::leaflet;
use crate::wait::{LocateToken, await_condition, sleep};

/// Zoom level applied when panning to a plant.
const LOCATE_ZOOM: f64 = 13.0;
/// Delay after centering before the primary popup-open attempt, letting
/// the pan settle.
const PRIMARY_DELAY_MS: u32 = 500;
/// Delay after centering before the fallback click pass.
const FALLBACK_DELAY_MS: u32 = 800;
/// Max flat-plane distance between a projected marker center and the
/// target for the fallback pass to click it.
const FALLBACK_TOLERANCE: f64 = 0.01;

/// Pan the map to `target` and try to activate the plant's marker.
///
/// Fire-and-forget: every failure past this point is a console diagnostic.
/// A later `locate` call supersedes this one at its next suspension point.
pub fn locate(target: Coordinate, entry_id: String, close_sidebar: impl FnOnce() + 'static) {
    let token = LocateToken::issue();
    spawn_local(async move {
        run_locate(target, &entry_id, token, close_sidebar).await;
    });
}

async fn run_locate(
    target: Coordinate,
    entry_id: &str,
    token: LocateToken,
    close_sidebar: impl FnOnce(),
) {
    console::info_1(
        &format!(
            "wattmap: locating plant {entry_id} at [{}, {}]",
            target.lat, target.lon
        )
        .into(),
    );

    await_condition(leaflet::installed, leaflet::WIDGET_POLL_INTERVAL_MS).await;
    if token.is_stale() {
        return;
    }

    close_sidebar();

    let Some(candidates) = leaflet::with_widget(|map| {
        map.set_view(target, LOCATE_ZOOM);
        let layers: Vec<MarkerLayer> = map
            .layers()
            .into_iter()
            .filter_map(MarkerLayer::adapt)
            .collect();
        rank_layers(target, layers)
    }) else {
        return;
    };

    sleep(PRIMARY_DELAY_MS).await;
    if token.is_stale() {
        return;
    }

    if candidates.is_empty() {
        console::info_1(&"wattmap: no coordinate-bearing layers to activate".into());
    } else {
        activate_closest(&candidates);
    }

    sleep(FALLBACK_DELAY_MS - PRIMARY_DELAY_MS).await;
    if token.is_stale() {
        return;
    }

    fallback_click_pass(target);
}

/// Second pass, run regardless of whether the primary activation landed:
/// re-project every on-screen interactive marker element back to a map
/// coordinate and click each one within tolerance of the target.
fn fallback_click_pass(target: Coordinate) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Ok(markers) = document.query_selector_all(".leaflet-interactive") else {
        return;
    };

    let mut elements: Vec<web_sys::Element> = Vec::new();
    let mut centers: Vec<Option<Coordinate>> = Vec::new();
    for idx in 0..markers.length() {
        let Some(element) = markers
            .item(idx)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let rect = element.get_bounding_client_rect();
        let center_x = rect.left() + rect.width() / 2.0;
        let center_y = rect.top() + rect.height() / 2.0;
        let projected =
            leaflet::with_widget(|map| map.container_point_to_coordinate(center_x, center_y));
        centers.push(match projected {
            Some(Ok(coordinate)) => Some(coordinate),
            Some(Err(err)) => {
                console::warn_2(&"wattmap: marker projection failed".into(), &err);
                None
            }
            None => None,
        });
        elements.push(element);
    }

    for idx in fallback_matches(target, &centers, FALLBACK_TOLERANCE) {
        console::info_1(&format!("wattmap: clicking marker element {idx} near target").into());
        synthesize_click(&elements[idx]);
    }
}

/// Indices of projected marker centers within `tolerance` of `target`.
/// Every match is returned: the pass does not stop at the first hit.
fn fallback_matches(
    target: Coordinate,
    centers: &[Option<Coordinate>],
    tolerance: f64,
) -> Vec<usize> {
    centers
        .iter()
        .enumerate()
        .filter_map(|(idx, center)| center.map(|c| (idx, target.distance_to(c))))
        .filter(|&(_, distance)| distance < tolerance)
        .map(|(idx, _)| idx)
        .collect()
}

/// Click an element. Circle markers are SVG paths, which have no native
/// `click()`, so a synthetic bubbling mouse event covers both cases.
fn synthesize_click(element: &web_sys::Element) {
    if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
        html.click();
        return;
    }
    let init = web_sys::MouseEventInit::new();
    init.set_bubbles(true);
    match web_sys::MouseEvent::new_with_mouse_event_init_dict("click", &init) {
        Ok(event) => {
            let _ = element.dispatch_event(&event);
        }
        Err(err) => console::warn_2(&"wattmap: could not synthesize click".into(), &err),
    }
}
