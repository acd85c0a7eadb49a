mod app;
mod entries;
mod layer;
mod leaflet;
mod locator;
mod sidebar;
mod wait;

use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::console;

use app::App;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // The plant data markup is a hard page contract: fail loudly, with no
    // partial-functionality mode, when it is broken.
    let store = match entries::read_entry_store(&document) {
        Ok(store) => store,
        Err(err) => {
            let message = format!("wattmap: initialization failed: {err}");
            console::error_1(&JsValue::from_str(&message));
            panic!("{message}");
        }
    };

    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // If main() is re-entered (dev/hot-reload runtime quirks), drop the
        // old mount so stale effects/signals can't keep mutating app state.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, move || view! { <App entries=store /> });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
