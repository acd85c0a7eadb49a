use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use wattmap_shared::{EntryStore, SourceFilter};

use crate::leaflet;
use crate::sidebar::{SearchToggle, Sidebar};

/// Newtype wrappers to give same-shaped signals distinct types for Leptos
/// context. (Without them, `provide_context` would overwrite one with the
/// other.)
#[derive(Clone, Copy)]
pub(crate) struct SidebarOpen(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct SearchQuery(pub RwSignal<String>);
#[derive(Clone, Copy)]
pub(crate) struct SelectedSource(pub RwSignal<SourceFilter>);

/// Immutable plant store, built once by the initialization routine and
/// passed in explicitly rather than discovered through globals.
#[derive(Clone, Copy)]
pub(crate) struct Entries(pub StoredValue<EntryStore>);

/// Root component. Owns the global reactive signals and starts the
/// map-widget discovery task.
#[component]
pub fn App(entries: EntryStore) -> impl IntoView {
    let sidebar_open = RwSignal::new(false);
    let query = RwSignal::new(String::new());
    let source = RwSignal::new(SourceFilter::All);

    provide_context(SidebarOpen(sidebar_open));
    provide_context(SearchQuery(query));
    provide_context(SelectedSource(source));
    provide_context(Entries(StoredValue::new(entries)));

    spawn_local(leaflet::discover());

    view! {
        <SearchToggle />
        <Sidebar />
    }
}
