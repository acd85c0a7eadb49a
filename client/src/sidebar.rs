use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

use wattmap_shared::{EnergySource, Entry, FilterState, SourceFilter, apply_filter, visible_count};

use crate::app::{Entries, SearchQuery, SelectedSource, SidebarOpen};
use crate::locator;

fn source_label(code: &str) -> String {
    match EnergySource::from_code(code) {
        Some(source) => source.label().to_string(),
        None => code.to_string(),
    }
}

/// Marker dot color per source, matching the marker colors the page
/// generator uses on the map itself.
fn source_color(code: &str) -> &'static str {
    match EnergySource::from_code(code) {
        Some(EnergySource::Solar) => "#e0b400",
        Some(EnergySource::Wind) => "#d9534f",
        Some(EnergySource::Water) | None => "#3b7dd8",
    }
}

fn row_subtitle(entry: &Entry) -> String {
    match entry.capacity_mw {
        Some(mw) => format!("{} \u{b7} {mw:.0} MW", source_label(&entry.source)),
        None => source_label(&entry.source),
    }
}

/// Floating button over the map that opens the search sidebar.
#[component]
pub fn SearchToggle() -> impl IntoView {
    let SidebarOpen(sidebar_open) = expect_context();

    let on_click = move |_| {
        sidebar_open.set(true);
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.query_selector("[data-search-input]").ok().flatten())
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(input) = input {
            let _ = input.focus();
        }
    };

    view! {
        <button
            style="position: fixed; top: 10px; right: 10px; z-index: 1000; padding: 8px 14px; background: #ffffff; border: 1px solid #ced4da; border-radius: 4px; box-shadow: 0 1px 5px rgba(0,0,0,0.3); font-size: 0.9rem; color: #2f3436; cursor: pointer;"
            style:display=move || if sidebar_open.get() { "none" } else { "block" }
            on:click=on_click
        >
            "\u{1f50d} Search Plants"
        </button>
    }
}

/// Search sidebar: text query, source radio filter, and the plant list.
#[component]
pub fn Sidebar() -> impl IntoView {
    let SidebarOpen(sidebar_open) = expect_context();

    view! {
        <div
            style="position: fixed; top: 0; right: 0; width: 300px; height: 100%; background: #ffffff; box-shadow: -2px 0 12px rgba(0,0,0,0.25); z-index: 1001; display: flex; flex-direction: column; font-family: 'Helvetica Neue', Arial, sans-serif;"
            style:display=move || if sidebar_open.get() { "flex" } else { "none" }
        >
            <SidebarHeader />
            <SearchBar />
            <SourceFilterRow />
            <PlantList />
        </div>
    }
}

#[component]
fn SidebarHeader() -> impl IntoView {
    let SidebarOpen(sidebar_open) = expect_context();

    view! {
        <div style="display: flex; align-items: center; justify-content: space-between; padding: 14px 16px; border-bottom: 1px solid #e3e3e3;">
            <div style="font-size: 1.05rem; font-weight: 600; color: #2f3436;">"Plant Search"</div>
            <span
                style="cursor: pointer; font-size: 1.4rem; line-height: 1; color: #6c757d; padding: 0 4px;"
                on:click=move |_| sidebar_open.set(false)
            >"\u{d7}"</span>
        </div>
    }
}

#[component]
fn SearchBar() -> impl IntoView {
    let SearchQuery(query) = expect_context();

    let on_input = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        query.set(input.value());
    };

    view! {
        <div style="padding: 12px 16px; border-bottom: 1px solid #e3e3e3;">
            <input
                data-search-input=""
                type="text"
                placeholder="Search plants..."
                style="width: 100%; padding: 8px 10px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.9rem; outline: none; box-sizing: border-box;"
                prop:value=move || query.get()
                on:input=on_input
            />
        </div>
    }
}

/// Radio group over the fixed source set. Exactly one option is selected
/// at all times; "All" is the initial selection.
#[component]
fn SourceFilterRow() -> impl IntoView {
    let SelectedSource(source) = expect_context();

    let options: Vec<(&'static str, SourceFilter)> = std::iter::once(("All", SourceFilter::All))
        .chain(
            EnergySource::ALL
                .into_iter()
                .map(|s| (s.label(), SourceFilter::Only(s))),
        )
        .collect();

    view! {
        <div style="display: flex; gap: 12px; flex-wrap: wrap; padding: 10px 16px; border-bottom: 1px solid #e3e3e3;">
            {options
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <label style="display: flex; align-items: center; gap: 4px; font-size: 0.85rem; color: #2f3436; cursor: pointer;">
                            <input
                                type="radio"
                                name="sourceFilter"
                                prop:checked=move || source.get() == value
                                on:change=move |_| source.set(value)
                            />
                            <span>{label}</span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// All plant rows, rendered once in document order. Filtering only toggles
/// each row's display, never reorders or rebuilds the list.
#[component]
fn PlantList() -> impl IntoView {
    let SearchQuery(query) = expect_context();
    let SelectedSource(source) = expect_context();
    let SidebarOpen(sidebar_open) = expect_context();
    let Entries(entries) = expect_context();

    let visibility = Memo::new(move |_| {
        let state = FilterState {
            query: query.get(),
            source: source.get(),
        };
        entries.with_value(|store| apply_filter(&state, store))
    });
    let shown = Memo::new(move |_| visible_count(&visibility.get()));

    let rows: Vec<Entry> = entries.with_value(|store| store.iter().cloned().collect());

    view! {
        <div data-plant-list="" style="flex: 1; overflow-y: auto; padding: 4px 0;">
            {rows
                .into_iter()
                .map(|entry| {
                    let row_id = entry.id.clone();
                    let display = move || {
                        if visibility.get().get(&row_id).copied().unwrap_or(false) {
                            "block"
                        } else {
                            "none"
                        }
                    };
                    let subtitle = row_subtitle(&entry);
                    let dot_color = source_color(&entry.source);
                    let target = entry.coordinate;
                    let click_id = entry.id.clone();
                    let on_click = move |_| {
                        console::info_1(
                            &format!(
                                "wattmap: clicked plant {click_id} at [{}, {}]",
                                target.lat, target.lon
                            )
                            .into(),
                        );
                        locator::locate(target, click_id.clone(), move || sidebar_open.set(false));
                    };
                    view! {
                        <div
                            style="padding: 8px 16px; cursor: pointer; border-bottom: 1px solid #f1f3f5; transition: background 0.15s;"
                            style:display=display
                            on:click=on_click
                            on:mouseenter=|e| {
                                if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
                                    el.style().set_property("background", "#f8f9fa").ok();
                                }
                            }
                            on:mouseleave=|e| {
                                if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
                                    el.style().set_property("background", "transparent").ok();
                                }
                            }
                        >
                            <div style="display: flex; align-items: center; gap: 8px;">
                                <span style=format!(
                                    "display: inline-block; width: 9px; height: 9px; border-radius: 50%; flex-shrink: 0; background: {dot_color};"
                                ) />
                                <div style="min-width: 0;">
                                    <div style="font-size: 0.9rem; color: #212529; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;">
                                        {entry.name}
                                    </div>
                                    <div style="font-size: 0.75rem; color: #6c757d;">{subtitle}</div>
                                </div>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
            <Show when=move || shown.get() == 0>
                <div style="padding: 10px 16px; font-style: italic; color: #6c757d; font-size: 0.85rem;">
                    "No plants match your search"
                </div>
            </Show>
        </div>
    }
}
