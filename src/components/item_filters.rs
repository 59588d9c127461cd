//! Item Filters Component
//!
//! Search box (debounced), tag and location filters and sort order for the
//! item table.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config;
use crate::guard::use_generation;
use crate::models::{ItemQuery, SortKey};
use crate::store::{use_app_store, AppStateStoreFields};

fn single_id(raw: &str) -> Vec<u32> {
    raw.parse().map(|id| vec![id]).unwrap_or_default()
}

#[component]
pub fn ItemFilters(query: RwSignal<ItemQuery>) -> impl IntoView {
    let store = use_app_store();
    let keystrokes = use_generation();
    let (search, set_search) = signal(query.get_untracked().text);

    // Only the last keystroke within the debounce window reaches the query
    let on_search = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        set_search.set(text.clone());
        let generation = keystrokes.get_value();
        let ticket = generation.begin();
        let delay = config::get().search_debounce_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if generation.is_current(ticket) {
                query.update(|q| q.set_text(text));
            }
        });
    };

    let selected_tag = move || query.with(|q| q.tag_ids.first().copied());
    let selected_location = move || query.with(|q| q.location_ids.first().copied());

    view! {
        <div class="item-filters">
            <input
                type="search"
                class="filter-search"
                placeholder="Suchen..."
                prop:value=move || search.get()
                on:input=on_search
            />

            <select
                class="filter-tag"
                title="Nach Tag filtern"
                on:change=move |ev| query.update(|q| q.set_tags(single_id(&event_target_value(&ev))))
            >
                <option value="" prop:selected=move || selected_tag().is_none()>"Alle Tags"</option>
                <For
                    each=move || store.tags().get()
                    key=|tag| (tag.id, tag.name.clone())
                    children=move |tag| {
                        let id = tag.id;
                        view! {
                            <option value=id.to_string() prop:selected=move || selected_tag() == Some(id)>
                                {tag.name}
                            </option>
                        }
                    }
                />
            </select>

            <select
                class="filter-location"
                title="Nach Standort filtern"
                on:change=move |ev| query.update(|q| q.set_locations(single_id(&event_target_value(&ev))))
            >
                <option value="" prop:selected=move || selected_location().is_none()>"Alle Standorte"</option>
                <For
                    each=move || store.locations().get()
                    key=|loc| (loc.id, loc.name.clone())
                    children=move |loc| {
                        let id = loc.id;
                        view! {
                            <option value=id.to_string() prop:selected=move || selected_location() == Some(id)>
                                {loc.name}
                            </option>
                        }
                    }
                />
            </select>

            <select
                class="filter-sort"
                title="Sortierung"
                on:change=move |ev| {
                    if let Some(sort) = SortKey::from_param(&event_target_value(&ev)) {
                        query.update(|q| q.set_sort(sort));
                    }
                }
            >
                {SortKey::ALL.into_iter().map(|key| view! {
                    <option value=key.as_param() prop:selected=move || query.with(|q| q.sort == key)>
                        {key.label()}
                    </option>
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_id() {
        assert_eq!(single_id("7"), vec![7]);
        assert!(single_id("").is_empty());
    }
}
