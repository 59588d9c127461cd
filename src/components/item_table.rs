//! Item Table Component
//!
//! One page of items with per-row checkboxes and a "select all on this page"
//! header checkbox.

use leptos::prelude::*;

use crate::models::Item;
use crate::selection::Selection;
use crate::store::{name_of, use_app_store, AppStateStoreFields};

#[component]
pub fn ItemTable(
    #[prop(into)] items: Signal<Vec<Item>>,
    selection: RwSignal<Selection>,
    /// Item whose detail panel is open
    #[prop(into)] active: Signal<Option<u32>>,
    #[prop(into)] on_open: Callback<u32>,
) -> impl IntoView {
    let store = use_app_store();

    let page_ids = move || items.with(|list| list.iter().map(|item| item.id).collect::<Vec<_>>());
    let all_selected = move || {
        let ids = page_ids();
        selection.with(|s| s.all_selected(&ids))
    };

    view! {
        <table class="item-table">
            <thead>
                <tr>
                    <th class="col-select">
                        <input
                            type="checkbox"
                            title="Alle auf dieser Seite auswählen"
                            prop:checked=all_selected
                            on:change=move |_| {
                                let ids = page_ids();
                                selection.update(|s| s.toggle_page(&ids));
                            }
                        />
                    </th>
                    <th>"Name"</th>
                    <th>"Menge"</th>
                    <th>"Standort"</th>
                    <th>"Tags"</th>
                    <th>"Wert"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || items.get()
                    key=|item| (item.id, item.name.clone(), item.quantity, item.location_id, item.tag_ids.clone(), item.value.clone())
                    children=move |item| {
                        let id = item.id;
                        let location = item.location_id;
                        let tag_ids = item.tag_ids.clone();
                        let location_name = move || {
                            location
                                .and_then(|loc| store.locations().with(|locs| name_of(locs, loc)))
                                .unwrap_or_default()
                        };
                        let tag_names = move || {
                            store.tags().with(|tags| {
                                tag_ids.iter().filter_map(|t| name_of(tags, *t)).collect::<Vec<_>>().join(", ")
                            })
                        };
                        view! {
                            <tr
                                class="item-row"
                                class:selected=move || selection.with(|s| s.contains(id))
                                class:active=move || active.get() == Some(id)
                            >
                                <td class="col-select">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selection.with(|s| s.contains(id))
                                        on:change=move |_| selection.update(|s| s.toggle(id))
                                    />
                                </td>
                                <td class="item-name" on:click=move |_| on_open.run(id)>{item.name}</td>
                                <td>{item.quantity}</td>
                                <td>{location_name}</td>
                                <td>{tag_names}</td>
                                <td>{item.value.unwrap_or_default()}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=move || items.with(|list| list.is_empty())>
            <p class="empty-state">"Keine Gegenstände gefunden."</p>
        </Show>
    }
}
