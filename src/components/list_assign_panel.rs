//! List Assign Panel Component
//!
//! Picks an item list for the current selection. Typing filters the known
//! lists; a name that matches none of them can be created on the spot and is
//! selected right away.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ListArgs};
use crate::context::{use_app_context, NoticeKind};
use crate::guard::use_generation;
use crate::models::ItemList;
use crate::store::{find_by_name, store_put_list, use_app_store, AppStateStoreFields};

/// Filter text and chosen list, independent of the DOM
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPicker {
    filter: String,
    selected: Option<u32>,
}

impl ListPicker {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn set_filter(&mut self, text: String) {
        self.filter = text;
    }

    pub fn select(&mut self, list_id: u32) {
        self.selected = Some(list_id);
    }

    /// Lists whose name contains the filter, case-insensitive
    pub fn matches<'a>(&self, lists: &'a [ItemList]) -> Vec<&'a ItemList> {
        let needle = self.filter.trim().to_lowercase();
        lists
            .iter()
            .filter(|list| needle.is_empty() || list.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Name to offer for creation: trimmed, non-empty and not an existing list
    pub fn creatable_name(&self, lists: &[ItemList]) -> Option<String> {
        let name = self.filter.trim();
        if name.is_empty() || find_by_name(lists, name).is_some() {
            return None;
        }
        Some(name.to_string())
    }

    /// A newly created list becomes the selection and clears the filter
    pub fn created(&mut self, list: &ItemList) {
        self.selected = Some(list.id);
        self.filter.clear();
    }

    pub fn selected_list<'a>(&self, lists: &'a [ItemList]) -> Option<&'a ItemList> {
        self.selected.and_then(|id| lists.iter().find(|list| list.id == id))
    }
}

#[component]
pub fn ListAssignPanel(
    #[prop(into)] item_ids: Signal<Vec<u32>>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let creations = use_generation();
    let assignments = use_generation();
    let picker = RwSignal::new(ListPicker::default());
    let (creating, set_creating) = signal(false);
    let (assigning, set_assigning) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let create = move |name: String| {
        if creating.get_untracked() {
            return;
        }
        set_creating.set(true);
        set_error.set(None);
        let generation = creations.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = api::create_list(&ListArgs { name: &name, description: None }).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(list) => {
                    log::info!("created list {} ({})", list.name, list.id);
                    picker.update(|p| p.created(&list));
                    store_put_list(&store, list);
                }
                Err(e) => {
                    log::error!("creating list {:?} failed: {}", name, e);
                    set_error.set(Some("Liste konnte nicht angelegt werden.".to_string()));
                }
            }
            set_creating.set(false);
        });
    };

    let assign = move || {
        let Some(list_id) = picker.with_untracked(|p| p.selected()) else {
            return;
        };
        let ids = item_ids.get_untracked();
        if ids.is_empty() || assigning.get_untracked() {
            return;
        }
        set_assigning.set(true);
        set_error.set(None);
        let generation = assignments.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = api::add_items_to_list(list_id, &ids).await;
            if !generation.is_current(ticket) {
                return;
            }
            set_assigning.set(false);
            match result {
                Ok(list) => {
                    let message = format!("{} Gegenstände zur Liste „{}“ hinzugefügt.", ids.len(), list.name);
                    store_put_list(&store, list);
                    ctx.notify(NoticeKind::Info, message);
                    on_done.run(());
                }
                Err(e) => {
                    log::error!("assigning {} items to list {} failed: {}", ids.len(), list_id, e);
                    set_error.set(Some("Zuordnung fehlgeschlagen.".to_string()));
                }
            }
        });
    };

    let visible = move || {
        store.lists().with(|lists| {
            picker.with(|p| p.matches(lists).into_iter().cloned().collect::<Vec<_>>())
        })
    };
    let creatable = move || store.lists().with(|lists| picker.with(|p| p.creatable_name(lists)));
    let selected_name = move || {
        store
            .lists()
            .with(|lists| picker.with(|p| p.selected_list(lists).map(|l| l.name.clone())))
    };

    view! {
        <div class="list-assign-panel">
            <input
                type="text"
                placeholder="Liste suchen oder neu anlegen..."
                prop:value=move || picker.with(|p| p.filter().to_string())
                on:input=move |ev| picker.update(|p| p.set_filter(event_target_value(&ev)))
            />
            <ul class="list-options">
                <For
                    each=visible
                    key=|list| (list.id, list.name.clone())
                    children=move |list| {
                        let id = list.id;
                        view! {
                            <li
                                class="list-option"
                                class:selected=move || picker.with(|p| p.selected() == Some(id))
                                on:click=move |_| picker.update(|p| p.select(id))
                            >
                                {list.name}
                            </li>
                        }
                    }
                />
            </ul>
            {move || creatable().map(|name| {
                let label = format!("Liste „{}“ anlegen", name);
                view! {
                    <button
                        type="button"
                        class="btn-secondary create-list"
                        disabled=move || creating.get()
                        on:click=move |_| create(name.clone())
                    >
                        {label}
                    </button>
                }
            })}
            {move || error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
            <div class="panel-actions">
                <button type="button" class="btn-secondary" on:click=move |_| on_done.run(())>
                    "Abbrechen"
                </button>
                <button
                    type="button"
                    class="btn-primary"
                    disabled=move || assigning.get() || selected_name().is_none()
                    on:click=move |_| assign()
                >
                    {move || match selected_name() {
                        Some(name) => format!("{} Gegenstände zu „{}“ hinzufügen", item_ids.with(|ids| ids.len()), name),
                        None => "Liste wählen".to_string(),
                    }}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: u32, name: &str) -> ItemList {
        ItemList {
            id,
            name: name.to_string(),
            description: None,
            item_ids: Vec::new(),
        }
    }

    #[test]
    fn test_filter_matches_substring() {
        let lists = vec![list(1, "Werkstatt"), list(2, "Garten"), list(3, "Werkzeugkiste")];
        let mut picker = ListPicker::default();
        assert_eq!(picker.matches(&lists).len(), 3);

        picker.set_filter("werk".to_string());
        let names: Vec<&str> = picker.matches(&lists).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Werkstatt", "Werkzeugkiste"]);
    }

    #[test]
    fn test_exact_name_offers_no_create() {
        let lists = vec![list(1, "Werkstatt")];
        let mut picker = ListPicker::default();
        picker.set_filter("  WERKSTATT ".to_string());
        assert_eq!(picker.creatable_name(&lists), None);

        picker.set_filter("   ".to_string());
        assert_eq!(picker.creatable_name(&lists), None);
    }

    #[test]
    fn test_unmatched_name_is_created_and_selected() {
        let mut lists = vec![list(1, "Werkstatt")];
        let mut picker = ListPicker::default();
        picker.set_filter(" Umzug 2026 ".to_string());
        assert_eq!(picker.creatable_name(&lists).as_deref(), Some("Umzug 2026"));

        let created = list(9, "Umzug 2026");
        picker.created(&created);
        crate::store::add_and_resort(&mut lists, created);

        assert_eq!(picker.selected(), Some(9));
        assert_eq!(picker.filter(), "");
        assert_eq!(picker.selected_list(&lists).map(|l| l.name.as_str()), Some("Umzug 2026"));
        assert_eq!(picker.matches(&lists).len(), 2);
    }
}
