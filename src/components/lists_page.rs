//! Lists Page Component
//!
//! Create, rename and delete item lists. The lists themselves live in the
//! app store so the assign panel sees every change.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ListArgs};
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, NoticeKind};
use crate::models::ItemList;
use crate::store::{find_by_name, store_put_list, store_remove_list, use_app_store, AppStateStoreFields};

fn optional_text(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|s| !s.is_empty())
}

#[component]
pub fn ListsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());
    let (creating, set_creating) = signal(false);
    let (create_error, set_create_error) = signal(None::<String>);

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked().trim().to_string();
        if name.is_empty() || creating.get_untracked() {
            return;
        }
        if store.lists().with_untracked(|lists| find_by_name(lists, &name).is_some()) {
            set_create_error.set(Some(format!("Eine Liste „{}“ gibt es bereits.", name)));
            return;
        }
        let description = new_description.get_untracked();
        set_creating.set(true);
        set_create_error.set(None);
        spawn_local(async move {
            let args = ListArgs {
                name: &name,
                description: optional_text(&description),
            };
            match api::create_list(&args).await {
                Ok(list) => {
                    log::info!("created list {} ({})", list.name, list.id);
                    store_put_list(&store, list);
                    set_new_name.set(String::new());
                    set_new_description.set(String::new());
                }
                Err(e) => {
                    log::error!("creating list {:?} failed: {}", name, e);
                    set_create_error.set(Some("Liste konnte nicht angelegt werden.".to_string()));
                }
            }
            set_creating.set(false);
        });
    };

    let on_delete = move |list_id: u32| {
        spawn_local(async move {
            match api::delete_list(list_id).await {
                Ok(()) => {
                    log::info!("deleted list {}", list_id);
                    store_remove_list(&store, list_id);
                }
                Err(e) => {
                    log::error!("deleting list {} failed: {}", list_id, e);
                    ctx.notify(NoticeKind::Error, "Die Liste konnte nicht gelöscht werden.");
                }
            }
        });
    };

    view! {
        <section class="lists-page">
            <form class="list-create-form" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Name der neuen Liste"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Beschreibung (optional)"
                    prop:value=move || new_description.get()
                    on:input=move |ev| set_new_description.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || creating.get() || new_name.with(|n| n.trim().is_empty())
                >
                    "Liste anlegen"
                </button>
            </form>
            {move || create_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}

            <ul class="item-lists">
                <For
                    each=move || store.lists().get()
                    key=|list| (list.id, list.name.clone(), list.description.clone(), list.item_ids.len())
                    children=move |list| view! { <ListRow list=list on_delete=on_delete /> }
                />
            </ul>
            <Show when=move || store.lists().with(|lists| lists.is_empty())>
                <p class="empty-state">"Noch keine Listen angelegt."</p>
            </Show>
        </section>
    }
}

/// One list with inline rename
#[component]
fn ListRow(list: ItemList, #[prop(into)] on_delete: Callback<u32>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let list_id = list.id;
    let (editing, set_editing) = signal(false);
    let (name, set_name) = signal(list.name.clone());
    let (saving, set_saving) = signal(false);

    let save = move || {
        let trimmed = name.get_untracked().trim().to_string();
        if trimmed.is_empty() || saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        let description = store
            .lists()
            .with_untracked(|lists| lists.iter().find(|l| l.id == list_id).and_then(|l| l.description.clone()));
        spawn_local(async move {
            let args = ListArgs {
                name: &trimmed,
                description: description.as_deref(),
            };
            match api::update_list(list_id, &args).await {
                Ok(updated) => {
                    log::info!("renamed list {} to {:?}", list_id, updated.name);
                    store_put_list(&store, updated);
                    set_editing.set(false);
                }
                Err(e) => {
                    log::error!("renaming list {} failed: {}", list_id, e);
                    ctx.notify(NoticeKind::Error, "Die Liste konnte nicht umbenannt werden.");
                }
            }
            set_saving.set(false);
        });
    };

    let count = format!("{} Gegenstände", list.item_ids.len());
    let description = list.description.clone().unwrap_or_default();
    let original_name = list.name.clone();

    view! {
        <li class="item-list-row">
            {move || if editing.get() {
                view! {
                    <input
                        type="text"
                        class="list-rename"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                            "Enter" => save(),
                            "Escape" => set_editing.set(false),
                            _ => {}
                        }
                    />
                    <button type="button" class="confirm-btn" disabled=move || saving.get() on:click=move |_| save()>
                        "✓"
                    </button>
                }
                .into_any()
            } else {
                let reset_name = original_name.clone();
                view! {
                    <span class="list-name">{original_name.clone()}</span>
                    <button
                        type="button"
                        class="btn-link"
                        on:click=move |_| {
                            set_name.set(reset_name.clone());
                            set_editing.set(true);
                        }
                    >
                        "Umbenennen"
                    </button>
                }
                .into_any()
            }}
            <span class="list-description">{description}</span>
            <span class="list-count">{count}</span>
            <DeleteConfirmButton button_class="btn-danger" on_confirm=move |_| on_delete.run(list_id) />
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Keller "), Some("Keller"));
    }
}
