//! Item Detail Component
//!
//! Side panel with every field of one item, resolved tag and location names
//! and its attachments. Switching to another item while a fetch is running
//! drops the earlier response.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, NoticeBanner};
use crate::context::{use_app_context, NoticeKind};
use crate::guard::{use_generation, use_mounted};
use crate::models::Item;
use crate::store::{name_of, use_app_store, AppStateStoreFields};

#[component]
pub fn ItemDetail(
    #[prop(into)] item_id: Signal<u32>,
    #[prop(into)] on_edit: Callback<Item>,
    #[prop(into)] on_deleted: Callback<u32>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let fetches = use_generation();
    let panel_mounted = use_mounted();
    let (item, set_item) = signal(None::<Item>);
    let (load_error, set_load_error) = signal(None::<String>);
    let (deleting, set_deleting) = signal(false);

    let fetch = move |id: u32| {
        let generation = fetches.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = api::get_item(id).await;
            if !generation.is_current(ticket) {
                log::debug!("dropping stale detail response for item {}", id);
                return;
            }
            match result {
                Ok(loaded) => {
                    set_load_error.set(None);
                    set_item.set(Some(loaded));
                }
                Err(e) => {
                    log::error!("loading item {} failed: {}", id, e);
                    set_load_error.set(Some("Der Gegenstand konnte nicht geladen werden.".to_string()));
                }
            }
        });
    };

    Effect::new(move |previous: Option<u32>| {
        let _ = ctx.reload_trigger.get();
        let id = item_id.get();
        if previous != Some(id) {
            set_item.set(None);
        }
        fetch(id);
        id
    });

    let delete = move || {
        let Some(current) = item.get_untracked() else {
            return;
        };
        let mounted = panel_mounted.get_value();
        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_item(current.id).await {
                Ok(()) => {
                    log::info!("deleted item {}", current.id);
                    ctx.notify(NoticeKind::Info, format!("„{}“ wurde gelöscht.", current.name));
                    if mounted.is_mounted() {
                        on_deleted.run(current.id);
                    } else {
                        ctx.reload();
                    }
                }
                Err(e) => {
                    log::error!("deleting item {} failed: {}", current.id, e);
                    ctx.notify(NoticeKind::Error, "Der Gegenstand konnte nicht gelöscht werden.");
                    if mounted.is_mounted() {
                        set_deleting.set(false);
                    }
                }
            }
        });
    };

    let body = move || {
        let Some(current) = item.get() else {
            return view! { <p class="loading">"Wird geladen..."</p> }.into_any();
        };
        let location = current
            .location_id
            .and_then(|id| store.locations().with(|locs| name_of(locs, id)))
            .unwrap_or_else(|| "–".to_string());
        let tags = store.tags().with(|all| {
            current
                .tag_ids
                .iter()
                .filter_map(|id| name_of(all, *id))
                .collect::<Vec<_>>()
        });
        let optional = |value: &Option<String>| value.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| "–".to_string());
        let edit_item = current.clone();

        view! {
            <h2>{current.name.clone()}</h2>
            <dl class="item-fields">
                <dt>"Menge"</dt><dd>{current.quantity}</dd>
                <dt>"Inventarnummer"</dt><dd>{optional(&current.inventory_number)}</dd>
                <dt>"Beschreibung"</dt><dd>{optional(&current.description)}</dd>
                <dt>"Wert (€)"</dt><dd>{optional(&current.value)}</dd>
                <dt>"Kaufdatum"</dt><dd>{optional(&current.purchase_date)}</dd>
                <dt>"Standort"</dt><dd>{location}</dd>
            </dl>
            <div class="tag-chips">
                {tags.into_iter().map(|name| view! { <span class="tag-chip">{name}</span> }).collect_view()}
            </div>
            <div class="attachments">
                {current.attachments.into_iter().map(|a| {
                    if a.is_image() {
                        let href = a.url.clone();
                        view! {
                            <a href=href target="_blank" class="attachment-thumb">
                                <img src=a.url alt=a.file_name />
                            </a>
                        }.into_any()
                    } else {
                        view! { <a href=a.url target="_blank" class="attachment-link">{a.file_name}</a> }.into_any()
                    }
                }).collect_view()}
            </div>
            <div class="detail-actions">
                <button type="button" class="btn-primary" on:click=move |_| on_edit.run(edit_item.clone())>
                    "Bearbeiten"
                </button>
                <DeleteConfirmButton button_class="btn-danger" busy=deleting on_confirm=move |_| delete() />
            </div>
        }
        .into_any()
    };

    view! {
        <aside class="item-detail">
            <button type="button" class="dialog-close" title="Schließen" on:click=move |_| on_close.run(())>
                "×"
            </button>
            {move || load_error.get().map(|msg| view! {
                <NoticeBanner
                    kind=NoticeKind::Error
                    message=msg
                    on_retry=move |_| fetch(item_id.get_untracked())
                />
            })}
            {body}
        </aside>
    }
}
