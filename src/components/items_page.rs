//! Items Page Component
//!
//! Filters, the paged item table, bulk actions, the detail panel and the
//! create/edit dialog. Loads are guarded so only the newest response is
//! applied; a failed load keeps the rows already shown.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    ExportButtons, ItemDetail, ItemDialog, ItemFilters, ItemTable, NoticeBanner, SelectionToolbar,
};
use crate::config;
use crate::context::{use_app_context, NoticeKind};
use crate::guard::use_generation;
use crate::models::{Item, ItemPage, ItemQuery};
use crate::selection::Selection;

/// What the item dialog is open for
#[derive(Debug, Clone, PartialEq)]
enum DialogTarget {
    Create,
    Edit(Item),
}

#[component]
pub fn ItemsPage() -> impl IntoView {
    let ctx = use_app_context();
    let page_size = config::get().page_size;
    let loads = use_generation();

    let query = RwSignal::new(ItemQuery::new(page_size));
    let page = RwSignal::new(ItemPage::empty(page_size));
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let selection = RwSignal::new(Selection::new());
    let dialog = RwSignal::new(None::<DialogTarget>);
    let detail = RwSignal::new(None::<u32>);

    let load = move |q: ItemQuery| {
        let generation = loads.get_value();
        let ticket = generation.begin();
        set_loading.set(true);
        spawn_local(async move {
            let result = api::list_items(&q).await;
            if !generation.is_current(ticket) {
                log::debug!("dropping stale item page {}", q.page);
                return;
            }
            set_loading.set(false);
            match result {
                Ok(loaded) => {
                    log::info!("loaded {} of {} items (page {})", loaded.items.len(), loaded.total, loaded.page);
                    set_load_error.set(None);
                    page.set(loaded);
                }
                Err(e) => {
                    log::error!("loading items failed: {}", e);
                    set_load_error.set(Some("Die Gegenstände konnten nicht geladen werden.".to_string()));
                }
            }
        });
    };

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        load(query.get());
    });

    // Keeps the last id while the panel closes
    let detail_id = Memo::new(move |last: Option<&u32>| detail.get().or(last.copied()).unwrap_or_default());
    let items = Signal::derive(move || page.with(|p| p.items.clone()));
    let go_to = move |target: u32| query.update(|q| q.go_to(target));

    let on_saved = move |saved: Item| {
        log::info!("item {} saved", saved.id);
        ctx.reload();
    };
    let on_dialog_close = move |warning: Option<String>| {
        dialog.set(None);
        if let Some(message) = warning {
            ctx.notify(NoticeKind::Warning, message);
        }
    };

    view! {
        <section class="items-page">
            <div class="page-toolbar">
                <ItemFilters query=query />
                <span class="toolbar-spacer"></span>
                <span class="toolbar-label">"Export:"</span>
                <ExportButtons query=query selected=Signal::derive(Vec::new) />
                <button type="button" class="btn-primary" on:click=move |_| dialog.set(Some(DialogTarget::Create))>
                    "+ Neuer Gegenstand"
                </button>
            </div>

            {move || load_error.get().map(|msg| view! {
                <NoticeBanner
                    kind=NoticeKind::Error
                    message=msg
                    on_retry=move |_| load(query.get_untracked())
                />
            })}

            <Show when=move || selection.with(|s| !s.is_empty())>
                <SelectionToolbar selection=selection query=query />
            </Show>

            <div class="items-layout" class:loading=move || loading.get()>
                <div class="items-main">
                    <ItemTable
                        items=items
                        selection=selection
                        active=detail
                        on_open=move |id| detail.set(Some(id))
                    />
                    <div class="pagination">
                        <button
                            type="button"
                            disabled=move || !page.with(|p| p.has_prev())
                            on:click=move |_| go_to(page.with_untracked(|p| p.page).saturating_sub(1))
                        >
                            "‹ Zurück"
                        </button>
                        <span class="page-info">
                            {move || page.with(|p| format!("Seite {} von {} ({} Gegenstände)", p.page, p.total_pages(), p.total))}
                        </span>
                        <button
                            type="button"
                            disabled=move || !page.with(|p| p.has_next())
                            on:click=move |_| go_to(page.with_untracked(|p| p.page) + 1)
                        >
                            "Weiter ›"
                        </button>
                    </div>
                </div>

                <Show when=move || detail.with(|d| d.is_some())>
                    <ItemDetail
                        item_id=detail_id
                        on_edit=move |item| dialog.set(Some(DialogTarget::Edit(item)))
                        on_deleted=move |deleted| {
                            detail.set(None);
                            selection.update(|s| s.remove_all(&[deleted]));
                            ctx.reload();
                        }
                        on_close=move |_| detail.set(None)
                    />
                </Show>
            </div>

            {move || dialog.get().map(|target| {
                let item = match target {
                    DialogTarget::Create => None,
                    DialogTarget::Edit(item) => Some(item),
                };
                view! { <ItemDialog item=item on_saved=on_saved on_close=on_dialog_close /> }
            })}
        </section>
    }
}
