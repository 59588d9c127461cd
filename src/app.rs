//! Inventar Frontend App
//!
//! Main application component: page tabs, the shared notice line and the
//! current page. Tags, locations and lists are loaded once into the store.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{DuplicatesPage, ItemsPage, ListsPage, LogPanel, Page, PageNotice, PageTabBar};
use crate::context::{AppContext, NoticeKind};
use crate::store::{store_set_lists, store_set_locations, store_set_tags, AppState};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (notice, set_notice) = signal(None);
    let (page, set_page) = signal(Page::default());
    let (show_log, set_show_log) = signal(false);

    let ctx = AppContext::new((reload_trigger, set_reload_trigger), (notice, set_notice));
    provide_context(ctx);

    let store = Store::new(AppState::default());
    provide_context(store);

    // Shared collections, loaded once on mount
    spawn_local(async move {
        match api::list_tags().await {
            Ok(tags) => store_set_tags(&store, tags),
            Err(e) => {
                log::error!("loading tags failed: {}", e);
                ctx.notify(NoticeKind::Error, "Tags konnten nicht geladen werden.");
            }
        }
        match api::list_locations().await {
            Ok(locations) => store_set_locations(&store, locations),
            Err(e) => {
                log::error!("loading locations failed: {}", e);
                ctx.notify(NoticeKind::Error, "Standorte konnten nicht geladen werden.");
            }
        }
        match api::list_lists().await {
            Ok(lists) => store_set_lists(&store, lists),
            Err(e) => {
                log::error!("loading lists failed: {}", e);
                ctx.notify(NoticeKind::Error, "Listen konnten nicht geladen werden.");
            }
        }
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Inventar"</h1>
                <PageTabBar current=page set_current=set_page />
                <button type="button" class="btn-link log-toggle" on:click=move |_| set_show_log.update(|v| *v = !*v)>
                    "Protokoll"
                </button>
            </header>

            <PageNotice />

            <main class="main-content">
                {move || match page.get() {
                    Page::Items => view! { <ItemsPage /> }.into_any(),
                    Page::Lists => view! { <ListsPage /> }.into_any(),
                    Page::Duplicates => view! { <DuplicatesPage /> }.into_any(),
                }}
            </main>

            <Show when=move || show_log.get()>
                <LogPanel on_close=move |_| set_show_log.set(false) />
            </Show>
        </div>
    }
}
