//! Duplicates Page Component
//!
//! Review of probable duplicates: pick a strictness, recompute, dismiss a
//! group as "not a duplicate" (quarantine) and release quarantined groups.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::NoticeBanner;
use crate::context::{use_app_context, NoticeKind};
use crate::guard::{use_generation, use_mounted, Generation, Ticket};
use crate::models::{DuplicateGroup, QuarantineEntry, Strictness};

#[component]
pub fn DuplicatesPage() -> impl IntoView {
    let ctx = use_app_context();
    let group_loads = use_generation();
    let quarantine_loads = use_generation();
    let page_mounted = use_mounted();

    let (strictness, set_strictness) = signal(Strictness::default());
    let (groups, set_groups) = signal(Vec::<DuplicateGroup>::new());
    let (quarantine, set_quarantine) = signal(Vec::<QuarantineEntry>::new());
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let (recomputing, set_recomputing) = signal(false);

    // Generations and tickets are taken before any await; stored values may
    // be disposed by the time a response arrives
    let fetch_groups = move |generation: Generation, ticket: Ticket, level: Strictness| async move {
        let result = api::list_duplicate_groups(level).await;
        if !generation.is_current(ticket) {
            return;
        }
        set_loading.set(false);
        match result {
            Ok(loaded) => {
                log::info!("{} duplicate groups at {:?}", loaded.len(), level);
                set_load_error.set(None);
                set_groups.set(loaded);
            }
            Err(e) => {
                log::error!("loading duplicate groups failed: {}", e);
                set_load_error.set(Some("Duplikate konnten nicht geladen werden.".to_string()));
            }
        }
    };

    let fetch_quarantine = move |generation: Generation, ticket: Ticket| async move {
        let result = api::list_quarantine().await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(entries) => set_quarantine.set(entries),
            Err(e) => {
                log::error!("loading quarantine failed: {}", e);
                ctx.notify(NoticeKind::Error, "Die Quarantäne-Liste konnte nicht geladen werden.");
            }
        }
    };

    let load_groups = move |level: Strictness| {
        let generation = group_loads.get_value();
        let ticket = generation.begin();
        set_loading.set(true);
        spawn_local(fetch_groups(generation, ticket, level));
    };

    let load_quarantine = move || {
        let generation = quarantine_loads.get_value();
        let ticket = generation.begin();
        spawn_local(fetch_quarantine(generation, ticket));
    };

    Effect::new(move |_| load_groups(strictness.get()));
    Effect::new(move |_| load_quarantine());

    let recompute = move || {
        if recomputing.get_untracked() {
            return;
        }
        let level = strictness.get_untracked();
        let mounted = page_mounted.get_value();
        let group_generation = group_loads.get_value();
        set_recomputing.set(true);
        spawn_local(async move {
            let result = api::recompute_duplicates(level).await;
            if !mounted.is_mounted() {
                return;
            }
            set_recomputing.set(false);
            match result {
                Ok(()) => {
                    log::info!("recomputed duplicates at {:?}", level);
                    // The strictness may have changed while recomputing
                    let Some(current) = strictness.try_get_untracked() else {
                        return;
                    };
                    let ticket = group_generation.begin();
                    set_loading.set(true);
                    fetch_groups(group_generation, ticket, current).await;
                }
                Err(e) => {
                    log::error!("recomputing duplicates failed: {}", e);
                    ctx.notify(NoticeKind::Error, "Neuberechnung fehlgeschlagen.");
                }
            }
        });
    };

    let dismiss = move |group: DuplicateGroup| {
        let mounted = page_mounted.get_value();
        let quarantine_generation = quarantine_loads.get_value();
        spawn_local(async move {
            let result = api::quarantine_group(&group.item_ids()).await;
            if !mounted.is_mounted() {
                return;
            }
            match result {
                Ok(entry) => {
                    log::info!("quarantined group {} as entry {}", group.key, entry.id);
                    set_groups.update(|all| all.retain(|g| g.key != group.key));
                    let ticket = quarantine_generation.begin();
                    fetch_quarantine(quarantine_generation, ticket).await;
                }
                Err(e) => {
                    log::error!("quarantining group {} failed: {}", group.key, e);
                    ctx.notify(NoticeKind::Error, "Die Gruppe konnte nicht markiert werden.");
                }
            }
        });
    };

    let release = move |entry_id: u32| {
        let mounted = page_mounted.get_value();
        let group_generation = group_loads.get_value();
        let quarantine_generation = quarantine_loads.get_value();
        spawn_local(async move {
            let result = api::release_quarantine(entry_id).await;
            if !mounted.is_mounted() {
                return;
            }
            match result {
                Ok(()) => {
                    log::info!("released quarantine entry {}", entry_id);
                    let Some(level) = strictness.try_get_untracked() else {
                        return;
                    };
                    let ticket = quarantine_generation.begin();
                    spawn_local(fetch_quarantine(quarantine_generation, ticket));
                    let ticket = group_generation.begin();
                    set_loading.set(true);
                    fetch_groups(group_generation, ticket, level).await;
                }
                Err(e) => {
                    log::error!("releasing quarantine entry {} failed: {}", entry_id, e);
                    ctx.notify(NoticeKind::Error, "Freigabe fehlgeschlagen.");
                }
            }
        });
    };

    view! {
        <section class="duplicates-page">
            <div class="page-toolbar">
                <label for="duplicate-strictness">"Strenge"</label>
                <select
                    id="duplicate-strictness"
                    on:change=move |ev| {
                        if let Some(level) = Strictness::from_param(&event_target_value(&ev)) {
                            set_strictness.set(level);
                        }
                    }
                >
                    {Strictness::ALL.into_iter().map(|level| view! {
                        <option value=level.as_param() prop:selected=move || strictness.get() == level>
                            {level.label()}
                        </option>
                    }).collect_view()}
                </select>
                <button type="button" class="btn-secondary" disabled=move || recomputing.get() on:click=move |_| recompute()>
                    {move || if recomputing.get() { "Wird berechnet..." } else { "Neu berechnen" }}
                </button>
            </div>

            {move || load_error.get().map(|msg| view! {
                <NoticeBanner
                    kind=NoticeKind::Error
                    message=msg
                    on_retry=move |_| load_groups(strictness.get_untracked())
                />
            })}

            <div class="duplicate-groups" class:loading=move || loading.get()>
                <For
                    each=move || groups.get()
                    key=|group| group.key.clone()
                    children=move |group| {
                        let score = group.score.map(|s| format!("Ähnlichkeit {:.0} %", s * 100.0));
                        let items = group.items.clone();
                        view! {
                            <div class="duplicate-group">
                                <div class="group-header">
                                    <span class="group-size">{format!("{} Gegenstände", items.len())}</span>
                                    {score.map(|text| view! { <span class="group-score">{text}</span> })}
                                    <button
                                        type="button"
                                        class="btn-secondary"
                                        on:click=move |_| dismiss(group.clone())
                                    >
                                        "Kein Duplikat"
                                    </button>
                                </div>
                                <ul>
                                    {items.into_iter().map(|item| view! {
                                        <li>
                                            <span class="item-name">{item.name}</span>
                                            <span class="item-meta">
                                                {item.inventory_number.unwrap_or_default()}
                                            </span>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            </div>
                        }
                    }
                />
                <Show when=move || groups.with(|g| g.is_empty()) && !loading.get()>
                    <p class="empty-state">"Keine Duplikate gefunden."</p>
                </Show>
            </div>

            <h3>"Quarantäne"</h3>
            <ul class="quarantine-list">
                <For
                    each=move || quarantine.get()
                    key=|entry| entry.id
                    children=move |entry| {
                        let id = entry.id;
                        let names = if entry.item_names.is_empty() {
                            entry.item_ids.iter().map(|i| format!("#{}", i)).collect::<Vec<_>>().join(", ")
                        } else {
                            entry.item_names.join(", ")
                        };
                        view! {
                            <li class="quarantine-entry">
                                <span class="quarantine-items">{names}</span>
                                {entry.created_at.map(|at| view! { <span class="quarantine-date">{at}</span> })}
                                <button type="button" class="btn-link" on:click=move |_| release(id)>
                                    "Freigeben"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
