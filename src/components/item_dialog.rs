//! Item Dialog Component
//!
//! Three-step wizard for creating or editing an item. Holds the draft in a
//! local signal, runs inline tag/location creation and hands the final save to
//! `editor::save_draft`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateTagArgs, RestBackend};
use crate::browser::focus_later;
use crate::components::{AssignmentStep, BasicStep, CompletionView, ReviewStep};
use crate::editor::{save_draft, AfterSave, Draft, SaveMode, Step, FOCUS_DELAY_MS};
use crate::guard::use_generation;
use crate::models::Item;
use crate::store::{store_add_location, store_add_tag, use_app_store};

/// Draft of a dialog that uploads real browser files
pub type ItemDraft = Draft<web_sys::File>;

/// `web_sys::File` is not `Send`, so the draft lives in local storage
pub type DraftSignal = RwSignal<ItemDraft, LocalStorage>;

/// Closing asks first only while the editing form holds unsaved input
fn close_needs_confirmation(completed: bool, unsaved: bool) -> bool {
    !completed && unsaved
}

/// Create/edit dialog
///
/// Props:
/// - item: the item to edit, `None` for a new one
/// - on_saved: called with every item the backend accepted
/// - on_close: called when the dialog should disappear, with an upload
///   warning left over from an edit
#[component]
pub fn ItemDialog(
    item: Option<Item>,
    #[prop(into)] on_saved: Callback<Item>,
    #[prop(into)] on_close: Callback<Option<String>>,
) -> impl IntoView {
    let store = use_app_store();
    // One guard per request kind
    let save_guard = use_generation();
    let tag_guard = use_generation();
    let location_guard = use_generation();

    let mode = match &item {
        Some(existing) => SaveMode::Edit(existing.id),
        None => SaveMode::Create,
    };
    let existing_attachments = item.as_ref().map(|i| i.attachments.clone()).unwrap_or_default();
    let draft: DraftSignal = RwSignal::new_local(match &item {
        Some(existing) => Draft::from_item(existing),
        None => Draft::new(),
    });

    let after_save = RwSignal::new(None::<AfterSave>);
    let (saving, set_saving) = signal(false);
    let (save_error, set_save_error) = signal(None::<String>);
    let (attach_warning, set_attach_warning) = signal(None::<String>);
    let (confirm_close, set_confirm_close) = signal(false);

    let new_location = RwSignal::new(String::new());
    let (creating_location, set_creating_location) = signal(false);
    let (location_error, set_location_error) = signal(None::<String>);
    let (creating_tag, set_creating_tag) = signal(false);
    let (tag_error, set_tag_error) = signal(None::<String>);

    // Focus the anchor of every step we land on, including the first one
    let step = Memo::new(move |_| draft.with(|d| d.step()));
    Effect::new(move |_| {
        focus_later(step.get().focus_anchor(), FOCUS_DELAY_MS);
    });

    // ========================
    // Navigation
    // ========================

    let next = move || {
        draft.update(|d| {
            d.advance();
        });
    };
    let back = move || draft.update(|d| d.back());

    let request_close = move || {
        if saving.get_untracked() {
            return;
        }
        let completed = after_save.with_untracked(|a| a.is_some());
        let unsaved = new_location.with_untracked(|input| draft.with_untracked(|d| d.has_unsaved_changes(input)));
        if close_needs_confirmation(completed, unsaved) {
            set_confirm_close.set(true);
        } else {
            on_close.run(None);
        }
    };

    // ========================
    // Inline creation
    // ========================

    let create_tag = move |raw: String| {
        let name = raw.trim().to_string();
        if name.is_empty() || creating_tag.get_untracked() {
            return;
        }
        set_creating_tag.set(true);
        set_tag_error.set(None);
        let generation = tag_guard.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = api::create_tag(&CreateTagArgs { name: &name, color: None }).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(tag) => {
                    log::info!("created tag {} ({})", tag.name, tag.id);
                    let id = tag.id;
                    store_add_tag(&store, tag);
                    draft.update(|d| d.add_tag(id));
                }
                Err(e) => {
                    log::error!("creating tag {:?} failed: {}", name, e);
                    set_tag_error.set(Some("Tag konnte nicht angelegt werden.".to_string()));
                }
            }
            set_creating_tag.set(false);
        });
    };

    let create_location = move |raw: String| {
        let name = raw.trim().to_string();
        if name.is_empty() || creating_location.get_untracked() {
            return;
        }
        set_creating_location.set(true);
        set_location_error.set(None);
        let generation = location_guard.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = api::create_location(&name).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(location) => {
                    log::info!("created location {} ({})", location.name, location.id);
                    let id = location.id;
                    store_add_location(&store, location);
                    new_location.set(String::new());
                    draft.update(|d| d.set_location(Some(id)));
                }
                Err(e) => {
                    log::error!("creating location {:?} failed: {}", name, e);
                    set_location_error.set(Some("Standort konnte nicht angelegt werden.".to_string()));
                }
            }
            set_creating_location.set(false);
        });
    };

    // ========================
    // Attachments and save
    // ========================

    let on_files = move |files: Vec<web_sys::File>| {
        let mut warning = None;
        draft.update(|d| warning = d.attach(files));
        set_attach_warning.set(warning.map(|w| w.to_string()));
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let mut valid = false;
        draft.update(|d| valid = d.validate_all());
        if !valid {
            set_save_error.set(Some("Bitte die markierten Felder prüfen.".to_string()));
            return;
        }
        set_saving.set(true);
        set_save_error.set(None);
        let snapshot = draft.get_untracked();
        let generation = save_guard.get_value();
        let ticket = generation.begin();
        spawn_local(async move {
            let result = save_draft(&RestBackend, mode, &snapshot).await;
            if !generation.is_current(ticket) {
                return;
            }
            set_saving.set(false);
            match result {
                Ok(outcome) => {
                    on_saved.run(outcome.item.clone());
                    match AfterSave::for_outcome(mode, &outcome) {
                        AfterSave::Close { warning } => on_close.run(warning),
                        completion => after_save.set(Some(completion)),
                    }
                }
                Err(e) => set_save_error.set(Some(e.to_string())),
            }
        });
    };

    let add_another = move || {
        draft.update(|d| d.reset());
        new_location.set(String::new());
        set_attach_warning.set(None);
        set_save_error.set(None);
        set_location_error.set(None);
        set_tag_error.set(None);
        set_confirm_close.set(false);
        after_save.set(None);
    };

    let title = match mode {
        SaveMode::Create => "Neuer Gegenstand",
        SaveMode::Edit(_) => "Gegenstand bearbeiten",
    };

    // ========================
    // View
    // ========================

    let step_body = move || match step.get() {
        Step::Basic => view! { <BasicStep draft=draft /> }.into_any(),
        Step::Assignment => view! {
            <AssignmentStep
                draft=draft
                new_location=new_location
                creating_location=creating_location
                location_error=location_error
                on_create_location=create_location
                creating_tag=creating_tag
                tag_error=tag_error
                on_create_tag=create_tag
            />
        }
        .into_any(),
        Step::Review => view! {
            <ReviewStep
                draft=draft
                existing=existing_attachments.clone()
                attach_warning=attach_warning
                on_files=on_files
            />
        }
        .into_any(),
    };

    let editing_view = move || {
        view! {
            <ol class="step-indicator">
                {Step::ALL.into_iter().map(|s| view! {
                    <li class:active=move || step.get() == s class:done={move || step.get().index() > s.index()}>
                        {s.title()}
                    </li>
                }).collect_view()}
            </ol>

            <form
                class="dialog-body"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if step.get_untracked().is_last() { submit() } else { next() }
                }
            >
                {step_body.clone()}

                {move || save_error.get().map(|msg| view! { <p class="form-error" role="alert">{msg}</p> })}

                <div class="dialog-actions">
                    <Show when={move || step.get().index() > 0}>
                        <button type="button" class="btn-secondary" disabled=move || saving.get() on:click=move |_| back()>
                            "Zurück"
                        </button>
                    </Show>
                    <button type="button" class="btn-secondary" disabled=move || saving.get() on:click=move |_| request_close()>
                        "Abbrechen"
                    </button>
                    {move || if step.get().is_last() {
                        view! {
                            <button type="submit" class="btn-primary" disabled=move || saving.get()>
                                {move || if saving.get() { "Wird gespeichert..." } else { "Speichern" }}
                            </button>
                        }.into_any()
                    } else {
                        view! { <button type="submit" class="btn-primary">"Weiter"</button> }.into_any()
                    }}
                </div>
            </form>

            <Show when=move || confirm_close.get()>
                <div class="confirm-discard" role="alertdialog">
                    <p>"Ungespeicherte Änderungen verwerfen?"</p>
                    <button type="button" class="btn-danger" on:click=move |_| on_close.run(None)>
                        "Verwerfen"
                    </button>
                    <button type="button" class="btn-secondary" on:click=move |_| set_confirm_close.set(false)>
                        "Weiter bearbeiten"
                    </button>
                </div>
            </Show>
        }
    };

    view! {
        <div class="dialog-backdrop">
            <div class="dialog item-dialog" role="dialog" aria-modal="true">
                <div class="dialog-header">
                    <h2>{title}</h2>
                    <button type="button" class="dialog-close" title="Schließen" on:click=move |_| request_close()>
                        "×"
                    </button>
                </div>
                {move || match after_save.get() {
                    Some(AfterSave::Completion { item_name, warning }) => view! {
                        <CompletionView
                            item_name=item_name
                            warning=warning
                            on_add_another=move |_| add_another()
                            on_close=move |_| on_close.run(None)
                        />
                    }
                    .into_any(),
                    _ => editing_view.clone()().into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_confirmation_only_while_editing() {
        assert!(close_needs_confirmation(false, true));
        assert!(!close_needs_confirmation(false, false));
        // The completion view closes directly even though the saved draft is dirty
        assert!(!close_needs_confirmation(true, true));
    }
}
