//! Dialog Steps
//!
//! The three pages of the item wizard. Each reads and writes the shared draft
//! signal; creation of tags and locations is handed back to the dialog.

use leptos::prelude::*;

use crate::browser::picked_files;
use crate::components::{DraftSignal, TagSelector};
use crate::editor::{Attachable, Field, MAX_ATTACHMENTS};
use crate::models::Attachment;
use crate::store::{name_of, use_app_store, AppStateStoreFields};

pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// Free-text fields listed in the review summary, in form order
const SUMMARY_TEXT_FIELDS: [Field; 6] = [
    Field::Name,
    Field::Quantity,
    Field::InventoryNumber,
    Field::Description,
    Field::Value,
    Field::PurchaseDate,
];

/// Labelled text input bound to one draft field
#[component]
fn DraftField(
    draft: DraftSignal,
    field: Field,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] inputmode: Option<&'static str>,
) -> impl IntoView {
    let value = move || draft.with(|d| d.values.text(field).unwrap_or_default().to_string());
    let error = move || draft.with(|d| d.error(field));
    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        draft.update(|d| d.set_text(field, text));
    };

    let input = if multiline {
        view! {
            <textarea id=field.input_id() rows="3" placeholder=placeholder prop:value=value on:input=on_input></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                id=field.input_id()
                placeholder=placeholder
                inputmode=inputmode
                prop:value=value
                on:input=on_input
            />
        }
        .into_any()
    };

    view! {
        <div class="form-field" class:has-error=move || error().is_some()>
            <label for=field.input_id()>{field.label()}</label>
            {input}
            {move || error().map(|msg| view! { <p class="field-error">{msg}</p> })}
        </div>
    }
}

// ========================
// Step 1: Basic data
// ========================

#[component]
pub fn BasicStep(draft: DraftSignal) -> impl IntoView {
    view! {
        <div class="dialog-step step-basic">
            <DraftField draft=draft field=Field::Name placeholder="z. B. Bohrmaschine" />
            <div class="form-row">
                <DraftField draft=draft field=Field::Quantity inputmode="numeric" />
                <DraftField draft=draft field=Field::InventoryNumber />
            </div>
            <DraftField draft=draft field=Field::Description multiline=true />
            <div class="form-row">
                <DraftField draft=draft field=Field::Value placeholder="0,00" inputmode="decimal" />
                <DraftField draft=draft field=Field::PurchaseDate placeholder="JJJJ-MM-TT" />
            </div>
        </div>
    }
}

// ========================
// Step 2: Location and tags
// ========================

#[component]
pub fn AssignmentStep(
    draft: DraftSignal,
    /// Name typed for a new location
    new_location: RwSignal<String>,
    #[prop(into)] creating_location: Signal<bool>,
    #[prop(into)] location_error: Signal<Option<String>>,
    #[prop(into)] on_create_location: Callback<String>,
    #[prop(into)] creating_tag: Signal<bool>,
    #[prop(into)] tag_error: Signal<Option<String>>,
    #[prop(into)] on_create_tag: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();

    let on_location_change = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        draft.update(|d| d.set_location(raw.parse().ok()));
    };

    let submit_location = move || {
        let name = new_location.get_untracked();
        if !name.trim().is_empty() {
            on_create_location.run(name);
        }
    };

    view! {
        <div class="dialog-step step-assignment">
            <div class="form-field">
                <label for=Field::Location.input_id()>{Field::Location.label()}</label>
                <select id=Field::Location.input_id() on:change=on_location_change>
                    <option value="" prop:selected=move || draft.with(|d| d.values.location_id.is_none())>
                        "– kein Standort –"
                    </option>
                    <For
                        each=move || store.locations().get()
                        key=|loc| (loc.id, loc.name.clone())
                        children=move |loc| {
                            let id = loc.id;
                            view! {
                                <option
                                    value=id.to_string()
                                    prop:selected=move || draft.with(|d| d.values.location_id == Some(id))
                                >
                                    {loc.name}
                                </option>
                            }
                        }
                    />
                </select>
                <div class="inline-create">
                    <input
                        type="text"
                        placeholder="Neuen Standort anlegen..."
                        prop:value=move || new_location.get()
                        on:input=move |ev| new_location.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit_location();
                            }
                        }
                    />
                    <button
                        type="button"
                        class="btn-secondary"
                        disabled=move || creating_location.get() || new_location.with(|n| n.trim().is_empty())
                        on:click=move |_| submit_location()
                    >
                        {move || if creating_location.get() { "Wird angelegt..." } else { "Anlegen" }}
                    </button>
                </div>
                {move || location_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
            </div>

            <div class="form-field">
                <label for=Field::Tags.input_id()>{Field::Tags.label()}</label>
                <TagSelector
                    options=Signal::derive(move || store.tags().get())
                    selected=Signal::derive(move || draft.with(|d| d.values.tag_ids.clone()))
                    on_select=move |id| draft.update(|d| d.add_tag(id))
                    on_remove=move |id| draft.update(|d| d.remove_tag(id))
                    on_create=on_create_tag
                    creating=creating_tag
                    input_id=Field::Tags.input_id()
                />
                {move || tag_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
            </div>
        </div>
    }
}

// ========================
// Step 3: Attachments and summary
// ========================

#[component]
pub fn ReviewStep(
    draft: DraftSignal,
    /// Attachments already stored for the item (edit mode)
    existing: Vec<Attachment>,
    #[prop(into)] attach_warning: Signal<Option<String>>,
    #[prop(into)] on_files: Callback<Vec<web_sys::File>>,
) -> impl IntoView {
    let store = use_app_store();

    let location_name = move || {
        let id = draft.with(|d| d.values.location_id);
        id.and_then(|id| store.locations().with(|locs| name_of(locs, id)))
            .unwrap_or_else(|| "–".to_string())
    };
    let tag_names = move || {
        let ids = draft.with(|d| d.values.tag_ids.clone());
        let names: Vec<String> = store
            .tags()
            .with(|tags| ids.iter().filter_map(|id| name_of(tags, *id)).collect());
        if names.is_empty() {
            "–".to_string()
        } else {
            names.join(", ")
        }
    };
    let text = move |field: Field| {
        draft.with(|d| {
            let raw = d.values.text(field).unwrap_or_default().trim();
            if raw.is_empty() { "–".to_string() } else { raw.to_string() }
        })
    };

    let pending = move || {
        draft.with(|d| {
            d.attachments
                .iter()
                .map(|f| (f.file_name(), f.byte_size()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="dialog-step step-review">
            <dl class="review-summary">
                {SUMMARY_TEXT_FIELDS.into_iter().map(move |field| view! {
                    <dt>{field.label()}</dt><dd>{move || text(field)}</dd>
                }).collect_view()}
                <dt>{Field::Location.label()}</dt><dd>{location_name}</dd>
                <dt>{Field::Tags.label()}</dt><dd>{tag_names}</dd>
            </dl>

            {(!existing.is_empty()).then(|| view! {
                <div class="existing-attachments">
                    <h4>"Vorhandene Anhänge"</h4>
                    <ul>
                        {existing.into_iter().map(|a| view! {
                            <li><a href=a.url target="_blank">{a.file_name}</a></li>
                        }).collect_view()}
                    </ul>
                </div>
            })}

            <div class="form-field">
                <label for="item-attachments">
                    {format!("Anhänge (Bilder oder PDF, höchstens {})", MAX_ATTACHMENTS)}
                </label>
                <input
                    type="file"
                    id="item-attachments"
                    multiple=true
                    accept="image/*,application/pdf"
                    on:change=move |ev| on_files.run(picked_files(&ev))
                />
                {move || attach_warning.get().map(|msg| view! { <p class="field-warning">{msg}</p> })}
            </div>

            <ul class="pending-attachments">
                <For
                    each=pending
                    key=|(name, _)| name.clone()
                    children=move |(name, size)| {
                        let remove_name = name.clone();
                        view! {
                            <li class="pending-attachment">
                                <span class="file-name">{name}</span>
                                <span class="file-size">{format_size(size)}</span>
                                <button
                                    type="button"
                                    class="remove-btn"
                                    title="Entfernen"
                                    on:click=move |_| draft.update(|d| d.detach(&remove_name))
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
