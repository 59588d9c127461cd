//! Selection Toolbar Component
//!
//! Bulk actions for the selected rows: assign to a list, export, delete and
//! clear the selection. Only rendered while something is selected.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ExportButtons, ListAssignPanel};
use crate::context::{use_app_context, NoticeKind};
use crate::guard::use_mounted;
use crate::models::ItemQuery;
use crate::selection::Selection;

#[component]
pub fn SelectionToolbar(selection: RwSignal<Selection>, #[prop(into)] query: Signal<ItemQuery>) -> impl IntoView {
    let ctx = use_app_context();
    let toolbar_mounted = use_mounted();
    let (assigning, set_assigning) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let selected_ids = Signal::derive(move || selection.with(|s| s.ids()));

    let delete_selected = move || {
        let ids = selected_ids.get_untracked();
        if ids.is_empty() || deleting.get_untracked() {
            return;
        }
        let mounted = toolbar_mounted.get_value();
        set_deleting.set(true);
        spawn_local(async move {
            let failed = api::delete_items(&ids).await;
            let deleted: Vec<u32> = ids.iter().copied().filter(|id| !failed.contains(id)).collect();
            if mounted.is_mounted() {
                selection.update(|s| s.remove_all(&deleted));
                set_deleting.set(false);
            }
            if failed.is_empty() {
                ctx.notify(NoticeKind::Info, format!("{} Gegenstände gelöscht.", deleted.len()));
            } else {
                ctx.notify(
                    NoticeKind::Warning,
                    format!("{} von {} Gegenständen konnten nicht gelöscht werden.", failed.len(), ids.len()),
                );
            }
            ctx.reload();
        });
    };

    view! {
        <div class="selection-toolbar">
            <span class="selection-count">{move || format!("{} ausgewählt", selection.with(|s| s.len()))}</span>
            <button type="button" class="btn-secondary" on:click=move |_| set_assigning.update(|open| *open = !*open)>
                "Zu Liste hinzufügen"
            </button>
            <ExportButtons query=query selected=selected_ids />
            <DeleteConfirmButton
                button_class="btn-danger"
                label="Auswahl löschen"
                busy=deleting
                on_confirm=move |_| delete_selected()
            />
            <button type="button" class="btn-link" on:click=move |_| selection.update(|s| s.clear())>
                "Auswahl aufheben"
            </button>
        </div>
        <Show when=move || assigning.get()>
            <ListAssignPanel item_ids=selected_ids on_done=move |_| set_assigning.set(false) />
        </Show>
    }
}
