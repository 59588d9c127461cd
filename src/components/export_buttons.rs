//! Export Buttons Component
//!
//! CSV/JSON export of the current filter, or of the given ids when non-empty.
//! The response is offered as a browser download.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser::trigger_download;
use crate::context::{use_app_context, NoticeKind};
use crate::models::{ExportFormat, ItemQuery};

#[component]
pub fn ExportButtons(
    #[prop(into)] query: Signal<ItemQuery>,
    /// Restrict the export to these ids; empty exports the whole filter
    #[prop(into)] selected: Signal<Vec<u32>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (exporting, set_exporting) = signal(false);

    let export = move |format: ExportFormat| {
        if exporting.get_untracked() {
            return;
        }
        set_exporting.set(true);
        let query = query.get_untracked();
        let ids = selected.get_untracked();
        spawn_local(async move {
            match api::export_items(&query, &ids, format).await {
                Ok(bytes) => {
                    log::info!("exported {} bytes as {}", bytes.len(), format.as_param());
                    if let Err(e) = trigger_download(&bytes, &format.file_name(), format.mime_type()) {
                        log::error!("starting download failed: {:?}", e);
                        ctx.notify(NoticeKind::Error, "Der Download konnte nicht gestartet werden.");
                    }
                }
                Err(e) => {
                    log::error!("export failed: {}", e);
                    ctx.notify(NoticeKind::Error, "Export fehlgeschlagen.");
                }
            }
            set_exporting.set(false);
        });
    };

    view! {
        <span class="export-buttons">
            <button type="button" class="btn-secondary" disabled=move || exporting.get() on:click=move |_| export(ExportFormat::Csv)>
                "CSV"
            </button>
            <button type="button" class="btn-secondary" disabled=move || exporting.get() on:click=move |_| export(ExportFormat::Json)>
                "JSON"
            </button>
        </span>
    }
}
