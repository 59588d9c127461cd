//! Completion View Component
//!
//! Shown after a new item was saved: confirmation, an optional upload warning
//! and the choice between adding another item and closing.

use leptos::prelude::*;

use crate::components::NoticeBanner;
use crate::context::NoticeKind;

#[component]
pub fn CompletionView(
    #[prop(into)] item_name: String,
    warning: Option<String>,
    #[prop(into)] on_add_another: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="completion-view">
            <p class="completion-message">
                {format!("„{}“ wurde gespeichert.", item_name)}
            </p>
            {warning.map(|message| view! { <NoticeBanner kind=NoticeKind::Warning message=message /> })}
            <div class="dialog-actions">
                <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>
                    "Schließen"
                </button>
                <button type="button" class="btn-primary" autofocus=true on:click=move |_| on_add_another.run(())>
                    "Weiteren Gegenstand anlegen"
                </button>
            </div>
        </div>
    }
}
