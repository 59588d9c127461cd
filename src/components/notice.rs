//! Notice Banner Component
//!
//! Dismissible message line for errors, warnings and confirmations, with an
//! optional retry action for failed loads.

use leptos::prelude::*;

use crate::context::NoticeKind;

#[component]
pub fn NoticeBanner(
    kind: NoticeKind,
    #[prop(into)] message: String,
    #[prop(into, optional)] on_dismiss: Option<Callback<()>>,
    #[prop(into, optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class=kind.class() role="alert">
            <span class="notice-message">{message}</span>
            {on_retry.map(|retry| view! {
                <button type="button" class="notice-retry" on:click=move |_| retry.run(())>
                    "Erneut versuchen"
                </button>
            })}
            {on_dismiss.map(|dismiss| view! {
                <button type="button" class="notice-dismiss" title="Schließen" on:click=move |_| dismiss.run(())>
                    "×"
                </button>
            })}
        </div>
    }
}

/// Renders the page-level notice from `AppContext`
#[component]
pub fn PageNotice() -> impl IntoView {
    let ctx = crate::context::use_app_context();

    move || {
        ctx.notice.get().map(|notice| {
            view! {
                <NoticeBanner
                    kind=notice.kind
                    message=notice.message
                    on_dismiss=move |_| ctx.dismiss_notice()
                />
            }
        })
    }
}
