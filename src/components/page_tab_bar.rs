//! Page Tab Bar Component
//!
//! Tab bar for switching between the main pages.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Items,
    Lists,
    Duplicates,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Items, Page::Lists, Page::Duplicates];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Items => "Gegenstände",
            Page::Lists => "Listen",
            Page::Duplicates => "Duplikate",
        }
    }
}

#[component]
pub fn PageTabBar(current: ReadSignal<Page>, set_current: WriteSignal<Page>) -> impl IntoView {
    view! {
        <nav class="page-tab-bar">
            {Page::ALL.into_iter().map(|page| {
                let tab_class = move || {
                    if current.get() == page { "page-tab active" } else { "page-tab" }
                };
                view! {
                    <button type="button" class=tab_class on:click=move |_| set_current.set(page)>
                        {page.title()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
