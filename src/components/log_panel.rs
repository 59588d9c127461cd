//! Log Panel Component
//!
//! Shows the most recent log records kept by `console_logger`.

use leptos::prelude::*;

#[component]
pub fn LogPanel(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let (lines, set_lines) = signal(console_logger::recent());

    view! {
        <aside class="log-panel">
            <div class="log-panel-header">
                <h3>"Protokoll"</h3>
                <button type="button" class="btn-link" on:click=move |_| set_lines.set(console_logger::recent())>
                    "Aktualisieren"
                </button>
                <button type="button" class="dialog-close" title="Schließen" on:click=move |_| on_close.run(())>
                    "×"
                </button>
            </div>
            <pre class="log-lines">
                {move || lines.get().join("\n")}
            </pre>
        </aside>
    }
}
