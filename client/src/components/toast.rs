//! Dismissible notification line driven by `UiState::toast`.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn ToastLine(ui: RwSignal<UiState>) -> impl IntoView {
    move || {
        ui.get().toast.map(|toast| {
            view! {
                <div class=toast.kind.class() role="status">
                    <span class="toast__message">{toast.message}</span>
                    <button class="toast__dismiss" title="Dismiss" on:click=move |_| ui.update(UiState::dismiss)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
