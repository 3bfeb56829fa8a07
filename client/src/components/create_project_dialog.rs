//! Modal dialog for creating a new project.

use leptos::prelude::*;

use crate::components::dashboard_provider::use_dashboard;

#[component]
pub fn CreateProjectDialog(on_close: Callback<()>) -> impl IntoView {
    let ctx = use_dashboard();
    let name = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let value = name.get_untracked();
        busy.set(true);
        message.set(None);

        #[cfg(feature = "hydrate")]
        {
            let ctx = ctx.clone();
            leptos::task::spawn_local(async move {
                // Validation happens in the context so the error is also
                // recorded in the project state.
                match ctx.create_project(&value).await {
                    Ok(_) => on_close.run(()),
                    Err(err) => {
                        message.try_set(Some(err.to_string()));
                        busy.try_set(false);
                    }
                }
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&ctx, value);
            busy.set(false);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"New Project"</h2>
                <label class="dialog__label">
                    "Project Name"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="Acme Apparel"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <Show when=move || message.with(Option::is_some)>
                    <p class="dialog__error">{move || message.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| submit.run(())>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
