//! Header dropdown for switching the current project.

use leptos::prelude::*;

use crate::components::dashboard_provider::use_dashboard;
use crate::state::projects::is_pending;

#[component]
pub fn ProjectSwitcher() -> impl IntoView {
    let ctx = use_dashboard();
    let projects = ctx.projects;
    let current = move || projects.with(|s| s.current_id.clone().unwrap_or_default());

    let on_change = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        if !id.is_empty() {
            let _ = ctx.set_current_project(&id);
        }
    };

    view! {
        <select class="project-switcher" prop:value=current on:change=on_change>
            <Show when=move || projects.with(|s| s.items.is_empty())>
                <option value="">"No projects yet"</option>
            </Show>
            <For
                each=move || projects.with(|s| s.items.clone())
                key=|p| p.id.clone()
                children=move |p| {
                    let pending = is_pending(&p);
                    view! {
                        <option value=p.id disabled=pending>
                            {p.name}
                        </option>
                    }
                }
            />
        </select>
    }
}
