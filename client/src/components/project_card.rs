//! Card for one project in the dashboard overview list.

use leptos::prelude::*;

use crate::components::dashboard_provider::use_dashboard;
use crate::net::types::Project;
use crate::state::projects::is_pending;
use crate::util::time::format_date;

/// A clickable card that makes its project current.
#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let ctx = use_dashboard();
    let projects = ctx.projects;
    let pending = is_pending(&project);
    let meta = format!(
        "Created {} · {} integration(s)",
        format_date(project.created_at),
        project.integrations.len()
    );
    let Project { id, name, .. } = project;

    let current_id = id.clone();
    let is_current = move || projects.with(|s| s.current_id.as_deref() == Some(current_id.as_str()));
    let on_click = move |_| {
        let _ = ctx.set_current_project(&id);
    };

    view! {
        <button
            class="project-card"
            class:project-card--current=is_current
            class:project-card--pending=pending
            disabled=pending
            on:click=on_click
        >
            <span class="project-card__name">{name}</span>
            <span class="project-card__meta">{meta}</span>
        </button>
    }
}
