//! Dashboard layout and overview page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DashboardLayout` is the parent route of everything under `/dashboard`.
//! It installs `DashboardProvider`, so nested pages only render once the
//! session is authenticated and the first project fetch has settled.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::components::create_project_dialog::CreateProjectDialog;
use crate::components::dashboard_provider::{DashboardProvider, use_dashboard};
use crate::components::project_card::ProjectCard;
use crate::components::project_switcher::ProjectSwitcher;
use crate::components::toast::ToastLine;
use crate::state::projects::ProjectsState;
use crate::util::time::format_date;

/// Parent route for all dashboard screens.
#[component]
pub fn DashboardLayout() -> impl IntoView {
    view! {
        <DashboardProvider>
            <DashboardShell/>
        </DashboardProvider>
    }
}

#[component]
fn DashboardShell() -> impl IntoView {
    let ctx = use_dashboard();
    let session = ctx.session;
    let projects = ctx.projects;
    let ui = ctx.ui;

    let identity_name = move || session.with(|s| s.identity().map(|i| i.name.clone()).unwrap_or_default());
    let sign_out_ctx = ctx.clone();
    let retry_ctx = ctx.clone();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <a class="toolbar__brand" href="/dashboard">"Aura"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <ProjectSwitcher/>
                <nav class="toolbar__nav">
                    <a href="/dashboard">"Overview"</a>
                    <a href="/dashboard/integrations">"Integrations"</a>
                </nav>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{identity_name}</span>
                <button class="btn toolbar__logout" on:click=move |_| sign_out_ctx.sign_out() title="Sign out">
                    "Sign out"
                </button>
            </header>

            <Show when=move || projects.with(|s| s.error.is_some())>
                <div class="dashboard-page__error" role="alert">
                    <span>{move || projects.with(|s| s.error.clone().unwrap_or_default())}</span>
                    <button class="btn" on:click={
                        let retry_ctx = retry_ctx.clone();
                        move |_| retry_ctx.refresh_projects()
                    }>
                        "Retry"
                    </button>
                    <button class="btn" on:click=move |_| projects.update(ProjectsState::clear_error)>
                        "Dismiss"
                    </button>
                </div>
            </Show>
            <ToastLine ui=ui/>

            <main class="dashboard-page__content">
                <Outlet/>
            </main>
        </div>
    }
}

/// `/dashboard`: current project summary and the project list.
#[component]
pub fn OverviewPage() -> impl IntoView {
    let ctx = use_dashboard();
    let projects = ctx.projects;
    let ui = ctx.ui;

    let open_dialog = move |_| ui.update(|u| u.create_dialog_open = true);
    let close_dialog = Callback::new(move |()| ui.update(|u| u.create_dialog_open = false));

    view! {
        <section class="overview">
            {move || {
                projects
                    .with(|s| s.current().cloned())
                    .map_or_else(
                        || {
                            view! {
                                <div class="overview__empty">
                                    <h1>"Welcome to Aura"</h1>
                                    <p>"Create your first project to connect data sources."</p>
                                </div>
                            }
                                .into_any()
                        },
                        |project| {
                            view! {
                                <div class="overview__current">
                                    <h1>{project.name.clone()}</h1>
                                    <p class="overview__meta">
                                        {format!("Created {}", format_date(project.created_at))}
                                    </p>
                                    <p class="overview__meta">
                                        {format!("{} connected source(s)", project.connected_count())}
                                    </p>
                                </div>
                            }
                                .into_any()
                        },
                    )
            }}

            <header class="overview__list-header">
                <h2>"Projects"</h2>
                <button class="btn btn--primary" on:click=open_dialog>
                    "+ New Project"
                </button>
            </header>
            <div class="overview__cards">
                <For
                    each=move || projects.with(|s| s.items.clone())
                    key=|p| (p.id.clone(), p.integrations.len())
                    children=move |p| view! { <ProjectCard project=p/> }
                />
            </div>

            <Show when=move || ui.with(|u| u.create_dialog_open)>
                <CreateProjectDialog on_close=close_dialog/>
            </Show>
        </section>
    }
}
