//! `/dashboard/integrations`: data sources of the current project.

#[cfg(test)]
#[path = "integrations_test.rs"]
mod integrations_test;

use std::future::Future;

use leptos::prelude::*;

use crate::components::dashboard_provider::use_dashboard;
use crate::components::integration_row::IntegrationRow;
use crate::net::types::{IntegrationProvider, Project};

/// Providers that can still be attached to `project`, in display order.
pub(crate) fn available_providers(project: &Project) -> Vec<IntegrationProvider> {
    IntegrationProvider::ALL
        .into_iter()
        .filter(|p| !project.has_provider(*p))
        .collect()
}

/// Run one integration action at a time. Outcomes surface as toasts, so the
/// result is dropped here.
fn run_action<Fut>(busy: RwSignal<bool>, action: impl FnOnce() -> Fut)
where
    Fut: Future<Output = ()> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    busy.set(true);
    #[cfg(feature = "hydrate")]
    {
        let fut = action();
        leptos::task::spawn_local(async move {
            fut.await;
            busy.try_set(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(action);
        busy.set(false);
    }
}

#[component]
pub fn IntegrationsPage() -> impl IntoView {
    let ctx = use_dashboard();
    let projects = ctx.projects;
    let busy = RwSignal::new(false);

    let current = move || projects.with(|s| s.current().cloned());

    view! {
        <section class="integrations">
            {move || {
                let Some(project) = current() else {
                    return view! {
                        <p class="integrations__empty">"Select or create a project to manage its integrations."</p>
                    }
                        .into_any();
                };
                let pending = crate::state::projects::is_pending(&project);
                let available = available_providers(&project);
                let project_id = project.id.clone();
                let ctx = ctx.clone();
                view! {
                    <h1>{format!("{} integrations", project.name)}</h1>
                    <ul class="integrations__list">
                        {project
                            .integrations
                            .into_iter()
                            .map(|integration| {
                                let on_sync = {
                                    let ctx = ctx.clone();
                                    let project_id = project_id.clone();
                                    let integration_id = integration.id.clone();
                                    Callback::new(move |()| {
                                        let ctx = ctx.clone();
                                        let project_id = project_id.clone();
                                        let integration_id = integration_id.clone();
                                        run_action(busy, move || async move {
                                            let _ = ctx.sync_integration(&project_id, &integration_id).await;
                                        });
                                    })
                                };
                                let on_disconnect = {
                                    let ctx = ctx.clone();
                                    let project_id = project_id.clone();
                                    let integration_id = integration.id.clone();
                                    Callback::new(move |()| {
                                        let ctx = ctx.clone();
                                        let project_id = project_id.clone();
                                        let integration_id = integration_id.clone();
                                        run_action(busy, move || async move {
                                            let _ = ctx.disconnect_integration(&project_id, &integration_id).await;
                                        });
                                    })
                                };
                                view! {
                                    <IntegrationRow
                                        integration=integration
                                        on_sync=on_sync
                                        on_disconnect=on_disconnect
                                        disabled=Signal::derive(move || busy.get())
                                    />
                                }
                            })
                            .collect_view()}
                    </ul>
                    <div class="integrations__connect">
                        {available
                            .into_iter()
                            .map(|provider| {
                                let ctx = ctx.clone();
                                let project_id = project_id.clone();
                                let on_click = move |_| {
                                    let ctx = ctx.clone();
                                    let project_id = project_id.clone();
                                    run_action(busy, move || async move {
                                        let _ = ctx.connect_integration(&project_id, provider).await;
                                    });
                                };
                                view! {
                                    <button
                                        class="btn integrations__connect-button"
                                        disabled=move || pending || busy.get()
                                        on:click=on_click
                                    >
                                        {format!("Connect {}", provider.label())}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
        </section>
    }
}
