//! Leptos context that exposes the session-gated project state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DashboardProvider` wraps every `/dashboard` route. It looks up the
//! session, feeds it through `SessionGate`, redirects signed-out users to
//! `/auth`, fetches projects once per signed-in identity, and hides its
//! children until that first fetch settles.
//!
//! ERROR HANDLING
//! ==============
//! The flows themselves live in `state::dashboard`; this context only stores
//! their results in signals. Fetch and create failures land in
//! `ProjectsState::error` (rendered as a banner with a retry action), a 401
//! flips the session to signed-out so the gate redirects, and completions
//! that arrive after the provider is torn down are discarded.

#[cfg(test)]
#[path = "dashboard_provider_test.rs"]
mod dashboard_provider_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::backend::Backend;
use crate::net::types::{Identity, Integration, IntegrationProvider, Project};
use crate::state::dashboard::{self, DashboardError, DashboardStore};
use crate::state::projects::ProjectsState;
use crate::state::session::{RenderGate, SessionEffect, SessionGate, SessionState, render_gate};
use crate::state::ui::{ToastKind, UiState};

/// Route the gate sends signed-out users to.
pub const AUTH_ROUTE: &str = "/auth";

/// Handle shared with every screen under the dashboard.
#[derive(Clone)]
pub struct DashboardContext {
    pub session: RwSignal<SessionState>,
    pub projects: RwSignal<ProjectsState>,
    pub ui: RwSignal<UiState>,
    backend: Backend,
    alive: Arc<AtomicBool>,
}

impl DashboardStore for DashboardContext {
    fn identity(&self) -> Option<Identity> {
        self.session.try_with_untracked(|s| s.identity().cloned()).flatten()
    }

    fn update_projects<R>(&mut self, f: impl FnOnce(&mut ProjectsState) -> R) -> Option<R> {
        self.projects.try_update(f)
    }

    fn notify(&mut self, kind: ToastKind, message: String) {
        self.ui.try_update(|u| u.show(kind, message));
    }

    fn end_session(&mut self) {
        self.session.try_set(SessionState::Unauthenticated);
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

impl DashboardContext {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self {
            session: RwSignal::new(SessionState::Loading),
            projects: RwSignal::new(ProjectsState::default()),
            ui: RwSignal::new(UiState::default()),
            backend,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Re-fetch projects in the background.
    pub fn refresh_projects(&self) {
        let ctx = self.clone();
        spawn(async move {
            // Failures are already visible through `ProjectsState::error`
            // or the redirect.
            let _ = ctx.refresh().await;
        });
    }

    /// Re-fetch projects. A call while a fetch is in flight is a no-op.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        dashboard::refresh_projects(&mut self.clone(), &self.backend).await
    }

    pub async fn create_project(&self, name: &str) -> Result<Project, DashboardError> {
        dashboard::create_project(&mut self.clone(), &self.backend, name).await
    }

    pub fn set_current_project(&self, project_id: &str) -> Result<(), DashboardError> {
        dashboard::set_current_project(&mut self.clone(), project_id)
    }

    pub async fn connect_integration(
        &self,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, DashboardError> {
        dashboard::connect_integration(&mut self.clone(), &self.backend, project_id, provider).await
    }

    pub async fn sync_integration(&self, project_id: &str, integration_id: &str) -> Result<Integration, DashboardError> {
        dashboard::sync_integration(&mut self.clone(), &self.backend, project_id, integration_id).await
    }

    pub async fn disconnect_integration(&self, project_id: &str, integration_id: &str) -> Result<(), DashboardError> {
        dashboard::disconnect_integration(&mut self.clone(), &self.backend, project_id, integration_id).await
    }

    /// Whether the gate should keep the loading placeholder up.
    #[must_use]
    pub fn render(&self) -> RenderGate {
        let pending = self.projects.with(ProjectsState::awaiting_fetch);
        self.session.with(|s| render_gate(s, pending))
    }

    /// Sign out and let the gate redirect.
    pub fn sign_out(&self) {
        let session = self.session;
        spawn(async move {
            crate::net::api::logout().await;
            session.try_set(SessionState::Unauthenticated);
        });
    }
}

/// Fetch the dashboard context provided by `DashboardProvider`.
#[must_use]
pub fn use_dashboard() -> DashboardContext {
    expect_context::<DashboardContext>()
}

fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "hydrate"))]
    drop(fut);
}

/// Session gate and project context for all dashboard screens.
#[component]
pub fn DashboardProvider(children: ChildrenFn) -> impl IntoView {
    let ctx = DashboardContext::new(Backend::default());
    provide_context(ctx.clone());

    let session = ctx.session;
    spawn(async move {
        let lookup = crate::net::api::fetch_session().await;
        #[cfg(feature = "hydrate")]
        if let Err(e) = &lookup {
            log::warn!("session lookup failed: {e}");
        }
        let state = SessionState::from_lookup(lookup);
        session.try_set(state);
    });

    let gate = RwSignal::new(SessionGate::new());
    let navigate = use_navigate();
    let effect_ctx = ctx.clone();
    Effect::new(move || {
        let next = effect_ctx.session.get();
        match gate.try_update(|g| g.observe(next)) {
            Some(SessionEffect::RedirectToAuth) => {
                effect_ctx.projects.update(ProjectsState::reset);
                navigate(AUTH_ROUTE, NavigateOptions::default());
            }
            Some(SessionEffect::FetchProjects(_)) => {
                effect_ctx.projects.update(ProjectsState::reset);
                effect_ctx.refresh_projects();
            }
            Some(SessionEffect::None) | None => {}
        }
    });

    let alive = ctx.alive.clone();
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    let render_ctx = ctx.clone();
    let render = Memo::new(move |_| render_ctx.render());

    move || match render.get() {
        RenderGate::Loading => view! {
            <div class="dashboard-loading">
                <p class="dashboard-loading__text">"Loading dashboard..."</p>
            </div>
        }
        .into_any(),
        RenderGate::Hidden => ().into_any(),
        RenderGate::Content => children().into_any(),
    }
}
