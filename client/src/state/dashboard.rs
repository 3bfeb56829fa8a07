//! The dashboard application-state object and the flows it shares with the
//! Leptos context.
//!
//! ARCHITECTURE
//! ============
//! Refresh, create, select and the integration actions are written once, as
//! free functions over a `DashboardStore` and a `ProjectBackend`. Two stores
//! implement the seam:
//!
//! - `Dashboard` keeps the session gate, project state and toast in plain
//!   fields. It is constructed explicitly and is the headless form used by
//!   tests and non-browser callers.
//! - `components::dashboard_provider::DashboardContext` keeps them in
//!   signals and lets its effect react to session changes.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from the backend means the session is gone: the flow ends the
//! session (so the gate redirects once) and returns `SessionExpired` without
//! touching `ProjectsState::error`. Fetch and create failures land in
//! `error`; integration failures are shown as an error toast.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::backend::ProjectBackend;
use crate::net::error::FetchError;
use crate::net::types::{Identity, Integration, IntegrationProvider, Project};
use crate::state::projects::{ProjectsState, UnknownProject, ValidationError, validate_project_name};
use crate::state::session::{RenderGate, SessionEffect, SessionGate, SessionState};
use crate::state::ui::{Toast, ToastKind, UiState};

/// Failure of a dashboard operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// No authenticated identity; the caller should be redirected.
    #[error("not signed in")]
    NoSession,
    /// The backend rejected the session. It has been ended and the gate
    /// redirects; nothing is recorded in `error`.
    #[error("session expired")]
    SessionExpired,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    UnknownProject(#[from] UnknownProject),
}

// =============================================================================
// STORE
// =============================================================================

/// Where the dashboard flows read the session and write their results.
pub trait DashboardStore {
    /// The signed-in identity, if any.
    fn identity(&self) -> Option<Identity>;

    /// Apply `f` to the project state. `None` when the state has been
    /// disposed.
    fn update_projects<R>(&mut self, f: impl FnOnce(&mut ProjectsState) -> R) -> Option<R>;

    fn notify(&mut self, kind: ToastKind, message: String);

    /// Sign out after the backend rejected the session.
    fn end_session(&mut self);

    /// `false` once the owner is torn down; late completions are dropped.
    fn is_alive(&self) -> bool {
        true
    }
}

fn owner(store: &impl DashboardStore) -> Result<Identity, DashboardError> {
    store.identity().ok_or(DashboardError::NoSession)
}

fn session_expired(store: &mut impl DashboardStore) -> DashboardError {
    store.end_session();
    DashboardError::SessionExpired
}

/// Integration failures: an expired session signs out, anything else
/// becomes an error toast.
fn integration_failure(store: &mut impl DashboardStore, err: FetchError, message: String) -> DashboardError {
    if err == FetchError::Unauthorized {
        return session_expired(store);
    }
    store.notify(ToastKind::Error, message);
    err.into()
}

// =============================================================================
// FLOWS
// =============================================================================

/// Re-fetch the collection; see `ProjectsState::finish_fetch` for the
/// selection rules. A call while a fetch is in flight is a no-op.
pub async fn refresh_projects<S, B>(store: &mut S, backend: &B) -> Result<(), DashboardError>
where
    S: DashboardStore,
    B: ProjectBackend,
{
    let owner = owner(store)?;
    let Some(ticket) = store.update_projects(ProjectsState::begin_fetch).flatten() else {
        return Ok(());
    };
    let result = backend.list_projects(&owner).await;
    if !store.is_alive() {
        return Ok(());
    }
    match result {
        Err(FetchError::Unauthorized) => {
            store.update_projects(|s| s.abandon_fetch(ticket));
            Err(session_expired(store))
        }
        result => {
            let failure = result.as_ref().err().cloned();
            store.update_projects(|s| s.finish_fetch(ticket, result));
            failure.map_or(Ok(()), |err| Err(err.into()))
        }
    }
}

/// Validate and create a project. It is shown and selected immediately and
/// rolled back if the backend rejects it.
pub async fn create_project<S, B>(store: &mut S, backend: &B, name: &str) -> Result<Project, DashboardError>
where
    S: DashboardStore,
    B: ProjectBackend,
{
    let owner = owner(store)?;
    let name = match validate_project_name(name) {
        Ok(name) => name,
        Err(err) => {
            store.update_projects(|s| s.record_error(err.to_string()));
            return Err(err.into());
        }
    };
    let Some(pending) = store.update_projects(|s| s.begin_create(&name, &owner)) else {
        return Err(DashboardError::NoSession);
    };
    let result = backend.create_project(&owner, &name).await;
    if !store.is_alive() {
        return result.map_err(Into::into);
    }
    match result {
        Ok(project) => {
            store.update_projects(|s| s.commit_create(&pending, project.clone()));
            store.notify(ToastKind::Success, format!("Created {}", project.name));
            Ok(project)
        }
        Err(FetchError::Unauthorized) => {
            store.update_projects(|s| s.discard_create(&pending));
            Err(session_expired(store))
        }
        Err(err) => {
            store.update_projects(|s| s.rollback_create(&pending, &err));
            Err(err.into())
        }
    }
}

/// Make a member of the collection current.
pub fn set_current_project(store: &mut impl DashboardStore, project_id: &str) -> Result<(), DashboardError> {
    store
        .update_projects(|s| s.select(project_id))
        .unwrap_or_else(|| Err(UnknownProject(project_id.to_owned())))?;
    Ok(())
}

/// Attach a provider to one of the identity's projects.
pub async fn connect_integration<S, B>(
    store: &mut S,
    backend: &B,
    project_id: &str,
    provider: IntegrationProvider,
) -> Result<Integration, DashboardError>
where
    S: DashboardStore,
    B: ProjectBackend,
{
    let owner = owner(store)?;
    let result = backend.connect_integration(&owner, project_id, provider).await;
    if !store.is_alive() {
        return result.map_err(Into::into);
    }
    match result {
        Ok(integration) => {
            store
                .update_projects(|s| s.add_integration(project_id, integration.clone()))
                .transpose()?;
            store.notify(ToastKind::Success, format!("{} connection started", provider.label()));
            Ok(integration)
        }
        Err(err) => {
            let message = format!("Failed to connect {}: {err}", provider.label());
            Err(integration_failure(store, err, message))
        }
    }
}

/// Start a data sync for an attached integration.
pub async fn sync_integration<S, B>(
    store: &mut S,
    backend: &B,
    project_id: &str,
    integration_id: &str,
) -> Result<Integration, DashboardError>
where
    S: DashboardStore,
    B: ProjectBackend,
{
    let owner = owner(store)?;
    let result = backend.sync_integration(&owner, project_id, integration_id).await;
    if !store.is_alive() {
        return result.map_err(Into::into);
    }
    match result {
        Ok(integration) => {
            store
                .update_projects(|s| s.replace_integration(project_id, integration.clone()))
                .transpose()?;
            store.notify(ToastKind::Success, "Data sync started".to_owned());
            Ok(integration)
        }
        Err(err) => {
            let message = format!("Failed to start sync: {err}");
            Err(integration_failure(store, err, message))
        }
    }
}

/// Detach an integration and drop it from the local project.
pub async fn disconnect_integration<S, B>(
    store: &mut S,
    backend: &B,
    project_id: &str,
    integration_id: &str,
) -> Result<(), DashboardError>
where
    S: DashboardStore,
    B: ProjectBackend,
{
    let owner = owner(store)?;
    let result = backend.disconnect_integration(&owner, project_id, integration_id).await;
    if !store.is_alive() {
        return result.map_err(Into::into);
    }
    match result {
        Ok(()) => {
            store
                .update_projects(|s| s.remove_integration(project_id, integration_id))
                .transpose()?;
            store.notify(ToastKind::Success, "Integration disconnected".to_owned());
            Ok(())
        }
        Err(err) => {
            let message = format!("Failed to disconnect integration: {err}");
            Err(integration_failure(store, err, message))
        }
    }
}

// =============================================================================
// HEADLESS DASHBOARD
// =============================================================================

#[derive(Debug, Default)]
struct LocalStore {
    gate: SessionGate,
    projects: ProjectsState,
    ui: UiState,
}

impl DashboardStore for LocalStore {
    fn identity(&self) -> Option<Identity> {
        self.gate.state().identity().cloned()
    }

    fn update_projects<R>(&mut self, f: impl FnOnce(&mut ProjectsState) -> R) -> Option<R> {
        Some(f(&mut self.projects))
    }

    fn notify(&mut self, kind: ToastKind, message: String) {
        self.ui.show(kind, message);
    }

    fn end_session(&mut self) {
        self.gate.observe(SessionState::Unauthenticated);
        self.projects.reset();
    }
}

/// Session-gated project context.
#[derive(Debug)]
pub struct Dashboard<B> {
    backend: B,
    store: LocalStore,
}

impl<B: ProjectBackend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, store: LocalStore::default() }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &SessionState {
        self.store.gate.state()
    }

    pub fn state(&self) -> &ProjectsState {
        &self.store.projects
    }

    pub fn projects(&self) -> &[Project] {
        &self.store.projects.items
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.store.projects.current()
    }

    pub fn is_loading(&self) -> bool {
        self.store.projects.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.store.projects.error.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.store.ui.toast.as_ref()
    }

    pub fn render(&self) -> RenderGate {
        self.store.gate.render(self.store.projects.awaiting_fetch())
    }

    /// Feed a new session value. Performs the project fetch itself when the
    /// gate asks for one and returns the effect so the caller can redirect.
    /// A fetch rejected with 401 turns into `RedirectToAuth`.
    pub async fn observe_session(&mut self, next: SessionState) -> SessionEffect {
        let effect = self.store.gate.observe(next);
        match &effect {
            SessionEffect::FetchProjects(_) => {
                self.store.projects.reset();
                // Other failures are already recorded in `error`.
                if self.refresh_projects().await == Err(DashboardError::SessionExpired) {
                    return SessionEffect::RedirectToAuth;
                }
            }
            SessionEffect::RedirectToAuth => self.store.projects.reset(),
            SessionEffect::None => {}
        }
        effect
    }

    pub async fn refresh_projects(&mut self) -> Result<(), DashboardError> {
        refresh_projects(&mut self.store, &self.backend).await
    }

    pub async fn create_project(&mut self, name: &str) -> Result<Project, DashboardError> {
        create_project(&mut self.store, &self.backend, name).await
    }

    pub fn set_current_project(&mut self, project_id: &str) -> Result<(), DashboardError> {
        set_current_project(&mut self.store, project_id)
    }

    pub async fn connect_integration(
        &mut self,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, DashboardError> {
        connect_integration(&mut self.store, &self.backend, project_id, provider).await
    }

    pub async fn sync_integration(&mut self, project_id: &str, integration_id: &str) -> Result<Integration, DashboardError> {
        sync_integration(&mut self.store, &self.backend, project_id, integration_id).await
    }

    pub async fn disconnect_integration(&mut self, project_id: &str, integration_id: &str) -> Result<(), DashboardError> {
        disconnect_integration(&mut self.store, &self.backend, project_id, integration_id).await
    }
}
