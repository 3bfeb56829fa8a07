//! The project backend collaborator.
//!
//! ARCHITECTURE
//! ============
//! The dashboard context talks to projects only through `ProjectBackend`.
//! `HttpBackend` is the browser implementation over `api`; `MockBackend`
//! keeps everything in memory for tests and offline demos. `Backend` picks
//! one at runtime without boxing, so it can live in a Leptos context.
//!
//! TRADE-OFFS
//! ==========
//! Only listing is retried. Create and connect are not idempotent on the
//! server, so a retried POST after a lost response could duplicate data.
//! Sync and disconnect are user-triggered and fail fast as well.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use super::error::FetchError;
use super::retry::{RetryPolicy, with_retry};
use super::types::{Identity, Integration, IntegrationProvider, IntegrationStatus, Project};
use crate::util::time::now_ms;

/// Operations the dashboard needs from a project store.
pub trait ProjectBackend {
    /// All projects owned by `owner`, oldest first.
    async fn list_projects(&self, owner: &Identity) -> Result<Vec<Project>, FetchError>;

    /// Create a project named `name` (already trimmed and non-empty).
    async fn create_project(&self, owner: &Identity, name: &str) -> Result<Project, FetchError>;

    /// Attach a new `pending` integration to one of `owner`'s projects.
    async fn connect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, FetchError>;

    /// Start a data sync; the returned integration is `connected` with a
    /// fresh `last_sync`.
    async fn sync_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<Integration, FetchError>;

    /// Detach an integration from one of `owner`'s projects.
    async fn disconnect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<(), FetchError>;
}

// =============================================================================
// HTTP
// =============================================================================

/// Browser backend calling the Aura API with the session cookie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HttpBackend {
    pub policy: RetryPolicy,
}

impl HttpBackend {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

fn sleep(delay: Duration) -> impl Future<Output = ()> {
    #[cfg(feature = "hydrate")]
    {
        log::warn!("project list failed; retrying in {} ms", delay.as_millis());
        gloo_timers::future::sleep(delay)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
        std::future::ready(())
    }
}

impl ProjectBackend for HttpBackend {
    async fn list_projects(&self, _owner: &Identity) -> Result<Vec<Project>, FetchError> {
        with_retry(self.policy, super::api::list_projects, sleep).await
    }

    async fn create_project(&self, _owner: &Identity, name: &str) -> Result<Project, FetchError> {
        super::api::create_project(name).await
    }

    async fn connect_integration(
        &self,
        _owner: &Identity,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, FetchError> {
        super::api::connect_integration(project_id, provider).await
    }

    async fn sync_integration(
        &self,
        _owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<Integration, FetchError> {
        super::api::sync_integration(project_id, integration_id).await
    }

    async fn disconnect_integration(
        &self,
        _owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<(), FetchError> {
        super::api::disconnect_integration(project_id, integration_id).await
    }
}

// =============================================================================
// MOCK
// =============================================================================

#[derive(Debug, Default)]
struct MockInner {
    projects: Vec<Project>,
    seed_demo: bool,
    seeded_owners: HashSet<String>,
    fail_next: Option<FetchError>,
    list_calls: usize,
    create_calls: usize,
    connect_calls: usize,
    sync_calls: usize,
    disconnect_calls: usize,
}

impl MockInner {
    fn seed_for(&mut self, owner: &str) {
        if self.seed_demo && self.seeded_owners.insert(owner.to_owned()) {
            self.projects.extend(super::demo::demo_projects(owner, now_ms()));
        }
    }

    fn owned_project(&mut self, owner: &Identity, project_id: &str) -> Result<&mut Project, FetchError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id && p.owner == owner.email)
            .ok_or_else(|| FetchError::from_status(404, "project not found"))
    }
}

/// In-memory backend. Clones share the same store.
#[derive(Clone, Debug, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockInner>>,
}

impl MockBackend {
    /// An empty store; every identity starts with no projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that gives every identity the demo projects on first access.
    #[must_use]
    pub fn with_demo_projects() -> Self {
        let backend = Self::default();
        backend.inner().seed_demo = true;
        backend
    }

    fn inner(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call of any kind fail with `err`.
    pub fn fail_next(&self, err: FetchError) {
        self.inner().fail_next = Some(err);
    }

    /// Insert a project directly, bypassing validation.
    pub fn insert(&self, project: Project) {
        self.inner().projects.push(project);
    }

    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.inner().list_calls
    }

    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.inner().create_calls
    }

    #[must_use]
    pub fn connect_calls(&self) -> usize {
        self.inner().connect_calls
    }

    #[must_use]
    pub fn sync_calls(&self) -> usize {
        self.inner().sync_calls
    }

    #[must_use]
    pub fn disconnect_calls(&self) -> usize {
        self.inner().disconnect_calls
    }
}

impl ProjectBackend for MockBackend {
    async fn list_projects(&self, owner: &Identity) -> Result<Vec<Project>, FetchError> {
        let mut inner = self.inner();
        inner.list_calls += 1;
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        inner.seed_for(&owner.email);
        Ok(inner.projects.iter().filter(|p| p.owner == owner.email).cloned().collect())
    }

    async fn create_project(&self, owner: &Identity, name: &str) -> Result<Project, FetchError> {
        let mut inner = self.inner();
        inner.create_calls += 1;
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::from_status(400, "project name must not be empty"));
        }
        inner.seed_for(&owner.email);
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            created_at: now_ms(),
            owner: owner.email.clone(),
            integrations: Vec::new(),
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn connect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, FetchError> {
        let mut inner = self.inner();
        inner.connect_calls += 1;
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        let project = inner.owned_project(owner, project_id)?;
        if project.has_provider(provider) {
            return Err(FetchError::from_status(409, "integration already connected"));
        }
        let integration = Integration {
            id: Uuid::new_v4().to_string(),
            provider,
            status: IntegrationStatus::Pending,
            last_sync: None,
        };
        project.integrations.push(integration.clone());
        Ok(integration)
    }

    async fn sync_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<Integration, FetchError> {
        let mut inner = self.inner();
        inner.sync_calls += 1;
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        let integration = inner
            .owned_project(owner, project_id)?
            .integrations
            .iter_mut()
            .find(|i| i.id == integration_id)
            .ok_or_else(|| FetchError::from_status(404, "integration not found"))?;
        integration.status = IntegrationStatus::Connected;
        integration.last_sync = Some(now_ms());
        Ok(integration.clone())
    }

    async fn disconnect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<(), FetchError> {
        let mut inner = self.inner();
        inner.disconnect_calls += 1;
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        let project = inner.owned_project(owner, project_id)?;
        let before = project.integrations.len();
        project.integrations.retain(|i| i.id != integration_id);
        if project.integrations.len() == before {
            return Err(FetchError::from_status(404, "integration not found"));
        }
        Ok(())
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// Runtime choice between the HTTP and in-memory backends.
#[derive(Clone, Debug)]
pub enum Backend {
    Http(HttpBackend),
    Mock(MockBackend),
}

impl Default for Backend {
    /// HTTP in the browser, demo-seeded mock everywhere else.
    fn default() -> Self {
        if cfg!(feature = "hydrate") {
            Self::Http(HttpBackend::default())
        } else {
            Self::Mock(MockBackend::with_demo_projects())
        }
    }
}

impl ProjectBackend for Backend {
    async fn list_projects(&self, owner: &Identity) -> Result<Vec<Project>, FetchError> {
        match self {
            Self::Http(b) => b.list_projects(owner).await,
            Self::Mock(b) => b.list_projects(owner).await,
        }
    }

    async fn create_project(&self, owner: &Identity, name: &str) -> Result<Project, FetchError> {
        match self {
            Self::Http(b) => b.create_project(owner, name).await,
            Self::Mock(b) => b.create_project(owner, name).await,
        }
    }

    async fn connect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        provider: IntegrationProvider,
    ) -> Result<Integration, FetchError> {
        match self {
            Self::Http(b) => b.connect_integration(owner, project_id, provider).await,
            Self::Mock(b) => b.connect_integration(owner, project_id, provider).await,
        }
    }

    async fn sync_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<Integration, FetchError> {
        match self {
            Self::Http(b) => b.sync_integration(owner, project_id, integration_id).await,
            Self::Mock(b) => b.sync_integration(owner, project_id, integration_id).await,
        }
    }

    async fn disconnect_integration(
        &self,
        owner: &Identity,
        project_id: &str,
        integration_id: &str,
    ) -> Result<(), FetchError> {
        match self {
            Self::Http(b) => b.disconnect_integration(owner, project_id, integration_id).await,
            Self::Mock(b) => b.disconnect_integration(owner, project_id, integration_id).await,
        }
    }
}
