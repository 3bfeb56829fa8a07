//! Project and integration storage, scoped per owner.
//!
//! DESIGN
//! ======
//! Every operation takes the caller's `Identity` and only touches that
//! owner's projects, so a foreign project id behaves exactly like an unknown
//! one. When demo seeding is enabled, an owner's first access populates the
//! two demo projects.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use aura_client::net::demo::demo_projects;
use aura_client::net::types::{Identity, Integration, IntegrationProvider, IntegrationStatus, Project};
use aura_client::state::projects::{ValidationError, validate_project_name};
use aura_client::util::time::now_ms;
use uuid::Uuid;

use crate::state::{AppState, ProjectStore};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{} is already connected to this project", .0.label())]
    Conflict(IntegrationProvider),
    #[error("integration not found: {0}")]
    IntegrationNotFound(String),
}

fn seed_if_needed(state: &AppState, store: &mut ProjectStore, owner: &str) {
    if !state.config.seed_demo_projects || !store.seeded.insert(owner.to_owned()) {
        return;
    }
    let demos = demo_projects(owner, now_ms());
    tracing::info!(%owner, count = demos.len(), "seeded demo projects");
    store.owned_mut(owner).extend(demos);
}

/// All projects owned by `owner`, oldest first.
pub async fn list_projects(state: &AppState, owner: &Identity) -> Vec<Project> {
    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    store.by_owner.get(&owner.email).cloned().unwrap_or_default()
}

/// Create a project. The name is trimmed and must be non-empty.
pub async fn create_project(state: &AppState, owner: &Identity, name: &str) -> Result<Project, ProjectError> {
    let name = validate_project_name(name)?;
    let project = Project {
        id: Uuid::new_v4().to_string(),
        name,
        created_at: now_ms(),
        owner: owner.email.clone(),
        integrations: Vec::new(),
    };

    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    store.owned_mut(&owner.email).push(project.clone());
    tracing::info!(owner = %owner.email, project_id = %project.id, "project created");
    Ok(project)
}

pub async fn get_project(state: &AppState, owner: &Identity, project_id: &str) -> Result<Project, ProjectError> {
    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    store
        .find_mut(&owner.email, project_id)
        .cloned()
        .ok_or_else(|| ProjectError::NotFound(project_id.to_owned()))
}

pub async fn list_integrations(
    state: &AppState,
    owner: &Identity,
    project_id: &str,
) -> Result<Vec<Integration>, ProjectError> {
    get_project(state, owner, project_id).await.map(|p| p.integrations)
}

/// Attach `provider` to a project as a new `pending` integration.
pub async fn connect_integration(
    state: &AppState,
    owner: &Identity,
    project_id: &str,
    provider: IntegrationProvider,
) -> Result<Integration, ProjectError> {
    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    let project = store
        .find_mut(&owner.email, project_id)
        .ok_or_else(|| ProjectError::NotFound(project_id.to_owned()))?;
    if project.has_provider(provider) {
        return Err(ProjectError::Conflict(provider));
    }

    let integration = Integration {
        id: Uuid::new_v4().to_string(),
        provider,
        status: IntegrationStatus::Pending,
        last_sync: None,
    };
    project.integrations.push(integration.clone());
    tracing::info!(%project_id, provider = provider.as_str(), "integration connected");
    Ok(integration)
}

/// Start a data sync: the integration becomes `connected` with `last_sync`
/// set to now.
pub async fn sync_integration(
    state: &AppState,
    owner: &Identity,
    project_id: &str,
    integration_id: &str,
) -> Result<Integration, ProjectError> {
    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    let project = store
        .find_mut(&owner.email, project_id)
        .ok_or_else(|| ProjectError::NotFound(project_id.to_owned()))?;
    let integration = project
        .integrations
        .iter_mut()
        .find(|i| i.id == integration_id)
        .ok_or_else(|| ProjectError::IntegrationNotFound(integration_id.to_owned()))?;

    integration.status = IntegrationStatus::Connected;
    integration.last_sync = Some(now_ms());
    tracing::info!(%project_id, %integration_id, "integration sync started");
    Ok(integration.clone())
}

/// Detach an integration from a project.
pub async fn disconnect_integration(
    state: &AppState,
    owner: &Identity,
    project_id: &str,
    integration_id: &str,
) -> Result<(), ProjectError> {
    let mut store = state.projects.write().await;
    seed_if_needed(state, &mut store, &owner.email);
    let project = store
        .find_mut(&owner.email, project_id)
        .ok_or_else(|| ProjectError::NotFound(project_id.to_owned()))?;
    let before = project.integrations.len();
    project.integrations.retain(|i| i.id != integration_id);
    if project.integrations.len() == before {
        return Err(ProjectError::IntegrationNotFound(integration_id.to_owned()));
    }
    tracing::info!(%project_id, %integration_id, "integration disconnected");
    Ok(())
}
