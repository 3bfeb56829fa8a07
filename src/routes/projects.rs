//! Project and integration routes. All require a session.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use aura_client::net::types::{ConnectIntegrationRequest, CreateProjectRequest, Integration, Project};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, ApiJson};
use crate::routes::auth::AuthUser;
use crate::services::projects as project_svc;
use crate::state::AppState;

/// `GET /api/projects`: the caller's projects, oldest first.
pub async fn list_projects(State(state): State<AppState>, auth: AuthUser) -> Json<Vec<Project>> {
    Json(project_svc::list_projects(&state, &auth.identity).await)
}

/// `POST /api/projects`: create a project.
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = project_svc::create_project(&state, &auth.identity, &body.name).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects/{id}`
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(project_svc::get_project(&state, &auth.identity, &project_id).await?))
}

/// `GET /api/projects/{id}/integrations`
pub async fn list_integrations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Integration>>, ApiError> {
    Ok(Json(project_svc::list_integrations(&state, &auth.identity, &project_id).await?))
}

/// `POST /api/projects/{id}/integrations`: attach a provider as `pending`.
pub async fn connect_integration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<String>,
    ApiJson(body): ApiJson<ConnectIntegrationRequest>,
) -> Result<(StatusCode, Json<Integration>), ApiError> {
    let integration = project_svc::connect_integration(&state, &auth.identity, &project_id, body.provider).await?;
    Ok((StatusCode::CREATED, Json(integration)))
}

/// `POST /api/projects/{id}/integrations/{integration_id}/sync`: start a data
/// sync.
pub async fn sync_integration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, integration_id)): Path<(String, String)>,
) -> Result<Json<Integration>, ApiError> {
    let integration = project_svc::sync_integration(&state, &auth.identity, &project_id, &integration_id).await?;
    Ok(Json(integration))
}

/// `DELETE /api/projects/{id}/integrations/{integration_id}`
pub async fn disconnect_integration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, integration_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    project_svc::disconnect_integration(&state, &auth.identity, &project_id, &integration_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
