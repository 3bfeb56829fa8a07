//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `FetchError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, FetchError>`; non-2xx responses carry the
//! server's `{"error": ...}` message when one is present.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::FetchError;
use super::types::{Identity, Integration, IntegrationProvider, Project};

pub const SESSION_ENDPOINT: &str = "/api/auth/session";
pub const PROJECTS_ENDPOINT: &str = "/api/projects";

#[cfg(any(test, feature = "hydrate"))]
fn project_integrations_endpoint(project_id: &str) -> String {
    format!("{PROJECTS_ENDPOINT}/{project_id}/integrations")
}

#[cfg(any(test, feature = "hydrate"))]
fn integration_endpoint(project_id: &str, integration_id: &str) -> String {
    format!("{}/{integration_id}", project_integrations_endpoint(project_id))
}

/// Pull a human-readable message out of an error response body.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(status: u16, body: &str) -> String {
    serde_json::from_str::<super::types::ApiErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(feature = "hydrate")]
async fn ensure_ok(resp: &gloo_net::http::Response) -> Result<(), FetchError> {
    if resp.ok() {
        return Ok(());
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(FetchError::from_status(status, error_message_from_body(status, &body)))
}

#[cfg(feature = "hydrate")]
async fn decode<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, FetchError> {
    ensure_ok(&resp).await?;
    resp.json::<T>().await.map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn network(err: gloo_net::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

/// Fetch the identity behind the current session cookie.
///
/// `Ok(None)` means the server answered and there is no valid session.
pub async fn fetch_session() -> Result<Option<Identity>, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SESSION_ENDPOINT)
            .send()
            .await
            .map_err(network)?;
        if resp.status() == 401 {
            return Ok(None);
        }
        decode::<Identity>(resp).await.map(Some)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(FetchError::Unavailable)
    }
}

/// Start a session via `POST /api/auth/login`.
pub async fn login(email: &str, name: &str) -> Result<Identity, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::LoginRequest { email: email.to_owned(), name: name.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, name);
        Err(FetchError::Unavailable)
    }
}

/// End the current session by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

/// List the signed-in identity's projects via `GET /api/projects`.
pub async fn list_projects() -> Result<Vec<Project>, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(PROJECTS_ENDPOINT)
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(FetchError::Unavailable)
    }
}

/// Create a project via `POST /api/projects`.
pub async fn create_project(name: &str) -> Result<Project, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::CreateProjectRequest { name: name.to_owned() };
        let resp = gloo_net::http::Request::post(PROJECTS_ENDPOINT)
            .json(&body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        Err(FetchError::Unavailable)
    }
}

/// Attach an integration via `POST /api/projects/{id}/integrations`.
pub async fn connect_integration(project_id: &str, provider: IntegrationProvider) -> Result<Integration, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::ConnectIntegrationRequest { provider };
        let resp = gloo_net::http::Request::post(&project_integrations_endpoint(project_id))
            .json(&body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (project_id, provider);
        Err(FetchError::Unavailable)
    }
}

/// Start a data sync via `POST /api/projects/{id}/integrations/{iid}/sync`.
pub async fn sync_integration(project_id: &str, integration_id: &str) -> Result<Integration, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/sync", integration_endpoint(project_id, integration_id));
        let resp = gloo_net::http::Request::post(&url).send().await.map_err(network)?;
        decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (project_id, integration_id);
        Err(FetchError::Unavailable)
    }
}

/// Detach an integration via `DELETE /api/projects/{id}/integrations/{iid}`.
pub async fn disconnect_integration(project_id: &str, integration_id: &str) -> Result<(), FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&integration_endpoint(project_id, integration_id))
            .send()
            .await
            .map_err(network)?;
        ensure_ok(&resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (project_id, integration_id);
        Err(FetchError::Unavailable)
    }
}
