//! Auth routes: email sign-in, session lookup, logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use aura_client::net::types::{Identity, LoginRequest};
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::{ApiError, ApiJson};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "aura_session";

fn session_cookie(token: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated identity extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub identity: Identity,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized());
        }

        let app_state = AppState::from_ref(state);
        let identity = session::validate_session(&app_state, token)
            .await
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { identity })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: create a session and set the cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<Identity>), ApiError> {
    let request = body
        .normalized()
        .map_err(|message| ApiError::new(StatusCode::BAD_REQUEST, message))?;
    let identity = Identity { email: request.email, name: request.name, avatar_url: None };

    let token = session::create_session(&state, identity.clone()).await;
    let max_age = Duration::try_from(state.config.session_ttl).unwrap_or(Duration::DAY);
    tracing::info!(email = %identity.email, "session created");

    let jar = jar.add(session_cookie(token, state.config.cookie_secure, max_age));
    Ok((jar, Json(identity)))
}

/// `GET /api/auth/session`: the signed-in identity, or 401.
pub async fn current_session(auth: AuthUser) -> Json<Identity> {
    Json(auth.identity)
}

/// `POST /api/auth/logout`: delete the session if any and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()) {
        session::delete_session(&state, &token).await;
    }
    let jar = jar.add(session_cookie(String::new(), state.config.cookie_secure, Duration::ZERO));
    (jar, StatusCode::NO_CONTENT)
}
