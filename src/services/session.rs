//! Session management.
//!
//! ARCHITECTURE
//! ============
//! A session is an opaque random token carried in an HttpOnly cookie and
//! mapped to an `Identity` in memory. Expired records are rejected on lookup
//! and swept periodically by `spawn_session_reaper`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt::Write;
use std::time::{Duration, Instant};

use aura_client::net::types::Identity;
use rand::Rng;
use tokio::task::JoinHandle;

use crate::state::{AppState, SessionRecord};

const REAP_INTERVAL: Duration = Duration::from_secs(300);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for `identity`, returning the token.
pub async fn create_session(state: &AppState, identity: Identity) -> String {
    let token = generate_token();
    let expires_at = Instant::now() + state.config.session_ttl;
    state
        .sessions
        .write()
        .await
        .insert(token.clone(), SessionRecord { identity, expires_at });
    token
}

/// Return the identity behind `token` if the session exists and is live.
pub async fn validate_session(state: &AppState, token: &str) -> Option<Identity> {
    let sessions = state.sessions.read().await;
    let record = sessions.get(token)?;
    if record.is_expired(Instant::now()) {
        return None;
    }
    Some(record.identity.clone())
}

/// Delete a session by token. Unknown tokens are ignored.
pub async fn delete_session(state: &AppState, token: &str) {
    state.sessions.write().await.remove(token);
}

/// Drop every expired session, returning how many were removed.
pub async fn purge_expired(state: &AppState) -> usize {
    let now = Instant::now();
    let mut sessions = state.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, record| !record.is_expired(now));
    before - sessions.len()
}

/// Spawn the background task that periodically purges expired sessions.
pub fn spawn_session_reaper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REAP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = purge_expired(&state).await;
            if removed > 0 {
                tracing::debug!(removed, "purged expired sessions");
            }
        }
    })
}
