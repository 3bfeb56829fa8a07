//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Sessions and projects live in memory only; a restart signs everyone out
//! and drops every project created since boot.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use aura_client::net::types::{Identity, Project};
use tokio::sync::RwLock;

use crate::config::ServerConfig;

// =============================================================================
// SESSIONS
// =============================================================================

/// A signed-in browser, keyed by its cookie token.
#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub identity: Identity,
    pub expires_at: Instant,
}

impl SessionRecord {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// Projects grouped by owner email.
#[derive(Debug, Default)]
pub struct ProjectStore {
    /// Owner email -> projects in creation order.
    pub by_owner: HashMap<String, Vec<Project>>,
    /// Owners that already received the demo projects.
    pub seeded: HashSet<String>,
}

impl ProjectStore {
    pub fn owned_mut(&mut self, owner: &str) -> &mut Vec<Project> {
        self.by_owner.entry(owner.to_owned()).or_default()
    }

    pub fn find_mut(&mut self, owner: &str, project_id: &str) -> Option<&mut Project> {
        self.by_owner
            .get_mut(owner)?
            .iter_mut()
            .find(|p| p.id == project_id)
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; all inner fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    pub projects: Arc<RwLock<ProjectStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            projects: Arc::new(RwLock::new(ProjectStore::default())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
