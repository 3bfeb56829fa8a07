//! Project-list state for the dashboard context.
//!
//! DESIGN
//! ======
//! All mutations of the project collection and the current selection go
//! through these transitions, so the browser context and the headless
//! `Dashboard` share one set of rules:
//!
//! - the current project, if any, is always a member of `items`;
//! - a failed fetch or create leaves `items` and the selection as they were;
//! - only the latest fetch generation may land; older completions are dropped.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use uuid::Uuid;

use crate::net::error::FetchError;
use crate::net::types::{Identity, Integration, Project};
use crate::util::time::now_ms;

/// Prefix of ids assigned to optimistic, not-yet-confirmed projects.
pub const PENDING_ID_PREFIX: &str = "pending-";

/// Rejected user input, caught before any network call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Project name is required.")]
    EmptyProjectName,
}

/// A selection that is not a member of the collection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("project {0} is not in the current project list")]
pub struct UnknownProject(pub String);

/// Trim a proposed project name and require it to be non-empty.
pub fn validate_project_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyProjectName);
    }
    Ok(name.to_owned())
}

#[must_use]
pub fn fetch_failed_message(err: &FetchError) -> String {
    format!("Failed to load projects: {err}")
}

#[must_use]
pub fn create_failed_message(err: &FetchError) -> String {
    format!("Failed to create project: {err}")
}

/// Handle for one in-flight fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Handle for one optimistic create, used to confirm or roll it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCreate {
    optimistic_id: String,
    previous_current: Option<String>,
}

impl PendingCreate {
    #[must_use]
    pub fn optimistic_id(&self) -> &str {
        &self.optimistic_id
    }
}

/// Projects of the signed-in identity plus the current selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectsState {
    pub items: Vec<Project>,
    pub current_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    in_flight: Option<u64>,
    generation: u64,
    /// A fetch has landed since the last reset.
    settled: bool,
}

impl ProjectsState {
    #[must_use]
    pub fn current(&self) -> Option<&Project> {
        let id = self.current_id.as_deref()?;
        self.items.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the collection is still waiting for its first fetch since the
    /// last reset, or a fetch is running. The dashboard stays on its loading
    /// placeholder while this holds.
    #[must_use]
    pub fn awaiting_fetch(&self) -> bool {
        self.loading || !self.settled
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Start a fetch. Returns `None` while another fetch is in flight; the
    /// caller should skip issuing a request in that case.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.loading = true;
        self.error = None;
        Some(FetchTicket { generation: self.generation })
    }

    /// Land a fetch result. Returns `false` if the ticket is stale.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Project>, FetchError>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        self.settled = true;
        match result {
            Ok(items) => self.replace_items(items),
            Err(err) => self.error = Some(fetch_failed_message(&err)),
        }
        true
    }

    /// Drop the fetch behind `ticket` without landing a result. Returns
    /// `false` if a newer fetch has replaced it.
    pub fn abandon_fetch(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket.generation) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        true
    }

    /// Surface a failure that did not come from a fetch (e.g. bad input).
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Forget everything tied to the previous identity. In-flight fetches
    /// from before the reset can no longer land.
    pub fn reset(&mut self) {
        let generation = self.generation;
        *self = Self { generation, ..Self::default() };
    }

    fn replace_items(&mut self, items: Vec<Project>) {
        let keep = self
            .current_id
            .as_deref()
            .is_some_and(|id| items.iter().any(|p| p.id == id));
        if !keep {
            self.current_id = items.first().map(|p| p.id.clone());
        }
        self.items = items;
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Make `project_id` current. Non-members are rejected without change.
    pub fn select(&mut self, project_id: &str) -> Result<(), UnknownProject> {
        if !self.items.iter().any(|p| p.id == project_id) {
            return Err(UnknownProject(project_id.to_owned()));
        }
        self.current_id = Some(project_id.to_owned());
        Ok(())
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Append a placeholder for `name` and select it until the backend answers.
    pub fn begin_create(&mut self, name: &str, owner: &Identity) -> PendingCreate {
        let optimistic_id = format!("{PENDING_ID_PREFIX}{}", Uuid::new_v4());
        self.items.push(Project {
            id: optimistic_id.clone(),
            name: name.to_owned(),
            created_at: now_ms(),
            owner: owner.email.clone(),
            integrations: Vec::new(),
        });
        let previous_current = self.current_id.replace(optimistic_id.clone());
        self.error = None;
        PendingCreate { optimistic_id, previous_current }
    }

    /// Swap the placeholder for the confirmed project.
    pub fn commit_create(&mut self, pending: &PendingCreate, project: Project) {
        if self.current_id.as_deref() == Some(pending.optimistic_id.as_str()) {
            self.current_id = Some(project.id.clone());
        }
        match self.items.iter_mut().find(|p| p.id == pending.optimistic_id) {
            Some(slot) => *slot = project,
            None => self.items.push(project),
        }
    }

    /// Remove the placeholder and restore the prior selection.
    pub fn discard_create(&mut self, pending: &PendingCreate) {
        self.items.retain(|p| p.id != pending.optimistic_id);
        if self.current_id.as_deref() == Some(pending.optimistic_id.as_str()) {
            self.current_id = pending
                .previous_current
                .clone()
                .filter(|id| self.items.iter().any(|p| &p.id == id))
                .or_else(|| self.items.first().map(|p| p.id.clone()));
        }
    }

    /// `discard_create`, then record `err`.
    pub fn rollback_create(&mut self, pending: &PendingCreate, err: &FetchError) {
        self.discard_create(pending);
        self.error = Some(create_failed_message(err));
    }

    // =========================================================================
    // INTEGRATIONS
    // =========================================================================

    /// Attach a confirmed integration to a project in the collection.
    pub fn add_integration(&mut self, project_id: &str, integration: Integration) -> Result<(), UnknownProject> {
        self.project_mut(project_id)?.integrations.push(integration);
        Ok(())
    }

    /// Overwrite the integration with the same id, e.g. after a sync.
    pub fn replace_integration(&mut self, project_id: &str, integration: Integration) -> Result<(), UnknownProject> {
        let project = self.project_mut(project_id)?;
        match project.integrations.iter_mut().find(|i| i.id == integration.id) {
            Some(slot) => *slot = integration,
            None => project.integrations.push(integration),
        }
        Ok(())
    }

    pub fn remove_integration(&mut self, project_id: &str, integration_id: &str) -> Result<(), UnknownProject> {
        self.project_mut(project_id)?
            .integrations
            .retain(|i| i.id != integration_id);
        Ok(())
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project, UnknownProject> {
        self.items
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| UnknownProject(project_id.to_owned()))
    }
}

/// Whether a project is an unconfirmed optimistic placeholder.
#[must_use]
pub fn is_pending(project: &Project) -> bool {
    project.id.starts_with(PENDING_ID_PREFIX)
}
