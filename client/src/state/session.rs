//! Auth-session state and the gate that guards dashboard routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session comes from an external auth service as a tri-state signal.
//! `SessionGate` turns changes of that signal into at most one redirect per
//! sign-out and at most one project fetch per signed-in identity, and decides
//! what the dashboard may render.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::error::FetchError;
use crate::net::types::Identity;

/// Session as reported by the auth service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(Identity),
    Unauthenticated,
}

/// Discriminant of `SessionState` without the identity payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    /// Interpret the result of a session lookup. Lookup failures count as
    /// signed out; the user can sign in again from the auth screen.
    #[must_use]
    pub fn from_lookup(result: Result<Option<Identity>, FetchError>) -> Self {
        match result {
            Ok(Some(identity)) => Self::Authenticated(identity),
            Ok(None) | Err(_) => Self::Unauthenticated,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self {
            Self::Loading => SessionStatus::Loading,
            Self::Authenticated(_) => SessionStatus::Authenticated,
            Self::Unauthenticated => SessionStatus::Unauthenticated,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Loading | Self::Unauthenticated => None,
        }
    }
}

/// Side effect the caller must perform after a session change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    RedirectToAuth,
    FetchProjects(Identity),
}

/// What the dashboard shell should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderGate {
    /// Blocking "Loading dashboard..." placeholder.
    Loading,
    /// Nothing; a redirect is under way.
    Hidden,
    /// Child screens.
    Content,
}

/// Tracks session transitions so effects fire exactly once per transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionGate {
    state: SessionState,
    redirected: bool,
    fetched_for: Option<String>,
}

impl SessionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Record a new session value and return the effect it triggers.
    ///
    /// Repeated observations of the same state are no-ops. A fetch is issued
    /// once per authenticated identity and re-armed by a sign-out.
    pub fn observe(&mut self, next: SessionState) -> SessionEffect {
        let effect = match &next {
            SessionState::Loading => SessionEffect::None,
            SessionState::Unauthenticated => {
                self.fetched_for = None;
                if self.redirected {
                    SessionEffect::None
                } else {
                    self.redirected = true;
                    SessionEffect::RedirectToAuth
                }
            }
            SessionState::Authenticated(identity) => {
                self.redirected = false;
                if self.fetched_for.as_deref() == Some(identity.email.as_str()) {
                    SessionEffect::None
                } else {
                    self.fetched_for = Some(identity.email.clone());
                    SessionEffect::FetchProjects(identity.clone())
                }
            }
        };
        self.state = next;
        effect
    }

    /// Decide what to render given whether the project list is still
    /// pending (see `ProjectsState::awaiting_fetch`).
    #[must_use]
    pub fn render(&self, projects_pending: bool) -> RenderGate {
        render_gate(&self.state, projects_pending)
    }
}

/// Render decision for a session value; see `SessionGate::render`.
#[must_use]
pub fn render_gate(state: &SessionState, projects_pending: bool) -> RenderGate {
    match state {
        SessionState::Loading => RenderGate::Loading,
        SessionState::Unauthenticated => RenderGate::Hidden,
        SessionState::Authenticated(_) if projects_pending => RenderGate::Loading,
        SessionState::Authenticated(_) => RenderGate::Content,
    }
}
