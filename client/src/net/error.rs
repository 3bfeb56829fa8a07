//! Failure taxonomy for calls to the project backend.
//!
//! ERROR HANDLING
//! ==============
//! `FetchError` is what the dashboard context stores (as a message) and what
//! the retry loop inspects to decide whether another attempt is worthwhile.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A failed backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected schema.
    #[error("invalid response: {0}")]
    Decode(String),
    /// The session is missing or expired.
    #[error("not signed in")]
    Unauthorized,
    /// This build has no way to reach the backend (server-side render).
    #[error("backend unavailable in this environment")]
    Unavailable,
}

impl FetchError {
    /// Build a status error, mapping 401 to `Unauthorized`.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            Self::Unauthorized
        } else {
            Self::Status { status, message: message.into() }
        }
    }

    /// Whether the same request may succeed if repeated.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) | Self::Unauthorized | Self::Unavailable => false,
        }
    }
}
