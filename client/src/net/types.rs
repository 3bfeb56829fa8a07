//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server reuses these types for its JSON responses, so a field rename
//! here is a protocol change. Enum tags and field names are snake_case.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated identity behind a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user key; projects are owned by this value.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Top-level workspace a user operates within.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Display name, already trimmed.
    pub name: String,
    /// Creation timestamp in milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Email of the owning identity.
    pub owner: String,
    /// Connected data sources.
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

impl Project {
    /// Whether an integration for `provider` is already attached.
    #[must_use]
    pub fn has_provider(&self, provider: IntegrationProvider) -> bool {
        self.integrations.iter().any(|i| i.provider == provider)
    }

    /// Integrations whose status is `connected`; pending and errored
    /// sources are not counted.
    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.integrations
            .iter()
            .filter(|i| i.status == IntegrationStatus::Connected)
            .count()
    }
}

/// A third-party data source attached to exactly one project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub provider: IntegrationProvider,
    pub status: IntegrationStatus,
    /// Last successful sync in milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_sync: Option<i64>,
}

/// Supported integration providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationProvider {
    Facebook,
    Shopify,
    GoogleAds,
    AmazonAds,
}

impl IntegrationProvider {
    pub const ALL: [Self; 4] = [Self::Facebook, Self::Shopify, Self::GoogleAds, Self::AmazonAds];

    /// Wire tag, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Shopify => "shopify",
            Self::GoogleAds => "google_ads",
            Self::AmazonAds => "amazon_ads",
        }
    }

    /// Human-readable provider name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook Ads",
            Self::Shopify => "Shopify",
            Self::GoogleAds => "Google Ads",
            Self::AmazonAds => "Amazon Ads",
        }
    }
}

/// Connection status of an integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStatus {
    Connected,
    #[default]
    Pending,
    Error,
}

impl IntegrationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }
}

/// Body of `POST /api/projects`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Body of `POST /api/projects/{id}/integrations`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectIntegrationRequest {
    pub provider: IntegrationProvider,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
}

impl LoginRequest {
    /// Trim both fields, lowercase the email and require a plausible
    /// `user@domain.tld` address plus a non-empty name.
    pub fn normalized(&self) -> Result<Self, &'static str> {
        let email = self.email.trim();
        let name = self.name.trim();
        if email.is_empty() || name.is_empty() {
            return Err("Enter both your email and name.");
        }
        let valid_email = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.ends_with('.'));
        if !valid_email {
            return Err("Enter a valid email address.");
        }
        Ok(Self { email: email.to_ascii_lowercase(), name: name.to_owned() })
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
