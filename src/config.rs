//! Environment-driven server configuration.
//!
//! DESIGN
//! ======
//! Every knob has a default so the server starts with no environment at all.
//! Unparseable values fall back to the default instead of aborting startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Give each identity the two demo projects on first access.
    pub seed_demo_projects: bool,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_demo_projects: true,
            cookie_secure: false,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl_hours = env_parse("AURA_SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS);
        Self {
            port: env_parse("PORT", defaults.port),
            seed_demo_projects: env_bool("AURA_SEED_DEMO_PROJECTS").unwrap_or(defaults.seed_demo_projects),
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(defaults.cookie_secure),
            session_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
        }
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}
