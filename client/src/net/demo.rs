//! Demo workspace fixtures shared by the mock backend and server seeding.

use uuid::Uuid;

use super::types::{Integration, IntegrationProvider, IntegrationStatus, Project};

/// 2024-01-15T00:00:00Z
const STYLECO_CREATED_AT: i64 = 1_705_276_800_000;
/// 2024-01-20T00:00:00Z
const TECHGEAR_CREATED_AT: i64 = 1_705_708_800_000;

fn connected(provider: IntegrationProvider, now_ms: i64) -> Integration {
    Integration {
        id: Uuid::new_v4().to_string(),
        provider,
        status: IntegrationStatus::Connected,
        last_sync: Some(now_ms),
    }
}

/// The two demo projects every new identity starts with, in display order.
#[must_use]
pub fn demo_projects(owner: &str, now_ms: i64) -> Vec<Project> {
    vec![
        Project {
            id: Uuid::new_v4().to_string(),
            name: "StyleCo Fashion".to_owned(),
            created_at: STYLECO_CREATED_AT,
            owner: owner.to_owned(),
            integrations: vec![
                connected(IntegrationProvider::Facebook, now_ms),
                connected(IntegrationProvider::Shopify, now_ms),
            ],
        },
        Project {
            id: Uuid::new_v4().to_string(),
            name: "TechGear Store".to_owned(),
            created_at: TECHGEAR_CREATED_AT,
            owner: owner.to_owned(),
            integrations: vec![connected(IntegrationProvider::GoogleAds, now_ms)],
        },
    ]
}
