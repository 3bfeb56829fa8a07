use super::*;
use crate::net::types::{Integration, IntegrationStatus};

fn project_with(providers: &[IntegrationProvider]) -> Project {
    Project {
        id: "p1".to_owned(),
        name: "StyleCo Fashion".to_owned(),
        created_at: 0,
        owner: "sarah@styleco.com".to_owned(),
        integrations: providers
            .iter()
            .enumerate()
            .map(|(i, provider)| Integration {
                id: format!("i{i}"),
                provider: *provider,
                status: IntegrationStatus::Connected,
                last_sync: None,
            })
            .collect(),
    }
}

#[test]
fn available_providers_lists_everything_for_a_fresh_project() {
    assert_eq!(available_providers(&project_with(&[])), IntegrationProvider::ALL.to_vec());
}

#[test]
fn available_providers_skips_attached_ones_and_keeps_order() {
    let project = project_with(&[IntegrationProvider::Shopify, IntegrationProvider::Facebook]);
    assert_eq!(
        available_providers(&project),
        vec![IntegrationProvider::GoogleAds, IntegrationProvider::AmazonAds]
    );
}
