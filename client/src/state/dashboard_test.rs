use super::*;
use crate::net::backend::MockBackend;
use crate::net::types::IntegrationStatus;
use crate::state::ui::ToastKind;
use futures::executor::block_on;

fn identity() -> Identity {
    Identity {
        email: "sarah@styleco.com".to_owned(),
        name: "Sarah Chen".to_owned(),
        avatar_url: None,
    }
}

fn signed_in(backend: MockBackend) -> Dashboard<MockBackend> {
    let mut dashboard = Dashboard::new(backend);
    block_on(dashboard.observe_session(SessionState::Authenticated(identity())));
    dashboard
}

// =============================================================
// Session gate
// =============================================================

#[test]
fn unauthenticated_session_redirects_once_and_renders_nothing() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = Dashboard::new(backend.clone());
    let effects = [
        block_on(dashboard.observe_session(SessionState::Unauthenticated)),
        block_on(dashboard.observe_session(SessionState::Unauthenticated)),
    ];
    let redirects = effects.iter().filter(|e| **e == SessionEffect::RedirectToAuth).count();
    assert_eq!(redirects, 1);
    assert_eq!(dashboard.render(), RenderGate::Hidden);
    assert_eq!(backend.list_calls(), 0);
}

#[test]
fn loading_session_blocks_rendering_without_fetching() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = Dashboard::new(backend.clone());
    block_on(dashboard.observe_session(SessionState::Loading));
    assert_eq!(dashboard.render(), RenderGate::Loading);
    assert_eq!(backend.list_calls(), 0);
}

#[test]
fn loading_to_authenticated_fetches_exactly_once() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = Dashboard::new(backend.clone());
    block_on(dashboard.observe_session(SessionState::Loading));
    block_on(dashboard.observe_session(SessionState::Authenticated(identity())));
    block_on(dashboard.observe_session(SessionState::Authenticated(identity())));
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(dashboard.render(), RenderGate::Content);
}

#[test]
fn fresh_dashboard_renders_loading() {
    let dashboard = Dashboard::new(MockBackend::new());
    assert_eq!(dashboard.render(), RenderGate::Loading);
}

#[test]
fn demo_scenario_selects_first_project() {
    let dashboard = signed_in(MockBackend::with_demo_projects());
    assert_eq!(dashboard.projects().len(), 2);
    assert_eq!(dashboard.current_project().map(|p| p.name.as_str()), Some("StyleCo Fashion"));
    assert!(!dashboard.is_loading());
    assert!(dashboard.error().is_none());
}

#[test]
fn sign_out_clears_projects() {
    let mut dashboard = signed_in(MockBackend::with_demo_projects());
    block_on(dashboard.observe_session(SessionState::Unauthenticated));
    assert!(dashboard.projects().is_empty());
    assert!(dashboard.current_project().is_none());
}

// =============================================================
// refresh_projects
// =============================================================

#[test]
fn refresh_with_empty_collection_leaves_current_unset() {
    let dashboard = signed_in(MockBackend::new());
    assert!(dashboard.projects().is_empty());
    assert!(dashboard.current_project().is_none());
}

#[test]
fn failed_refresh_keeps_state_and_sets_error() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let second_id = dashboard.projects()[1].id.clone();
    dashboard.set_current_project(&second_id).unwrap();
    let before = dashboard.projects().to_vec();

    backend.fail_next(FetchError::from_status(503, "maintenance"));
    let result = block_on(dashboard.refresh_projects());

    assert!(matches!(result, Err(DashboardError::Fetch(_))));
    assert_eq!(dashboard.projects(), before.as_slice());
    assert_eq!(dashboard.current_project().map(|p| p.id.as_str()), Some(second_id.as_str()));
    assert!(!dashboard.error().unwrap_or_default().is_empty());
    assert!(!dashboard.is_loading());
}

#[test]
fn refresh_after_failure_recovers() {
    let backend = MockBackend::with_demo_projects();
    backend.fail_next(FetchError::Network("offline".to_owned()));
    let mut dashboard = signed_in(backend);
    assert!(dashboard.error().is_some());
    assert!(dashboard.projects().is_empty());

    block_on(dashboard.refresh_projects()).unwrap();
    assert!(dashboard.error().is_none());
    assert_eq!(dashboard.current_project().map(|p| p.name.as_str()), Some("StyleCo Fashion"));
}

#[test]
fn refresh_without_session_is_rejected() {
    let backend = MockBackend::new();
    let mut dashboard = Dashboard::new(backend.clone());
    assert_eq!(block_on(dashboard.refresh_projects()), Err(DashboardError::NoSession));
    assert_eq!(backend.list_calls(), 0);
}

// =============================================================
// create_project
// =============================================================

#[test]
fn blank_names_fail_validation_without_backend_call() {
    let backend = MockBackend::new();
    let mut dashboard = signed_in(backend.clone());
    for name in ["", "   "] {
        let result = block_on(dashboard.create_project(name));
        assert_eq!(result, Err(DashboardError::Validation(ValidationError::EmptyProjectName)));
    }
    assert_eq!(backend.create_calls(), 0);
    assert_eq!(dashboard.error(), Some("Project name is required."));
    assert!(dashboard.projects().is_empty());
}

#[test]
fn create_appends_and_selects_project() {
    let mut dashboard = signed_in(MockBackend::with_demo_projects());
    let created = block_on(dashboard.create_project("Acme")).unwrap();
    assert_eq!(created.name, "Acme");
    assert_eq!(dashboard.projects().len(), 3);
    assert_eq!(dashboard.projects().last(), Some(&created));
    assert_eq!(dashboard.current_project(), Some(&created));
    assert!(dashboard.error().is_none());
    assert_eq!(dashboard.toast().map(|t| t.message.as_str()), Some("Created Acme"));
}

#[test]
fn failed_create_rolls_back() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let before = dashboard.projects().to_vec();
    let current_before = dashboard.current_project().cloned();

    backend.fail_next(FetchError::from_status(500, "boom"));
    let result = block_on(dashboard.create_project("Acme"));

    assert!(matches!(result, Err(DashboardError::Fetch(_))));
    assert_eq!(dashboard.projects(), before.as_slice());
    assert_eq!(dashboard.current_project().cloned(), current_before);
    assert!(dashboard.error().unwrap_or_default().contains("boom"));
}

#[test]
fn create_without_session_is_rejected() {
    let mut dashboard = Dashboard::new(MockBackend::new());
    assert_eq!(block_on(dashboard.create_project("Acme")), Err(DashboardError::NoSession));
}

// =============================================================
// set_current_project / connect_integration
// =============================================================

#[test]
fn set_current_project_rejects_unknown_id() {
    let mut dashboard = signed_in(MockBackend::with_demo_projects());
    let current = dashboard.current_project().cloned();
    assert!(matches!(
        dashboard.set_current_project("nope"),
        Err(DashboardError::UnknownProject(_))
    ));
    assert_eq!(dashboard.current_project().cloned(), current);
}

#[test]
fn connect_integration_updates_project() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let techgear = dashboard.projects()[1].id.clone();
    let integration =
        block_on(dashboard.connect_integration(&techgear, IntegrationProvider::AmazonAds)).unwrap();
    assert_eq!(integration.status, IntegrationStatus::Pending);
    assert_eq!(dashboard.projects()[1].integrations.len(), 2);
    assert_eq!(backend.connect_calls(), 1);
}

#[test]
fn connect_duplicate_provider_shows_error_toast() {
    let mut dashboard = signed_in(MockBackend::with_demo_projects());
    let styleco = dashboard.projects()[0].id.clone();
    let result = block_on(dashboard.connect_integration(&styleco, IntegrationProvider::Shopify));
    assert!(matches!(result, Err(DashboardError::Fetch(_))));

    let toast = dashboard.toast().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.starts_with("Failed to connect Shopify"));
    assert!(dashboard.error().is_none());
    assert_eq!(dashboard.projects()[0].integrations.len(), 2);
}

#[test]
fn connect_success_shows_toast() {
    let mut dashboard = signed_in(MockBackend::with_demo_projects());
    let techgear = dashboard.projects()[1].id.clone();
    block_on(dashboard.connect_integration(&techgear, IntegrationProvider::Facebook)).unwrap();
    let toast = dashboard.toast().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Facebook Ads connection started");
}

// =============================================================
// sync / disconnect
// =============================================================

#[test]
fn sync_integration_updates_local_project() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let techgear = dashboard.projects()[1].id.clone();
    let pending = block_on(dashboard.connect_integration(&techgear, IntegrationProvider::AmazonAds)).unwrap();

    let synced = block_on(dashboard.sync_integration(&techgear, &pending.id)).unwrap();
    assert_eq!(synced.status, IntegrationStatus::Connected);
    let local = dashboard.projects()[1].integrations.iter().find(|i| i.id == pending.id).cloned();
    assert_eq!(local, Some(synced));
    assert_eq!(dashboard.toast().map(|t| t.message.as_str()), Some("Data sync started"));
    assert_eq!(backend.sync_calls(), 1);
}

#[test]
fn disconnect_integration_removes_it_locally() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let styleco = dashboard.projects()[0].clone();
    let target = styleco.integrations[0].id.clone();

    block_on(dashboard.disconnect_integration(&styleco.id, &target)).unwrap();
    assert_eq!(dashboard.projects()[0].integrations.len(), styleco.integrations.len() - 1);
    assert_eq!(dashboard.toast().map(|t| t.message.as_str()), Some("Integration disconnected"));
    assert_eq!(backend.disconnect_calls(), 1);
}

#[test]
fn failed_sync_shows_error_toast_and_keeps_integration() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let styleco = dashboard.projects()[0].clone();

    backend.fail_next(FetchError::from_status(500, "boom"));
    let result = block_on(dashboard.sync_integration(&styleco.id, &styleco.integrations[0].id));
    assert!(matches!(result, Err(DashboardError::Fetch(_))));
    assert_eq!(dashboard.projects()[0], styleco);
    let toast = dashboard.toast().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("boom"));
}

// =============================================================
// Expired session (401)
// =============================================================

fn assert_signed_out(dashboard: &Dashboard<MockBackend>) {
    assert_eq!(dashboard.session(), &SessionState::Unauthenticated);
    assert_eq!(dashboard.render(), RenderGate::Hidden);
    assert!(dashboard.error().is_none());
    assert!(dashboard.projects().is_empty());
}

#[test]
fn unauthorized_refresh_ends_session_instead_of_storing_error() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());

    backend.fail_next(FetchError::Unauthorized);
    let result = block_on(dashboard.refresh_projects());

    assert_eq!(result, Err(DashboardError::SessionExpired));
    assert_signed_out(&dashboard);
    assert!(!dashboard.state().fetch_in_flight());
}

#[test]
fn unauthorized_first_fetch_redirects() {
    let backend = MockBackend::with_demo_projects();
    backend.fail_next(FetchError::Unauthorized);
    let mut dashboard = Dashboard::new(backend.clone());

    let effect = block_on(dashboard.observe_session(SessionState::Authenticated(identity())));
    assert_eq!(effect, SessionEffect::RedirectToAuth);
    assert_signed_out(&dashboard);

    // The gate already redirected; a second sign-out report is a no-op.
    let again = block_on(dashboard.observe_session(SessionState::Unauthenticated));
    assert_eq!(again, SessionEffect::None);
}

#[test]
fn unauthorized_create_discards_placeholder_and_ends_session() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());

    backend.fail_next(FetchError::Unauthorized);
    let result = block_on(dashboard.create_project("Acme"));

    assert_eq!(result, Err(DashboardError::SessionExpired));
    assert_signed_out(&dashboard);
}

#[test]
fn unauthorized_connect_ends_session_without_toast() {
    let backend = MockBackend::with_demo_projects();
    let mut dashboard = signed_in(backend.clone());
    let techgear = dashboard.projects()[1].id.clone();

    backend.fail_next(FetchError::Unauthorized);
    let result = block_on(dashboard.connect_integration(&techgear, IntegrationProvider::Shopify));

    assert_eq!(result, Err(DashboardError::SessionExpired));
    assert_signed_out(&dashboard);
    assert!(dashboard.toast().is_none());
}
