use super::*;
use crate::net::types::{IntegrationProvider, IntegrationStatus};

fn owner() -> Identity {
    Identity { email: "sarah@styleco.com".to_owned(), name: "Sarah".to_owned(), avatar_url: None }
}

fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_owned(),
        name: name.to_owned(),
        created_at: 0,
        owner: "sarah@styleco.com".to_owned(),
        integrations: Vec::new(),
    }
}

fn loaded(items: Vec<Project>) -> ProjectsState {
    let mut state = ProjectsState::default();
    let ticket = state.begin_fetch().unwrap();
    assert!(state.finish_fetch(ticket, Ok(items)));
    state
}

// =============================================================
// validate_project_name
// =============================================================

#[test]
fn validate_rejects_empty_and_whitespace() {
    assert_eq!(validate_project_name(""), Err(ValidationError::EmptyProjectName));
    assert_eq!(validate_project_name("   "), Err(ValidationError::EmptyProjectName));
    assert_eq!(validate_project_name("\t\n"), Err(ValidationError::EmptyProjectName));
}

#[test]
fn validate_trims_name() {
    assert_eq!(validate_project_name("  Acme "), Ok("Acme".to_owned()));
}

// =============================================================
// Fetch
// =============================================================

#[test]
fn projects_state_defaults() {
    let s = ProjectsState::default();
    assert!(s.items.is_empty());
    assert!(s.current().is_none());
    assert!(!s.loading);
    assert!(s.error.is_none());
}

#[test]
fn begin_fetch_sets_loading_and_clears_error() {
    let mut s = ProjectsState::default();
    s.record_error("old");
    assert!(s.begin_fetch().is_some());
    assert!(s.loading);
    assert!(s.error.is_none());
}

#[test]
fn second_fetch_while_in_flight_is_deduplicated() {
    let mut s = ProjectsState::default();
    assert!(s.begin_fetch().is_some());
    assert!(s.begin_fetch().is_none());
}

#[test]
fn empty_result_leaves_current_unset() {
    let s = loaded(Vec::new());
    assert!(s.current().is_none());
    assert!(!s.loading);
}

#[test]
fn first_result_selects_first_project() {
    let s = loaded(vec![project("1", "StyleCo Fashion"), project("2", "TechGear Store")]);
    assert_eq!(s.current().map(|p| p.name.as_str()), Some("StyleCo Fashion"));
    assert_eq!(s.items.len(), 2);
}

#[test]
fn refresh_keeps_existing_selection() {
    let mut s = loaded(vec![project("1", "A"), project("2", "B")]);
    s.select("2").unwrap();
    let ticket = s.begin_fetch().unwrap();
    s.finish_fetch(ticket, Ok(vec![project("1", "A"), project("2", "B"), project("3", "C")]));
    assert_eq!(s.current_id.as_deref(), Some("2"));
    assert_eq!(s.items.len(), 3);
}

#[test]
fn refresh_without_current_member_falls_back_to_first() {
    let mut s = loaded(vec![project("1", "A"), project("2", "B")]);
    s.select("2").unwrap();
    let ticket = s.begin_fetch().unwrap();
    s.finish_fetch(ticket, Ok(vec![project("3", "C")]));
    assert_eq!(s.current_id.as_deref(), Some("3"));
}

#[test]
fn failed_refresh_keeps_previous_state_and_sets_error() {
    let mut s = loaded(vec![project("1", "A"), project("2", "B")]);
    s.select("2").unwrap();
    let before_items = s.items.clone();
    let ticket = s.begin_fetch().unwrap();
    s.finish_fetch(ticket, Err(FetchError::Network("offline".to_owned())));
    assert_eq!(s.items, before_items);
    assert_eq!(s.current_id.as_deref(), Some("2"));
    assert!(!s.loading);
    let message = s.error.clone().unwrap();
    assert!(message.starts_with("Failed to load projects"));
}

#[test]
fn abandoned_fetch_result_is_ignored() {
    let mut s = ProjectsState::default();
    let ticket = s.begin_fetch().unwrap();
    assert!(s.abandon_fetch(ticket));
    assert!(!s.finish_fetch(ticket, Ok(vec![project("1", "A")])));
    assert!(s.items.is_empty());
    assert!(!s.loading);
    assert!(s.awaiting_fetch());
}

#[test]
fn abandoning_a_stale_ticket_keeps_the_newer_fetch() {
    let mut s = ProjectsState::default();
    let stale = s.begin_fetch().unwrap();
    s.reset();
    let fresh = s.begin_fetch().unwrap();
    assert!(!s.abandon_fetch(stale));
    assert!(s.fetch_in_flight());
    assert!(s.finish_fetch(fresh, Ok(vec![project("1", "A")])));
}

#[test]
fn awaiting_fetch_until_first_fetch_settles() {
    let mut s = ProjectsState::default();
    assert!(!s.loading);
    assert!(s.awaiting_fetch());

    let ticket = s.begin_fetch().unwrap();
    assert!(s.awaiting_fetch());
    s.finish_fetch(ticket, Err(FetchError::Network("offline".to_owned())));
    assert!(!s.awaiting_fetch());

    let ticket = s.begin_fetch().unwrap();
    assert!(s.awaiting_fetch());
    s.finish_fetch(ticket, Ok(Vec::new()));
    assert!(!s.awaiting_fetch());

    s.reset();
    assert!(s.awaiting_fetch());
}

#[test]
fn fetch_from_before_reset_is_ignored() {
    let mut s = ProjectsState::default();
    let stale = s.begin_fetch().unwrap();
    s.reset();
    let fresh = s.begin_fetch().unwrap();
    assert!(!s.finish_fetch(stale, Ok(vec![project("old", "Old")])));
    assert!(s.finish_fetch(fresh, Ok(vec![project("new", "New")])));
    assert_eq!(s.current_id.as_deref(), Some("new"));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_rejects_non_member() {
    let mut s = loaded(vec![project("1", "A")]);
    assert_eq!(s.select("9"), Err(UnknownProject("9".to_owned())));
    assert_eq!(s.current_id.as_deref(), Some("1"));
}

// =============================================================
// Create
// =============================================================

#[test]
fn begin_create_appends_and_selects_placeholder() {
    let mut s = loaded(vec![project("1", "A")]);
    let pending = s.begin_create("Acme", &owner());
    assert_eq!(s.items.len(), 2);
    let current = s.current().unwrap();
    assert_eq!(current.name, "Acme");
    assert!(is_pending(current));
    assert_eq!(current.id, pending.optimistic_id());
}

#[test]
fn commit_create_replaces_placeholder() {
    let mut s = loaded(vec![project("1", "A")]);
    let pending = s.begin_create("Acme", &owner());
    s.commit_create(&pending, project("42", "Acme"));
    assert_eq!(s.items.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["1", "42"]);
    assert_eq!(s.current_id.as_deref(), Some("42"));
    assert!(!s.items.iter().any(is_pending));
}

#[test]
fn commit_after_user_switched_keeps_user_choice() {
    let mut s = loaded(vec![project("1", "A")]);
    let pending = s.begin_create("Acme", &owner());
    s.select("1").unwrap();
    s.commit_create(&pending, project("42", "Acme"));
    assert_eq!(s.current_id.as_deref(), Some("1"));
}

#[test]
fn rollback_create_restores_collection_and_selection() {
    let mut s = loaded(vec![project("1", "A"), project("2", "B")]);
    s.select("2").unwrap();
    let before = s.items.clone();
    let pending = s.begin_create("Acme", &owner());
    s.rollback_create(&pending, &FetchError::from_status(500, "boom"));
    assert_eq!(s.items, before);
    assert_eq!(s.current_id.as_deref(), Some("2"));
    assert!(s.error.as_deref().unwrap().starts_with("Failed to create project"));
}

#[test]
fn discard_create_restores_without_recording_error() {
    let mut s = loaded(vec![project("1", "A")]);
    let pending = s.begin_create("Acme", &owner());
    s.discard_create(&pending);
    assert_eq!(s.items, vec![project("1", "A")]);
    assert_eq!(s.current_id.as_deref(), Some("1"));
    assert!(s.error.is_none());
}

#[test]
fn rollback_on_empty_collection_leaves_no_selection() {
    let mut s = ProjectsState::default();
    let pending = s.begin_create("Acme", &owner());
    s.rollback_create(&pending, &FetchError::Network("offline".to_owned()));
    assert!(s.items.is_empty());
    assert!(s.current_id.is_none());
}

// =============================================================
// Integrations
// =============================================================

#[test]
fn add_integration_attaches_to_project() {
    let mut s = loaded(vec![project("1", "A")]);
    let integration = Integration {
        id: "i-1".to_owned(),
        provider: IntegrationProvider::AmazonAds,
        status: IntegrationStatus::Pending,
        last_sync: None,
    };
    s.add_integration("1", integration.clone()).unwrap();
    assert_eq!(s.current().unwrap().integrations, vec![integration.clone()]);
    assert!(s.add_integration("missing", integration).is_err());
}

#[test]
fn replace_and_remove_integration() {
    let mut s = loaded(vec![project("1", "A")]);
    let pending = Integration {
        id: "i-1".to_owned(),
        provider: IntegrationProvider::Shopify,
        status: IntegrationStatus::Pending,
        last_sync: None,
    };
    s.add_integration("1", pending.clone()).unwrap();

    let synced = Integration { status: IntegrationStatus::Connected, last_sync: Some(5), ..pending };
    s.replace_integration("1", synced.clone()).unwrap();
    assert_eq!(s.current().unwrap().integrations, vec![synced]);

    s.remove_integration("1", "i-1").unwrap();
    assert!(s.current().unwrap().integrations.is_empty());
    assert!(s.remove_integration("missing", "i-1").is_err());
}
