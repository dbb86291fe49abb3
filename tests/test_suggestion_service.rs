//! Integration tests for the suggestion service.
//!
//! These tests drive the service against a mock catalog repository and
//! validate:
//! - Paged catalog loading
//! - Request validation and limit resolution
//! - Incremental additions
//! - Background refresh, including failed refreshes

mod mocks;

use catalog_suggest::error::CatalogError;
use catalog_suggest::{Config, SearchIndex, SuggestParams, SuggestionError, SuggestionService};
use mocks::MockCatalogRepository;
use std::sync::Arc;
use std::time::Duration;

fn service(repo: &MockCatalogRepository, config: Config) -> SuggestionService {
    SuggestionService::new(
        Arc::new(SearchIndex::new(config.index_config())),
        Arc::new(repo.clone()),
        config,
    )
}

fn small_pages(page_size: usize) -> Config {
    Config {
        catalog_page_size: page_size,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_load_catalog_pages_until_short_page() {
    let repo = MockCatalogRepository::with_names(&["Rice", "Sugar", "Salt", "Tea", "Milk"]);
    let service = service(&repo, small_pages(2));

    let loaded = service.load_catalog().await.unwrap();

    assert_eq!(loaded, 5);
    assert_eq!(repo.requested_pages(), vec![(2, 0), (2, 2), (2, 4)]);
    assert_eq!(
        service.index().get_all_names(),
        vec!["Rice", "Sugar", "Salt", "Tea", "Milk"]
    );
}

#[tokio::test]
async fn test_load_catalog_stops_on_empty_page() {
    let repo = MockCatalogRepository::with_names(&["Rice", "Sugar", "Salt", "Tea"]);
    let service = service(&repo, small_pages(2));

    assert_eq!(service.load_catalog().await.unwrap(), 4);
    assert_eq!(repo.get_call_count("list_names"), 3);
}

#[tokio::test]
async fn test_load_catalog_skips_blank_names() {
    let repo = MockCatalogRepository::with_names(&["Rice", "  ", "", "Salt"]);
    let service = service(&repo, Config::default());

    assert_eq!(service.load_catalog().await.unwrap(), 2);
    assert_eq!(service.index().get_all_names(), vec!["Rice", "Salt"]);
}

#[tokio::test]
async fn test_load_catalog_replaces_previous_contents() {
    let repo = MockCatalogRepository::with_names(&["Rice"]);
    let service = service(&repo, Config::default());
    service.load_catalog().await.unwrap();
    service.item_created("Local Only").unwrap();

    repo.set_names(&["Sugar"]);
    service.load_catalog().await.unwrap();

    assert_eq!(service.index().get_all_names(), vec!["Sugar"]);
}

#[tokio::test]
async fn test_load_catalog_failure_is_reported() {
    let repo = MockCatalogRepository::with_names(&["Rice"]);
    let service = service(&repo, Config::default());
    service.load_catalog().await.unwrap();

    repo.fail_with(CatalogError::Unavailable("database down".to_string()));
    let result = service.load_catalog().await;

    match result {
        Err(SuggestionError::Catalog(CatalogError::Unavailable(reason))) => {
            assert_eq!(reason, "database down");
        }
        other => panic!("Expected catalog error, got: {:?}", other),
    }
    assert_eq!(service.index().get_all_names(), vec!["Rice"]);
    assert_eq!(service.metrics().catalog_loads_total(), 2);
    assert_eq!(service.metrics().catalog_load_failures_total(), 1);
}

#[tokio::test]
async fn test_suggest_after_load() {
    let repo = MockCatalogRepository::with_names(&[
        "India Gate Basmati Rice",
        "Brown Rice",
        "Sugar",
        "Rice Flour",
    ]);
    let service = service(&repo, Config::default());
    service.load_catalog().await.unwrap();

    let suggestions = service.suggest(SuggestParams::new("rice")).unwrap();
    assert_eq!(
        suggestions,
        vec!["India Gate Basmati Rice", "Brown Rice", "Rice Flour"]
    );

    let typo = service.suggest(SuggestParams::new("basmti")).unwrap();
    assert_eq!(typo, vec!["India Gate Basmati Rice"]);
}

#[tokio::test]
async fn test_suggest_limit_resolution() {
    let names: Vec<String> = (0..60).map(|i| format!("Green Tea {}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let repo = MockCatalogRepository::with_names(&name_refs);
    let service = service(&repo, Config::default());
    service.load_catalog().await.unwrap();

    let default = service.suggest(SuggestParams::new("tea")).unwrap();
    assert_eq!(default.len(), 10);

    let zero = service.suggest(SuggestParams::new("tea").with_limit(0)).unwrap();
    assert_eq!(zero.len(), 10);

    let explicit = service.suggest(SuggestParams::new("tea").with_limit(3)).unwrap();
    assert_eq!(explicit, vec!["Green Tea 0", "Green Tea 1", "Green Tea 2"]);

    let capped = service.suggest(SuggestParams::new("tea").with_limit(500)).unwrap();
    assert_eq!(capped.len(), 50);
}

#[test]
fn test_suggest_validation() {
    let repo = MockCatalogRepository::new();
    let config = Config {
        max_query_length: 5,
        ..Config::default()
    };
    let service = service(&repo, config);

    assert!(matches!(
        service.suggest(SuggestParams::new("")),
        Err(SuggestionError::EmptyQuery)
    ));
    assert!(matches!(
        service.suggest(SuggestParams::new("  \t ")),
        Err(SuggestionError::EmptyQuery)
    ));
    assert!(matches!(
        service.suggest(SuggestParams::new("chocolate")),
        Err(SuggestionError::QueryTooLong { len: 9, max: 5 })
    ));
    // Length is counted in characters, after trimming
    assert!(service.suggest(SuggestParams::new("  crème ")).is_ok());
}

#[test]
fn test_item_created_is_immediately_searchable() {
    let repo = MockCatalogRepository::new();
    let service = service(&repo, Config::default());

    service.item_created("Cold Pressed Coconut Oil").unwrap();

    assert_eq!(
        service.suggest(SuggestParams::new("coconut")).unwrap(),
        vec!["Cold Pressed Coconut Oil"]
    );
    assert!(service.may_match("coconut oil"));
    assert_eq!(service.metrics().items_added_total(), 1);
}

#[test]
fn test_may_match_records_rejections() {
    let repo = MockCatalogRepository::new();
    let service = service(&repo, Config::default());
    service.item_created("Sea Salt").unwrap();

    assert!(service.may_match("salt"));
    assert!(!service.may_match("pepper"));

    assert_eq!(service.metrics().prefilter_checks_total(), 2);
    assert_eq!(service.metrics().prefilter_rejections_total(), 1);
}

#[tokio::test]
async fn test_spawn_refresh_picks_up_catalog_changes() {
    let repo = MockCatalogRepository::with_names(&["Rice"]);
    let service = Arc::new(service(&repo, Config::default()));
    service.load_catalog().await.unwrap();

    let handle = service
        .spawn_refresh(Duration::from_millis(20))
        .expect("non-zero interval starts a task");

    repo.add_name("Sugar");
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.abort();

    assert_eq!(service.index().get_all_names(), vec!["Rice", "Sugar"]);
    assert!(repo.get_call_count("list_names") >= 2);
}

#[tokio::test]
async fn test_spawn_refresh_survives_failures() {
    let repo = MockCatalogRepository::with_names(&["Rice"]);
    let service = Arc::new(service(&repo, Config::default()));
    service.load_catalog().await.unwrap();

    repo.fail_with(CatalogError::Unavailable("timeout".to_string()));
    let handle = service
        .spawn_refresh(Duration::from_millis(20))
        .expect("non-zero interval starts a task");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(service.index().get_all_names(), vec!["Rice"]);
    assert!(service.metrics().catalog_load_failures_total() >= 1);

    repo.clear_failure();
    repo.add_name("Sugar");
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.abort();

    assert_eq!(service.index().get_all_names(), vec!["Rice", "Sugar"]);
}

#[test]
fn test_configured_refresh_disabled() {
    let repo = MockCatalogRepository::new();
    let config = Config {
        catalog_refresh_minutes: 0,
        ..Config::default()
    };
    let service = Arc::new(service(&repo, config));

    assert!(service.spawn_configured_refresh().is_none());
}
