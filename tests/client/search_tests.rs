//! Search Tests
//!
//! Debounced search through the event routing layer.

use std::time::Duration;

use pretty_assertions::assert_eq;

use vetcare_connect::infrastructure::storage::{keys, StorageTier};
use vetcare_connect::presentation::ClientEvent;

use crate::common::*;

const RESULTS: &str = "#search-results";

fn type_query(client: &TestClient, query: &str) {
    client.clinic.handle(ClientEvent::SearchInput {
        query: query.to_string(),
    });
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_renders_once() {
    let client = TestClient::new(ScriptedFetcher::new());

    type_query(&client, "va");
    tokio::time::sleep(Duration::from_millis(50)).await;
    type_query(&client, "vac");
    tokio::time::sleep(Duration::from_millis(350)).await;

    assert_eq!(client.page.write_count(RESULTS), 1);
    assert_eq!(
        client.html(RESULTS),
        r#"<div class="list-group-item">Vaccination</div>"#
    );
    // The superseded "va" call never reached storage
    let key = keys::last_search("/api/search/");
    assert_eq!(client.clinic.store().version(&key).get(), 1);
    assert_eq!(client.durable.get(&key).unwrap().as_deref(), Some("vac"));
}

#[test]
fn test_input_outside_runtime_is_dropped() {
    let client = TestClient::new(ScriptedFetcher::new());

    type_query(&client, "vac");

    assert!(!client.clinic.search().is_pending());
    assert_eq!(client.page.write_count(RESULTS), 0);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_renders_before_quiet_interval() {
    let client = TestClient::new(ScriptedFetcher::new());

    type_query(&client, "dent");
    tokio::time::sleep(Duration::from_millis(299)).await;
    assert_eq!(client.page.write_count(RESULTS), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(client.page.write_count(RESULTS), 1);
    assert!(client.html(RESULTS).contains("Dental Cleaning"));
}

#[tokio::test(start_paused = true)]
async fn test_last_search_mirrored_to_both_tiers() {
    let client = TestClient::new(ScriptedFetcher::new());
    type_query(&client, "groom");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let key = keys::last_search("/api/search/");
    assert_eq!(client.durable.get(&key).unwrap().as_deref(), Some("groom"));
    assert_eq!(client.cookies.get(&key).unwrap().as_deref(), Some("groom"));
    assert!(client.cookies.expires_at(&key).is_some());
    assert_eq!(client.clinic.search().last_search().as_deref(), Some("groom"));
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_empties_results_at_once() {
    let client = TestClient::new(ScriptedFetcher::new());
    type_query(&client, "surgery");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(client.html(RESULTS).contains("Surgery Consultation"));

    type_query(&client, "");
    assert_eq!(client.html(RESULTS), "");
}

#[tokio::test(start_paused = true)]
async fn test_search_uses_stored_catalog() {
    let client = TestClient::new(ScriptedFetcher::new());
    client
        .durable
        .set(
            keys::SERVICES,
            r#"[{"name":"Microchipping","description":"ID chip","icon":"fas fa-microchip"}]"#,
            None,
        )
        .unwrap();

    type_query(&client, "chip");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(client.html(RESULTS).contains("Microchipping"));

    type_query(&client, "vacc");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(client.html(RESULTS), "");
}
