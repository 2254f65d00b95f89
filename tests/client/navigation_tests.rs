//! Navigation Tests
//!
//! Dispatch outcomes, superseding and cleanup, with a scripted endpoint.

use std::time::Duration;

use pretty_assertions::assert_eq;

use vetcare_connect::application::services::NavigationOutcome;
use vetcare_connect::domain::Page;
use vetcare_connect::presentation::ClientEvent;
use vetcare_connect::shared::NavigationError;
use vetcare_connect::startup::Dispatch;

use crate::common::*;

fn start(client: &TestClient, href: &str) -> tokio::task::JoinHandle<NavigationOutcome> {
    match client.clinic.handle(ClientEvent::LinkActivated {
        href: href.to_string(),
    }) {
        Dispatch::Navigation(handle) => handle,
        Dispatch::Done => panic!("link activation did not start a navigation"),
    }
}

fn spinners(client: &TestClient) -> Vec<String> {
    client
        .page
        .fragment_ids("#main-header")
        .into_iter()
        .filter(|id| id.starts_with("nav-spinner-"))
        .collect()
}

#[test]
fn test_link_outside_runtime_is_dropped() {
    let client = TestClient::new(ScriptedFetcher::new());
    client.page.set_html(CONTENT, "<p>home</p>").unwrap();

    let dispatch = client.clinic.handle(ClientEvent::LinkActivated {
        href: "/services/".to_string(),
    });

    assert!(matches!(dispatch, Dispatch::Done));
    assert!(spinners(&client).is_empty());
    assert_eq!(client.html(CONTENT), "<p>home</p>");
}

#[tokio::test(start_paused = true)]
async fn test_error_response_keeps_content() {
    let fetcher = ScriptedFetcher::new().with(
        "/missing/",
        Reply::json(20, r#"{"status":"error","message":"Not found"}"#),
    );
    let client = TestClient::new(fetcher);
    client.page.set_html(CONTENT, "<p>home</p>").unwrap();

    let handle = start(&client, "/missing/");
    tokio::task::yield_now().await;
    assert_eq!(spinners(&client).len(), 1);

    let outcome = handle.await.unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Rejected {
            seq: 1,
            message: "Not found".into()
        }
    );
    assert_eq!(client.html(CONTENT), "<p>home</p>");
    assert!(client.html("#page-alerts").contains("Not found"));
    assert!(spinners(&client).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_success_replaces_content() {
    let fetcher = ScriptedFetcher::new().with("/about/", Reply::success(20, "<h1>About</h1>"));
    let client = TestClient::new(fetcher);
    client.clinic.handle(ClientEvent::MobileMenuOpened);

    let outcome = start(&client, "/about/").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Applied { seq: 1 });
    assert_eq!(client.html(CONTENT), "<h1>About</h1>");
    assert!(!client.page.has_class("#mobile-menu", "show"));
    assert!(spinners(&client).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_newer_navigation_supersedes_slower_one() {
    let fetcher = ScriptedFetcher::new()
        .with("/slow/", Reply::success(500, "<p>slow</p>"))
        .with("/fast/", Reply::success(10, "<p>fast</p>"));
    let client = TestClient::new(fetcher);

    let slow = start(&client, "/slow/");
    tokio::time::sleep(Duration::from_millis(5)).await;
    let fast = start(&client, "/fast/");

    assert_eq!(fast.await.unwrap(), NavigationOutcome::Applied { seq: 2 });
    assert_eq!(slow.await.unwrap(), NavigationOutcome::Superseded { seq: 1 });

    // Let the slow reply's timer run out; nothing may change
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(client.html(CONTENT), "<p>fast</p>");
    assert!(spinners(&client).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_sequential_navigations_both_apply() {
    let fetcher = ScriptedFetcher::new()
        .with("/one/", Reply::success(10, "<p>one</p>"))
        .with("/two/", Reply::success(10, "<p>two</p>"));
    let client = TestClient::new(fetcher);

    assert_eq!(
        start(&client, "/one/").await.unwrap(),
        NavigationOutcome::Applied { seq: 1 }
    );
    assert_eq!(client.html(CONTENT), "<p>one</p>");
    assert_eq!(
        start(&client, "/two/").await.unwrap(),
        NavigationOutcome::Applied { seq: 2 }
    );
    assert_eq!(client.html(CONTENT), "<p>two</p>");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_a_generic_failure() {
    let fetcher = ScriptedFetcher::new().with("/hang/", Reply::success(60_000, "<p>late</p>"));
    let client = TestClient::new(fetcher);
    client.page.set_html(CONTENT, "<p>home</p>").unwrap();

    let outcome = start(&client, "/hang/").await.unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Failed {
            seq: 1,
            error: NavigationError::Timeout(Duration::from_secs(10))
        }
    );
    assert_eq!(client.html(CONTENT), "<p>home</p>");
    assert!(client.html("#page-alerts").contains("Navigation failed"));
    assert!(spinners(&client).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_non_2xx_and_malformed_bodies_fail_alike() {
    let fetcher = ScriptedFetcher::new()
        .with("/gone/", Reply::status(5, 500))
        .with("/weird/", Reply::json(5, r#"{"html":"<p>no status</p>"}"#));
    let client = TestClient::new(fetcher);

    for href in ["/gone/", "/weird/"] {
        client.page.set_html("#page-alerts", "").unwrap();
        let outcome = start(&client, href).await.unwrap();
        assert!(matches!(outcome, NavigationOutcome::Failed { .. }), "{:?}", outcome);
        assert!(client.html("#page-alerts").contains("Navigation failed"));
    }
}
