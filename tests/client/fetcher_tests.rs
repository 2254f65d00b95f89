//! Fetcher Tests
//!
//! The reqwest fetcher against a local axum stub of the navigation endpoint.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use vetcare_connect::application::services::{NavigationDispatcher, NavigationOutcome, NotificationSurface};
use vetcare_connect::config::Settings;
use vetcare_connect::domain::Page;
use vetcare_connect::infrastructure::http::{Fetcher, ReqwestFetcher};
use vetcare_connect::shared::NavigationError;
use vetcare_connect::startup::headless_page;

use crate::common::*;

fn stub_router() -> Router {
    Router::new()
        .route(
            "/about/",
            get(|| async { Json(json!({ "status": "success", "html": "<h1>About us</h1>" })) }),
        )
        .route(
            "/private/",
            get(|| async { Json(json!({ "status": "error", "message": "Login required" })) }),
        )
        .route(
            "/broken/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
}

async fn settings_for_stub() -> Settings {
    let addr = spawn_stub_server(stub_router()).await;
    let mut settings = Settings::defaults().unwrap();
    settings.navigation.base_url = format!("http://{}", addr);
    settings
}

#[tokio::test]
async fn test_fetcher_reports_status_and_body() {
    let settings = settings_for_stub().await;
    let fetcher = ReqwestFetcher::new(&settings.navigation).unwrap();

    let ok = fetcher.get("/about/").await.unwrap();
    assert_eq!(ok.status, 200);
    assert!(ok.body.contains("About us"));

    let broken = fetcher.get("/broken/").await.unwrap();
    assert_eq!(broken.status, 500);

    let missing = fetcher.get("/nowhere/").await.unwrap();
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut settings = Settings::defaults().unwrap();
    settings.navigation.base_url = format!("http://{}", addr);
    let fetcher = ReqwestFetcher::new(&settings.navigation).unwrap();

    assert!(matches!(
        fetcher.get("/about/").await,
        Err(NavigationError::Transport(_))
    ));
}

#[tokio::test]
async fn test_dispatch_against_stub_endpoint() {
    let settings = settings_for_stub().await;
    let page = Arc::new(headless_page(&settings));
    let notifications = NotificationSurface::new(page.clone(), &settings);
    let fetcher = Arc::new(ReqwestFetcher::new(&settings.navigation).unwrap());
    let dispatcher = NavigationDispatcher::new(fetcher, page.clone(), notifications, &settings);

    assert_eq!(
        dispatcher.navigate("/about/").await,
        NavigationOutcome::Applied { seq: 1 }
    );
    assert_eq!(page.html(CONTENT).as_deref(), Some("<h1>About us</h1>"));

    assert!(matches!(
        dispatcher.navigate("/private/").await,
        NavigationOutcome::Rejected { ref message, .. } if message == "Login required"
    ));
    assert!(matches!(
        dispatcher.navigate("/broken/").await,
        NavigationOutcome::Failed { error: NavigationError::Status(500), .. }
    ));
    assert_eq!(page.html(CONTENT).as_deref(), Some("<h1>About us</h1>"));
}
