//! Theme Tests
//!
//! Preference persistence across reloads and tier expiry.

use std::sync::Arc;

use chrono::{Duration, Utc};

use vetcare_connect::domain::{Page, Theme};
use vetcare_connect::infrastructure::storage::{keys, CookieTier, ManualClock, StorageTier};
use vetcare_connect::presentation::ClientEvent;

use crate::common::*;

#[tokio::test]
async fn test_preference_round_trips_through_reload() {
    let client = TestClient::new(ScriptedFetcher::new());
    client.clinic.ready();
    client.clinic.handle(ClientEvent::ThemeToggled);
    assert_eq!(client.clinic.theme().current(), Theme::Dark);

    let reloaded = client.reload();
    reloaded.clinic.ready();
    assert_eq!(reloaded.clinic.theme().current(), Theme::Dark);
    assert!(reloaded.page.has_root_class("dark"));

    reloaded.clinic.handle(ClientEvent::ThemeToggled);
    let again = reloaded.reload();
    again.clinic.ready();
    assert_eq!(again.clinic.theme().current(), Theme::Light);
    assert!(!again.page.has_root_class("dark"));
}

#[tokio::test]
async fn test_expired_cookie_falls_back_to_durable() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let cookies = CookieTier::with_clock(4096, clock.clone());
    cookies
        .set(keys::DARK_MODE, "true", Some(Duration::days(30)))
        .unwrap();

    let mut client = TestClient::new(ScriptedFetcher::new());
    client.cookies = Arc::new(cookies);
    client.durable.set(keys::DARK_MODE, "false", None).unwrap();

    let fresh = client.reload();
    fresh.clinic.ready();
    assert_eq!(fresh.clinic.theme().current(), Theme::Dark);

    clock.advance(Duration::days(31));
    let later = client.reload();
    later.clinic.ready();
    assert_eq!(later.clinic.theme().current(), Theme::Light);
    assert!(!later.page.has_root_class("dark"));
}

#[tokio::test]
async fn test_stale_cookie_cannot_switch_off_dark_mode() {
    let mut client = TestClient::new(ScriptedFetcher::new());
    client
        .cookies
        .set(keys::DARK_MODE, "false", Some(Duration::days(30)))
        .unwrap();
    client.durable.set(keys::DARK_MODE, "true", None).unwrap();
    client = client.reload();

    client.clinic.ready();
    assert_eq!(client.clinic.theme().current(), Theme::Dark);
    assert!(client.page.has_root_class("dark"));
}
