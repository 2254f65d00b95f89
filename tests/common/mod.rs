//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use vetcare_connect::config::Settings;
use vetcare_connect::domain::Page;
use vetcare_connect::infrastructure::http::{FetchResponse, Fetcher};
use vetcare_connect::infrastructure::page::HeadlessPage;
use vetcare_connect::infrastructure::storage::{CookieTier, MemoryTier, StateStore};
use vetcare_connect::shared::NavigationError;
use vetcare_connect::startup::{headless_page, VetClinic};

pub const FORM: &str = "#appointment-form";
pub const CONTENT: &str = "#page-content";
pub const TABLE: &str = "#appointments-table tbody";

/// One canned reply of the scripted fetcher.
#[derive(Clone)]
pub struct Reply {
    pub delay: Duration,
    pub result: Result<FetchResponse, NavigationError>,
}

impl Reply {
    pub fn json(delay_ms: u64, body: &str) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(FetchResponse::new(200, body)),
        }
    }

    pub fn status(delay_ms: u64, status: u16) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(FetchResponse::new(status, "")),
        }
    }

    pub fn success(delay_ms: u64, html: &str) -> Self {
        Self::json(
            delay_ms,
            &serde_json::json!({ "status": "success", "html": html }).to_string(),
        )
    }
}

/// Fetcher answering from a fixed table after a per-link delay.
#[derive(Default, Clone)]
pub struct ScriptedFetcher {
    replies: HashMap<String, Reply>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, href: &str, reply: Reply) -> Self {
        self.replies.insert(href.to_string(), reply);
        self
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get(&self, href: &str) -> Result<FetchResponse, NavigationError> {
        let reply = self
            .replies
            .get(href)
            .cloned()
            .unwrap_or_else(|| Reply::status(0, 404));
        tokio::time::sleep(reply.delay).await;
        reply.result
    }
}

/// Test client builder
pub struct TestClient {
    pub settings: Settings,
    pub clinic: VetClinic,
    pub page: Arc<HeadlessPage>,
    pub durable: Arc<MemoryTier>,
    pub cookies: Arc<CookieTier>,
}

impl TestClient {
    /// Create a client over a full page with fresh storage
    pub fn new(fetcher: ScriptedFetcher) -> Self {
        let settings = Settings::defaults().unwrap();
        let durable = Arc::new(MemoryTier::new());
        let cookies = Arc::new(CookieTier::new(settings.storage.cookie_max_bytes));
        let page = Arc::new(headless_page(&settings));
        Self::assemble(settings, page, fetcher, durable, cookies)
    }

    /// Create a client over the given page with fresh storage
    pub fn with_page(page: HeadlessPage) -> Self {
        let settings = Settings::defaults().unwrap();
        let durable = Arc::new(MemoryTier::new());
        let cookies = Arc::new(CookieTier::new(settings.storage.cookie_max_bytes));
        Self::assemble(settings, Arc::new(page), ScriptedFetcher::new(), durable, cookies)
    }

    /// A fresh page and fresh components over the same storage, as after
    /// a browser reload
    pub fn reload(&self) -> Self {
        let page = Arc::new(headless_page(&self.settings));
        Self::assemble(
            self.settings.clone(),
            page,
            ScriptedFetcher::new(),
            self.durable.clone(),
            self.cookies.clone(),
        )
    }

    fn assemble(
        settings: Settings,
        page: Arc<HeadlessPage>,
        fetcher: ScriptedFetcher,
        durable: Arc<MemoryTier>,
        cookies: Arc<CookieTier>,
    ) -> Self {
        let store = Arc::new(StateStore::new(durable.clone(), cookies.clone()));
        let clinic = VetClinic::build(&settings, page.clone(), Arc::new(fetcher), store);
        Self {
            settings,
            clinic,
            page,
            durable,
            cookies,
        }
    }

    pub fn html(&self, region: &str) -> String {
        self.page.html(region).unwrap_or_default()
    }
}

/// Spawn an axum router on an ephemeral port and return its address
pub async fn spawn_stub_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Sample booking
pub const BOOKING: [(&str, &str); 5] = [
    ("name", "A"),
    ("email", "a@x.com"),
    ("pet", "Rex"),
    ("service", "Vaccination"),
    ("date", "2025-01-01"),
];
