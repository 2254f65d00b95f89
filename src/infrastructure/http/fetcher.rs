//! JSON endpoint fetcher.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use crate::config::NavigationSettings;
use crate::shared::error::NavigationError;

/// Raw response of a GET: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the navigation endpoint.
///
/// Implementations report only transport-level failures; status codes and
/// body shape are judged by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, href: &str) -> Result<FetchResponse, NavigationError>;
}

/// `reqwest`-backed fetcher resolving link targets against a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    base_url: Url,
}

impl ReqwestFetcher {
    pub fn new(settings: &NavigationSettings) -> Result<Self, NavigationError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| NavigationError::Transport(format!("invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| NavigationError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Resolve a link target (absolute or relative) against the base URL.
    pub fn resolve(&self, href: &str) -> Result<Url, NavigationError> {
        self.base_url
            .join(href)
            .map_err(|e| NavigationError::Transport(format!("invalid link target {}: {}", href, e)))
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, href: &str) -> Result<FetchResponse, NavigationError> {
        let url = self.resolve(href)?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| NavigationError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NavigationError::Transport(e.to_string()))?;

        debug!(status, bytes = body.len(), "Fetched");
        Ok(FetchResponse { status, body })
    }
}
