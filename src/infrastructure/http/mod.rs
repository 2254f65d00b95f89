//! HTTP client for the navigation endpoint.

mod fetcher;

pub use fetcher::{FetchResponse, Fetcher, ReqwestFetcher};

#[cfg(test)]
pub use fetcher::MockFetcher;
