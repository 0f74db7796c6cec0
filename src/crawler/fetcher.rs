//! HTTP fetcher for listing and article pages
//!
//! A single GET per call, bounded by the configured timeout. There is no
//! retry loop: a failed page is simply retried on the next warm cycle.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    Client,
};
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::utils::error::FetchError;

/// Source of raw page HTML
///
/// The warmer only depends on this trait, so tests and alternative transports
/// can stand in for the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as text
    ///
    /// # Errors
    ///
    /// Any network error, timeout, or non-2xx status
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    /// HTTP client with configured timeout and default headers
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(Self::build_headers(user_agent))
            .build()?;

        Ok(Self { client })
    }

    /// Create a fetcher from the scraper section of the config
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &ScraperConfig) -> Result<Self, FetchError> {
        Self::new(config.request_timeout(), &config.user_agent)
    }

    /// Build default headers sent with every request
    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let agent = HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("showcase"));
        headers.insert(USER_AGENT, agent);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        headers
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(FetchError::from_reqwest)
    }
}
