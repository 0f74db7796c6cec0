//! Error types for fetching and scraping remote content
//!
//! Warming code consumes these and never lets them reach request handlers.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connection refused, DNS, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status from the remote site
    #[error("Server responded with status {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Map a reqwest error, separating timeouts from other failures
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Transient failures that a later warm cycle may recover from
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Status(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
            Self::InvalidUrl(_) => false,
        }
    }
}

/// Errors produced by a scrape of one content type
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page could not be fetched
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The page was fetched but no candidates survived the filters
    #[error("No content matched the extraction rules")]
    EmptyExtraction,
}

impl ScrapeError {
    /// True when the remote page could not be retrieved at all
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
