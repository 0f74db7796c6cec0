//! Unified error handling for the showcase crate
//!
//! [`Error`] wraps the failures that reach logging: scrape failures from the
//! warmer and I/O or JSON failures from the static data loader. Each carries
//! a category and a recoverability flag for log fields.
//!
//! # Usage
//!
//! ```rust,ignore
//! use showcase::error::Error;
//!
//! fn report(err: Error) {
//!     if err.is_recoverable() {
//!         tracing::warn!(error = %err, category = err.category().as_str(), "will retry on next warm cycle");
//!     } else {
//!         tracing::error!(error = %err, category = err.category().as_str(), "giving up");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::utils::error::{FetchError, ScrapeError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, bad status)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
}

impl ErrorCategory {
    /// Short label used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
        }
    }
}

/// Unified error type for the showcase crate
#[derive(Error, Debug)]
pub enum Error {
    /// Scrape errors (fetch failure or empty extraction)
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error is recoverable (a later attempt may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Scrape(ScrapeError::Fetch(e)) => e.is_recoverable(),
            Self::Scrape(ScrapeError::EmptyExtraction) => true,
            Self::Io(_) => true,
            Self::Json(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Scrape(ScrapeError::Fetch(_)) => ErrorCategory::Network,
            Self::Scrape(ScrapeError::EmptyExtraction) | Self::Json(_) => ErrorCategory::Parsing,
            Self::Io(_) => ErrorCategory::Storage,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
