//! showcase - consulting showcase content API
//!
//! Serves insights, case studies and services scraped from a public site,
//! cached in memory with per-type TTLs and backed by static data whenever the
//! cache is cold, empty or expired.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page fetching and per-type scraping
//! - [`parser`] - HTML extraction of listing cards and articles
//! - [`normalize`] - Slugs, defaults, dedup, featured flags and caps
//! - [`cache`] - Generic in-memory TTL store
//! - [`content`] - Read path with static fallback
//! - [`scheduler`] - Cache warming and its background schedule
//! - [`strategist`] - Keyword search over served content
//! - [`api`] - HTTP routes and server
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use showcase::api::ApiServer;
//! use showcase::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ApiServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod crawler;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod scheduler;
pub mod strategist;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ApiServer, AppState};
    pub use crate::config::Config;
    pub use crate::content::ContentCache;
    pub use crate::crawler::{ContentScraper, HttpFetcher, PageFetcher};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{CaseStudy, ContentKind, Insight, Service, Source, Sourced};
    pub use crate::scheduler::{CacheWarmer, WarmScheduler, WarmSummary};
}

// Direct re-exports for convenience
pub use models::{CaseStudy, ContentKind, Insight, Service, Source};
