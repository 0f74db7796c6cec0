//! Remote content retrieval
//!
//! [`fetcher`] performs the HTTP GETs; [`scraper`] turns listing pages into
//! normalized records for one content type at a time.

pub mod fetcher;
pub mod scraper;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use scraper::ContentScraper;
