//! HTML parsing and data extraction
//!
//! Listing pages are reduced to [`RawCandidate`](crate::models::RawCandidate)
//! records by tag/attribute heuristics; article pages to an [`ArticleDetail`].

pub mod article;
pub mod listing;
pub mod sanitize;
pub mod selectors;

pub use article::{parse_article, ArticleDetail};
pub use listing::{extract_candidates, path_key, ExtractionRules};
