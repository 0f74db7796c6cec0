//! Fetch, extract and normalize one content type
//!
//! Each `scrape_*` call is one GET of a listing page followed by extraction
//! and normalization. An empty normalized list is reported as
//! [`ScrapeError::EmptyExtraction`] so callers can tell "site reachable but
//! nothing matched" apart from a failed fetch.

use std::sync::Arc;

use crate::config::ScraperConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::models::{CaseStudy, ContentKind, ContentSet, Insight, RawCandidate, Service};
use crate::normalize::Normalizer;
use crate::parser::{extract_candidates, parse_article, ArticleDetail, ExtractionRules};
use crate::utils::error::{FetchError, ScrapeError};

/// Scraper for the remote listing pages
pub struct ContentScraper {
    fetcher: Arc<dyn PageFetcher>,
    config: ScraperConfig,
}

impl ContentScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.origin.clone())
    }

    /// Fetch the listing page for `kind` and extract its candidates
    pub async fn candidates(&self, kind: ContentKind) -> Result<Vec<RawCandidate>, FetchError> {
        let url = self.config.source_url(kind);
        let html = self.fetcher.fetch(url).await?;
        let candidates = extract_candidates(&html, &ExtractionRules::for_kind(kind));

        tracing::debug!(
            kind = %kind,
            url = %url,
            bytes = html.len(),
            candidates = candidates.len(),
            "Extracted listing candidates"
        );

        Ok(candidates)
    }

    pub async fn scrape_insights(&self) -> Result<Vec<Insight>, ScrapeError> {
        let candidates = self.candidates(ContentKind::Insights).await?;
        non_empty(self.normalizer().insights(candidates))
    }

    pub async fn scrape_case_studies(&self) -> Result<Vec<CaseStudy>, ScrapeError> {
        let candidates = self.candidates(ContentKind::CaseStudies).await?;
        non_empty(self.normalizer().case_studies(candidates))
    }

    pub async fn scrape_services(&self) -> Result<Vec<Service>, ScrapeError> {
        let candidates = self.candidates(ContentKind::Services).await?;
        non_empty(self.normalizer().services(candidates))
    }

    /// Scrape `kind` into a cacheable set
    pub async fn scrape(&self, kind: ContentKind) -> Result<ContentSet, ScrapeError> {
        let set = match kind {
            ContentKind::Insights => ContentSet::Insights(Arc::new(self.scrape_insights().await?)),
            ContentKind::CaseStudies => {
                ContentSet::CaseStudies(Arc::new(self.scrape_case_studies().await?))
            }
            ContentKind::Services => ContentSet::Services(Arc::new(self.scrape_services().await?)),
        };
        Ok(set)
    }

    /// Fetch and parse a single article page
    pub async fn scrape_article(&self, url: &str) -> Result<ArticleDetail, FetchError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(parse_article(&html))
    }
}

fn non_empty<T>(records: Vec<T>) -> Result<Vec<T>, ScrapeError> {
    if records.is_empty() {
        Err(ScrapeError::EmptyExtraction)
    } else {
        Ok(records)
    }
}
