//! Cache warming
//!
//! A warm cycle scrapes each content type and stores the result when it is
//! non-empty. The three types run concurrently and fail independently; no
//! error escapes [`CacheWarmer::warm_all`].

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{CacheConfig, Config};
use crate::content::ContentCache;
use crate::crawler::{ContentScraper, PageFetcher};
use crate::models::ContentKind;
use crate::error::{Error, ErrorCategory};

/// Per-type outcome of a warm cycle; `true` means fresh data was stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmSummary {
    pub insights: bool,
    pub case_studies: bool,
    pub services: bool,
}

impl WarmSummary {
    pub fn get(&self, kind: ContentKind) -> bool {
        match kind {
            ContentKind::Insights => self.insights,
            ContentKind::CaseStudies => self.case_studies,
            ContentKind::Services => self.services,
        }
    }

    /// Number of content types refreshed
    pub fn refreshed(&self) -> usize {
        ContentKind::ALL.iter().filter(|kind| self.get(**kind)).count()
    }
}

/// Marks one content type as being warmed until dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Refreshes the content cache from the remote site
pub struct CacheWarmer {
    scraper: ContentScraper,
    cache: Arc<ContentCache>,
    config: CacheConfig,
    in_flight: [AtomicBool; 3],
}

impl CacheWarmer {
    pub fn new(scraper: ContentScraper, cache: Arc<ContentCache>, config: CacheConfig) -> Self {
        Self {
            scraper,
            cache,
            config,
            in_flight: Default::default(),
        }
    }

    /// Build a warmer over `fetcher` using the scraper and cache sections
    pub fn from_config(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<ContentCache>,
    ) -> Self {
        let scraper = ContentScraper::new(fetcher, config.scraper.clone());
        Self::new(scraper, cache, config.cache.clone())
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub fn scraper(&self) -> &ContentScraper {
        &self.scraper
    }

    fn flag(&self, kind: ContentKind) -> &AtomicBool {
        let slot = match kind {
            ContentKind::Insights => 0,
            ContentKind::CaseStudies => 1,
            ContentKind::Services => 2,
        };
        &self.in_flight[slot]
    }

    /// True while a warm of `kind` is running
    pub fn is_warming(&self, kind: ContentKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    /// Warm one content type
    ///
    /// Returns `false` without fetching when a warm of the same type is
    /// already running.
    pub async fn warm(&self, kind: ContentKind) -> bool {
        let Some(_guard) = InFlightGuard::acquire(self.flag(kind)) else {
            tracing::info!(kind = %kind, "Warm already in progress, skipping");
            return false;
        };

        match self.scraper.scrape(kind).await {
            Ok(set) => {
                let count = set.len();
                let ttl = self.config.ttl_for(kind);
                self.cache.store(set, ttl).await;
                tracing::info!(
                    kind = %kind,
                    count = count,
                    ttl_secs = ttl.as_secs(),
                    "Cached {}",
                    kind.label()
                );
                true
            }
            Err(e) => {
                let err = Error::from(e);
                if err.category() == ErrorCategory::Parsing {
                    tracing::info!(
                        kind = %kind,
                        "Scrape returned no {}, keeping static fallback",
                        kind.label()
                    );
                } else {
                    tracing::warn!(
                        kind = %kind,
                        error = %err,
                        category = err.category().as_str(),
                        recoverable = err.is_recoverable(),
                        "Warming {} failed",
                        kind.label()
                    );
                }
                false
            }
        }
    }

    /// Warm every content type concurrently
    pub async fn warm_all(&self) -> WarmSummary {
        tracing::info!("Warming cache");

        let (insights, case_studies, services) = tokio::join!(
            self.warm(ContentKind::Insights),
            self.warm(ContentKind::CaseStudies),
            self.warm(ContentKind::Services),
        );

        let summary = WarmSummary {
            insights,
            case_studies,
            services,
        };

        tracing::info!(
            insights = summary.insights,
            case_studies = summary.case_studies,
            services = summary.services,
            "Warming complete"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_summary_serialization() {
        let summary = WarmSummary {
            insights: true,
            case_studies: false,
            services: true,
        };

        assert_eq!(summary.refreshed(), 2);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["caseStudies"], false);
        assert_eq!(json["services"], true);
    }
}
