//! Read path over the content cache
//!
//! [`ContentCache`] owns the TTL store for the three content kinds and answers
//! every read with either the warmed list (`live`) or the static fallback
//! (`static`). Reads never fail.

pub mod fallback;

pub use fallback::StaticContent;

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlStore;
use crate::config::CacheConfig;
use crate::models::{CaseStudy, ContentKind, ContentSet, Insight, Service, Sourced};

/// TTL store keyed by content kind
pub type ContentStore = TtlStore<ContentKind, ContentSet>;

/// Cache state of one content kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindStatus {
    /// Fresh entry present
    pub cached: bool,
    /// Records in the entry, 0 when absent
    pub count: usize,
    /// Remaining TTL in seconds, 0 when absent
    pub ttl: u64,
}

/// Cache report exposed by the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub hits: u64,
    pub misses: u64,
    /// Keys holding a fresh entry
    pub keys: Vec<&'static str>,
    pub insights: KindStatus,
    pub case_studies: KindStatus,
    pub services: KindStatus,
}

/// Content store plus static fallback
pub struct ContentCache {
    store: ContentStore,
    fallback: StaticContent,
}

impl ContentCache {
    pub fn new(fallback: StaticContent) -> Self {
        Self {
            store: ContentStore::new(),
            fallback,
        }
    }

    /// Build from the cache section of the config
    pub fn from_config(config: &CacheConfig) -> Self {
        let fallback = match &config.static_data_dir {
            Some(dir) => StaticContent::with_override_dir(dir),
            None => StaticContent::bundled(),
        };
        Self::new(fallback)
    }

    /// Replace the cached list for the set's kind
    pub async fn store(&self, set: ContentSet, ttl: Duration) {
        self.store.set(set.kind(), set, ttl).await;
    }

    /// Fresh entry for `kind`, bypassing the fallback
    pub async fn cached(&self, kind: ContentKind) -> Option<ContentSet> {
        self.store.get(&kind).await
    }

    pub async fn is_cached(&self, kind: ContentKind) -> bool {
        self.store.has(&kind).await
    }

    pub async fn insights(&self) -> Sourced<Arc<Vec<Insight>>> {
        match self.store.get(&ContentKind::Insights).await {
            Some(ContentSet::Insights(items)) if !items.is_empty() => Sourced::live(items),
            _ => Sourced::fallback(Arc::new(self.fallback.insights().await)),
        }
    }

    pub async fn case_studies(&self) -> Sourced<Arc<Vec<CaseStudy>>> {
        match self.store.get(&ContentKind::CaseStudies).await {
            Some(ContentSet::CaseStudies(items)) if !items.is_empty() => Sourced::live(items),
            _ => Sourced::fallback(Arc::new(self.fallback.case_studies().await)),
        }
    }

    pub async fn services(&self) -> Sourced<Arc<Vec<Service>>> {
        match self.store.get(&ContentKind::Services).await {
            Some(ContentSet::Services(items)) if !items.is_empty() => Sourced::live(items),
            _ => Sourced::fallback(Arc::new(self.fallback.services())),
        }
    }

    /// Remove expired entries
    pub async fn sweep_expired(&self) -> usize {
        let removed = self.store.sweep_expired().await;
        if removed > 0 {
            tracing::debug!(removed = removed, "Swept expired cache entries");
        }
        removed
    }

    /// Hit/miss counters and per-kind details, without touching the counters
    pub async fn status(&self) -> CacheStatus {
        let stats = self.store.stats().await;

        let kind_status = |kind: ContentKind| {
            stats
                .entries
                .get(&kind)
                .map(|entry| KindStatus {
                    cached: true,
                    count: entry.item_count,
                    ttl: entry.remaining_ttl_secs,
                })
                .unwrap_or_default()
        };

        CacheStatus {
            hits: stats.hits,
            misses: stats.misses,
            keys: ContentKind::ALL
                .iter()
                .filter(|kind| stats.entries.contains_key(*kind))
                .map(|kind| kind.as_str())
                .collect(),
            insights: kind_status(ContentKind::Insights),
            case_studies: kind_status(ContentKind::CaseStudies),
            services: kind_status(ContentKind::Services),
        }
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(StaticContent::bundled())
    }
}
