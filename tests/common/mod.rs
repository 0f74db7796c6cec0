//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use showcase::config::Config;
use showcase::crawler::PageFetcher;
use showcase::utils::FetchError;

pub const INSIGHTS_PATH: &str = "/think";
pub const CASE_STUDIES_PATH: &str = "/case-studies";
pub const SERVICES_PATH: &str = "/consulting";

/// Config whose listing URLs all point at `base`
pub fn config_for(base: &str) -> Config {
    let mut config = Config::default();
    config.scraper.origin = base.to_string();
    config.scraper.insights_url = format!("{base}{INSIGHTS_PATH}");
    config.scraper.case_studies_url = format!("{base}{CASE_STUDIES_PATH}");
    config.scraper.services_url = format!("{base}{SERVICES_PATH}");
    config.scraper.request_timeout_ms = 2_000;
    config.server.host = "127.0.0.1".to_string();
    config.server.enable_request_logging = false;
    config
}

/// Insights listing with a single qualifying card
pub fn single_insight_page() -> String {
    r#"<html><body>
        <a href="/think/insights/ai-transforms-consulting">
            <h3>AI Transforms Consulting Forever Today</h3>
            <p>How generative models are reshaping the way advisory work gets delivered.</p>
        </a>
    </body></html>"#
        .to_string()
}

/// Insights listing with `count` distinct cards
pub fn insights_page(count: usize) -> String {
    let cards: String = (0..count)
        .map(|i| {
            format!(
                r#"<a href="/think/topics/story-{i}">
                    <h3>Enterprise Story Number {i}</h3>
                    <span class="eyebrow">Cloud</span>
                    <p>A longer summary describing enterprise story {i} in some detail.</p>
                </a>"#
            )
        })
        .collect();
    format!("<html><body><nav><a href=\"/think\">Think</a></nav>{cards}</body></html>")
}

/// Case studies listing with `count` distinct cards
pub fn case_studies_page(count: usize) -> String {
    let cards: String = (0..count)
        .map(|i| {
            format!(
                r#"<a href="/case-studies/client-{i}">
                    <h3>Client Number {i}</h3>
                    <p>Modernized operations for client {i}.</p>
                </a>"#
            )
        })
        .collect();
    format!("<html><body>{cards}<a href=\"/case-studies#search\">Search</a></body></html>")
}

/// Services listing with a few practice areas
pub fn services_page() -> String {
    r#"<html><body>
        <a href="/consulting/cloud"><h3>Cloud Consulting</h3><p>Hybrid cloud strategy.</p></a>
        <a href="/consulting/data"><h3>Data Consulting</h3><p>Data platforms.</p></a>
        <a href="/consulting/cloud"><h3>Cloud Consulting</h3></a>
    </body></html>"#
        .to_string()
}

/// Fetcher answering from an in-memory page map; unknown URLs get a 404
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

/// Fetcher that always fails
pub struct FailingFetcher;

#[async_trait]
impl PageFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Timeout)
    }
}

/// Fetcher that parks every call until released
pub struct GatedFetcher {
    html: String,
    started: Notify,
    release: Notify,
}

impl GatedFetcher {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Wait until a fetch is parked
    pub async fn started(&self) {
        self.started.notified().await;
    }

    /// Let the parked fetch finish
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl PageFetcher for GatedFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(self.html.clone())
    }
}

/// Shorthand for an `Arc<dyn PageFetcher>`
pub fn shared<F: PageFetcher + 'static>(fetcher: F) -> Arc<dyn PageFetcher> {
    Arc::new(fetcher)
}
