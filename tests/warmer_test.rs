//! Warm cycle tests against a mock site

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    case_studies_page, config_for, insights_page, services_page, shared, single_insight_page,
    FailingFetcher, GatedFetcher, MapFetcher, CASE_STUDIES_PATH, INSIGHTS_PATH, SERVICES_PATH,
};
use showcase::content::ContentCache;
use showcase::crawler::HttpFetcher;
use showcase::models::{ContentKind, Source};
use showcase::normalize::{DEFAULT_CATEGORY, INSIGHTS_CAP};
use showcase::scheduler::{CacheWarmer, WarmEvent, WarmScheduler};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

fn http_warmer(server: &MockServer) -> (CacheWarmer, Arc<ContentCache>) {
    let config = config_for(&server.uri());
    let fetcher = HttpFetcher::from_config(&config.scraper).unwrap();
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let warmer = CacheWarmer::from_config(&config, Arc::new(fetcher), cache.clone());
    (warmer, cache)
}

#[tokio::test]
async fn test_single_card_insights_scenario() {
    let server = MockServer::start().await;
    mount(&server, INSIGHTS_PATH, single_insight_page()).await;

    let (warmer, cache) = http_warmer(&server);
    assert!(warmer.warm(ContentKind::Insights).await);

    let result = cache.insights().await;
    assert_eq!(result.source, Source::Live);
    assert_eq!(result.data.len(), 1);

    let insight = &result.data[0];
    assert_eq!(insight.title, "AI Transforms Consulting Forever Today");
    assert_eq!(insight.slug, "ai-transforms-consulting-forever-today");
    assert!(insight.featured);
    assert_eq!(insight.category, DEFAULT_CATEGORY);
    assert!(insight.url.starts_with(&server.uri()));
}

#[tokio::test]
async fn test_warm_all_caps_each_kind() {
    let server = MockServer::start().await;
    mount(&server, INSIGHTS_PATH, insights_page(25)).await;
    mount(&server, CASE_STUDIES_PATH, case_studies_page(4)).await;
    mount(&server, SERVICES_PATH, services_page()).await;

    let (warmer, cache) = http_warmer(&server);
    let summary = warmer.warm_all().await;

    assert!(summary.insights && summary.case_studies && summary.services);
    assert_eq!(summary.refreshed(), 3);

    let insights = cache.insights().await;
    assert_eq!(insights.source, Source::Live);
    assert_eq!(insights.data.len(), INSIGHTS_CAP);
    assert_eq!(insights.data.iter().filter(|i| i.featured).count(), 3);

    let studies = cache.case_studies().await;
    assert_eq!(studies.source, Source::Live);
    assert_eq!(studies.data.len(), 4);
    assert!(studies.data[0].featured && studies.data[1].featured);
    assert!(!studies.data[2].featured);

    // duplicate /consulting/cloud collapses to the first card
    let services = cache.services().await;
    assert_eq!(services.source, Source::Live);
    assert_eq!(services.data.len(), 2);
    assert_eq!(services.data[0].description, "Hybrid cloud strategy.");
}

/// A network failure leaves the other kinds and the store untouched
#[tokio::test]
async fn test_failed_fetch_keeps_static() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(INSIGHTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount(&server, CASE_STUDIES_PATH, case_studies_page(3)).await;
    mount(&server, SERVICES_PATH, services_page()).await;

    let (warmer, cache) = http_warmer(&server);
    let summary = warmer.warm_all().await;

    assert!(!summary.insights);
    assert!(summary.case_studies);
    assert!(summary.services);
    assert!(!cache.is_cached(ContentKind::Insights).await);

    let insights = cache.insights().await;
    assert_eq!(insights.source, Source::Static);
    assert!(!insights.data.is_empty());
}

#[tokio::test]
async fn test_failing_warm_preserves_previous_entry() {
    let config = config_for("https://site.test");
    let cache = Arc::new(ContentCache::from_config(&config.cache));

    let good = MapFetcher::new().with_page(&config.scraper.case_studies_url, case_studies_page(3));
    let warmer = CacheWarmer::from_config(&config, shared(good), cache.clone());
    assert!(warmer.warm(ContentKind::CaseStudies).await);
    let before = cache.case_studies().await;

    let failing = CacheWarmer::from_config(&config, shared(FailingFetcher), cache.clone());
    let summary = failing.warm_all().await;
    assert_eq!(summary.refreshed(), 0);

    let after = cache.case_studies().await;
    assert_eq!(after.source, Source::Live);
    assert!(Arc::ptr_eq(&before.data, &after.data));
    assert!(!cache.is_cached(ContentKind::Insights).await);
    assert!(!cache.is_cached(ContentKind::Services).await);
}

/// Pages with no qualifying cards keep serving static data
#[tokio::test]
async fn test_empty_extraction_is_not_cached() {
    let server = MockServer::start().await;
    mount(
        &server,
        INSIGHTS_PATH,
        "<html><body><a href=\"/think/podcasts/show\"><h3>A Podcast Episode Title</h3></a></body></html>"
            .to_string(),
    )
    .await;

    let (warmer, cache) = http_warmer(&server);
    assert!(!warmer.warm(ContentKind::Insights).await);
    assert_eq!(cache.insights().await.source, Source::Static);
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let config = config_for("https://site.test");
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = MapFetcher::new().with_page(&config.scraper.insights_url, insights_page(5));
    let warmer = CacheWarmer::from_config(&config, shared(fetcher), cache.clone());

    let first = cache.insights().await;
    let second = cache.insights().await;
    assert_eq!(first.source, second.source);
    assert_eq!(first.data, second.data);

    warmer.warm(ContentKind::Insights).await;

    let first = cache.insights().await;
    let second = cache.insights().await;
    assert_eq!(first.source, Source::Live);
    assert_eq!(first.source, second.source);
    assert_eq!(first.data, second.data);
}

/// A second warm of the same kind is skipped while the first is running
#[tokio::test]
async fn test_overlapping_warm_is_skipped() {
    let config = config_for("https://site.test");
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = Arc::new(GatedFetcher::new(insights_page(2)));
    let warmer = Arc::new(CacheWarmer::from_config(
        &config,
        fetcher.clone(),
        cache.clone(),
    ));

    let first = {
        let warmer = warmer.clone();
        tokio::spawn(async move { warmer.warm(ContentKind::Insights).await })
    };

    fetcher.started().await;
    assert!(warmer.is_warming(ContentKind::Insights));
    assert!(!warmer.warm(ContentKind::Insights).await);

    fetcher.release();
    assert!(first.await.unwrap());
    assert!(!warmer.is_warming(ContentKind::Insights));
    assert_eq!(cache.insights().await.data.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_warms_on_startup_and_interval() {
    let config = config_for("https://site.test");
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = Arc::new(
        MapFetcher::new()
            .with_page(&config.scraper.insights_url, insights_page(3))
            .with_page(&config.scraper.case_studies_url, case_studies_page(3))
            .with_page(&config.scraper.services_url, services_page()),
    );
    let warmer = Arc::new(CacheWarmer::from_config(
        &config,
        fetcher.clone(),
        cache.clone(),
    ));

    let scheduler = Arc::new(WarmScheduler::with_intervals(
        warmer,
        Duration::from_secs(60),
        Duration::from_secs(3600),
        true,
    ));
    let mut events = scheduler.subscribe();
    let handle = scheduler.clone().spawn();

    match events.recv().await.unwrap() {
        WarmEvent::Completed { summary, .. } => assert_eq!(summary.refreshed(), 3),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(scheduler.is_running().await);
    assert_eq!(fetcher.calls(), 3);

    tokio::time::advance(Duration::from_secs(60)).await;
    match events.recv().await.unwrap() {
        WarmEvent::Completed { .. } => {}
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(fetcher.calls(), 6);

    scheduler.stop().await;
    handle.await.unwrap();
    assert!(!scheduler.is_running().await);
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_sweeps_expired_entries() {
    let mut config = config_for("https://site.test");
    config.cache.insights_ttl_secs = 30;
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = MapFetcher::new().with_page(&config.scraper.insights_url, insights_page(2));
    let warmer = Arc::new(CacheWarmer::from_config(&config, shared(fetcher), cache.clone()));

    assert!(warmer.warm(ContentKind::Insights).await);

    let scheduler = Arc::new(WarmScheduler::with_intervals(
        warmer,
        Duration::from_secs(86_400),
        Duration::from_secs(60),
        false,
    ));
    let mut events = scheduler.subscribe();
    let handle = scheduler.clone().spawn();

    tokio::time::advance(Duration::from_secs(61)).await;
    match events.recv().await.unwrap() {
        WarmEvent::Swept { removed } => assert_eq!(removed, 1),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(cache.insights().await.source, Source::Static);

    scheduler.stop().await;
    handle.await.unwrap();
}

/// TTLs past what an `Instant` can hold still cache instead of panicking
#[tokio::test]
async fn test_oversized_ttl_still_caches() {
    let mut config = config_for("https://site.test");
    config.cache.insights_ttl_secs = u64::MAX;
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = MapFetcher::new().with_page(&config.scraper.insights_url, insights_page(2));
    let warmer = Arc::new(CacheWarmer::from_config(&config, shared(fetcher), cache.clone()));

    let task = {
        let warmer = warmer.clone();
        tokio::spawn(async move { warmer.warm(ContentKind::Insights).await })
    };

    assert!(task.await.unwrap());
    assert_eq!(cache.insights().await.source, Source::Live);
    assert!(cache.status().await.insights.ttl > 0);
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_with_oversized_intervals() {
    let config = config_for("https://site.test");
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let fetcher = MapFetcher::new().with_page(&config.scraper.insights_url, insights_page(2));
    let warmer = Arc::new(CacheWarmer::from_config(&config, shared(fetcher), cache.clone()));

    let scheduler = Arc::new(WarmScheduler::with_intervals(
        warmer,
        Duration::MAX,
        Duration::MAX,
        true,
    ));
    let mut events = scheduler.subscribe();
    let handle = scheduler.clone().spawn();

    match events.recv().await.unwrap() {
        WarmEvent::Completed { summary, .. } => assert!(summary.insights),
        other => panic!("unexpected event {other:?}"),
    }

    scheduler.stop().await;
    handle.await.unwrap();
    assert!(!scheduler.is_running().await);
}
