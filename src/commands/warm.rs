use anyhow::{Context, Result};
use std::sync::Arc;

use showcase::config::Config;
use showcase::content::ContentCache;
use showcase::crawler::HttpFetcher;
use showcase::scheduler::CacheWarmer;

/// Run one warm cycle and print the outcome
pub async fn warm(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let fetcher = HttpFetcher::from_config(&config.scraper).context("Failed to create HTTP client")?;
    let cache = Arc::new(ContentCache::from_config(&config.cache));
    let warmer = CacheWarmer::from_config(&config, Arc::new(fetcher), cache.clone());

    let summary = warmer.warm_all().await;
    let status = cache.status().await;

    println!("Warm Cycle Complete");
    println!("===================");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!();
    println!("Insights:     {} cached", status.insights.count);
    println!("Case studies: {} cached", status.case_studies.count);
    println!("Services:     {} cached", status.services.count);

    if summary.refreshed() == 0 {
        println!("\nNo content type refreshed; the API would serve static data.");
    }

    Ok(())
}
