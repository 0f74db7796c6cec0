use anyhow::{Context, Result};
use std::sync::Arc;

use showcase::config::Config;
use showcase::crawler::{ContentScraper, HttpFetcher};

/// Fetch a single article page and print its parsed fields as JSON
pub async fn article(config: Config, url: String) -> Result<()> {
    let fetcher = HttpFetcher::from_config(&config.scraper).context("Failed to create HTTP client")?;
    let scraper = ContentScraper::new(Arc::new(fetcher), config.scraper);

    let detail = scraper
        .scrape_article(&url)
        .await
        .with_context(|| format!("Failed to fetch article: {url}"))?;

    if detail.content.is_none() {
        tracing::warn!(url = %url, "No article body found");
    }

    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}
