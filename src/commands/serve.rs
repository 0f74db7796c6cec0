use anyhow::{Context, Result};
use std::path::PathBuf;

use showcase::api::ApiServer;
use showcase::config::Config;

/// Command-line overrides for the server
#[derive(Debug, Default)]
pub struct ServeParams {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub warm_interval_ms: Option<u64>,
    pub static_dir: Option<PathBuf>,
    pub no_startup_warm: bool,
}

impl ServeParams {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(interval) = self.warm_interval_ms {
            config.cache.warm_interval_ms = interval;
        }
        if let Some(dir) = self.static_dir {
            config.cache.static_data_dir = Some(dir);
        }
        if self.no_startup_warm {
            config.cache.warm_on_startup = false;
        }
    }
}

/// Start the API server and its warm scheduler
pub async fn serve(mut config: Config, params: ServeParams) -> Result<()> {
    params.apply(&mut config);

    let server = ApiServer::new(config).context("Failed to create API server")?;

    println!("{}", server.info().display());
    println!();
    println!("API Endpoints:");
    println!("  GET  /                         - Service info");
    println!("  GET  /api/health               - Health and cache status");
    println!("  GET  /api/insights             - List insights (?category=, ?featured=true)");
    println!("  GET  /api/insights/{{slug}}      - Get insight by slug");
    println!("  GET  /api/case-studies         - List case studies (?industry=)");
    println!("  GET  /api/case-studies/{{slug}}  - Get case study by slug");
    println!("  GET  /api/services             - List services");
    println!("  POST /api/contact              - Submit contact inquiry");
    println!("  POST /api/strategist           - Ask the content assistant");
    println!();
    println!("Press Ctrl+C to stop.\n");

    // Start with graceful shutdown
    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Showcase API stopped.");
    Ok(())
}
