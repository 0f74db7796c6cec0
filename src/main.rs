mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::ServeParams;
use showcase::config::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "showcase",
    version,
    about = "Consulting showcase content API with scrape-then-fallback caching",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API with background cache warming
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Listening port
        #[arg(short, long)]
        port: Option<u16>,

        /// Interval between warm cycles in milliseconds
        #[arg(long)]
        warm_interval_ms: Option<u64>,

        /// Directory with static data overriding the bundled copy
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Skip the warm cycle at startup
        #[arg(long, default_value = "false")]
        no_startup_warm: bool,
    },

    /// Run a single warm cycle and print the result
    Warm,

    /// Fetch and parse one article page
    Article {
        /// Article URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging, cli.verbose)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Showcase starting");

    match cli.command {
        Commands::Serve {
            host,
            port,
            warm_interval_ms,
            static_dir,
            no_startup_warm,
        } => {
            tracing::info!(
                host = ?host,
                port = ?port,
                warm_interval_ms = ?warm_interval_ms,
                "Starting serve command"
            );
            let params = ServeParams {
                host,
                port,
                warm_interval_ms,
                static_dir,
                no_startup_warm,
            };
            commands::serve(config, params).await?;
        }

        Commands::Warm => {
            tracing::info!("Starting warm command");
            commands::warm(config).await?;
        }

        Commands::Article { url } => {
            tracing::info!(url = %url, "Starting article command");
            commands::article(config, url).await?;
        }
    }

    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("showcase={level},tower_http={level},warn"))
    });

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
