//! HTTP server and shared state
//!
//! The server owns the content cache, the warmer and the warm scheduler.
//! Starting it spawns the scheduler first, so the listener accepts requests
//! while the initial warm is still running.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::handle_panic;
use super::routes::create_router;
use crate::config::Config;
use crate::content::ContentCache;
use crate::crawler::{HttpFetcher, PageFetcher};
use crate::scheduler::{CacheWarmer, WarmScheduler};
use crate::strategist::Strategist;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Content cache with static fallback
    pub cache: Arc<ContentCache>,

    /// Cache warmer
    pub warmer: Arc<CacheWarmer>,

    /// Content assistant
    pub strategist: Strategist,

    /// Server start time
    pub start_time: Instant,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the cache, warmer and strategist around `fetcher`
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        let cache = Arc::new(ContentCache::from_config(&config.cache));
        let warmer = Arc::new(CacheWarmer::from_config(&config, fetcher, cache.clone()));
        let strategist = Strategist::new(cache.clone());

        Self {
            cache,
            warmer,
            strategist,
            start_time: Instant::now(),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// API Server
// ============================================================================

/// Main API server
pub struct ApiServer {
    state: AppState,
    scheduler: Arc<WarmScheduler>,
    bind_address: SocketAddr,
}

impl ApiServer {
    /// Create a server fetching over HTTP
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let fetcher = HttpFetcher::from_config(&config.scraper)
            .map_err(|e| ServerError::InitError(e.to_string()))?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create a server over a custom fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;
        let bind_address = config
            .bind_address()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let state = AppState::new(config, fetcher);
        let scheduler = Arc::new(WarmScheduler::new(
            state.warmer.clone(),
            &state.config.cache,
        ));

        Ok(Self {
            state,
            scheduler,
            bind_address,
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Get the warm scheduler
    pub fn scheduler(&self) -> Arc<WarmScheduler> {
        self.scheduler.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let server = &self.state.config.server;
        let mut router = create_router(self.state.clone());

        // Add CORS layer if enabled
        if server.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        // Add tracing layer if enabled
        if server.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router.layer(CatchPanicLayer::custom(handle_panic))
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.bind_address;

        // Start background tasks
        let scheduler_handle = self.start_background_tasks();

        // Start the HTTP server with graceful shutdown
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        tracing::info!("Showcase API listening on {}", addr);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()));

        self.scheduler.stop().await;
        if let Err(e) = scheduler_handle.await {
            tracing::warn!(error = %e, "Warm scheduler task ended abnormally");
        }

        served?;
        tracing::info!("Showcase API shutdown complete");
        Ok(())
    }

    /// Start the warm scheduler on its own task
    fn start_background_tasks(&self) -> tokio::task::JoinHandle<()> {
        let handle = self.scheduler.clone().spawn();
        tracing::info!("Background tasks started");
        handle
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        let config = &self.state.config;
        ServerInfo {
            bind_address: self.bind_address,
            warm_interval_ms: config.cache.warm_interval_ms,
            cors_enabled: config.server.enable_cors,
            request_logging_enabled: config.server.enable_request_logging,
            static_data_dir: config
                .cache
                .static_data_dir
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub warm_interval_ms: u64,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
    pub static_data_dir: Option<String>,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Showcase API Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Warm Interval: {}ms\n\
             Static Data: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.warm_interval_ms,
            self.static_data_dir.as_deref().unwrap_or("bundled"),
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Configuration error
    ConfigError(String),

    /// Initialization error
    InitError(String),

    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::InitError(msg) => write!(f, "Initialization error: {}", msg),
            Self::BindError(msg) => write!(f, "Failed to bind: {}", msg),
            Self::ServeError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

// ============================================================================
// Tests
// ============================================================================
