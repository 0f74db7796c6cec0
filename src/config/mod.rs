//! Configuration management for the showcase service
//!
//! Configuration is loaded from environment variables or a TOML file, then
//! validated once at startup. Every section has defaults so a partial file is
//! accepted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::ContentKind;

/// Default origin of the scraped site, used to absolutize relative links
pub const DEFAULT_ORIGIN: &str = "https://www.ibm.com";

/// Upper bound for TTLs and schedule intervals (one year)
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Remote scraping configuration
    pub scraper: ScraperConfig,

    /// Cache and warming configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Listening port
    pub port: u16,

    /// Enable permissive CORS for the frontend
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,
}

/// Remote scraping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Outbound request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// User agent string
    pub user_agent: String,

    /// Site origin used to absolutize relative hrefs and image paths
    pub origin: String,

    /// Insights listing page
    pub insights_url: String,

    /// Case studies listing page
    pub case_studies_url: String,

    /// Services listing page
    pub services_url: String,
}

/// Cache and warming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Interval between warm cycles in milliseconds
    pub warm_interval_ms: u64,

    /// Whether to warm once right after startup
    pub warm_on_startup: bool,

    /// Insights TTL in seconds (default: 6 hours)
    pub insights_ttl_secs: u64,

    /// Case studies TTL in seconds (default: 6 hours)
    pub case_studies_ttl_secs: u64,

    /// Services TTL in seconds (default: 24 hours)
    pub services_ttl_secs: u64,

    /// Interval between sweeps of expired entries in seconds
    pub sweep_interval_secs: u64,

    /// Directory with `insights.json` / `case-studies.json` overriding the
    /// bundled fallback data
    pub static_data_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 4000,
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 15_000,
            user_agent: format!("showcase/{} (+content cache)", env!("CARGO_PKG_VERSION")),
            origin: DEFAULT_ORIGIN.to_string(),
            insights_url: format!("{DEFAULT_ORIGIN}/think"),
            case_studies_url: format!("{DEFAULT_ORIGIN}/case-studies"),
            services_url: format!("{DEFAULT_ORIGIN}/consulting"),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            warm_interval_ms: 21_600_000, // 6 hours
            warm_on_startup: true,
            insights_ttl_secs: 6 * 60 * 60,
            case_studies_ttl_secs: 6 * 60 * 60,
            services_ttl_secs: 24 * 60 * 60,
            sweep_interval_secs: 600,
            static_data_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.server.host);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.server.port);

        let request_timeout_ms = std::env::var("SCRAPE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.scraper.request_timeout_ms);

        let user_agent =
            std::env::var("SHOWCASE_USER_AGENT").unwrap_or(defaults.scraper.user_agent);

        let origin = std::env::var("SHOWCASE_ORIGIN").unwrap_or(defaults.scraper.origin);

        let insights_url =
            std::env::var("SHOWCASE_INSIGHTS_URL").unwrap_or(defaults.scraper.insights_url);
        let case_studies_url = std::env::var("SHOWCASE_CASE_STUDIES_URL")
            .unwrap_or(defaults.scraper.case_studies_url);
        let services_url =
            std::env::var("SHOWCASE_SERVICES_URL").unwrap_or(defaults.scraper.services_url);

        let warm_interval_ms = std::env::var("WARM_INTERVAL_MS")
            .or_else(|_| std::env::var("CACHE_WARM_INTERVAL"))
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.cache.warm_interval_ms);

        let static_data_dir = std::env::var("SHOWCASE_STATIC_DATA_DIR")
            .ok()
            .map(PathBuf::from);

        let log_level =
            std::env::var("SHOWCASE_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("SHOWCASE_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                ..defaults.server
            },
            scraper: ScraperConfig {
                request_timeout_ms,
                user_agent,
                origin,
                insights_url,
                case_studies_url,
                services_url,
            },
            cache: CacheConfig {
                warm_interval_ms,
                static_data_dir,
                ..defaults.cache
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be greater than 0"));
        }

        if self.scraper.request_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "scraper.request_timeout_ms",
                "must be greater than 0",
            ));
        }

        if self.cache.warm_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "cache.warm_interval_ms",
                "must be greater than 0",
            ));
        }

        if self.cache.warm_interval_ms > MAX_DURATION_SECS * 1000 {
            return Err(ConfigError::invalid(
                "cache.warm_interval_ms",
                format!("must be at most {}", MAX_DURATION_SECS * 1000),
            ));
        }

        for (field, secs, what) in [
            ("cache.sweep_interval_secs", self.cache.sweep_interval_secs, "interval"),
            ("cache.insights_ttl_secs", self.cache.insights_ttl_secs, "TTL"),
            ("cache.case_studies_ttl_secs", self.cache.case_studies_ttl_secs, "TTL"),
            ("cache.services_ttl_secs", self.cache.services_ttl_secs, "TTL"),
        ] {
            if secs == 0 {
                return Err(ConfigError::invalid(field, format!("{what} must be greater than 0")));
            }
            if secs > MAX_DURATION_SECS {
                return Err(ConfigError::invalid(
                    field,
                    format!("{what} must be at most {MAX_DURATION_SECS} seconds"),
                ));
            }
        }

        for (field, value) in [
            ("scraper.origin", &self.scraper.origin),
            ("scraper.insights_url", &self.scraper.insights_url),
            ("scraper.case_studies_url", &self.scraper.case_studies_url),
            ("scraper.services_url", &self.scraper.services_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(ConfigError::invalid(field, format!("invalid URL: {value}")));
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::invalid(
                "logging.format",
                format!("expected text or json, got {}", self.logging.format),
            ));
        }

        self.bind_address().map(|_| ())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| ConfigError::invalid("server.host", format!("Invalid address: {addr}")))
    }
}

impl ScraperConfig {
    /// Outbound request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Listing page scraped for the given content type
    #[must_use]
    pub fn source_url(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Insights => &self.insights_url,
            ContentKind::CaseStudies => &self.case_studies_url,
            ContentKind::Services => &self.services_url,
        }
    }
}

impl CacheConfig {
    /// Get warm interval as Duration
    #[must_use]
    pub fn warm_interval(&self) -> Duration {
        Duration::from_millis(self.warm_interval_ms)
    }

    /// Get sweep interval as Duration
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// TTL applied when storing the given content type
    #[must_use]
    pub fn ttl_for(&self, kind: ContentKind) -> Duration {
        let secs = match kind {
            ContentKind::Insights => self.insights_ttl_secs,
            ContentKind::CaseStudies => self.case_studies_ttl_secs,
            ContentKind::Services => self.services_ttl_secs,
        };
        Duration::from_secs(secs)
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
