//! Tests for config loading and validation

use serial_test::serial;
use std::io::Write;
use std::time::Duration;

use showcase::config::Config;
use showcase::models::ContentKind;

const ENV_VARS: &[&str] = &[
    "HOST",
    "PORT",
    "SCRAPE_TIMEOUT_MS",
    "WARM_INTERVAL_MS",
    "CACHE_WARM_INTERVAL",
    "SHOWCASE_INSIGHTS_URL",
    "SHOWCASE_STATIC_DATA_DIR",
    "SHOWCASE_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.cache.warm_interval(), Duration::from_secs(6 * 60 * 60));
    assert_eq!(config.scraper.request_timeout(), Duration::from_secs(15));
    assert!(config.cache.static_data_dir.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("PORT", "8080");
    std::env::set_var("SCRAPE_TIMEOUT_MS", "2500");
    std::env::set_var("CACHE_WARM_INTERVAL", "60000");
    std::env::set_var("SHOWCASE_INSIGHTS_URL", "https://example.test/think");
    std::env::set_var("SHOWCASE_STATIC_DATA_DIR", "/srv/showcase");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.scraper.request_timeout_ms, 2500);
    assert_eq!(config.cache.warm_interval_ms, 60_000);
    assert_eq!(
        config.scraper.source_url(ContentKind::Insights),
        "https://example.test/think"
    );
    assert_eq!(
        config.cache.static_data_dir.as_deref(),
        Some(std::path::Path::new("/srv/showcase"))
    );
}

#[test]
#[serial]
fn test_warm_interval_ms_wins_over_legacy_name() {
    clear_env();
    std::env::set_var("WARM_INTERVAL_MS", "1000");
    std::env::set_var("CACHE_WARM_INTERVAL", "2000");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.cache.warm_interval_ms, 1000);
}

#[test]
#[serial]
fn test_unparseable_port_falls_back() {
    clear_env();
    std::env::set_var("PORT", "not-a-port");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.server.port, 4000);
}

#[test]
fn test_partial_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 5050

[cache]
services_ttl_secs = 120
warm_on_startup = false
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.server.port, 5050);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(!config.cache.warm_on_startup);
    assert_eq!(
        config.cache.ttl_for(ContentKind::Services),
        Duration::from_secs(120)
    );
    assert_eq!(
        config.cache.ttl_for(ContentKind::Insights),
        Duration::from_secs(6 * 60 * 60)
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.cache.case_studies_ttl_secs = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("cache.case_studies_ttl_secs"));

    let mut config = Config::default();
    config.scraper.services_url = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.server.host = "not a host".to_string();
    assert!(config.validate().is_err());
}
