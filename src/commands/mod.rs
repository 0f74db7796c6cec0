pub mod article;
pub mod serve;
pub mod warm;

use anyhow::{Context, Result};
use std::path::Path;

use showcase::config::Config;

// Re-export command functions for convenience
pub use article::article;
pub use serve::{serve, ServeParams};
pub use warm::warm;

/// Load configuration from `path`, or from the environment when absent
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env().context("Failed to read configuration from environment")?,
    };
    Ok(config)
}
