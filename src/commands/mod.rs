pub mod bucket;
pub mod files;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};

use crate::client::HttpClient;
use crate::config::Config;
use crate::storage::StorageApi;

/// Loads the configuration and builds the API client from it
pub(crate) fn connect(config_file: &str) -> Result<(Config, StorageApi)> {
    let config = Config::load_from_file(config_file)
        .with_context(|| format!("Failed to load configuration from {}", config_file))?;
    let http = HttpClient::new(&config.server.endpoint, config.timeout(), config.retry_policy())
        .context("Failed to create HTTP client")?;
    let api = StorageApi::new(http, config.scope());
    Ok((config, api))
}
