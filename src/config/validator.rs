use anyhow::Result;
use tracing::info;

use crate::config::parser::{Config, SideMode};

/// Configuration checks run before touching the server
pub struct ConfigValidator;

impl ConfigValidator {
    /// Full validation; `check_resource` also requires the upload file to exist
    pub fn validate(config: &Config, check_resource: bool) -> Result<()> {
        info!("Validating configuration");

        Self::validate_server(config)?;
        Self::validate_project(config)?;
        Self::validate_side(config)?;
        Self::validate_scenario(config)?;

        if check_resource {
            let path = config.upload_path();
            if !path.is_file() {
                return Err(anyhow::anyhow!("Upload file not found: {}", path.display()));
            }
        }

        info!("Configuration is valid");
        Ok(())
    }

    fn validate_server(config: &Config) -> Result<()> {
        let endpoint = &config.server.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(anyhow::anyhow!("Endpoint must start with http:// or https://: {}", endpoint));
        }
        if config.server.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than zero"));
        }
        Ok(())
    }

    fn validate_project(config: &Config) -> Result<()> {
        if config.project.id.is_empty() || has_placeholder(&config.project.id) {
            return Err(anyhow::anyhow!("Project id is empty or unresolved"));
        }
        if config.project.api_key.is_empty() || has_placeholder(&config.project.api_key) {
            return Err(anyhow::anyhow!("Project API key is empty or unresolved"));
        }
        Ok(())
    }

    fn validate_side(config: &Config) -> Result<()> {
        if config.side.mode == SideMode::Client
            && (config.side.session.is_empty() || has_placeholder(&config.side.session))
        {
            return Err(anyhow::anyhow!("Client side requires a session"));
        }
        Ok(())
    }

    fn validate_scenario(config: &Config) -> Result<()> {
        if config.bucket.id.is_empty() || config.bucket.name.is_empty() {
            return Err(anyhow::anyhow!("Bucket id and name must not be empty"));
        }
        if config.preview.width == 0 || config.preview.height == 0 {
            return Err(anyhow::anyhow!("Preview dimensions must be non-zero"));
        }
        if config.retry.attempts == 0 {
            return Err(anyhow::anyhow!("Retry attempts must be at least 1"));
        }
        Ok(())
    }
}

fn has_placeholder(value: &str) -> bool {
    value.contains("${")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(extra: &str) -> Config {
        let content = format!(
            "[server]\nendpoint = \"http://localhost/v1\"\n\n[project]\nid = \"p1\"\napi_key = \"k\"\n{}",
            extra
        );
        Config::parse(&content, PathBuf::new()).unwrap()
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigValidator::validate(&config(""), false).is_ok());
    }

    #[test]
    fn test_bad_endpoint() {
        let mut c = config("");
        c.server.endpoint = "localhost".to_string();
        assert!(ConfigValidator::validate(&c, false).is_err());
    }

    #[test]
    fn test_unresolved_key() {
        let mut c = config("");
        c.project.api_key = "${STORAGE_E2E_API_KEY}".to_string();
        assert!(ConfigValidator::validate(&c, false).is_err());
    }

    #[test]
    fn test_client_side_needs_session() {
        let c = config("\n[side]\nmode = \"client\"\n");
        assert!(ConfigValidator::validate(&c, false).is_err());
    }

    #[test]
    fn test_missing_resource() {
        let mut c = config("");
        c.upload.path = PathBuf::from("/definitely/not/here.png");
        assert!(ConfigValidator::validate(&c, false).is_ok());
        assert!(ConfigValidator::validate(&c, true).is_err());
    }
}
