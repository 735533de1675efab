use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::models::project::{ProjectScope, Side};
use crate::utils::network::RetryPolicy;

/// Suite configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub project: ProjectConfig,
    #[serde(default)]
    pub side: SideConfig,
    #[serde(default)]
    pub bucket: BucketConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub expect: ExpectConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    pub id: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SideMode {
    Client,
    Server,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SideConfig {
    pub mode: SideMode,
    #[serde(default)]
    pub session: String,
    #[serde(default = "default_origin")]
    pub origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BucketConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub file_security: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default = "default_true")]
    pub file_security: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ExpectConfig {
    pub preview_size: usize,
    pub download_size: usize,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RetryConfig {
    pub attempts: u32,
    pub base_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_origin() -> String {
    "http://localhost".to_string()
}

fn default_true() -> bool {
    true
}

/// Server side when `[side]` is absent; client mode needs a session to be configured
impl Default for SideConfig {
    fn default() -> Self {
        Self {
            mode: SideMode::Server,
            session: String::new(),
            origin: default_origin(),
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            id: "actors".to_string(),
            name: "Actors".to_string(),
            file_security: false,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/logo.png"),
            mime_type: Some("image/png".to_string()),
            file_id: None,
            file_security: true,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { width: 100, height: 100 }
    }
}

impl Default for ExpectConfig {
    fn default() -> Self {
        Self {
            preview_size: 46719,
            download_size: 47218,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            attempts: policy.attempts,
            base_delay_ms: policy.base_delay_ms,
        }
    }
}

impl Config {
    /// Loads a TOML file, substituting `${VAR}` placeholders from the environment
    pub fn load_from_file(file_path: &str) -> Result<Self> {
        info!("Loading configuration from {}", file_path);

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read configuration file: {}", file_path))?;

        let base_dir = Path::new(file_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let config = Self::parse(&content, base_dir)?;
        info!("Configuration loaded for project {}", config.project.id);
        Ok(config)
    }

    pub fn parse(content: &str, base_dir: PathBuf) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let mut config: Config = toml::from_str(&processed).context("Failed to parse TOML configuration")?;
        config.base_dir = base_dir;
        Ok(config)
    }

    /// Replaces `${VAR_NAME}`; unknown variables are left as-is
    fn substitute_env_vars(content: &str) -> String {
        let re = match regex::Regex::new(r"\$\{([^}]+)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                warn!("Environment variable not set: {}", var_name);
                format!("${{{}}}", var_name)
            })
        })
        .to_string()
    }

    pub fn scope(&self) -> ProjectScope {
        let side = match self.side.mode {
            SideMode::Client => Side::Client {
                session: self.side.session.clone(),
                origin: self.side.origin.clone(),
            },
            SideMode::Server => Side::Server,
        };
        ProjectScope::new(&self.project.id, &self.project.api_key, side)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry.attempts,
            base_delay_ms: self.retry.base_delay_ms,
        }
    }

    /// Upload path, resolved against the configuration file's directory
    pub fn upload_path(&self) -> PathBuf {
        if self.upload.path.is_absolute() {
            self.upload.path.clone()
        } else {
            self.base_dir.join(&self.upload.path)
        }
    }
}
