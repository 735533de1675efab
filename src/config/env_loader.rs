use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of loading `.env` into the process environment
pub struct EnvLoader {
    loaded: Result<PathBuf, String>,
}

impl EnvLoader {
    /// Must run before argument parsing so `env` fallbacks see `.env` values
    pub fn load() -> Self {
        Self {
            loaded: dotenv::dotenv().map_err(|e| e.to_string()),
        }
    }

    /// Logs where the variables came from; call once tracing is initialized
    pub fn report(&self) {
        match &self.loaded {
            Ok(path) => info!("Loaded .env file: {}", path.display()),
            Err(e) => debug!("No .env file loaded ({}); using the process environment", e),
        }
    }
}
