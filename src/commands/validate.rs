use anyhow::{Context, Result};
use colored::*;

use crate::cli::validate::ValidateCommand;
use crate::config::{Config, ConfigValidator};

pub fn handle_validate_command(cmd: ValidateCommand, config_file: &str) -> Result<()> {
    let config = Config::load_from_file(config_file)
        .with_context(|| format!("Failed to load configuration from {}", config_file))?;
    ConfigValidator::validate(&config, cmd.check_resource).context("Validation failed")?;

    println!("{} Configuration {} is valid", "✅", config_file.bright_blue());
    println!("  • Endpoint: {}", config.server.endpoint);
    println!("  • Project: {}", config.project.id);
    println!("  • Upload: {}", config.upload_path().display());
    Ok(())
}
