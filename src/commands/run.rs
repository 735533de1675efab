use anyhow::{Context, Result};
use colored::*;
use tracing::info;

use crate::cli::run::{OutputFormat, RunCommand};
use crate::config::ConfigValidator;
use crate::suite::{Scenario, SuiteReport, SuiteRunner};
use crate::utils::progress::ProgressBar;

/// Handles `run`; returns the report so `main` can pick the exit code
pub async fn handle_run_command(cmd: RunCommand, config_file: &str) -> Result<SuiteReport> {
    info!("🚀 Starting storage scenario");

    let (config, api) = super::connect(config_file)?;
    ConfigValidator::validate(&config, true).context("Configuration is not valid")?;

    let runner = SuiteRunner::new(api, Scenario::from_config(&config))
        .only(&cmd.only)
        .fail_fast(cmd.fail_fast);

    let json = cmd.format == OutputFormat::Json;
    let progress = ProgressBar::new_spinner(!cmd.no_progress && !json);
    let report = runner
        .run_with(&config.server.endpoint, |step| progress.set_message(format!("{}...", step)))
        .await;
    progress.finish_and_clear();

    match cmd.format {
        OutputFormat::Json => println!("{}", report.to_json()),
        OutputFormat::Table => {
            println!(
                "{} {} (project {})",
                "🗄️",
                report.endpoint.bright_blue(),
                report.project.bright_blue()
            );
            println!("{}", report.render_table());
            println!("{}", report.summary());
        }
    }

    Ok(report)
}
