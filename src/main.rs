use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storage_e2e::{cli, commands, config::env_loader::EnvLoader};

#[derive(Parser, Debug)]
#[command(
    name = "storage-e2e",
    about = "End-to-end checks for the storage GraphQL API",
    version,
    author = "Ride Team"
)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml", env = "STORAGE_E2E_CONFIG")]
    config: String,

    /// Log level (overridden by RUST_LOG)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full scenario
    Run(cli::run::RunCommand),
    /// Bucket operations
    Bucket(cli::bucket::BucketCommand),
    /// File operations
    Files(cli::files::FilesCommand),
    /// Validate the configuration
    Validate(cli::validate::ValidateCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvLoader::load();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storage_e2e={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    env.report();

    match args.command {
        Commands::Run(cmd) => {
            let report = commands::run::handle_run_command(cmd, &args.config).await?;
            if !report.success() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Bucket(cmd) => commands::bucket::handle_bucket_command(cmd, &args.config).await,
        Commands::Files(cmd) => commands::files::handle_files_command(cmd, &args.config).await,
        Commands::Validate(cmd) => commands::validate::handle_validate_command(cmd, &args.config),
    }
}
