use clap::{Parser, ValueEnum};

use crate::suite::StepId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    about = "Run the storage scenario against the configured server",
    long_about = "Creates a bucket, uploads the configured file, lists, reads, previews, downloads, views, updates and deletes it, asserting every response."
)]
pub struct RunCommand {
    /// Run only these steps (their prerequisites are added automatically)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<StepId>,

    /// Stop after the first failing step
    #[arg(long)]
    pub fail_fast: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}
