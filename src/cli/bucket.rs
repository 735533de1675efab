use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct BucketCommand {
    #[command(subcommand)]
    pub subcommand: BucketSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BucketSubcommand {
    /// Create a bucket with public read/create/update/delete permissions
    Create(CreateBucketCommand),
}

#[derive(Parser, Debug)]
pub struct CreateBucketCommand {
    /// Bucket id (defaults to the configured one)
    #[arg(long)]
    pub id: Option<String>,

    /// Bucket name (defaults to the configured one)
    #[arg(long)]
    pub name: Option<String>,

    /// Enable file-level security
    #[arg(long)]
    pub file_security: bool,
}
