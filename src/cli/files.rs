use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::run::OutputFormat;

#[derive(Parser, Debug)]
pub struct FilesCommand {
    #[command(subcommand)]
    pub subcommand: FilesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FilesSubcommand {
    /// Upload a file through the multipart GraphQL endpoint
    Upload(UploadCommand),
    /// List files of a bucket
    List(ListCommand),
    /// Show file metadata
    Get(FileRef),
    /// Fetch a rendered preview
    Preview(PreviewCommand),
    /// Download the original payload
    Download(PayloadCommand),
    /// Fetch the payload as served inline
    View(PayloadCommand),
    /// Reset file permissions to public read/update/delete
    Update(FileRef),
    /// Delete a file
    Delete(FileRef),
}

#[derive(Args, Debug, Clone)]
pub struct FileRef {
    /// Bucket id
    #[arg(long)]
    pub bucket: String,

    /// File id
    #[arg(long)]
    pub file: String,
}

#[derive(Parser, Debug)]
pub struct UploadCommand {
    /// Bucket id
    #[arg(long)]
    pub bucket: String,

    /// File to upload (defaults to the configured resource)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// File id, `unique()` lets the server pick one
    #[arg(long, default_value = "unique()")]
    pub file_id: String,

    /// Mime type, guessed from the extension when omitted
    #[arg(long)]
    pub mime_type: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Bucket id
    #[arg(long)]
    pub bucket: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct PreviewCommand {
    #[command(flatten)]
    pub target: FileRef,

    #[arg(long, default_value_t = 100)]
    pub width: u32,

    #[arg(long, default_value_t = 100)]
    pub height: u32,

    /// Write the payload to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PayloadCommand {
    #[command(flatten)]
    pub target: FileRef,

    /// Write the payload to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
