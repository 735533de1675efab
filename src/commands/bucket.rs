use anyhow::{Context, Result};
use colored::*;

use crate::cli::bucket::{BucketCommand, BucketSubcommand};
use crate::models::permission::{public_crud, Id};
use crate::storage::NewBucket;

pub async fn handle_bucket_command(cmd: BucketCommand, config_file: &str) -> Result<()> {
    let (config, api) = super::connect(config_file)?;

    match cmd.subcommand {
        BucketSubcommand::Create(create) => {
            let bucket = NewBucket {
                bucket_id: Id::from_config(Some(create.id.as_deref().unwrap_or(&config.bucket.id))),
                name: create.name.unwrap_or_else(|| config.bucket.name.clone()),
                file_security: create.file_security || config.bucket.file_security,
                permissions: public_crud(),
            };
            let created = api.create_bucket(&bucket).await.context("Bucket creation failed")?;
            println!("{} Bucket {} ({})", "✅", created.name.bright_green(), created.id);
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
    }

    Ok(())
}
