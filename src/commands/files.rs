use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::files::{FilesCommand, FilesSubcommand};
use crate::cli::run::OutputFormat;
use crate::client::ApiResponse;
use crate::models::permission::{public_rud, Id};
use crate::storage::NewFile;

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mime")]
    mime: String,
    #[tabled(rename = "Size")]
    size: String,
}

pub async fn handle_files_command(cmd: FilesCommand, config_file: &str) -> Result<()> {
    let (config, api) = super::connect(config_file)?;

    match cmd.subcommand {
        FilesSubcommand::Upload(upload) => {
            let path = upload.path.unwrap_or_else(|| config.upload_path());
            let mime_type = upload.mime_type.or_else(|| config.upload.mime_type.clone());
            let file = api
                .create_file(&NewFile {
                    bucket_id: &upload.bucket,
                    file_id: Id::from_config(Some(upload.file_id.as_str())),
                    path: &path,
                    mime_type: mime_type.as_deref(),
                    file_security: config.upload.file_security,
                    permissions: public_rud(),
                })
                .await
                .context("Upload failed")?;
            println!("{} Uploaded {} as {}", "📤", path.display(), file.id.bright_green());
        }
        FilesSubcommand::List(list) => {
            let files = api.list_files(&list.bucket).await.context("Listing failed")?;
            if list.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                let rows: Vec<FileRow> = files
                    .files()
                    .iter()
                    .map(|f| FileRow {
                        id: f.id.clone(),
                        name: f.name.clone().unwrap_or_default(),
                        mime: f.mime_type.clone().unwrap_or_default(),
                        size: f.size_original.map(|s| s.to_string()).unwrap_or_default(),
                    })
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
                println!("Total: {}", files.total());
            }
        }
        FilesSubcommand::Get(target) => {
            let file = api.get_file(&target.bucket, &target.file).await.context("Lookup failed")?;
            println!("{}", serde_json::to_string_pretty(&file)?);
        }
        FilesSubcommand::Preview(preview) => {
            let response = api
                .get_file_preview(&preview.target.bucket, &preview.target.file, preview.width, preview.height)
                .await
                .context("Preview failed")?;
            emit_payload("Preview", &response, preview.output.as_deref()).await?;
        }
        FilesSubcommand::Download(payload) => {
            let response = api
                .get_file_download(&payload.target.bucket, &payload.target.file)
                .await
                .context("Download failed")?;
            emit_payload("Download", &response, payload.output.as_deref()).await?;
        }
        FilesSubcommand::View(payload) => {
            let response = api
                .get_file_view(&payload.target.bucket, &payload.target.file)
                .await
                .context("View failed")?;
            emit_payload("View", &response, payload.output.as_deref()).await?;
        }
        FilesSubcommand::Update(target) => {
            let file = api
                .update_file(&target.bucket, &target.file, &public_rud())
                .await
                .context("Update failed")?;
            println!("{}", serde_json::to_string_pretty(&file)?);
        }
        FilesSubcommand::Delete(target) => {
            let response = api
                .delete_file(&target.bucket, &target.file)
                .await
                .context("Delete failed")?;
            if response.status == 204 {
                println!("{} Deleted {}", "🗑️", target.file.bright_green());
            } else {
                anyhow::bail!("Delete returned status {}", response.status);
            }
        }
    }

    Ok(())
}

async fn emit_payload(label: &str, response: &ApiResponse, output: Option<&Path>) -> Result<()> {
    if response.status >= 400 {
        anyhow::bail!(
            "{} returned status {}: {}",
            label,
            response.status,
            String::from_utf8_lossy(response.bytes())
        );
    }

    let content_type = response.header("content-type").unwrap_or("unknown");
    println!("{} {}: {} bytes ({})", "📦", label, response.body_len(), content_type);

    if let Some(path) = output {
        tokio::fs::write(path, response.bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  • Saved to {}", path.display());
    }
    Ok(())
}
