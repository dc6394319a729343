//! gdrive_dl CLI - Download a Google Drive file or folder from a share link.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gdrive_dl::{extract_id, DriveDownloader, DriveSession, Endpoints};

/// Download a file or mirror a folder from a Google Drive share link.
#[derive(Parser)]
#[command(name = "gdrive_dl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Share URL or raw file/folder ID.
    url: Option<String>,

    /// Existing local directory to download into.
    #[arg(default_value = ".")]
    destination: PathBuf,

    /// Anything past the destination is ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.ignored.is_empty() {
        tracing::debug!(ignored = ?cli.ignored, "ignoring extra arguments");
    }

    let Some(url) = cli.url else {
        anyhow::bail!("A URL or ID is required as the first argument");
    };

    if !cli.destination.is_dir() {
        anyhow::bail!("Directory {} doesn't exist", cli.destination.display());
    }

    let id = extract_id(&url)?;

    let session = DriveSession::new(Endpoints::default())
        .context("Failed to create HTTP session")?;
    let downloader = DriveDownloader::new(session);

    downloader
        .fetch(&id, &cli.destination)
        .await
        .with_context(|| format!("Failed to download {}", id))?;

    Ok(())
}
