//! gdrive_dl - Download files and folders from Google Drive share links.
//!
//! This library works without the Drive API. It:
//! - Extracts the Drive ID from a share link or raw ID
//! - Resolves the ID to a file or folder by following the open redirect
//! - Scrapes names, sizes and folder listings embedded in the viewer pages
//! - Streams file content to disk, answering the large-file confirmation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use gdrive_dl::{extract_id, DriveDownloader, DriveSession, Endpoints};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let id = extract_id("https://drive.google.com/open?id=1aBcDeFgHiJkLmNoPqRsTuVwXyZ0123456")?;
//!     let session = DriveSession::new(Endpoints::default())?;
//!     let downloader = DriveDownloader::new(session);
//!
//!     downloader.fetch(&id, Path::new(".")).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod download;
pub mod error;
pub mod models;
pub mod progress;
pub mod scraper;
pub mod session;
pub mod url_parser;

// Re-exports for convenience
pub use client::DriveDownloader;
pub use error::{DriveError, Result};
pub use models::{FileDescriptor, FolderEntry, FolderListing, Resource};
pub use session::{DriveSession, Endpoints};
pub use url_parser::extract_id;
