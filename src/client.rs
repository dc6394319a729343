//! Resolves share identifiers and mirrors them to the local filesystem.

use std::io;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use reqwest::Response;
use tokio_util::io::StreamReader;

use crate::download::save_stream;
use crate::error::{DriveError, Result};
use crate::models::{format_size, FileDescriptor, FolderEntry, FolderListing, Resource};
use crate::scraper::{extract_confirm_token, parse_file_metadata, parse_folder_listing};
use crate::session::DriveSession;

/// Pending work for the folder walk.
enum Task {
    Folder {
        id: String,
        directory: PathBuf,
        page: Option<String>,
        /// Folder ids from the walk root down to this folder's parent.
        ancestors: Vec<String>,
    },
    File(FileDescriptor),
}

/// Downloads Drive files and folders without the Drive API.
pub struct DriveDownloader {
    session: DriveSession,
}

impl DriveDownloader {
    pub fn new(session: DriveSession) -> Self {
        Self { session }
    }

    /// Download whatever `id` points at into `directory`.
    ///
    /// A file lands as `directory/<name>`; a folder's children are mirrored
    /// directly into `directory`.
    pub async fn fetch(&self, id: &str, directory: &Path) -> Result<()> {
        match self.resolve(id).await? {
            Resource::File(metadata) => {
                let file = FileDescriptor::new(id, metadata.name, metadata.size, directory);
                self.download_file(&file).await.map(|_| ())
            }
            Resource::Folder { page } => self.mirror_folder(id, directory, Some(page)).await,
        }
    }

    /// Decide whether `id` is a file or a folder from where the open URL
    /// redirects to.
    pub async fn resolve(&self, id: &str) -> Result<Resource> {
        let response = self.session.open_item(id).await?;
        if response.status() != reqwest::StatusCode::OK {
            return Err(DriveError::NotFound(id.to_string()));
        }

        let final_path = response.url().path().to_string();
        tracing::debug!(id, target = %response.url(), "item resolved");

        if final_path.contains("/file/") {
            let page = response.text().await?;
            Ok(Resource::File(parse_file_metadata(&page)?))
        } else if final_path.contains("/folders/") {
            let page = response.text().await?;
            Ok(Resource::Folder { page })
        } else {
            Err(DriveError::NotFound(id.to_string()))
        }
    }

    /// List a folder, fetching its page unless one is supplied.
    pub async fn list_folder(&self, id: &str, page: Option<String>) -> Result<FolderListing> {
        let page = match page {
            Some(page) => page,
            None => {
                println!("fetch");
                self.session.folder_page(id).await?
            }
        };
        parse_folder_listing(&page)
    }

    /// Mirror a folder tree into `directory`, depth-first in listing order.
    ///
    /// Empty folders leave nothing on disk. A folder shared by several
    /// parents is mirrored under each of them; a folder that contains one of
    /// its own ancestors is skipped there.
    pub async fn mirror_folder(
        &self,
        id: &str,
        directory: &Path,
        page: Option<String>,
    ) -> Result<()> {
        let mut stack = vec![Task::Folder {
            id: id.to_string(),
            directory: directory.to_path_buf(),
            page,
            ancestors: Vec::new(),
        }];

        while let Some(task) = stack.pop() {
            match task {
                Task::File(file) => {
                    self.download_file(&file).await?;
                }
                Task::Folder {
                    id,
                    directory,
                    page,
                    ancestors,
                } => {
                    if ancestors.contains(&id) {
                        tracing::warn!(id, directory = %directory.display(), "folder contains itself, skipping");
                        continue;
                    }

                    let listing = self.list_folder(&id, page).await?;
                    if listing.is_empty() {
                        tracing::debug!(id, "empty folder");
                        continue;
                    }

                    tokio::fs::create_dir_all(&directory).await?;
                    tracing::info!(id, directory = %directory.display(), entries = listing.len(), "mirroring folder");

                    let mut lineage = ancestors;
                    lineage.push(id);

                    // Reversed so the stack pops children in listing order.
                    for entry in listing.entries.into_iter().rev() {
                        stack.push(child_task(entry, &directory, &lineage)?);
                    }
                }
            }
        }

        Ok(())
    }

    /// Download one file, answering the large-file confirmation at most once.
    pub async fn download_file(&self, file: &FileDescriptor) -> Result<u64> {
        tracing::info!(id = %file.id, size = %format_size(file.size), "downloading {}", file.name);

        let first = self.session.download(&file.id, None).await?;
        let response = if requires_confirmation(&first) {
            let body = first.text().await?;
            let token = extract_confirm_token(&body).ok_or_else(|| {
                DriveError::ScrapeError(format!("no confirm token for {}", file.id))
            })?;
            tracing::debug!(id = %file.id, token, "retrying with confirm token");
            self.session.download(&file.id, Some(&token)).await?
        } else {
            first
        };

        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        println!("{}", file.local_path.display());

        let reader = StreamReader::new(Box::pin(response.bytes_stream().map_err(io::Error::other)));
        save_stream(reader, &file.local_path, file.size).await
    }
}

/// Drive sets a cookie when it serves the virus-scan interstitial instead of
/// the file.
fn requires_confirmation(response: &Response) -> bool {
    response.cookies().next().is_some()
}

fn child_task(entry: FolderEntry, directory: &Path, lineage: &[String]) -> Result<Task> {
    let path = directory.join(&entry.name);
    if entry.is_folder() {
        return Ok(Task::Folder {
            id: entry.id,
            directory: path,
            page: None,
            ancestors: lineage.to_vec(),
        });
    }

    let size = entry.size.ok_or_else(|| {
        DriveError::ScrapeError(format!("file {} has no declared size", entry.id))
    })?;
    tracing::debug!(%entry, "queued file");
    Ok(Task::File(FileDescriptor {
        id: entry.id,
        name: entry.name,
        size,
        local_path: path,
    }))
}
