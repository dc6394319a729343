//! Error types for the gdrive_dl crate.

use thiserror::Error;

/// Errors that can occur while resolving or downloading a Drive item.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Unable to match ID from {0}")]
    InvalidInput(String),

    #[error("The item {0} was not found")]
    NotFound(String),

    #[error("Unexpected page format: {0}")]
    ScrapeError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Download failed ({status}): {url}")]
    HttpStatus { status: u16, url: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for DriveError {
    fn from(err: serde_json::Error) -> Self {
        DriveError::ScrapeError(format!("embedded JSON did not parse: {}", err))
    }
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
