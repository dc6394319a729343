//! Streaming file content to disk.

use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::error::Result;
use crate::progress::{ProgressLine, TransferProgress};

/// Read size for each chunk copied to disk.
pub const CHUNK_SIZE: usize = 4096;

/// Copy `reader` into a fresh file at `path`, drawing progress against
/// `declared_size`.
///
/// Any failure removes the partially written file before the error is
/// returned. Returns the number of bytes written.
pub async fn save_stream<R>(reader: R, path: &Path, declared_size: u64) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut progress = ProgressLine::new();
    let outcome = copy_to_file(reader, path, declared_size, &mut progress).await;
    progress.finish();

    if outcome.is_err() {
        remove_partial(path).await;
    }
    outcome
}

async fn copy_to_file<R>(
    mut reader: R,
    path: &Path,
    declared_size: u64,
    progress: &mut ProgressLine,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut file = File::create(path).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).await?;
        written += n as u64;
        progress.update(&TransferProgress::new(written, declared_size));
    }

    file.flush().await?;
    Ok(written)
}

async fn remove_partial(path: &Path) {
    if fs::try_exists(path).await.unwrap_or(false) {
        match fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "removed partial download"),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not remove partial download")
            }
        }
    }
}
