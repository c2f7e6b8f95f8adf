//! Output file handling.

use crate::error::{DocError, DocResult};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Create or truncate `path` and write `contents` to it in full.
///
/// The file handle is flushed before returning and closed when it goes out
/// of scope, on success and on error alike.
pub async fn write_report(path: &Path, contents: &str) -> DocResult<()> {
    let mut file = File::create(path)
        .await
        .map_err(|e| DocError::write(path, e))?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| DocError::write(path, e))?;
    file.flush().await.map_err(|e| DocError::write(path, e))?;

    debug!(path = %path.display(), bytes = contents.len(), "Report written");
    Ok(())
}
