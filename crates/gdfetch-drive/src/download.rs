//! Streaming body-to-file writes with progress reporting.

use futures_util::StreamExt;
use gdfetch_core::{FetchError, FetchResult};
use reqwest::Response;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::progress::ProgressThrottle;

/// Progress callback: `(bytes_downloaded, total_bytes)`. Total is 0 when the
/// host did not send a Content-Length.
pub type ProgressFn<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Stream a response body to `dest` in chunks.
///
/// Progress flows through a rate-limited callback, with one final unthrottled
/// update so the consumer always sees the completed byte count. The file
/// handle is scoped to the write loop.
pub(crate) async fn write_body(
    response: Response,
    dest: &Path,
    progress: Option<ProgressFn<'_>>,
) -> FetchResult<u64> {
    let total = response.content_length().unwrap_or(0);
    let mut file = File::create(dest).map_err(|e| FetchError::from_io_error(&e))?;
    let mut throttle = ProgressThrottle::default();
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| FetchError::network(format!("error reading download stream: {e}")))?;
        file.write_all(&chunk)
            .map_err(|e| FetchError::from_io_error(&e))?;
        downloaded += chunk.len() as u64;

        if let Some(report) = progress {
            if throttle.should_emit() {
                report(downloaded, total);
            }
        }
    }

    file.flush().map_err(|e| FetchError::from_io_error(&e))?;
    drop(file);

    if let Some(report) = progress {
        report(downloaded, total);
    }
    debug!(bytes = downloaded, path = %dest.display(), "archive written");
    Ok(downloaded)
}

/// Write an already-buffered body to `dest` in one shot.
pub(crate) fn write_bytes(body: &[u8], dest: &Path) -> FetchResult<()> {
    std::fs::write(dest, body).map_err(|e| FetchError::from_io_error(&e))
}
