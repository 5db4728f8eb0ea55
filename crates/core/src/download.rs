//! Streaming file downloads.

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::error::{HahowError, Result};
use crate::progress::ProgressEvent;

/// Stream `url` to `dest` chunk by chunk; the body is never buffered
/// whole, so multi-gigabyte videos stay within a fixed memory budget.
///
/// On a non-2xx status nothing is written; on a mid-stream failure the
/// partial file is left on disk for the caller to inspect or ignore.
pub async fn fetch_to_file(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
    id: usize,
    events: &mpsc::Sender<ProgressEvent>,
) -> Result<()> {
    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(HahowError::RemoteStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let total_bytes = response.content_length().unwrap_or(0);
    let file_name = dest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());
    let _ = events
        .send(ProgressEvent::DownloadStarted {
            id,
            file: file_name,
            total_bytes,
        })
        .await;

    let mut stream = response.bytes_stream();
    let mut file = File::create(dest).await?;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        let _ = events
            .send(ProgressEvent::Chunk {
                id,
                bytes: chunk.len() as u64,
            })
            .await;
    }
    file.flush().await?;

    let _ = events.send(ProgressEvent::DownloadDone { id }).await;
    Ok(())
}
