//! File downloading with retry and size verification.

use std::path::Path;

use futures::StreamExt;
use indicatif::{MultiProgress, ProgressBar};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

use crate::api::KemonoApi;
use crate::download::posts::DownloadPolicy;
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Download `url` to `dest`, retrying failed attempts.
///
/// Each attempt starts from scratch. On success returns the number of bytes
/// written. When every attempt fails the partial file is removed and
/// [`Error::FileDownload`] is returned.
pub async fn download_with_retry(
    api: &KemonoApi,
    url: &str,
    dest: &Path,
    policy: &DownloadPolicy,
    progress: Option<&MultiProgress>,
) -> Result<u64> {
    for attempt in 1..=policy.max_attempts {
        tracing::debug!("Attempt {}/{} for {}", attempt, policy.max_attempts, url);

        match download_once(api, url, dest, progress).await {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} ({} bytes)", dest.display(), bytes);
                return Ok(bytes);
            }
            Err(e) => {
                tracing::warn!(
                    "Attempt {}/{} failed for {}: {}",
                    attempt,
                    policy.max_attempts,
                    url,
                    e
                );
                if attempt < policy.max_attempts {
                    sleep(policy.retry_delay).await;
                }
            }
        }
    }

    remove_partial(dest).await;
    tracing::error!(
        "Giving up on {} after {} attempts",
        url,
        policy.max_attempts
    );

    Err(Error::FileDownload {
        url: url.to_string(),
        attempts: policy.max_attempts,
    })
}

/// One streaming attempt.
///
/// A body cut short of its Content-Length fails while streaming as
/// [`Error::Network`]; [`Error::SizeMismatch`] only fires for a body longer
/// than declared. An absent header accepts any size.
async fn download_once(
    api: &KemonoApi,
    url: &str,
    dest: &Path,
    progress: Option<&MultiProgress>,
) -> Result<u64> {
    let response = api.download_file(url).await?;
    let expected = response.content_length().unwrap_or(0);

    let bar = progress.map(|multi| {
        let bar = multi.add(create_download_bar(expected));
        if let Some(name) = dest.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
        bar
    });

    let result = stream_to_file(response, dest, bar.as_ref()).await;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let written = result?;
    if expected > 0 && written != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: written,
        });
    }

    Ok(written)
}

async fn stream_to_file(
    response: reqwest::Response,
    dest: &Path,
    bar: Option<&ProgressBar>,
) -> Result<u64> {
    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;

        if let Some(bar) = bar {
            bar.set_position(written);
        }
    }

    file.flush().await?;
    Ok(written)
}

async fn remove_partial(dest: &Path) {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => tracing::debug!("Removed partial file {}", dest.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove partial file {}: {}", dest.display(), e),
    }
}
