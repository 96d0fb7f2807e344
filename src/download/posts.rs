//! Post download orchestration.

use std::path::Path;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use indicatif::MultiProgress;
use tokio::time::sleep;

use crate::api::KemonoApi;
use crate::config::{Config, SortOrder};
use crate::download::media::download_with_retry;
use crate::download::state::{DownloadState, PostOutcome};
use crate::error::Result;
use crate::fs::{count_files, get_post_folder, indexed_file_name};
use crate::ledger::Ledger;
use crate::media::{compare_post_ids, PostRecord};

/// Attempts per file.
pub const MAX_ATTEMPTS: u32 = 5;

/// Pause between attempts of one file.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Pause after each downloaded post.
pub const POST_DELAY: Duration = Duration::from_secs(2);

/// Files of one post downloaded at the same time.
pub const FILE_CONCURRENCY: usize = 3;

/// Retry, pacing and concurrency limits.
#[derive(Debug, Clone)]
pub struct DownloadPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub post_delay: Duration,
    pub concurrency: usize,
}

impl Default for DownloadPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
            post_delay: POST_DELAY,
            concurrency: FILE_CONCURRENCY,
        }
    }
}

impl DownloadPolicy {
    /// Same limits with every delay set to zero.
    pub fn without_delays(self) -> Self {
        Self {
            retry_delay: Duration::ZERO,
            post_delay: Duration::ZERO,
            ..self
        }
    }
}

/// Options for [`download_posts`].
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub order: SortOrder,
    /// Render byte progress bars.
    pub show_progress: bool,
    /// Log ledger hits at info level instead of debug.
    pub show_skipped: bool,
    pub policy: DownloadPolicy,
}

impl DownloadOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            order: config.sort_order(),
            show_progress: config.options.show_downloads,
            show_skipped: config.options.show_skipped_downloads,
            policy: DownloadPolicy::default(),
        }
    }
}

/// Sort posts by id, numerically when possible.
pub fn sort_posts(posts: &mut [&PostRecord], order: SortOrder) {
    match order {
        SortOrder::OldestFirst => posts.sort_by(|a, b| compare_post_ids(&a.id, &b.id)),
        SortOrder::NewestFirst => posts.sort_by(|a, b| compare_post_ids(&b.id, &a.id)),
    }
}

/// Download every post not yet in the ledger into `dest_root/posts/{id}/`.
///
/// Posts are processed one at a time; the files of a post are downloaded
/// concurrently. A post is written to the ledger once all of its files have
/// been attempted, whether or not they all succeeded. Ledger errors are
/// returned; file failures are only recorded in the state.
pub async fn download_posts(
    api: &KemonoApi,
    ledger: &dyn Ledger,
    posts: &[PostRecord],
    dest_root: &Path,
    options: &DownloadOptions,
) -> Result<DownloadState> {
    let mut ordered: Vec<&PostRecord> = posts.iter().collect();
    sort_posts(&mut ordered, options.order);

    let multi = options.show_progress.then(MultiProgress::new);
    let mut state = DownloadState::default();
    let total = ordered.len();

    tracing::info!(
        "Downloading {} posts to {} ({})",
        total,
        dest_root.display(),
        options.order
    );

    for (index, post) in ordered.into_iter().enumerate() {
        if ledger.has(&post.id).await? {
            if options.show_skipped {
                tracing::info!("Post {} already downloaded, skipping", post.id);
            } else {
                tracing::debug!("Post {} already downloaded, skipping", post.id);
            }
            state.record_skipped();
            continue;
        }

        tracing::info!(
            "[{}/{}] Post {} ({} files)",
            index + 1,
            total,
            post.id,
            post.files.len()
        );

        let outcome = download_post(api, post, dest_root, options, multi.as_ref()).await?;

        if outcome.is_complete() {
            tracing::info!(
                "Post {} downloaded ({}/{} files)",
                post.id,
                outcome.files_on_disk,
                outcome.expected_files
            );
        } else {
            tracing::warn!(
                "Post {} partially downloaded: {}/{} files",
                post.id,
                outcome.downloaded_files,
                outcome.expected_files
            );
        }

        ledger.mark_processed(&post.id).await?;
        state.record_post(outcome);

        if index + 1 < total && !options.policy.post_delay.is_zero() {
            sleep(options.policy.post_delay).await;
        }
    }

    Ok(state)
}

/// Download the files of one post and report what happened to each.
pub async fn download_post(
    api: &KemonoApi,
    post: &PostRecord,
    dest_root: &Path,
    options: &DownloadOptions,
    progress: Option<&MultiProgress>,
) -> Result<PostOutcome> {
    let folder = get_post_folder(dest_root, &post.id)?;
    tokio::fs::create_dir_all(&folder).await?;

    let jobs = post.files.iter().enumerate().map(|(i, file)| {
        let path = folder.join(indexed_file_name(i + 1, &file.name));
        async move {
            let result = download_with_retry(api, &file.url, &path, &options.policy, progress).await;
            (file, result)
        }
    });

    let results: Vec<_> = stream::iter(jobs)
        .buffer_unordered(options.policy.concurrency.max(1))
        .collect()
        .await;

    let mut outcome = PostOutcome {
        post_id: post.id.clone(),
        expected_files: post.files.len(),
        downloaded_files: 0,
        failed_urls: Vec::new(),
        bytes: 0,
        files_on_disk: 0,
    };

    for (file, result) in results {
        match result {
            Ok(bytes) => {
                outcome.downloaded_files += 1;
                outcome.bytes += bytes;
            }
            Err(e) => {
                tracing::debug!("Post {}: {}", post.id, e);
                outcome.failed_urls.push(file.url.clone());
            }
        }
    }

    outcome.files_on_disk = files_on_disk(&folder).await;

    Ok(outcome)
}

/// Files found in a post folder; a failed scan is logged and counts as 0.
async fn files_on_disk(folder: &Path) -> usize {
    match count_files(folder).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Could not count files in {}: {}", folder.display(), e);
            0
        }
    }
}
