//! Download module for post files.
//!
//! This module provides:
//! - Download state tracking
//! - Retried, size-checked file downloads
//! - Ledger-aware post orchestration

pub mod media;
pub mod posts;
pub mod state;

pub use media::download_with_retry;
pub use posts::{
    download_post, download_posts, sort_posts, DownloadOptions, DownloadPolicy, FILE_CONCURRENCY,
    MAX_ATTEMPTS, POST_DELAY, RETRY_DELAY,
};
pub use state::{DownloadState, GlobalState, PostOutcome};
