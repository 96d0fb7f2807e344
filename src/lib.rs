//! Kemono Downloader - profile post downloader for kemono.su and coomer.su
//!
//! This library lists the posts of a creator profile through the
//! `posts-legacy` API and downloads their files exactly once.
//!
//! # Features
//!
//! - Range expressions over page offsets or post ids
//! - Per-page resolution of post files against preview and attachment servers
//! - Concurrent, retried, size-checked file downloads
//! - SQLite ledger of processed posts, so repeated runs skip finished work
//! - JSON listing files and a per-site profile registry
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use kemono_downloader::{
//!     download_posts, fetch_profile, Config, DownloadOptions, KemonoApi, SqliteLedger,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = KemonoApi::new(&config)?;
//!
//!     let listing =
//!         fetch_profile(&api, "https://kemono.su/patreon/user/12345", "0-100", false).await?;
//!
//!     let ledger = SqliteLedger::open(Path::new("downloaded.db")).await?;
//!     let state = download_posts(
//!         &api,
//!         &ledger,
//!         &listing.posts,
//!         Path::new("downloads"),
//!         &DownloadOptions::from_config(&config),
//!     )
//!     .await?;
//!
//!     println!("{} posts downloaded", state.posts_processed());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod ledger;
pub mod listing;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{KemonoApi, ProfileTarget};
pub use config::{Config, RunMode, SortOrder};
pub use download::{
    download_posts, DownloadOptions, DownloadPolicy, DownloadState, GlobalState, PostOutcome,
};
pub use error::{Error, Result};
pub use ledger::{Ledger, MemoryLedger, SqliteLedger};
pub use listing::{fetch_profile, fetch_target, resolve, FetchRange, IdFilter, ProfileListing};
pub use media::{FileRef, PostRecord};
