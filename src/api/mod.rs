//! Kemono/Coomer API module.
//!
//! This module provides:
//! - HTTP client for the `posts-legacy` listing API and file downloads
//! - Supported-site validation and profile URL parsing
//! - API response types

pub mod client;
pub mod site;
pub mod types;

pub use client::{KemonoApi, PAGE_SIZE};
pub use site::{ProfileTarget, SUPPORTED_HOSTS};
pub use types::*;
