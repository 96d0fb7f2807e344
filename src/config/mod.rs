//! Configuration module for the kemono-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Run modes and processing order
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, OptionsConfig, ProxyConfig, TargetConfig};
pub use modes::{RunMode, SortOrder};
pub use validation::{parse_post_ref, validate_config};
