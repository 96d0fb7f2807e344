//! Configuration structures and loading logic.

use crate::config::modes::{RunMode, SortOrder};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Profiles to process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Profile URLs, e.g. `https://kemono.su/patreon/user/12345`.
    #[serde(default)]
    pub profile_urls: Vec<String>,
}

/// Outbound proxy settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy address, with or without scheme (`host:port`).
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// The proxy URL with a scheme, or `None` when no proxy is configured.
    pub fn endpoint(&self) -> Option<String> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        if url.contains("://") {
            Some(url.to_string())
        } else {
            Some(format!("http://{}", url))
        }
    }

    /// Username and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// What to do with the configured profiles.
    #[serde(default)]
    pub mode: RunMode,

    /// Range expression: `all`, an offset, a post id, `start-end` or `id1-id2`.
    #[serde(default = "default_range")]
    pub range: String,

    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Location of the processed-posts ledger.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Listing JSON consumed by the `download` mode.
    #[serde(default)]
    pub listing_path: Option<PathBuf>,

    /// Keep posts that resolve to zero files.
    #[serde(default)]
    pub include_empty_posts: bool,

    /// Download older posts first.
    #[serde(default)]
    pub process_from_oldest: bool,

    /// Verify TLS certificates.
    #[serde(default = "default_true")]
    pub verify_ssl: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Whether to report posts skipped because of the ledger.
    #[serde(default = "default_true")]
    pub show_skipped_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            range: default_range(),
            download_directory: None,
            ledger_path: default_ledger_path(),
            listing_path: None,
            include_empty_posts: false,
            process_from_oldest: false,
            verify_ssl: true,
            show_downloads: true,
            show_skipped_downloads: true,
        }
    }
}

fn default_range() -> String {
    "all".to_string()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("downloaded.db")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Post processing order derived from `process_from_oldest`.
    pub fn sort_order(&self) -> SortOrder {
        if self.options.process_from_oldest {
            SortOrder::OldestFirst
        } else {
            SortOrder::NewestFirst
        }
    }
}
