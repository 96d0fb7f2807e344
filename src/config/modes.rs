//! Run mode and processing order definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Available run modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Fetch the listing, write it to disk, then download (default).
    #[default]
    Full,
    /// Only fetch the listing and write the JSON artifact.
    Fetch,
    /// Download posts from a previously written listing.
    Download,
    /// Forget every post recorded in the ledger.
    ResetLedger,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Full => write!(f, "full"),
            RunMode::Fetch => write!(f, "fetch"),
            RunMode::Download => write!(f, "download"),
            RunMode::ResetLedger => write!(f, "reset-ledger"),
        }
    }
}

/// Order in which posts are handed to the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending post id.
    OldestFirst,
    /// Descending post id.
    #[default]
    NewestFirst,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::OldestFirst => write!(f, "oldest first"),
            SortOrder::NewestFirst => write!(f, "newest first"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_display_matches_config_names() {
        assert_eq!(RunMode::Full.to_string(), "full");
        assert_eq!(RunMode::ResetLedger.to_string(), "reset-ledger");
        assert_eq!(
            serde_json::to_value(RunMode::ResetLedger).unwrap(),
            serde_json::json!("reset-ledger")
        );
    }
}
