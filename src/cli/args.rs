//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{parse_post_ref, Config, RunMode};
use crate::error::Result;

/// Kemono / Coomer profile downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "kemono-downloader",
    version,
    about = "Download the posts of kemono.su and coomer.su profiles",
    long_about = "A CLI tool to list the posts of kemono.su and coomer.su creator profiles \
                  and download their files.\n\n\
                  Posts that were already downloaded are recorded in a ledger and skipped \
                  on later runs."
)]
pub struct Args {
    /// Profile URL(s), e.g. https://kemono.su/patreon/user/12345.
    /// Can be repeated.
    #[arg(short, long = "profile", num_args = 1..)]
    pub profiles: Option<Vec<String>>,

    /// Range expression: all, an offset, a post id, start-end, 100-end or id1-id2.
    #[arg(short, long, conflicts_with_all = ["page", "first_post", "last_post"])]
    pub range: Option<String>,

    /// Fetch the single page at this offset.
    #[arg(long, conflicts_with_all = ["first_post", "last_post"])]
    pub page: Option<u64>,

    /// First post of an id range (post link or id).
    #[arg(long)]
    pub first_post: Option<String>,

    /// Last post of an id range (post link or id).
    #[arg(long)]
    pub last_post: Option<String>,

    /// Run mode.
    #[arg(long, value_enum)]
    pub mode: Option<RunModeArg>,

    /// Listing JSON to download from (requires --mode download).
    #[arg(long)]
    pub listing: Option<PathBuf>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path of the processed-posts ledger.
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Proxy address (host:port or URL).
    #[arg(long, env = "KEMONO_PROXY")]
    pub proxy: Option<String>,

    /// Proxy username.
    #[arg(long, env = "KEMONO_PROXY_USER")]
    pub proxy_user: Option<String>,

    /// Proxy password.
    #[arg(long, env = "KEMONO_PROXY_PASSWORD", hide_env_values = true)]
    pub proxy_password: Option<String>,

    /// Keep posts without any files in the listing.
    #[arg(long)]
    pub include_empty: bool,

    /// Download older posts first.
    #[arg(long)]
    pub oldest_first: bool,

    /// Do not verify TLS certificates.
    #[arg(long)]
    pub insecure: bool,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Show information about skipped posts.
    #[arg(long)]
    pub show_skipped: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI run mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RunModeArg {
    /// Fetch the listing, then download it.
    Full,
    /// Only fetch the listing and write it to disk.
    Fetch,
    /// Download from a listing written earlier.
    Download,
    /// Forget every post recorded in the ledger.
    ResetLedger,
}

impl From<RunModeArg> for RunMode {
    fn from(arg: RunModeArg) -> Self {
        match arg {
            RunModeArg::Full => RunMode::Full,
            RunModeArg::Fetch => RunMode::Fetch,
            RunModeArg::Download => RunMode::Download,
            RunModeArg::ResetLedger => RunMode::ResetLedger,
        }
    }
}

impl Args {
    /// The range expression implied by `--range`, `--page` or the post bounds.
    pub fn range_expression(&self) -> Result<Option<String>> {
        if let Some(range) = &self.range {
            return Ok(Some(range.clone()));
        }

        if let Some(offset) = self.page {
            return Ok(Some(offset.to_string()));
        }

        let first = self.first_post.as_deref().map(parse_post_ref).transpose()?;
        let last = self.last_post.as_deref().map(parse_post_ref).transpose()?;

        Ok(match (first, last) {
            (Some(first), Some(last)) => Some(format!("{}-{}", first, last)),
            (Some(id), None) | (None, Some(id)) => Some(id),
            (None, None) => None,
        })
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) -> Result<()> {
        if let Some(range) = self.range_expression()? {
            config.options.range = range;
        }

        // Override profiles if provided
        if let Some(profiles) = self.profiles {
            config.target.profile_urls = profiles;
        }

        if let Some(mode) = self.mode {
            config.options.mode = mode.into();
        }

        if let Some(listing) = self.listing {
            config.options.listing_path = Some(listing);
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(ledger) = self.ledger {
            config.options.ledger_path = ledger;
        }

        // Override proxy settings if provided
        if let Some(proxy) = self.proxy {
            config.proxy.url = Some(proxy);
        }

        if let Some(user) = self.proxy_user {
            config.proxy.username = Some(user);
        }

        if let Some(password) = self.proxy_password {
            config.proxy.password = Some(password);
        }

        // Boolean flags (only override if set to non-default)
        if self.include_empty {
            config.options.include_empty_posts = true;
        }

        if self.oldest_first {
            config.options.process_from_oldest = true;
        }

        if self.insecure {
            config.options.verify_ssl = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }

        if self.show_skipped {
            config.options.show_skipped_downloads = true;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("kemono-downloader").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_profiles_and_range_override_config() {
        let mut config = Config::default();
        parse(&[
            "-p",
            "https://kemono.su/patreon/user/1",
            "https://coomer.su/onlyfans/user/x",
            "-r",
            "0-100",
        ])
        .merge_into_config(&mut config)
        .unwrap();

        assert_eq!(config.target.profile_urls.len(), 2);
        assert_eq!(config.options.range, "0-100");
    }

    #[test]
    fn test_page_becomes_offset_range() {
        let mut config = Config::default();
        parse(&["--page", "150"]).merge_into_config(&mut config).unwrap();
        assert_eq!(config.options.range, "150");
    }

    #[test]
    fn test_post_bounds_become_id_range() {
        let args = parse(&[
            "--first-post",
            "https://kemono.su/patreon/user/1/post/1000001",
            "--last-post",
            "1000050",
        ]);
        assert_eq!(
            args.range_expression().unwrap().as_deref(),
            Some("1000001-1000050")
        );

        let single = parse(&["--last-post", "1000050"]);
        assert_eq!(single.range_expression().unwrap().as_deref(), Some("1000050"));
    }

    #[test]
    fn test_range_conflicts_with_page() {
        let result = Args::try_parse_from(["kemono-downloader", "--range", "all", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags() {
        let mut config = Config::default();
        parse(&["--mode", "reset-ledger", "--insecure", "--oldest-first", "--quiet"])
            .merge_into_config(&mut config)
            .unwrap();

        assert_eq!(config.options.mode, RunMode::ResetLedger);
        assert!(!config.options.verify_ssl);
        assert!(config.options.process_from_oldest);
        assert!(!config.options.show_downloads);
        assert!(!config.options.show_skipped_downloads);
        assert_eq!(config.options.range, "all");
    }
}
