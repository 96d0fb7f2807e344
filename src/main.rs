//! Kemono Downloader - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kemono_downloader::{
    api::KemonoApi,
    cli::Args,
    config::{validate_config, Config, RunMode},
    download::{download_posts, DownloadOptions, DownloadState, GlobalState},
    error::{exit_codes, Error, Result},
    ledger::{Ledger, SqliteLedger},
    listing::{fetch_profile, read_listing, save_profile_listing, update_profile_registry},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_global_stats,
        print_info, print_listing_summary, print_profile_stats, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(global_state) if global_state.profiles_failed > 0 => {
            ExitCode::from(exit_codes::SOME_PROFILES_FAILED as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(e: &Error) -> i32 {
    match e {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::MissingConfig(_)
        | Error::UnsupportedDomain(_)
        | Error::InvalidRangeExpression(_)
        | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
        Error::Network(_) | Error::HttpStatus { .. } | Error::Decode(_) => exit_codes::API_ERROR,
        Error::SizeMismatch { .. } | Error::FileDownload { .. } => exit_codes::DOWNLOAD_ERROR,
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<GlobalState> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config)?;

    validate_config(&config)?;

    print_config_summary(
        &config.target.profile_urls,
        &config.options.mode.to_string(),
        &config.options.range,
        &config.download_directory().display().to_string(),
    );

    match config.options.mode {
        RunMode::ResetLedger => {
            reset_ledger(&config).await?;
            Ok(GlobalState::default())
        }
        RunMode::Download => download_listing(&config).await,
        RunMode::Full | RunMode::Fetch => process_profiles(&config).await,
    }
}

/// Forget every processed post.
async fn reset_ledger(config: &Config) -> Result<()> {
    let ledger = SqliteLedger::open(&config.options.ledger_path).await?;
    ledger.reset().await?;
    print_success(&format!(
        "Ledger {} cleared",
        config.options.ledger_path.display()
    ));
    Ok(())
}

/// Download the posts of a listing written by an earlier fetch.
async fn download_listing(config: &Config) -> Result<GlobalState> {
    let listing_path = config
        .options
        .listing_path
        .as_deref()
        .ok_or_else(|| Error::MissingConfig("listing_path".to_string()))?;

    let listing = read_listing(listing_path).await?;
    print_listing_summary(
        &listing_path.display().to_string(),
        listing.total_posts,
        listing.total_files(),
    );

    let api = KemonoApi::new(config)?;
    let ledger = SqliteLedger::open(&config.options.ledger_path).await?;
    let dest_root = listing_root(listing_path);

    let mut state = download_posts(
        &api,
        &ledger,
        &listing.posts,
        &dest_root,
        &DownloadOptions::from_config(config),
    )
    .await?;
    state.profile_name = Some(listing_path.display().to_string());

    print_profile_stats(&state);

    let mut global_state = GlobalState::default();
    global_state.add_profile_stats(&state);
    print_global_stats(&global_state);

    Ok(global_state)
}

/// Fetch, and in full mode download, every configured profile.
async fn process_profiles(config: &Config) -> Result<GlobalState> {
    let api = KemonoApi::new(config)?;

    let ledger = match config.options.mode {
        RunMode::Full => Some(SqliteLedger::open(&config.options.ledger_path).await?),
        _ => None,
    };

    let mut global_state = GlobalState::default();

    for profile_url in &config.target.profile_urls {
        print_info(&format!("Processing profile: {}", profile_url));

        match process_profile(&api, config, ledger.as_ref(), profile_url).await {
            Ok(Some(state)) => {
                print_profile_stats(&state);
                global_state.add_profile_stats(&state);
            }
            Ok(None) => global_state.profiles_processed += 1,
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", profile_url, e));
                global_state.mark_profile_failed();
            }
        }
    }

    print_global_stats(&global_state);

    Ok(global_state)
}

/// Fetch one profile, write its listing, then download it when a ledger is given.
async fn process_profile(
    api: &KemonoApi,
    config: &Config,
    ledger: Option<&SqliteLedger>,
    profile_url: &str,
) -> Result<Option<DownloadState>> {
    let spinner = config
        .options
        .show_downloads
        .then(|| create_spinner("Fetching post listing..."));

    let fetched = fetch_profile(
        api,
        profile_url,
        &config.options.range,
        config.options.include_empty_posts,
    )
    .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let profile = fetched?;

    let download_dir = config.download_directory();
    update_profile_registry(&download_dir, &profile).await?;

    let today = chrono::Local::now().date_naive();
    let listing_path = save_profile_listing(&download_dir, &profile, today).await?;

    let file_count = profile.posts.iter().map(|p| p.files.len()).sum();
    print_listing_summary(&profile.display_name, profile.posts.len(), file_count);
    print_info(&format!("Listing written to {}", listing_path.display()));

    let Some(ledger) = ledger else {
        return Ok(None);
    };

    let mut state = download_posts(
        api,
        ledger,
        &profile.posts,
        &listing_root(&listing_path),
        &DownloadOptions::from_config(config),
    )
    .await?;
    state.profile_name = Some(profile.display_name.clone());

    Ok(Some(state))
}

/// Folder next to a listing file, where its `posts/` tree lives.
fn listing_root(listing_path: &Path) -> PathBuf {
    listing_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
