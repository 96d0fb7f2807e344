//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::{DownloadState, GlobalState};

/// Print statistics for a single profile.
pub fn print_profile_stats(state: &DownloadState) {
    let profile_name = state.profile_name.as_deref().unwrap_or("unknown");

    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", profile_name)).bold()
    );
    println!("  Posts:    {} complete", state.posts_complete);
    if state.posts_partial > 0 {
        println!("            {} partial", style(state.posts_partial).yellow());
    }
    println!("  Skipped:  {} (already downloaded)", state.posts_skipped);
    println!(
        "  Files:    {} downloaded ({})",
        state.files_downloaded,
        HumanBytes(state.bytes_downloaded)
    );
    if state.files_failed > 0 {
        println!("  Failed:   {}", style(state.files_failed).red());
    }

    for outcome in state.outcomes.iter().filter(|o| !o.is_complete()) {
        println!(
            "  Post {}: {}/{} files on disk",
            outcome.post_id, outcome.files_on_disk, outcome.expected_files
        );
    }
}

/// Print global statistics across all profiles.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Profiles processed: {}", state.profiles_processed);
    if state.profiles_failed > 0 {
        println!(
            "  Profiles failed:    {}",
            style(state.profiles_failed).red()
        );
    }
    println!(
        "  Posts:    {} complete, {} partial, {} skipped",
        state.posts_complete, state.posts_partial, state.posts_skipped
    );
    println!(
        "  Files:    {} downloaded, {} failed",
        state.files_downloaded, state.files_failed
    );
    println!("  Total:    {}", HumanBytes(state.bytes_downloaded));
    println!("{}", style("═".repeat(50)).dim());
}

/// Print a one-line summary of a fetched listing.
pub fn print_listing_summary(name: &str, posts: usize, files: usize) {
    println!(
        "{}: {} posts, {} files",
        style(name).bold(),
        style(posts).green(),
        style(files).green()
    );
}
