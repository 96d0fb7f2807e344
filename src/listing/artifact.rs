//! Listing files and the per-site profile registry.
//!
//! A fetch run writes `posts-{first}-{last}-{date}.json` into the profile
//! folder; the download phase reads it back and stores files under
//! `posts/` next to it. Every fetched profile is also recorded in
//! `{site}/profiles.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fs::{get_profile_folder, get_site_folder};
use crate::listing::profile::ProfileListing;
use crate::media::PostRecord;

/// Name of the registry file kept in each site folder.
pub const PROFILE_REGISTRY_FILE: &str = "profiles.json";

/// The JSON document handed from the fetch phase to the download phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListing {
    /// Number of posts in `posts`.
    pub total_posts: usize,
    pub posts: Vec<PostRecord>,
}

impl PostListing {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self {
            total_posts: posts.len(),
            posts,
        }
    }

    /// Number of files across all posts.
    pub fn total_files(&self) -> usize {
        self.posts.iter().map(|p| p.files.len()).sum()
    }
}

/// Registry entry describing a fetched profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub id: String,
    pub name: String,
    pub service: String,
    pub indexed: Option<String>,
    pub updated: Option<String>,
    pub public_id: Option<String>,
    pub relation_id: Option<serde_json::Value>,
}

impl From<&ProfileListing> for ProfileEntry {
    fn from(listing: &ProfileListing) -> Self {
        let artist = listing.artist.clone().unwrap_or_default();

        Self {
            id: listing.target.user_id.clone(),
            name: listing.display_name.clone(),
            service: listing.target.service.clone(),
            indexed: artist.indexed,
            updated: artist.updated,
            public_id: artist.public_id,
            relation_id: artist.relation_id,
        }
    }
}

/// File name of a listing for the planned offsets, dated `YYYY-MM-DD`.
pub fn listing_file_name(offsets: &[u64], date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");

    match offsets {
        [] => format!("posts-0-{}.json", date),
        [only] => format!("posts-{}-{}.json", only, date),
        [first, .., last] => format!("posts-{}-{}-{}.json", first, last, date),
    }
}

/// Write a listing as pretty-printed JSON, creating parent folders.
pub async fn write_listing(path: &Path, listing: &PostListing) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(listing)?;
    tokio::fs::write(path, json).await?;

    tracing::debug!("Wrote {} posts to {}", listing.total_posts, path.display());
    Ok(())
}

/// Read a listing written by [`write_listing`].
pub async fn read_listing(path: &Path) -> Result<PostListing> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::Config(format!("Listing file not found: {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    Ok(serde_json::from_str(&content)?)
}

/// Write a fetched profile's listing into its profile folder.
///
/// Returns the path of the listing file.
pub async fn save_profile_listing(
    download_dir: &Path,
    listing: &ProfileListing,
    date: NaiveDate,
) -> Result<PathBuf> {
    let folder = get_profile_folder(download_dir, &listing.target, &listing.display_name)?;
    let path = folder.join(listing_file_name(&listing.offsets, date));

    write_listing(&path, &PostListing::new(listing.posts.clone())).await?;
    Ok(path)
}

/// Record a fetched profile in `{download_dir}/{site}/profiles.json`.
///
/// Entries for other profiles are preserved as they are.
pub async fn update_profile_registry(
    download_dir: &Path,
    listing: &ProfileListing,
) -> Result<PathBuf> {
    let site_folder = get_site_folder(download_dir, &listing.target)?;
    tokio::fs::create_dir_all(&site_folder).await?;
    let path = site_folder.join(PROFILE_REGISTRY_FILE);

    let mut profiles: BTreeMap<String, serde_json::Value> =
        if tokio::fs::try_exists(&path).await? {
            serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?
        } else {
            BTreeMap::new()
        };

    let entry = ProfileEntry::from(listing);
    profiles.insert(entry.id.clone(), serde_json::to_value(&entry)?);

    tokio::fs::write(&path, serde_json::to_string_pretty(&profiles)?).await?;
    tracing::debug!("Updated profile registry {}", path.display());

    Ok(path)
}
