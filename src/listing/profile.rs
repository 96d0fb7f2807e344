//! Profile listing: walks the pages of a profile and collects its posts.

use std::cmp::Ordering;

use crate::api::{ArtistInfo, KemonoApi, PostsPage, ProfileTarget, PAGE_SIZE};
use crate::error::Result;
use crate::listing::range::{all_offsets, resolve, FetchRange, IdFilter};
use crate::media::{compare_post_ids, resolve_posts, PostRecord, ResolveOptions};

/// Everything collected for one profile.
#[derive(Debug, Clone)]
pub struct ProfileListing {
    pub target: ProfileTarget,
    /// Creator display name, from the first page.
    pub display_name: String,
    /// Total number of posts reported by the API.
    pub total_count: u64,
    /// Offsets that were planned, in fetch order.
    pub offsets: Vec<u64>,
    pub artist: Option<ArtistInfo>,
    pub posts: Vec<PostRecord>,
}

/// Parse a profile URL and fetch its posts for a range expression.
///
/// The host is validated before any request is made.
pub async fn fetch_profile(
    api: &KemonoApi,
    profile_url: &str,
    range_expr: &str,
    include_empty: bool,
) -> Result<ProfileListing> {
    let target = ProfileTarget::parse(profile_url)?;
    fetch_target(api, &target, range_expr, include_empty).await
}

/// Fetch the posts of an already parsed profile.
///
/// Pages are fetched sequentially in ascending offset order. Any API error
/// aborts the listing. Nothing is written to disk.
pub async fn fetch_target(
    api: &KemonoApi,
    target: &ProfileTarget,
    range_expr: &str,
    include_empty: bool,
) -> Result<ProfileListing> {
    let first = api
        .fetch_page(&target.server, &target.service, &target.user_id, 0)
        .await?;

    let display_name = first.props.name.clone();
    let total_count = first.props.count;
    let artist = first.props.artist.clone();

    tracing::info!(
        "Profile {} ({}/{}): {} posts",
        display_name,
        target.service,
        target.user_id,
        total_count
    );

    let (offsets, id_filter) = plan_offsets(resolve(range_expr, total_count)?, total_count);

    if let Some(filter) = &id_filter {
        tracing::info!("Scanning all pages for posts matching {:?}", filter);
    }

    let mut first_page = Some(first);
    let mut posts: Vec<PostRecord> = Vec::new();

    for &offset in &offsets {
        let page: PostsPage = match (offset, first_page.take()) {
            (0, Some(page)) => page,
            _ => {
                api.fetch_page(&target.server, &target.service, &target.user_id, offset)
                    .await?
            }
        };

        let previews = page.previews();
        let attachments = page.attachments();
        let options = ResolveOptions {
            page: offset / PAGE_SIZE + 1,
            offset,
            server: &target.server,
            include_empty,
            id_filter: id_filter.as_ref(),
        };

        let records = resolve_posts(&page.results, &previews, &attachments, &options);
        tracing::info!(
            "Page {} (offset {}): {} of {} posts kept",
            options.page,
            offset,
            records.len(),
            page.results.len()
        );
        posts.extend(records);

        if let Some(filter) = &id_filter {
            if all_endpoints_seen(filter, &posts) {
                tracing::info!("Found every requested post id, stopping at offset {}", offset);
                break;
            }
        }
    }

    Ok(ProfileListing {
        target: target.clone(),
        display_name,
        total_count,
        offsets,
        artist,
        posts,
    })
}

/// Offsets to fetch for resolved ranges, plus the id filter if any.
///
/// An id filter always means scanning every page from offset 0.
fn plan_offsets(ranges: Vec<FetchRange>, total_count: u64) -> (Vec<u64>, Option<IdFilter>) {
    let mut offsets = Vec::new();
    let mut id_filter = None;

    for range in ranges {
        match range {
            FetchRange::Offset(offset) => offsets.push(offset),
            FetchRange::Ids(filter) => id_filter = Some(filter),
        }
    }

    if id_filter.is_some() {
        offsets = all_offsets(total_count);
    }

    (offsets, id_filter)
}

fn all_endpoints_seen(filter: &IdFilter, posts: &[PostRecord]) -> bool {
    filter.endpoints().iter().all(|wanted| {
        posts
            .iter()
            .any(|post| compare_post_ids(&post.id, wanted) == Ordering::Equal)
    })
}
