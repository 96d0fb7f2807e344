//! Resolution of raw API posts into downloadable file lists.

use std::collections::HashMap;

use crate::api::types::{FileLocation, RawFile, RawPost};
use crate::listing::range::IdFilter;
use crate::media::item::{FileRef, PostRecord};

/// Page-level inputs for [`resolve_posts`].
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions<'a> {
    /// 1-based page number.
    pub page: u64,
    /// API offset of the page.
    pub offset: u64,
    /// Site origin used to derive post links.
    pub server: &'a str,
    /// Keep posts that end up without files.
    pub include_empty: bool,
    /// Only keep posts whose id passes this filter.
    pub id_filter: Option<&'a IdFilter>,
}

/// Path → server lookup built once per page.
///
/// Previews are indexed before attachments and the first entry for a path
/// wins, so previews take precedence on duplicate paths.
#[derive(Debug)]
pub struct LocationIndex<'a> {
    by_path: HashMap<&'a str, &'a str>,
}

impl<'a> LocationIndex<'a> {
    pub fn new(previews: &'a [FileLocation], attachments: &'a [FileLocation]) -> Self {
        let mut by_path = HashMap::new();

        for location in previews.iter().chain(attachments) {
            if let (Some(path), Some(server)) = (location.path.as_deref(), location.server.as_deref())
            {
                by_path.entry(path).or_insert(server);
            }
        }

        Self { by_path }
    }

    /// Download URL for a post-referenced path, if the page knows its server.
    pub fn url_for(&self, path: &str) -> Option<String> {
        self.by_path
            .get(path)
            .map(|server| format!("{}/data{}", server.trim_end_matches('/'), path))
    }
}

/// Resolve a page of raw posts into post records.
///
/// Output order follows input order. Each post's files are the primary
/// `file` followed by `attachments`, skipping unresolvable paths and URLs
/// already collected for that post.
pub fn resolve_posts(
    posts: &[RawPost],
    previews: &[FileLocation],
    attachments: &[FileLocation],
    options: &ResolveOptions<'_>,
) -> Vec<PostRecord> {
    let index = LocationIndex::new(previews, attachments);
    let server = options.server.trim_end_matches('/');

    posts
        .iter()
        .filter(|post| options.id_filter.map_or(true, |filter| filter.matches(&post.id)))
        .filter_map(|post| {
            let record = resolve_post(post, &index, server, options);

            if record.files.is_empty() && !options.include_empty {
                tracing::debug!("Skipping post {} without files", post.id);
                return None;
            }

            Some(record)
        })
        .collect()
}

fn resolve_post(
    post: &RawPost,
    index: &LocationIndex<'_>,
    server: &str,
    options: &ResolveOptions<'_>,
) -> PostRecord {
    let mut record = PostRecord {
        id: post.id.clone(),
        user: post.user.clone(),
        service: post.service.clone(),
        title: post.title.clone().unwrap_or_default(),
        link: format!(
            "{}/{}/user/{}/post/{}",
            server, post.service, post.user, post.id
        ),
        page: options.page,
        offset: options.offset,
        files: Vec::new(),
    };

    for raw in post.file.iter().chain(&post.attachments) {
        let Some(file) = resolve_file(raw, index) else {
            continue;
        };

        if !record.has_url(&file.url) {
            record.files.push(file);
        }
    }

    record
}

fn resolve_file(raw: &RawFile, index: &LocationIndex<'_>) -> Option<FileRef> {
    let path = raw.path.as_deref()?;
    let url = index.url_for(path)?;

    let name = raw
        .name
        .clone()
        .unwrap_or_else(|| path.rsplit('/').next().unwrap_or(path).to_string());

    Some(FileRef { name, url })
}
