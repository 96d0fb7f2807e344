//! API response type definitions.

use serde::{Deserialize, Serialize};

/// One page of `posts-legacy` results.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub props: ProfileProps,
    #[serde(default)]
    pub results: Vec<RawPost>,
    /// Preview locations, grouped per result.
    #[serde(default)]
    pub result_previews: Vec<Vec<FileLocation>>,
    /// Attachment locations, grouped per result.
    #[serde(default)]
    pub result_attachments: Vec<Vec<FileLocation>>,
}

impl PostsPage {
    /// Previews flattened across all results of the page.
    pub fn previews(&self) -> Vec<FileLocation> {
        self.result_previews.iter().flatten().cloned().collect()
    }

    /// Attachment locations flattened across all results of the page.
    pub fn attachments(&self) -> Vec<FileLocation> {
        self.result_attachments.iter().flatten().cloned().collect()
    }
}

/// Profile-level properties returned with every page.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileProps {
    /// Display name of the creator.
    pub name: String,
    /// Total number of posts on the profile.
    pub count: u64,
    #[serde(default)]
    pub artist: Option<ArtistInfo>,
}

/// Creator metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistInfo {
    #[serde(default)]
    pub indexed: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub relation_id: Option<serde_json::Value>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub user: String,
    pub service: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Primary file; the API sends `{}` when there is none.
    #[serde(default)]
    pub file: Option<RawFile>,
    #[serde(default)]
    pub attachments: Vec<RawFile>,
}

/// A file reference inside a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Where a file path is served from.
///
/// Embed previews carry neither field and are ignored during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileLocation {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page() {
        let body = r#"{
            "props": {"name": "Artist", "count": 2, "artist": {"indexed": "2024-01-01", "relation_id": null}},
            "results": [
                {"id": "1", "user": "u", "service": "patreon", "title": "One",
                 "file": {"name": "a.png", "path": "/aa/a.png"}, "attachments": []},
                {"id": "2", "user": "u", "service": "patreon", "title": null,
                 "file": {}, "attachments": [{"name": "b.zip", "path": "/bb/b.zip"}]}
            ],
            "result_previews": [[{"type": "thumbnail", "server": "https://n1.kemono.su", "name": "a.png", "path": "/aa/a.png"}],
                                [{"type": "embed", "url": "https://youtu.be/x", "subject": "x"}]],
            "result_attachments": [[], [{"server": "https://n2.kemono.su", "name": "b.zip", "path": "/bb/b.zip"}]]
        }"#;

        let page: PostsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.props.name, "Artist");
        assert_eq!(page.props.count, 2);
        assert_eq!(page.results.len(), 2);
        assert!(page.results[1].title.is_none());
        assert!(page.results[1].file.as_ref().unwrap().path.is_none());
        assert_eq!(page.previews().len(), 2);
        assert_eq!(page.attachments().len(), 1);
        assert!(page.previews()[1].server.is_none());
    }

    #[test]
    fn test_missing_location_tables_default_to_empty() {
        let body = r#"{"props": {"name": "A", "count": 0}, "results": []}"#;
        let page: PostsPage = serde_json::from_str(body).unwrap();
        assert!(page.previews().is_empty());
        assert!(page.attachments().is_empty());
        assert!(page.props.artist.is_none());
    }
}
