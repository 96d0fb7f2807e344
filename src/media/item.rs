//! Post and file representation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A downloadable file attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Original file name as published; may be unsafe for the filesystem.
    pub name: String,
    /// Download URL, `{server}/data{path}`.
    pub url: String,
}

/// A post with its resolved, deduplicated file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub user: String,
    pub service: String,
    pub title: String,
    /// Public post link, derived from the server origin.
    pub link: String,
    /// 1-based page number the post was found on.
    pub page: u64,
    /// API offset of that page.
    pub offset: u64,
    pub files: Vec<FileRef>,
}

impl PostRecord {
    /// Whether the file list already contains `url`.
    pub fn has_url(&self, url: &str) -> bool {
        self.files.iter().any(|f| f.url == url)
    }

    /// Build the on-disk name for the file at `index` (0-based).
    pub fn file_name_at(&self, index: usize) -> Option<String> {
        self.files
            .get(index)
            .map(|file| crate::fs::naming::indexed_file_name(index + 1, &file.name))
    }
}

/// Order two post ids.
///
/// Purely numeric ids compare by value (at any width); anything else
/// compares lexicographically.
pub fn compare_post_ids(a: &str, b: &str) -> Ordering {
    let is_numeric = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());

    if is_numeric(a) && is_numeric(b) {
        let a = a.trim_start_matches('0');
        let b = b.trim_start_matches('0');
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_numeric_ids_by_value() {
        assert_eq!(compare_post_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_post_ids("100", "99"), Ordering::Greater);
        assert_eq!(compare_post_ids("007", "7"), Ordering::Equal);
        assert_eq!(compare_post_ids("123456789012345678901", "2"), Ordering::Greater);
    }

    #[test]
    fn test_compare_mixed_ids_lexicographically() {
        assert_eq!(compare_post_ids("abc", "abd"), Ordering::Less);
        assert_eq!(compare_post_ids("9", "a"), Ordering::Less);
    }

    #[test]
    fn test_serialized_field_names() {
        let post = PostRecord {
            id: "1".into(),
            user: "u".into(),
            service: "patreon".into(),
            title: "t".into(),
            link: "https://kemono.su/patreon/user/u/post/1".into(),
            page: 1,
            offset: 0,
            files: vec![FileRef {
                name: "a b.png".into(),
                url: "https://n1.kemono.su/data/aa/a.png".into(),
            }],
        };

        let value = serde_json::to_value(&post).unwrap();
        for key in ["id", "user", "service", "title", "link", "page", "offset", "files"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["files"][0]["name"], "a b.png");
        assert_eq!(post.file_name_at(0).as_deref(), Some("1-a_b.png"));
        assert!(post.file_name_at(1).is_none());
    }
}
