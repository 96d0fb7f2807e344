//! Filename generation and manipulation.

use crate::error::{Error, Result};

/// Make a published file name safe to write.
///
/// Characters that are illegal in paths on common filesystems are dropped
/// and spaces become underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | '"' | '<' | '>' | '|' | ':'))
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// On-disk name of a post's file: `{index}-{sanitized name}` with a 1-based index.
pub fn indexed_file_name(index: usize, name: &str) -> String {
    format!("{}-{}", index, sanitize_filename(name))
}

/// Sanitize a path component (folder name) by replacing rather than dropping
/// problematic characters.
///
/// Used for creator names, services and ids taken from remote data.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Sanitize problematic characters (replace with underscore)
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    if trimmed == "." || trimmed == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_illegal_characters() {
        assert_eq!(sanitize_filename("normal.txt"), "normal.txt");
        assert_eq!(sanitize_filename("a/b\\c*d?e\"f<g>h|i.png"), "abcdefghi.png");
        assert_eq!(sanitize_filename("file:name.txt"), "filename.txt");
        assert_eq!(sanitize_filename("tab\there.txt"), "tabhere.txt");
    }

    #[test]
    fn test_sanitize_filename_replaces_spaces() {
        assert_eq!(sanitize_filename("my cool file.jpg"), "my_cool_file.jpg");
    }

    #[test]
    fn test_sanitize_filename_cannot_escape_directory() {
        let name = sanitize_filename("../../etc/passwd");
        assert!(!name.contains('/'));
        assert_eq!(indexed_file_name(3, "../../etc/passwd"), "3-....etcpasswd");
    }

    #[test]
    fn test_indexed_file_name() {
        assert_eq!(indexed_file_name(1, "cover image.png"), "1-cover_image.png");
        assert_eq!(indexed_file_name(12, "a.zip"), "12-a.zip");
    }

    #[test]
    fn test_sanitize_path_component_valid() {
        assert_eq!(sanitize_path_component("creator_name").unwrap(), "creator_name");
        assert_eq!(sanitize_path_component("AC/DC").unwrap(), "AC_DC");
        assert_eq!(sanitize_path_component("a\\b").unwrap(), "a_b");
        assert_eq!(sanitize_path_component("Mr.. Smith").unwrap(), "Mr.. Smith");
    }

    #[test]
    fn test_sanitize_path_component_rejects_traversal() {
        assert!(sanitize_path_component("..").is_err());
        assert!(sanitize_path_component(".").is_err());
    }

    #[test]
    fn test_sanitize_path_component_empty() {
        assert!(sanitize_path_component("").is_err());
        assert!(sanitize_path_component("   ").is_err());
    }
}
