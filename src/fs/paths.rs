//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::api::ProfileTarget;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Folder holding a profile's listing files and its `posts/` tree.
///
/// Layout: `{download_dir}/{site}/{name}-{service}-{user_id}`.
pub fn get_profile_folder(
    download_dir: &Path,
    target: &ProfileTarget,
    display_name: &str,
) -> Result<PathBuf> {
    let folder = format!(
        "{}-{}-{}",
        sanitize_path_component(display_name)?,
        sanitize_path_component(&target.service)?,
        sanitize_path_component(&target.user_id)?
    );

    Ok(get_site_folder(download_dir, target)?.join(folder))
}

/// Folder shared by every profile of a site.
pub fn get_site_folder(download_dir: &Path, target: &ProfileTarget) -> Result<PathBuf> {
    Ok(download_dir.join(sanitize_path_component(target.site_dir())?))
}

/// Folder a single post's files are written to: `{root}/posts/{post_id}`.
pub fn get_post_folder(root: &Path, post_id: &str) -> Result<PathBuf> {
    Ok(root.join("posts").join(sanitize_path_component(post_id)?))
}

/// Count regular files directly inside `dir` (0 if it does not exist).
pub async fn count_files(dir: &Path) -> Result<usize> {
    if !tokio::fs::try_exists(dir).await? {
        return Ok(0);
    }

    let mut count = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            count += 1;
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_folder() {
        let target = ProfileTarget::parse("https://kemono.su/patreon/user/12345").unwrap();
        let path = get_profile_folder(Path::new("/downloads"), &target, "Some/Artist").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/downloads/kemono/Some_Artist-patreon-12345")
        );
    }

    #[test]
    fn test_get_post_folder() {
        let path = get_post_folder(Path::new("/p"), "98765").unwrap();
        assert_eq!(path, PathBuf::from("/p/posts/98765"));
        assert!(get_post_folder(Path::new("/p"), "..").is_err());
    }

    #[tokio::test]
    async fn test_count_files_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_files(&dir.path().join("missing")).await.unwrap(), 0);

        std::fs::write(dir.path().join("1-a.png"), b"a").unwrap();
        std::fs::write(dir.path().join("2-b.png"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        assert_eq!(count_files(dir.path()).await.unwrap(), 2);
    }
}
