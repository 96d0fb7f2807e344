//! Download state tracking.

/// What happened to one post's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub post_id: String,
    /// Files listed for the post.
    pub expected_files: usize,
    /// Files that downloaded and passed the size check.
    pub downloaded_files: usize,
    /// URLs that failed every attempt.
    pub failed_urls: Vec<String>,
    /// Bytes written for the successful files.
    pub bytes: u64,
    /// Regular files found in the post folder afterwards.
    pub files_on_disk: usize,
}

impl PostOutcome {
    /// Every listed file was downloaded.
    pub fn is_complete(&self) -> bool {
        self.failed_urls.is_empty() && self.downloaded_files == self.expected_files
    }
}

/// Per-profile download state.
#[derive(Debug, Default)]
pub struct DownloadState {
    pub profile_name: Option<String>,

    // Posts
    pub posts_complete: u64,
    pub posts_partial: u64,
    pub posts_skipped: u64,

    // Files
    pub files_downloaded: u64,
    pub files_failed: u64,
    pub bytes_downloaded: u64,

    /// Outcomes of the posts downloaded in this run, in processing order.
    pub outcomes: Vec<PostOutcome>,
}

impl DownloadState {
    /// Record a post that was found in the ledger.
    pub fn record_skipped(&mut self) {
        self.posts_skipped += 1;
    }

    /// Record a processed post.
    pub fn record_post(&mut self, outcome: PostOutcome) {
        if outcome.is_complete() {
            self.posts_complete += 1;
        } else {
            self.posts_partial += 1;
        }

        self.files_downloaded += outcome.downloaded_files as u64;
        self.files_failed += outcome.failed_urls.len() as u64;
        self.bytes_downloaded += outcome.bytes;
        self.outcomes.push(outcome);
    }

    /// Posts processed in this run, skipped ones excluded.
    pub fn posts_processed(&self) -> u64 {
        self.posts_complete + self.posts_partial
    }
}

/// Global statistics across all profiles.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub posts_complete: u64,
    pub posts_partial: u64,
    pub posts_skipped: u64,
    pub files_downloaded: u64,
    pub files_failed: u64,
    pub bytes_downloaded: u64,
    pub profiles_processed: u64,
    pub profiles_failed: u64,
}

impl GlobalState {
    /// Add statistics from a profile's download state.
    pub fn add_profile_stats(&mut self, state: &DownloadState) {
        self.posts_complete += state.posts_complete;
        self.posts_partial += state.posts_partial;
        self.posts_skipped += state.posts_skipped;
        self.files_downloaded += state.files_downloaded;
        self.files_failed += state.files_failed;
        self.bytes_downloaded += state.bytes_downloaded;
        self.profiles_processed += 1;
    }

    /// Mark a profile as failed.
    pub fn mark_profile_failed(&mut self) {
        self.profiles_failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(expected: usize, downloaded: usize, failed: &[&str]) -> PostOutcome {
        PostOutcome {
            post_id: "1".into(),
            expected_files: expected,
            downloaded_files: downloaded,
            failed_urls: failed.iter().map(|s| s.to_string()).collect(),
            bytes: downloaded as u64 * 10,
            files_on_disk: downloaded,
        }
    }

    #[test]
    fn test_record_post() {
        let mut state = DownloadState::default();
        state.record_post(outcome(2, 2, &[]));
        state.record_post(outcome(3, 2, &["https://n1.kemono.su/data/x"]));
        state.record_skipped();

        assert_eq!(state.posts_complete, 1);
        assert_eq!(state.posts_partial, 1);
        assert_eq!(state.posts_skipped, 1);
        assert_eq!(state.posts_processed(), 2);
        assert_eq!(state.files_downloaded, 4);
        assert_eq!(state.files_failed, 1);
        assert_eq!(state.bytes_downloaded, 40);
    }

    #[test]
    fn test_empty_post_is_complete() {
        assert!(outcome(0, 0, &[]).is_complete());
    }

    #[test]
    fn test_global_state() {
        let mut state = DownloadState::default();
        state.record_post(outcome(1, 1, &[]));

        let mut global = GlobalState::default();
        global.add_profile_stats(&state);
        global.add_profile_stats(&state);
        global.mark_profile_failed();

        assert_eq!(global.profiles_processed, 2);
        assert_eq!(global.profiles_failed, 1);
        assert_eq!(global.files_downloaded, 2);
    }
}
