//! Processed-posts ledger.
//!
//! A post id enters the ledger once every file of the post has been
//! attempted. Posts found in the ledger are skipped on later runs.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

/// Durable set of processed post ids.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Whether the post has already been processed.
    async fn has(&self, post_id: &str) -> Result<bool>;

    /// Record a post as processed.
    ///
    /// Fails with [`Error::DuplicateKey`](crate::Error::DuplicateKey) if the
    /// id is already present.
    async fn mark_processed(&self, post_id: &str) -> Result<()>;

    /// Forget every processed post.
    async fn reset(&self) -> Result<()>;
}
