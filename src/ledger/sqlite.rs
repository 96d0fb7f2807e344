//! SQLite-backed ledger.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::{Error, Result};
use crate::ledger::Ledger;

/// Ledger stored in a single-table SQLite file.
///
/// Schema: `downloaded_posts(value TEXT NOT NULL UNIQUE)`.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    pool: SqlitePool,
}

impl SqliteLedger {
    /// Open the ledger, creating the file and table if missing.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        // Only the control task touches the ledger.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS downloaded_posts (
                value TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&pool)
        .await?;

        tracing::debug!("Opened ledger {}", path.display());

        Ok(Self { pool })
    }

    /// Number of processed posts.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM downloaded_posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn has(&self, post_id: &str) -> Result<bool> {
        let row: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM downloaded_posts WHERE value = ? LIMIT 1")
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    async fn mark_processed(&self, post_id: &str) -> Result<()> {
        sqlx::query("INSERT INTO downloaded_posts (value) VALUES (?)")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Error::DuplicateKey(post_id.to_string());
                    }
                }
                Error::Database(e)
            })?;
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM downloaded_posts")
            .execute(&self.pool)
            .await?;
        tracing::info!("Cleared {} entries from the ledger", result.rows_affected());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("downloaded.db");

        let ledger = SqliteLedger::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_has_and_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SqliteLedger::open(&dir.path().join("l.db")).await.unwrap();

        assert!(!ledger.has("100").await.unwrap());
        ledger.mark_processed("100").await.unwrap();
        assert!(ledger.has("100").await.unwrap());

        let err = ledger.mark_processed("100").await.unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(id) if id == "100"));
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("l.db");

        let ledger = SqliteLedger::open(&path).await.unwrap();
        ledger.mark_processed("a").await.unwrap();
        ledger.close().await;

        let reopened = SqliteLedger::open(&path).await.unwrap();
        assert!(reopened.has("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_clears_entries() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SqliteLedger::open(&dir.path().join("l.db")).await.unwrap();
        ledger.mark_processed("a").await.unwrap();
        ledger.mark_processed("b").await.unwrap();

        ledger.reset().await.unwrap();

        assert_eq!(ledger.count().await.unwrap(), 0);
        assert!(!ledger.has("a").await.unwrap());
    }
}
