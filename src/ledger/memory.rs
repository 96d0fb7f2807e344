//! In-memory ledger for dry runs and tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::ledger::Ledger;

/// Ledger kept in a `HashSet`; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    processed: Mutex<HashSet<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of processed posts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned set is still a valid set.
        self.processed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn has(&self, post_id: &str) -> Result<bool> {
        Ok(self.lock().contains(post_id))
    }

    async fn mark_processed(&self, post_id: &str) -> Result<()> {
        if !self.lock().insert(post_id.to_string()) {
            return Err(Error::DuplicateKey(post_id.to_string()));
        }
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mark_and_has() {
        let ledger = MemoryLedger::new();
        assert!(!ledger.has("1").await.unwrap());

        ledger.mark_processed("1").await.unwrap();
        assert!(ledger.has("1").await.unwrap());
        assert!(!ledger.has("2").await.unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_key() {
        let ledger = MemoryLedger::new();
        ledger.mark_processed("1").await.unwrap();

        let err = ledger.mark_processed("1").await.unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(id) if id == "1"));
    }

    #[tokio::test]
    async fn test_reset() {
        let ledger = MemoryLedger::new();
        ledger.mark_processed("1").await.unwrap();
        ledger.reset().await.unwrap();
        assert!(ledger.is_empty());
        ledger.mark_processed("1").await.unwrap();
    }
}
