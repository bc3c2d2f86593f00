//! In-memory index store - used as fallback when Redis is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::ports::{IndexStore, StoreError};

/// In-memory list store using a HashMap behind an async RwLock.
///
/// Mirrors the Redis list semantics: appends land at the front, reads
/// return the whole list most-recent-first. Data is lost on process
/// restart.
pub struct InMemoryIndexStore {
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self {
            lists: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryIndexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for InMemoryIndexStore {
    async fn append(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        lists
            .entry(key.to_string())
            .or_default()
            .insert(0, value.to_string());
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let lists = self.lists.read().await;
        Ok(lists.get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_read() {
        let store = InMemoryIndexStore::new();
        store.append("key1", "first").await.unwrap();
        store.append("key1", "second").await.unwrap();

        // Most recent append comes back first.
        assert_eq!(
            store.read_all("key1").await.unwrap(),
            vec!["second".to_string(), "first".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let store = InMemoryIndexStore::new();
        assert!(store.read_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryIndexStore::new();
        store.append("key1", "value1").await.unwrap();
        store.append("key2", "value2").await.unwrap();

        assert_eq!(
            store.read_all("key1").await.unwrap(),
            vec!["value1".to_string()]
        );
        assert_eq!(
            store.read_all("key2").await.unwrap(),
            vec!["value2".to_string()]
        );
    }
}
