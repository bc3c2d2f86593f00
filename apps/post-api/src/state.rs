//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostIndex;
use postboard_core::ports::{IndexStore, StoreError};
use postboard_infra::{InMemoryIndexStore, RedisIndexStore};

use crate::config::AppConfig;

/// Shared application state.
///
/// One store handle for the whole process; every request goes through
/// the same `PostIndex`.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostIndex,
    /// Which backend the store handle points at, for the health report.
    pub store_backend: &'static str,
}

impl AppState {
    /// Build the application state with the appropriate store.
    ///
    /// Connecting to Redis at startup is also the liveness probe; with
    /// fallback disabled a failed connect aborts startup.
    pub async fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let (store, store_backend): (Arc<dyn IndexStore>, &'static str) = match &config.redis {
            Some(redis_config) => match RedisIndexStore::new(redis_config.clone()).await {
                Ok(store) => (Arc::new(store), "redis"),
                Err(e) if redis_config.fallback_to_memory => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory store.",
                        e
                    );
                    (Arc::new(InMemoryIndexStore::new()), "memory")
                }
                Err(e) => return Err(e),
            },
            None => {
                tracing::warn!(
                    "REDIS_URL not set. Posts are kept in memory and lost on restart."
                );
                (Arc::new(InMemoryIndexStore::new()), "memory")
            }
        };

        tracing::info!(store = store_backend, "Application state initialized");

        Ok(Self {
            posts: PostIndex::new(store),
            store_backend,
        })
    }
}
