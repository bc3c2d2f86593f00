use async_trait::async_trait;

/// IndexStore trait - abstraction over the backing list store (Redis,
/// in-memory).
///
/// Each key holds an append-only list; appends land at the front, so
/// `read_all` returns most-recently-appended entries first. The adapter
/// is a pure pass-through: no retries, no partial-success handling.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Push a value onto the list stored at `key`.
    async fn append(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read the full list at `key`, most recent first.
    /// A key with no entries yields an empty vec, not an error.
    async fn read_all(&self, key: &str) -> Result<Vec<String>, StoreError>;
}

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
