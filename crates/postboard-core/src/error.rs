//! Domain-level error types.

use thiserror::Error;

use crate::ports::StoreError;

/// Errors surfaced by the post index.
///
/// Both kinds propagate unchanged to the caller; nothing is retried or
/// downgraded at this layer.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index store failure: {0}")]
    Store(#[from] StoreError),

    #[error("post wire form invalid: {0}")]
    Serialization(#[from] serde_json::Error),
}
