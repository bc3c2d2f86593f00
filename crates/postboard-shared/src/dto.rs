//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Request to store a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPostRequest {
    pub post_name: String,
    /// Calendar date in `DD.MM.YY` form, e.g. `01.01.20`.
    pub date: String,
    pub author: String,
}

/// Query parameters for post retrieval.
///
/// Empty strings are treated as absent filters, matching the behavior
/// of a bare `?post_name=&author=x` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    pub post_name: Option<String>,
    pub author: Option<String>,
    /// Sort by date, most recent first. Off by default.
    pub order: Option<bool>,
}

/// Query parameters for the by-author path route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    pub order: Option<bool>,
}
