//! Request DTOs for the cache inspector API
//!
//! Defines the query parameters accepted by the listing endpoints.

use serde::Deserialize;

/// Maximum number of entities a single listing returns.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Query string for the snapshot listings (`GET /users?limit=10`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Only return the newest `limit` entries
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Validates the query.
    ///
    /// Returns None if valid, or Some(error_message) if invalid.
    pub fn validate(&self) -> Option<String> {
        match self.limit {
            Some(0) => Some("Limit must be at least 1".to_string()),
            Some(limit) if limit > MAX_LIST_LIMIT => Some(format!(
                "Limit exceeds maximum of {}",
                MAX_LIST_LIMIT
            )),
            _ => None,
        }
    }

    /// Keeps only the newest `limit` items of an oldest-first snapshot.
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        match self.limit {
            Some(limit) if items.len() > limit => items.split_off(items.len() - limit),
            _ => items,
        }
    }
}
