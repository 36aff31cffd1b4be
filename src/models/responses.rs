//! Response DTOs for the cache inspector API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheManagerStats, CacheStats};

/// A snapshot listing (GET /users, /channels, /messages, /user-states)
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// Number of items returned
    pub count: usize,
    /// Items, oldest insertion first
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Names known for one channel (GET /names/:channel)
#[derive(Debug, Clone, Serialize)]
pub struct NamesResponse {
    pub channel: String,
    pub count: usize,
    pub names: Vec<String>,
}

impl NamesResponse {
    pub fn new(channel: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            channel: channel.into(),
            count: names.len(),
            names,
        }
    }
}

/// Counters for one cache, with its hit rate
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    /// Entry bound, null when unbounded
    pub capacity: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub overwrites: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Share of the bound in use, null when unbounded
    pub fill_ratio: Option<f64>,
}

impl From<&CacheStats> for CacheStatsBody {
    fn from(stats: &CacheStats) -> Self {
        Self {
            capacity: stats.capacity,
            hits: stats.hits,
            misses: stats.misses,
            insertions: stats.insertions,
            overwrites: stats.overwrites,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            fill_ratio: stats.fill_ratio(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub users: CacheStatsBody,
    pub channels: CacheStatsBody,
    pub messages: CacheStatsBody,
    pub user_states: CacheStatsBody,
    /// Number of channels with a name list
    pub name_index: usize,
}

impl From<&CacheManagerStats> for StatsResponse {
    fn from(stats: &CacheManagerStats) -> Self {
        Self {
            users: (&stats.users).into(),
            channels: (&stats.channels).into(),
            messages: (&stats.messages).into(),
            user_states: (&stats.user_states).into(),
            name_index: stats.name_index,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
