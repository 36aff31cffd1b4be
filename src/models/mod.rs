//! Request and Response models for the cache inspector API
//!
//! DTOs used for serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ListQuery;
pub use responses::{ErrorResponse, HealthResponse, ListResponse, NamesResponse, StatsResponse};
