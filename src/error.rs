//! Error types for the client core
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses are never errors: every lookup returns `Option`. The variants
//! here cover ambiguous name lookups and the inspector API surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the client core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A name lookup matched more than one cached entity
    #[error("Ambiguous name '{name}': {matches} cached entities share it")]
    AmbiguousName { name: String, matches: usize },

    /// Entity not present in the cache
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::AmbiguousName { .. } => StatusCode::CONFLICT,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the client core.
pub type Result<T> = std::result::Result<T, CacheError>;
