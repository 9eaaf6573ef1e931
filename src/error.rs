//! Error types for the group cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for group lookups.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty key supplied to a lookup
    #[error("key is required")]
    InvalidKey,

    /// No group registered under the name
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// The loader could not produce a value; passed through unchanged
    #[error(transparent)]
    Load(anyhow::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey => StatusCode::BAD_REQUEST,
            CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Load(_) => StatusCode::NOT_FOUND,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for group lookups.
pub type Result<T> = std::result::Result<T, CacheError>;
