//! Error types for cache groups
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Group Error Enum ==
/// Unified error type for cache group lookups.
#[derive(Error, Debug)]
pub enum GroupError {
    /// Lookup with an empty key
    #[error("key is required")]
    EmptyKey,

    /// No group registered under this name
    #[error("no such group: {0}")]
    GroupNotFound(String),

    /// The group's getter failed; passed through untouched
    #[error(transparent)]
    Load(#[from] anyhow::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for GroupError {
    fn into_response(self) -> Response {
        let status = match &self {
            GroupError::EmptyKey => StatusCode::BAD_REQUEST,
            GroupError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            GroupError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache group operations.
pub type Result<T> = std::result::Result<T, GroupError>;
