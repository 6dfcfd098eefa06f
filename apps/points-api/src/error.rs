//! # API Error Type
//!
//! Maps service errors to HTTP responses.
//!
//! ## Serialization
//! Every failure carries a machine-readable `code` and a human-readable
//! `error` message:
//! ```json
//! {
//!   "error": "Receipt not found: 7fb1377b-b223-49d9-a31a-5a02701dd310",
//!   "code": "NOT_FOUND"
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use points_core::CoreError;
use points_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not a Receipt document (400).
    #[error("{0}")]
    MalformedInput(String),

    /// Strict field validation failed (400).
    #[error("{0}")]
    Validation(String),

    /// Unknown receipt id (404).
    #[error("{0}")]
    NotFound(String),

    /// Anything else (500).
    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MalformedInput(_) => "MALFORMED_INPUT",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Core(CoreError::MalformedInput(_)) => {
                ApiError::MalformedInput(err.to_string())
            }
            StoreError::Core(CoreError::Validation(_)) => ApiError::Validation(err.to_string()),
            StoreError::DuplicateId { .. } | StoreError::LockPoisoned => {
                // Log the actual error but return a generic message
                tracing::error!(error = %err, "Receipt store failure");
                ApiError::Internal("Receipt store failure".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code(),
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use points_core::ValidationError;

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::not_found("abc").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Receipt not found: abc");

        let err: ApiError = StoreError::Core(CoreError::MalformedInput("EOF".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "MALFORMED_INPUT");

        let err: ApiError = StoreError::Core(CoreError::Validation(ValidationError::Required {
            field: "retailer".into(),
        }))
        .into();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err: ApiError = StoreError::LockPoisoned.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
