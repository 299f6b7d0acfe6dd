//! Unified error handling for the catalog API.
//!
//! Provides a unified `AppError` type mapped onto transport status codes.
//! All route handlers return `Result<T, AppError>`.
//!
//! Taxonomy:
//! - Validation errors (400): malformed or out-of-constraint input. Always
//!   recoverable by resubmitting corrected input; never logged as a fault.
//! - Not-found (404): a well-formed identifier referencing no record. A
//!   normal outcome, not a fault.
//! - Storage errors (500): infrastructural failures from the store. Logged
//!   for operators and surfaced without internal detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use catalog_core::ParseProductIdError;

use crate::store::StoreError;

/// Input that failed one or more field-level constraints.
///
/// Collects every violated rule so the caller sees the full list in one
/// response rather than fixing violations one at a time.
#[derive(Debug, Error)]
#[error("{}", .violations.join("; "))]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    /// Build from a non-empty list of violation messages.
    #[must_use]
    pub fn new(violations: Vec<String>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// Build from a single violation message.
    #[must_use]
    pub fn single(violation: impl Into<String>) -> Self {
        Self {
            violations: vec![violation.into()],
        }
    }

    /// The individual violation messages.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl From<ParseProductIdError> for ValidationError {
    fn from(err: ParseProductIdError) -> Self {
        Self::single(err.to_string())
    }
}

/// Application-level error type for the catalog API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// JSON error body: a human-readable message and nothing else.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(_)) {
            tracing::error!(error = %self, "Storage failure while handling request");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) => "Internal server error".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation(ValidationError::single(
                "name is required"
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("Product".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Store(StoreError::Unavailable(
                "connection refused".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_aggregates_violations() {
        let err = ValidationError::new(vec![
            "name is required".to_string(),
            "price must be greater than 0".to_string(),
        ]);
        let display = err.to_string();
        assert!(display.contains("name is required"));
        assert!(display.contains("price must be greater than 0"));
    }

    #[test]
    fn test_store_error_message_is_redacted() {
        let response =
            AppError::Store(StoreError::Unavailable("secret host down".to_string()))
                .into_response();
        // Body is a generic phrase; the internal detail stays in the logs.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_malformed_id_becomes_validation_error() {
        let parse_err = catalog_core::ProductId::parse("nope").unwrap_err();
        let err = AppError::from(ValidationError::from(parse_err));
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }
}
