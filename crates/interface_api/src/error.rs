//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_kernel::{PriceError, TemporalError};
use domain_catalog::CatalogError;
use infra_db::DatabaseError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rendered as a bare 404 without a body
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(_) => return StatusCode::NOT_FOUND.into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error", msg, None),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Validation(messages) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(messages),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::ForeignKeyViolation(msg) | DatabaseError::DuplicateEntry(msg) => {
                ApiError::Conflict(msg)
            }
            DatabaseError::ConstraintViolation(msg) | DatabaseError::ValueTooLong(msg) => {
                ApiError::Validation(vec![msg])
            }
            other if other.is_connection_error() => {
                error!(error = %other, "Database unreachable");
                ApiError::ServiceUnavailable("Database unavailable".to_string())
            }
            other => {
                error!(error = %other, "Database operation failed");
                ApiError::Database(other.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ValidationFailed(msg) => ApiError::Validation(vec![msg]),
            CatalogError::Price(price) => ApiError::from(price),
        }
    }
}

impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        ApiError::Validation(vec![err.to_string()])
    }
}

impl From<TemporalError> for ApiError {
    fn from(err: TemporalError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_has_empty_body() {
        let response = ApiError::NotFound("Product 4".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn test_database_error_mapping() {
        let conflict = ApiError::from(DatabaseError::ForeignKeyViolation("category".to_string()));
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let too_long = ApiError::from(DatabaseError::ValueTooLong("name".to_string()));
        assert!(matches!(too_long, ApiError::Validation(_)));

        let failed = ApiError::from(DatabaseError::QueryFailed("syntax".to_string()));
        assert_eq!(failed.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let unreachable = ApiError::from(DatabaseError::PoolExhausted);
        assert_eq!(unreachable.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_status() {
        let response = ApiError::Validation(vec!["name must be 1 to 100 characters".to_string()])
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
