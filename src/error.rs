//! Error types for Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthenticated = 2,
    Forbidden = 3,
    DbFailure = 4,
    DbConflict = 5,
    NotFound = 6,
    BadValue = 7,
    OutOfStock = 10,
    DuplicatePending = 11,
    AlreadyProcessed = 12,
    AlreadyReturned = 13,
    InvalidStatus = 14,
    AlreadySubscribed = 15,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("A pending request already exists for this book")]
    DuplicatePending,

    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Loan {0} has already been returned")]
    AlreadyReturned(i32),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Already subscribed to this book")]
    AlreadySubscribed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthenticated, msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::OutOfStock(msg) => (StatusCode::CONFLICT, ErrorCode::OutOfStock, msg.clone()),
            AppError::DuplicatePending => {
                (StatusCode::CONFLICT, ErrorCode::DuplicatePending, self.to_string())
            }
            AppError::AlreadyProcessed(msg) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyProcessed, msg.clone())
            }
            AppError::AlreadyReturned(_) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyReturned, self.to_string())
            }
            AppError::InvalidStatus(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidStatus, msg.clone())
            }
            AppError::AlreadySubscribed => {
                (StatusCode::CONFLICT, ErrorCode::AlreadySubscribed, self.to_string())
            }
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
            {
                tracing::warn!("Constraint violation: {}", db_err);
                (
                    StatusCode::CONFLICT,
                    ErrorCode::DbConflict,
                    "The operation conflicts with existing data".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_map_to_conflict() {
        for err in [
            AppError::OutOfStock("Book 1".into()),
            AppError::DuplicatePending,
            AppError::AlreadyProcessed("Request 3".into()),
            AppError::AlreadyReturned(7),
            AppError::AlreadySubscribed,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("x".into()).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidStatus("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Authentication("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_failure_is_generic() {
        let (status, code, message) = AppError::Database(sqlx::Error::PoolTimedOut).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::DbFailure);
        assert_eq!(message, "Database error");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let (_, pending, _) = AppError::DuplicatePending.parts();
        let (_, subscribed, _) = AppError::AlreadySubscribed.parts();
        assert_ne!(pending as u32, subscribed as u32);
        assert_eq!(format!("{:?}", pending), "DuplicatePending");
    }
}
