//! Error types for the sales analytics server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    InvalidQuery = 2,
    RepositoryFailure = 3,
    RepositoryTimeout = 4,
    CombinedFailure = 5,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Repository call timed out after {0} ms")]
    RepositoryTimeout(u64),

    #[error("Combined query failed: {0}")]
    CombinedFailure(Box<AppError>),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error code reported to clients for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidQuery(_) => ErrorCode::InvalidQuery,
            AppError::Database(_) | AppError::Repository(_) => ErrorCode::RepositoryFailure,
            AppError::RepositoryTimeout(_) => ErrorCode::RepositoryTimeout,
            AppError::CombinedFailure(_) => ErrorCode::CombinedFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Repository(msg) => {
                tracing::error!("Repository error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Repository error".to_string(),
                )
            }
            AppError::RepositoryTimeout(ms) => {
                tracing::error!("Repository call timed out after {} ms", ms);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Repository call timed out".to_string(),
                )
            }
            AppError::CombinedFailure(cause) => {
                tracing::error!("Combined query failed: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error combining data".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
