//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::equipment::QueryError;
use crate::extension::ExtensionError;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        };

        // Server-side failures are logged; the client gets a vague message
        let error = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<ExtensionError> for AppError {
    fn from(e: ExtensionError) -> Self {
        match e {
            ExtensionError::NotFound { .. } | ExtensionError::SchemeNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            ExtensionError::AlreadyExists { .. } | ExtensionError::Conflict { .. } => {
                AppError::Conflict(e.to_string())
            }
            ExtensionError::Invalid(_) => AppError::BadRequest(e.to_string()),
            ExtensionError::Serialization(_) => AppError::Internal(e.into()),
            ExtensionError::Storage(inner) => AppError::Internal(inner),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
