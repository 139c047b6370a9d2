//! Application error type and HTTP translation.
//!
//! Every handler returns `Result<_, AppError>`; the [`IntoResponse`]
//! implementation translates each variant into a JSON body of the form
//! `{"error": "<message>"}` with the matching status code, so no error
//! propagates past the request boundary unhandled.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error taxonomy for the service.
///
/// | Variant      | HTTP status | Meaning                                      |
/// |--------------|-------------|----------------------------------------------|
/// | `Validation` | 400         | Malformed URL or custom code (user input)    |
/// | `NotFound`   | 404         | Unknown short code                           |
/// | `Conflict`   | 409         | Short code already taken                     |
/// | `Exhausted`  | 500         | Code allocator gave up after its retry budget|
/// | `Internal`   | 500         | Storage or connectivity failure              |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Exhausted(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn exhausted(message: impl Into<String>) -> Self {
        Self::Exhausted(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Exhausted(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::Validation(message)
    }
}

/// Maps a SQLx error to the application taxonomy.
///
/// A unique-constraint violation means the short code is already taken and is
/// surfaced as [`AppError::Conflict`] so callers can distinguish the
/// allocator's benign check-then-insert race from a real storage failure.
/// Everything else is logged with the failing operation and collapsed to
/// [`AppError::Internal`].
pub fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict("Code already exists");
        }
    }

    tracing::error!(operation, error = %e, "database operation failed");
    AppError::internal("Database error")
}
