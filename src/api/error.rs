//! API error handling.
//!
//! Domain errors are translated to HTTP status codes with a JSON
//! `{"error": message}` body. Internal failures are logged with their real
//! cause but surface only an opaque message to clients.

use crate::error::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (missing title, malformed input)
    BadRequest(String),
    /// Missing, invalid, or expired credentials
    Unauthorized(String),
    /// Resource absent, or owned by someone else
    NotFound(String),
    /// Signup rejected (duplicate username, invalid credentials payload)
    UnprocessableEntity(String),
    /// Internal server error; the message is logged, never sent
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::UnprocessableEntity(msg) => write!(f, "{msg}"),
            ApiError::Internal(_) => write!(f, "internal server error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!(cause = %cause, "Internal error while handling request");
        }

        let status = self.status_code();
        let body = json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Conflict(msg) => ApiError::UnprocessableEntity(msg),
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Token(e) => ApiError::Unauthorized(e.to_string()),
            Error::Hash(e) => ApiError::Internal(e.to_string()),
            Error::Database(e) => ApiError::Internal(e.to_string()),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::UnprocessableEntity("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_maps_to_422() {
        let api: ApiError = Error::Conflict("User already exists".into()).into();
        assert_eq!(api.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.to_string(), "User already exists");
    }

    #[test]
    fn test_internal_errors_stay_opaque() {
        let api: ApiError = Error::Internal("connection pool exhausted".into()).into();
        assert_eq!(api.to_string(), "internal server error");
    }
}
