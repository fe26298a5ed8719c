//! Error handling and response types for the registry proxy.
//!
//! All request-level failures are represented by [`AppError`], which maps to a
//! standardized JSON error response with an HTTP status code. No error here is
//! fatal to the running process; each request is handled independently.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

/// Standardized error response structure for consistent error handling
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,     // Human-readable error message
    pub code: String,      // Machine-readable error code
    pub timestamp: String, // ISO 8601 timestamp
}

/// Error code classification for machine-readable error types
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    ValidationError, // For input validation failures
    UpstreamError,   // For failed outbound calls
    InternalError,   // For server-side errors
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::UpstreamError => "upstream_error",
            ErrorCode::InternalError => "internal_error",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application-specific error types with error codes
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An outbound call to the origin registry or the token endpoint failed.
    /// Surfaced to the caller as-is; the proxy never retries.
    #[error("upstream request failed: {0}")]
    UpstreamUnavailable(String),

    /// The token endpoint was called without a `scope` query parameter.
    #[error("missing scope query parameter")]
    MissingScope,

    /// The request carried no `Host` header, so neither the challenge realm
    /// nor the help page can name the proxy.
    #[error("request has no Host header")]
    MissingHost,

    #[error("internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::UpstreamUnavailable(_) => ErrorCode::UpstreamError,
            AppError::MissingScope | AppError::MissingHost => ErrorCode::ValidationError,
            AppError::InternalError(_) => ErrorCode::InternalError,
        }
    }

    /// Create a standardized error response
    pub fn to_error_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            error: self.to_string(),
            code: self.error_code().as_str().to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::InternalError(format!("template rendering failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let error_response = self.to_error_response();
        let status = self.error_code().http_status();

        tracing::debug!(status = %status, code = %error_response.code, "Returning standardized error response");

        (status, axum::Json(error_response)).into_response()
    }
}

/// Convenient result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
