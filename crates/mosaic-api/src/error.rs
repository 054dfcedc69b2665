//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mosaic_core::ProcessError;
use serde::Serialize;

/// Message returned when the request has no `image` file part
pub const NO_IMAGE_MESSAGE: &str = "No image provided";
/// Message returned when the client filename is unusable
pub const INVALID_FILENAME_MESSAGE: &str = "Invalid filename";
/// Message returned for every server-side fault
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - no `image` file part
    MissingImage,
    /// 400 Bad Request - filename cannot be stored
    InvalidFilename(String),
    /// 400 Bad Request - malformed multipart body
    BadRequest(String),
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingImage => {
                tracing::debug!("Upload rejected: no image field");
                (StatusCode::BAD_REQUEST, NO_IMAGE_MESSAGE.to_string())
            }
            ApiError::InvalidFilename(name) => {
                tracing::debug!(filename = %name, "Upload rejected: invalid filename");
                (StatusCode::BAD_REQUEST, INVALID_FILENAME_MESSAGE.to_string())
            }
            ApiError::BadRequest(msg) => {
                tracing::debug!(%msg, "API client error");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::debug!(%msg, "API client error");
                (StatusCode::PAYLOAD_TOO_LARGE, msg)
            }
            ApiError::Internal(msg) => {
                // The cause stays in the log; clients get a generic message
                tracing::error!(error = %msg, "API error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::MissingInput => ApiError::MissingImage,
            ProcessError::InvalidFilename(name) => ApiError::InvalidFilename(name),
            err @ (ProcessError::Decode { .. }
            | ProcessError::Encode { .. }
            | ProcessError::Storage { .. }
            | ProcessError::Internal(_)) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}
