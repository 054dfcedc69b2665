//! Error types for mosaic client operations

use thiserror::Error;

/// Result type alias for mosaic client operations
pub type Result<T> = std::result::Result<T, MosaicClientError>;

/// Errors that can occur during mosaic client operations
#[derive(Error, Debug)]
pub enum MosaicClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server said the request carried no image
    #[error("Server rejected upload: no image provided")]
    MissingImage,

    /// Server could not store the given filename
    #[error("Server rejected filename: {0}")]
    InvalidFilename(String),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl MosaicClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }
}
