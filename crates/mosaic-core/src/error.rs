//! Error types for upload processing

use std::path::PathBuf;

use thiserror::Error;

/// Result type for upload processing
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that can occur while storing and converting an upload
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The request carried no `image` file part
    #[error("No image provided")]
    MissingInput,

    /// The client filename cannot be turned into a storage key
    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    /// The stored bytes are not a decodable image
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The converted image could not be encoded to its target format
    #[error("Failed to encode result image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Directory or file I/O failed
    #[error("Storage failure at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (e.g. the blocking worker went away)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProcessError {
    /// Build a storage error for `path`
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ProcessError::MissingInput => 400,
            ProcessError::InvalidFilename(_) => 400,
            ProcessError::Decode { .. } => 500,
            ProcessError::Encode { .. } => 500,
            ProcessError::Storage { .. } => 500,
            ProcessError::Internal(_) => 500,
        }
    }
}
