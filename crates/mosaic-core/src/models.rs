//! Shared data models

use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An image as received from a client, before anything touches the disk
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename exactly as the client sent it (untrusted)
    pub original_filename: String,
    /// Name the upload is stored under
    pub storage_key: String,
    /// Raw file content
    pub data: Bytes,
}

/// A grayscale result written to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultImage {
    /// Location of the written file
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ResultImage {
    /// Path rendered the way it is reported to clients
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Where the grayscale result was saved
    pub result_path: String,
}

impl From<&ResultImage> for UploadResponse {
    fn from(result: &ResultImage) -> Self {
        Self {
            result_path: result.display_path(),
        }
    }
}
