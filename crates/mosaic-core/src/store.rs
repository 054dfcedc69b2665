//! On-disk image store
//!
//! Writes uploads to the input directory and grayscale results to the output
//! directory. There is no locking: two requests for the same storage key
//! race, and whichever write lands last wins.

use std::path::PathBuf;

use bytes::Bytes;

use crate::config::StorageConfig;
use crate::convert::convert_file;
use crate::error::{ProcessError, ProcessResult};
use crate::models::{ResultImage, UploadedImage};
use crate::naming::{result_name, storage_key};

/// Filesystem-backed store for uploads and their grayscale results
#[derive(Debug, Clone)]
pub struct ImageStore {
    config: StorageConfig,
}

impl ImageStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create the store and make sure both directories exist
    pub fn open(config: StorageConfig) -> ProcessResult<Self> {
        config.ensure_dirs()?;
        Ok(Self::new(config))
    }

    /// Wrap client-supplied content, deriving its storage key
    pub fn accept(&self, original_filename: &str, data: Bytes) -> ProcessResult<UploadedImage> {
        let storage_key = storage_key(original_filename, self.config.naming)?;
        Ok(UploadedImage {
            original_filename: original_filename.to_string(),
            storage_key,
            data,
        })
    }

    /// Where an upload with this key is stored
    pub fn upload_path(&self, storage_key: &str) -> PathBuf {
        self.config.upload_dir.join(storage_key)
    }

    /// Where the result for an upload with this key is stored
    pub fn result_path(&self, storage_key: &str) -> PathBuf {
        self.config.result_dir.join(result_name(storage_key))
    }

    /// Write the raw upload bytes to the input directory
    pub async fn save_upload(&self, upload: &UploadedImage) -> ProcessResult<PathBuf> {
        let path = self.upload_path(&upload.storage_key);
        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(|e| ProcessError::storage(&path, e))?;

        tracing::debug!(
            path = %path.display(),
            size = upload.data.len(),
            "Upload stored"
        );
        Ok(path)
    }

    /// Store the upload, convert it to grayscale and store the result
    ///
    /// Decoding and encoding run on the blocking thread pool.
    pub async fn process(&self, upload: &UploadedImage) -> ProcessResult<ResultImage> {
        let input = self.save_upload(upload).await?;
        let output = self.result_path(&upload.storage_key);

        tokio::task::spawn_blocking(move || convert_file(&input, &output))
            .await
            .map_err(|e| ProcessError::Internal(format!("Conversion task failed: {}", e)))?
    }
}
