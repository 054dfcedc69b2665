//! Storage configuration
//!
//! The input and output directories are injected at startup rather than
//! fixed in code, so tests can point the service at temporary directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProcessError, ProcessResult};

/// Default directory for raw uploads
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// Default directory for converted results
pub const DEFAULT_RESULT_DIR: &str = "results";

/// How a client filename becomes the name a file is stored under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// Keep the final path component of the client filename
    #[default]
    Original,
    /// Random v4 UUID plus the original extension
    Uuid,
}

/// Where uploads and results live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory raw uploads are written to
    pub upload_dir: PathBuf,
    /// Directory grayscale results are written to
    pub result_dir: PathBuf,
    /// Storage key derivation
    pub naming: NamingPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            result_dir: PathBuf::from(DEFAULT_RESULT_DIR),
            naming: NamingPolicy::default(),
        }
    }
}

impl StorageConfig {
    /// Config rooted at `base`, using the default directory names below it
    pub fn rooted_at(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            upload_dir: base.join(DEFAULT_UPLOAD_DIR),
            result_dir: base.join(DEFAULT_RESULT_DIR),
            naming: NamingPolicy::default(),
        }
    }

    /// Set the naming policy
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    /// Create both directories if they do not exist yet
    pub fn ensure_dirs(&self) -> ProcessResult<()> {
        for dir in [&self.upload_dir, &self.result_dir] {
            std::fs::create_dir_all(dir).map_err(|e| ProcessError::storage(dir, e))?;
            tracing::debug!(dir = %dir.display(), "Storage directory ready");
        }
        Ok(())
    }
}
