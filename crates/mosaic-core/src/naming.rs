//! Storage key derivation from client filenames
//!
//! Client filenames are untrusted. Under [`NamingPolicy::Original`] only the
//! last path component survives, which keeps `../` and absolute paths from
//! escaping the storage directories while still storing `photo.jpg` as
//! `photo.jpg`. Under [`NamingPolicy::Uuid`] the client name never reaches
//! the filesystem at all.

use std::path::Path;

use crate::config::NamingPolicy;
use crate::error::{ProcessError, ProcessResult};

/// Prefix of every result filename
pub const RESULT_PREFIX: &str = "result_";

/// Derive the storage key for a client filename
pub fn storage_key(original: &str, policy: NamingPolicy) -> ProcessResult<String> {
    let base = base_name(original)
        .ok_or_else(|| ProcessError::InvalidFilename(original.to_string()))?;

    match policy {
        NamingPolicy::Original => Ok(base.to_string()),
        NamingPolicy::Uuid => {
            let id = uuid::Uuid::new_v4().simple();
            Ok(match extension(base) {
                Some(ext) => format!("{}.{}", id, ext),
                None => id.to_string(),
            })
        }
    }
}

/// Filename of the result derived from a storage key
pub fn result_name(storage_key: &str) -> String {
    format!("{}{}", RESULT_PREFIX, storage_key)
}

/// Last component of a client path, splitting on both separator styles
fn base_name(original: &str) -> Option<&str> {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    match base {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
}
