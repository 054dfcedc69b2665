//! Application state for the mosaic API

use std::sync::Arc;

use mosaic_core::ImageStore;

/// Application state shared across all handlers
///
/// Holds no mutable data; concurrent requests only share the filesystem.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ImageStore>,
    /// Maximum request body size in bytes (`None` = unlimited)
    body_limit: Option<usize>,
}

impl AppState {
    /// Create a new AppState with unlimited request bodies
    pub fn new(store: ImageStore) -> Self {
        Self {
            store: Arc::new(store),
            body_limit: None,
        }
    }

    /// Cap request bodies at `limit` bytes
    pub fn with_body_limit(mut self, limit: Option<usize>) -> Self {
        self.body_limit = limit;
        self
    }

    /// Get the image store
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn body_limit(&self) -> Option<usize> {
        self.body_limit
    }
}
