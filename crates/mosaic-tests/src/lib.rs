//! Integration tests for the mosaic server
//!
//! End-to-end tests that exercise the full stack over real HTTP:
//! - mosaic-client building multipart requests
//! - mosaic-api routing, extraction and error mapping
//! - mosaic-core storage and grayscale conversion on a temporary directory
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mosaic-tests
//! ```
//!
//! # Test Structure
//!
//! - `e2e_test.rs` - Full stack tests; helpers for them live here

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use mosaic_api::{create_router, AppState};
use mosaic_client::testing::TestServer;
use mosaic_core::{ImageStore, StorageConfig};

/// Start a server whose storage lives under `root`
pub async fn start_server(root: &Path) -> TestServer {
    start_server_with(StorageConfig::rooted_at(root), None).await
}

/// Start a server with explicit storage config and body limit
pub async fn start_server_with(config: StorageConfig, body_limit: Option<usize>) -> TestServer {
    let store = ImageStore::open(config).expect("storage directories");
    let state = AppState::new(store).with_body_limit(body_limit);
    TestServer::start(create_router(state))
        .await
        .expect("test server")
}

/// A colorful gradient test image
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    })
}

/// Encode an image in the given format
pub fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode fixture");
    buf
}
