//! Mosaic Client Library
//!
//! Typed HTTP client for the mosaic image service.
//!
//! # Example
//!
//! ```rust,no_run
//! use mosaic_client::MosaicClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MosaicClient::new("http://localhost:5000")?;
//!
//!     let response = client.upload_file("photo.jpg").await?;
//!     println!("grayscale copy at {}", response.result_path);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs a router on an ephemeral port:
//!
//! ```rust,ignore
//! use mosaic_client::testing::TestServer;
//! use mosaic_api::{create_router, AppState};
//!
//! let server = TestServer::start(create_router(state)).await?;
//! let health = server.client.health().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::{guess_mime_type, MosaicClient};
pub use error::{MosaicClientError, Result};

// Re-export core types for convenience
pub use mosaic_core::UploadResponse;
