//! Command implementations for the mosaic CLI

pub mod health;
pub mod upload;

pub use health::health;
pub use upload::upload;
