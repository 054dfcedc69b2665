//! mosaic-core - Core types for the mosaic image service
//!
//! This crate holds everything the HTTP layer needs but that has nothing to
//! do with HTTP: the error taxonomy, storage configuration, the policy that
//! turns an untrusted client filename into a storage key, the on-disk image
//! store, and the grayscale conversion itself.

pub mod config;
pub mod convert;
pub mod error;
pub mod models;
pub mod naming;
pub mod store;

pub use config::{NamingPolicy, StorageConfig};
pub use convert::{convert_file, to_grayscale};
pub use error::{ProcessError, ProcessResult};
pub use models::*;
pub use naming::{result_name, storage_key};
pub use store::ImageStore;
