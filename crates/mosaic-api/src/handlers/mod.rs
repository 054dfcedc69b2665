//! HTTP request handlers for the mosaic API

pub mod upload;
