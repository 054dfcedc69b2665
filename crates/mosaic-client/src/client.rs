//! Mosaic HTTP client implementation

use std::path::Path;
use std::time::Duration;

use mosaic_core::UploadResponse;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{MosaicClientError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Multipart part name the server looks for
const IMAGE_FIELD: &str = "image";

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// MIME type for an image filename, by extension
pub fn guess_mime_type(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Mosaic REST API client
#[derive(Debug, Clone)]
pub struct MosaicClient {
    client: Client,
    base_url: Url,
}

impl MosaicClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://localhost:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Upload image bytes under `filename` and get back the result location
    #[instrument(skip(self, data))]
    pub async fn upload_image(
        &self,
        filename: &str,
        data: impl Into<Vec<u8>>,
    ) -> Result<UploadResponse> {
        let url = self.base_url.join("/upload")?;
        let data = data.into();
        debug!("Uploading {} ({} bytes) to {}", filename, data.len(), url);

        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(guess_mime_type(filename))?;
        // Send the filename as-is rather than as an RFC 5987 `filename*`
        let form = Form::new().percent_encode_noop().part(IMAGE_FIELD, part);

        let response = self.client.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    /// Read a file from disk and upload it under its own file name
    #[instrument(skip(self, path))]
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<UploadResponse> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                MosaicClientError::InvalidFilename(path.display().to_string())
            })?
            .to_string();

        let data = tokio::fs::read(path).await?;
        self.upload_image(&filename, data).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and parse JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| MosaicClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    /// Extract error from failed response
    async fn extract_error(&self, response: reqwest::Response) -> MosaicClientError {
        let status = response.status();
        self.extract_error_from_status(response, status).await
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> MosaicClientError {
        // Try to parse error response body
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {}", status),
        };

        classify_error(status, message)
    }
}

fn classify_error(status: StatusCode, message: String) -> MosaicClientError {
    match status {
        StatusCode::BAD_REQUEST if message == "No image provided" => {
            MosaicClientError::MissingImage
        }
        StatusCode::BAD_REQUEST if message == "Invalid filename" => {
            MosaicClientError::InvalidFilename(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => MosaicClientError::Timeout,
        _ => MosaicClientError::server_error(status.as_u16(), message),
    }
}
