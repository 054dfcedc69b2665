//! Upload handler
//!
//! `POST /upload` takes a multipart body with a file part named `image`,
//! stores it, writes a grayscale copy and answers with the copy's path.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use mosaic_core::{ProcessError, UploadResponse, UploadedImage};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the multipart part carrying the image
pub const IMAGE_FIELD: &str = "image";

/// POST /upload
/// Store an image and convert it to grayscale
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // A body that is not multipart has no image in it either
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Request is not multipart");
        ApiError::MissingImage
    })?;

    let upload = read_image_field(&state, &mut multipart).await?;
    let result = state.store().process(&upload).await?;

    tracing::info!(
        filename = %upload.original_filename,
        storage_key = %upload.storage_key,
        size = upload.data.len(),
        result_path = %result.path.display(),
        width = result.width,
        height = result.height,
        "Image converted"
    );

    Ok(Json(UploadResponse::from(&result)))
}

/// Find the first `image` file part and read it fully
///
/// Parts without a filename are plain form values, not files, and are
/// skipped like any other field.
async fn read_image_field(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<UploadedImage, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ProcessError::MissingInput.into()),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart body");
                return Err(ProcessError::MissingInput.into());
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await?;
        return Ok(state.store().accept(&filename, data)?);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use mosaic_core::{ImageStore, StorageConfig};
    use tower::ServiceExt;

    const BOUNDARY: &str = "mosaic-test-boundary";

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, f
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::post("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        image::RgbImage::from_pixel(width, height, image::Rgb([90, 180, 30]))
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn test_state() -> (tempfile::TempDir, AppState) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::open(StorageConfig::rooted_at(tmp.path())).unwrap();
        (tmp, AppState::new(store))
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_upload_returns_result_path() {
        let (tmp, state) = test_state();
        let image = png(4, 3);

        let (status, body) = send(
            state,
            upload_request(multipart_body(&[("image", Some("pic.png"), &image)])),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let expected = tmp.path().join("results").join("result_pic.png");
        assert_eq!(body["result_path"], expected.display().to_string());
        assert_eq!(
            std::fs::read(tmp.path().join("uploads/pic.png")).unwrap(),
            image
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_400() {
        let (_tmp, state) = test_state();
        let (status, body) = send(
            state,
            upload_request(multipart_body(&[("photo", Some("pic.png"), &png(1, 1))])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "No image provided"}));
    }

    #[tokio::test]
    async fn test_image_without_filename_is_not_a_file() {
        let (_tmp, state) = test_state();
        let (status, body) = send(
            state,
            upload_request(multipart_body(&[("image", None, b"just text")])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image provided");
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_400() {
        let (_tmp, state) = test_state();
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"image": "x"}"#))
            .unwrap();

        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image provided");
    }

    #[tokio::test]
    async fn test_first_image_part_wins() {
        let (tmp, state) = test_state();
        let first = png(2, 2);
        let second = png(5, 5);

        let (status, _) = send(
            state,
            upload_request(multipart_body(&[
                ("note", None, b"hello"),
                ("image", Some("first.png"), &first),
                ("image", Some("second.png"), &second),
            ])),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(tmp.path().join("uploads/first.png").exists());
        assert!(!tmp.path().join("uploads/second.png").exists());
    }

    #[tokio::test]
    async fn test_empty_filename_rejected() {
        let (_tmp, state) = test_state();
        let (status, body) = send(
            state,
            upload_request(multipart_body(&[("image", Some(""), &png(1, 1))])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid filename");
    }

    #[tokio::test]
    async fn test_undecodable_upload_is_500() {
        let (tmp, state) = test_state();
        let (status, body) = send(
            state,
            upload_request(multipart_body(&[(
                "image",
                Some("fake.jpg"),
                b"these are not pixels",
            )])),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!tmp.path().join("results/result_fake.jpg").exists());
    }

    #[tokio::test]
    async fn test_body_limit_enforced_when_configured() {
        let (_tmp, state) = test_state();
        let state = state.with_body_limit(Some(64));
        let (status, _) = send(
            state,
            upload_request(multipart_body(&[("image", Some("big.png"), &png(64, 64))])),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
