//! E2E tests for the upload API using mosaic-client
//!
//! Each test starts the router on an ephemeral port with storage rooted in a
//! temporary directory, then talks to it over real HTTP.

use std::io::Cursor;
use std::path::Path;

use image::{ColorType, ImageFormat, Rgb, RgbImage};
use mosaic_api::{create_router, AppState};
use mosaic_client::testing::TestServer;
use mosaic_client::MosaicClientError;
use mosaic_core::{ImageStore, StorageConfig};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Helpers
// =============================================================================

async fn create_test_server(root: &Path) -> TestServer {
    let store = ImageStore::open(StorageConfig::rooted_at(root)).unwrap();
    TestServer::start(create_router(AppState::new(store)))
        .await
        .unwrap()
}

fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn checkerboard(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    assert_eq!(server.client.health().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_upload_png_produces_single_channel_result() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;
    let bytes = encode(&checkerboard(9, 7), ImageFormat::Png);

    let response = server
        .client
        .upload_image("board.png", bytes.clone())
        .await
        .unwrap();

    // Input stored verbatim
    assert_eq!(
        std::fs::read(tmp.path().join("uploads/board.png")).unwrap(),
        bytes
    );

    // Reported path decodes to a same-sized luminance image
    let result = image::open(&response.result_path).unwrap();
    assert_eq!(result.color(), ColorType::L8);
    assert_eq!((result.width(), result.height()), (9, 7));
    assert!(response.result_path.ends_with("result_board.png"));
}

#[tokio::test]
async fn test_upload_jpeg() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;
    let bytes = encode(&checkerboard(16, 16), ImageFormat::Jpeg);

    let response = server
        .client
        .upload_image("photo.jpg", bytes)
        .await
        .unwrap();

    let result = image::open(&response.result_path).unwrap();
    assert_eq!(result.color(), ColorType::L8);
    assert_eq!((result.width(), result.height()), (16, 16));
}

#[tokio::test]
async fn test_upload_file_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    let source = tmp.path().join("local-shot.png");
    checkerboard(3, 3).save(&source).unwrap();

    let response = server.client.upload_file(&source).await.unwrap();
    assert!(response.result_path.ends_with("result_local-shot.png"));
}

#[tokio::test]
async fn test_same_filename_last_write_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    let black = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
    let white = RgbImage::from_pixel(2, 6, Rgb([255, 255, 255]));

    server
        .client
        .upload_image("dup.png", encode(&black, ImageFormat::Png))
        .await
        .unwrap();
    let response = server
        .client
        .upload_image("dup.png", encode(&white, ImageFormat::Png))
        .await
        .unwrap();

    let result = image::open(&response.result_path).unwrap().to_luma8();
    assert_eq!(result.dimensions(), (2, 6));
    assert!(result.pixels().all(|p| p[0] == 255));
}

#[tokio::test]
async fn test_non_image_bytes_are_a_server_fault() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    let err = server
        .client
        .upload_image("holiday.jpg", b"just some text".to_vec())
        .await
        .unwrap_err();

    match err {
        MosaicClientError::ServerError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal server error");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_image_field_exact_response() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    // The typed client always sends the field, so go through reqwest directly
    let form = reqwest::multipart::Form::new().text("caption", "no file here");
    let response = server
        .client
        .http_client()
        .post(format!("{}/upload", server.base_url()))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "No image provided"}));
}

#[tokio::test]
async fn test_traversal_filename_stays_in_upload_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;
    let bytes = encode(&checkerboard(2, 2), ImageFormat::Png);

    let response = server
        .client
        .upload_image("../../escape.png", bytes)
        .await
        .unwrap();

    assert!(tmp.path().join("uploads/escape.png").exists());
    assert!(!tmp.path().join("escape.png").exists());
    assert_eq!(
        Path::new(&response.result_path),
        tmp.path().join("results/result_escape.png")
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let tmp = tempfile::tempdir().unwrap();
    let server = create_test_server(tmp.path()).await;

    let response = server
        .client
        .http_client()
        .get(format!("{}/health", server.base_url()))
        .header("Origin", "http://elsewhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
