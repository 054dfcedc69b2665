//! Grayscale conversion
//!
//! Uses the `image` crate's default luminance conversion
//! ([`DynamicImage::to_luma8`]): each output pixel is a fixed weighted sum of
//! the input's red, green and blue channels, alpha is discarded, and 8-bit
//! luminance input passes through unchanged.
//!
//! Some encoders (GIF, QOI) have no single-channel mode; for those the
//! result is written as RGB with all three channels set to the luminance.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageError, ImageFormat, ImageReader};

use crate::error::{ProcessError, ProcessResult};
use crate::models::ResultImage;

/// Convert a decoded image to single-channel 8-bit luminance
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Decode the image stored at `path`, detecting the format from its content
pub fn decode_file(path: &Path) -> ProcessResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| ProcessError::storage(path, e))?
        .with_guessed_format()
        .map_err(|e| ProcessError::storage(path, e))?;

    reader.decode().map_err(|source| ProcessError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode `input`, convert it to grayscale and write it to `output`
///
/// The output format follows the extension of `output`. This is blocking
/// work; async callers should run it on the blocking pool.
pub fn convert_file(input: &Path, output: &Path) -> ProcessResult<ResultImage> {
    let decoded = decode_file(input)?;
    let gray = to_grayscale(&decoded);
    let (width, height) = gray.dimensions();

    write_gray(gray, output).map_err(|source| match source {
        ImageError::IoError(e) => ProcessError::storage(output, e),
        source => ProcessError::Encode {
            path: output.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        width,
        height,
        "Converted image to grayscale"
    );

    Ok(ResultImage {
        path: output.to_path_buf(),
        width,
        height,
    })
}

/// Encoders that reject `L8` input
fn needs_rgb(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Gif | ImageFormat::Qoi)
}

/// Save luminance pixels in the format named by the extension of `output`
fn write_gray(gray: GrayImage, output: &Path) -> Result<(), ImageError> {
    match ImageFormat::from_path(output) {
        Ok(format) if needs_rgb(format) => DynamicImage::ImageLuma8(gray)
            .to_rgb8()
            .save_with_format(output, format),
        _ => gray.save(output),
    }
}
