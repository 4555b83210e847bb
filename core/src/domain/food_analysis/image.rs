use std::io::Cursor;

use image::{ImageFormat, ImageReader, codecs::jpeg::JpegEncoder, imageops::FilterType};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::value_objects::PreparedImage,
};

pub const MAX_SOURCE_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 1024;
pub const COMPRESSION_QUALITY: u8 = 85;

/// Target size keeping the aspect ratio with the longer edge capped at `max`.
pub fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = |long: u32, short: u32| -> u32 {
        ((short as f64 * max as f64) / long as f64).round().max(1.0) as u32
    };

    if width > height {
        if width > max {
            return (max, scale(width, height));
        }
    } else if height > max {
        return (scale(height, width), max);
    }

    (width, height)
}

/// Downscales and re-encodes an uploaded photo as JPEG before it is sent for analysis.
pub fn prepare_image(source: &[u8]) -> Result<PreparedImage, CoreError> {
    if source.len() > MAX_SOURCE_BYTES {
        return Err(CoreError::Validation(
            "File is too large. Please select an image under 10MB.".to_string(),
        ));
    }

    let decoded = ImageReader::new(Cursor::new(source))
        .with_guessed_format()
        .map_err(|e| {
            error!("Failed to sniff image format: {}", e);
            CoreError::Validation("Failed to read the image file.".to_string())
        })?
        .decode()
        .map_err(|e| {
            error!("Failed to decode image: {}", e);
            CoreError::Validation("Failed to read the image file.".to_string())
        })?;

    let (width, height) =
        scaled_dimensions(decoded.width(), decoded.height(), MAX_IMAGE_DIMENSION);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };
    let rgb = resized.to_rgb8();

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, COMPRESSION_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| {
            error!("Failed to encode image as JPEG: {}", e);
            CoreError::InternalServerError
        })?;

    Ok(PreparedImage {
        data,
        mime_type: ImageFormat::Jpeg.to_mime_type().to_string(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_scaled_dimensions_caps_longer_edge() {
        assert_eq!(scaled_dimensions(2048, 1024, 1024), (1024, 512));
        assert_eq!(scaled_dimensions(1000, 3000, 1024), (341, 1024));
        assert_eq!(scaled_dimensions(800, 600, 1024), (800, 600));
        assert_eq!(scaled_dimensions(1024, 1024, 1024), (1024, 1024));
    }

    #[test]
    fn test_prepare_image_downscales_and_outputs_jpeg() {
        let prepared = prepare_image(&png_bytes(1600, 400)).unwrap();
        assert_eq!((prepared.width, prepared.height), (1024, 256));
        assert_eq!(prepared.mime_type, "image/jpeg");
        assert_eq!(&prepared.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_prepare_image_rejects_garbage_and_oversize() {
        assert!(matches!(
            prepare_image(b"definitely not an image"),
            Err(CoreError::Validation(_))
        ));
        let huge = vec![0u8; MAX_SOURCE_BYTES + 1];
        assert!(matches!(prepare_image(&huge), Err(CoreError::Validation(_))));
    }
}
