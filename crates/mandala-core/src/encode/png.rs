//! PNG encoding for export.
//!
//! The composite keeps its transparency, so export is lossless RGBA PNG
//! through the `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, straight alpha, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
///
/// PNG-encoded bytes on success, or an error if encoding fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_png;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let png = encode_png(&pixels, 100, 100).unwrap();

        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        // IEND chunk type sits 8 bytes from the end (before its CRC).
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_encode_png_keeps_transparency() {
        let pixels = vec![
            255, 0, 0, 255, // opaque red
            0, 0, 255, 0, // fully transparent
            0, 255, 0, 128, // half green
            0, 0, 0, 0,
        ];
        let png = encode_png(&pixels, 2, 2).unwrap();
        let decoded = decode_png(&png).unwrap();
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn test_encode_png_invalid_dimensions() {
        let pixels = vec![0u8; 400];
        let result = encode_png(&pixels, 0, 100);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 100
            })
        ));

        let result = encode_png(&pixels, 100, 0);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![0u8; 50 * 50 * 4];
        let result = encode_png(&pixels, 100, 100);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 40000,
                actual: 10000
            })
        ));
    }

    #[test]
    fn test_encode_png_rgb_buffer_rejected() {
        // An RGB buffer is three quarters the expected length.
        let pixels = vec![0u8; 10 * 10 * 3];
        assert!(encode_png(&pixels, 10, 10).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (10) must be non-zero"
        );
    }
}
