//! PNG decoding for source images.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use log::debug;

use super::{Bitmap, DecodeError};

/// Decode a PNG image from bytes into an RGBA bitmap.
///
/// Any PNG color type (grayscale, palette, RGB, with or without alpha, 16-bit)
/// is converted to 8-bit RGBA.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are not a PNG.
/// Returns `DecodeError::CorruptedFile` if the PNG is corrupted or truncated.
/// Returns `DecodeError::EmptyImage` if the image has zero width or height.
pub fn decode_png(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => {}
        Ok(other) => return Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
        Err(_) => return Err(DecodeError::UnsupportedFormat("unknown".to_string())),
    }

    let reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png);
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let bitmap = Bitmap::from_rgba_image(img.into_rgba8());
    if bitmap.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    debug!("decoded {}x{} PNG", bitmap.width, bitmap.height);
    Ok(bitmap)
}

/// Check whether bytes start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    matches!(image::guess_format(bytes), Ok(ImageFormat::Png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn encode(pixels: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(pixels, width, height, color)
            .unwrap();
        out
    }

    #[test]
    fn test_is_png() {
        assert!(is_png(&encode(&[0u8; 4], 1, 1, ExtendedColorType::Rgba8)));
        assert!(!is_png(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!is_png(b"GIF89a"));
        assert!(!is_png(&[]));
    }

    #[test]
    fn test_decode_rgba_png() {
        let pixels: Vec<u8> = (0..4 * 3 * 4).map(|i| i as u8).collect();
        let bytes = encode(&pixels, 4, 3, ExtendedColorType::Rgba8);

        let bitmap = decode_png(&bytes).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (4, 3));
        assert_eq!(bitmap.pixels, pixels);
    }

    #[test]
    fn test_decode_rgb_png_is_opaque() {
        let bytes = encode(&[200u8; 2 * 2 * 3], 2, 2, ExtendedColorType::Rgb8);
        let bitmap = decode_png(&bytes).unwrap();
        assert_eq!(bitmap.pixel(1, 1), Some([200, 200, 200, 255]));
    }

    #[test]
    fn test_decode_grayscale_png() {
        let bytes = encode(&[0u8, 255], 2, 1, ExtendedColorType::L8);
        let bitmap = decode_png(&bytes).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(bitmap.pixel(1, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_non_png_rejected() {
        // JPEG SOI marker.
        let result = decode_png(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decode_png(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(decode_png(&[]).is_err());
    }

    #[test]
    fn test_truncated_png() {
        let bytes = encode(&[9u8; 16 * 16 * 4], 16, 16, ExtendedColorType::Rgba8);
        let result = decode_png(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }
}
