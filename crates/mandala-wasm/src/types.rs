//! WASM-compatible wrapper types for image data and input.
//!
//! This module provides JavaScript-friendly types that wrap the core Mandala
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use mandala_core::{Bitmap, Contact, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// A decoded RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsBitmap {
    pub(crate) fn from_bitmap(img: Bitmap) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core Bitmap.
    ///
    /// Returns `None` when the bitmap is empty or the buffer length does not
    /// match the dimensions.
    pub(crate) fn to_bitmap(&self) -> Option<Bitmap> {
        let bitmap = Bitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        };
        bitmap.is_valid().then_some(bitmap)
    }
}

/// Convert a u8 filter type value to the core InterpolationFilter enum.
///
/// Values:
/// - 0 = Nearest (fastest, blocky)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> InterpolationFilter {
    match value {
        0 => InterpolationFilter::Nearest,
        2 => InterpolationFilter::Lanczos3,
        _ => InterpolationFilter::Bilinear,
    }
}

/// Unpack a flat `[id, x, y, id, x, y, ...]` array into contacts.
///
/// A trailing partial triple is ignored. Ids are truncated to `u32`.
pub(crate) fn contacts_from_flat(values: &[f64]) -> Vec<Contact> {
    values
        .chunks_exact(3)
        .map(|c| Contact::new(c[0] as u32, c[1], c[2]))
        .collect()
}
