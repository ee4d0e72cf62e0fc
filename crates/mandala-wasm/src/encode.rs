//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_bitmap`] - Encode a JsBitmap to PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@mandala/wasm';
//!
//! const png = encode_png(pixels, 500, 500);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::JsBitmap;
use mandala_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsBitmap to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_bitmap(bitmap: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode_png(&bitmap.pixels(), bitmap.width(), bitmap.height())
}
