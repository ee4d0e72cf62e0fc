//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_png } from '@mandala/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_png(bytes);
//! console.log(`Decoded ${bitmap.width}x${bitmap.height}`);
//! ```

use crate::types::JsBitmap;
use mandala_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG image from bytes into an RGBA bitmap.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not PNG data (other formats are rejected)
/// - The PNG is corrupted or truncated
/// - The image has zero width or height
#[wasm_bindgen]
pub fn decode_png(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_png(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether bytes start with the PNG signature.
#[wasm_bindgen]
pub fn is_png_file(bytes: &[u8]) -> bool {
    decode::is_png(bytes)
}
