//! Stateless radial rendering binding.
//!
//! For interactive use prefer [`crate::MandalaApplet`], which keeps the
//! surface between frames. This entry point renders once into a fresh
//! surface, which suits previews and batch exports.

use crate::types::{filter_from_u8, JsBitmap};
use mandala_core::{compositor, RenderOptions, Surface, Transform};
use wasm_bindgen::prelude::*;

/// Render the radial composite of `bitmap` onto a new square surface.
///
/// # Arguments
///
/// * `bitmap` - Source image
/// * `side` - Surface side length in pixels (0 is treated as 1, capped at 8192)
/// * `x`, `y` - Translation from the surface center
/// * `scale` - Uniform scale (must be finite and positive)
/// * `rotation` - Rotation in degrees
/// * `copies` - Number of radial copies (0 is treated as 1)
/// * `filter` - Interpolation filter: 0=Nearest, 1=Bilinear, 2=Lanczos3
///
/// # Returns
///
/// A JsBitmap of size `side x side` with RGBA pixels.
///
/// # Errors
///
/// Returns an error if the bitmap buffer does not match its dimensions or
/// the transform is not valid.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_radial(
    bitmap: &JsBitmap,
    side: u32,
    x: f64,
    y: f64,
    scale: f64,
    rotation: f64,
    copies: u32,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    let source = bitmap
        .to_bitmap()
        .ok_or_else(|| JsValue::from_str("Invalid bitmap: pixel buffer does not match dimensions"))?;

    let transform = Transform::new(x, y, scale, rotation);
    if !transform.is_valid() {
        return Err(JsValue::from_str(&format!(
            "Invalid transform: scale={}, rotation={}",
            scale, rotation
        )));
    }

    let options = RenderOptions {
        copies,
        filter: filter_from_u8(filter),
        background: None,
    };
    let mut surface = Surface::new(side);
    compositor::render_radial(&mut surface, Some(&source), &transform, &options);

    let side = surface.side();
    Ok(JsBitmap::new(side, side, surface.into_pixels()))
}
