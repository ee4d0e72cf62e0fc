//! Square RGBA render target.

use log::debug;

use super::sample::Premultiplied;
use crate::encode::{encode_png, EncodeError};
use crate::geometry::Point;

/// Side length used when no container size is known.
pub const DEFAULT_SURFACE_SIDE: u32 = 500;

/// Largest side a surface will take; larger requests are clamped.
///
/// At 8192 the buffer is 256 MiB, which still fits a 32-bit address space.
pub const MAX_SURFACE_SIDE: u32 = 8192;

/// A square drawing surface with straight-alpha RGBA8 pixels.
///
/// The surface starts fully transparent. Its pixel buffer can be handed to a
/// browser `ImageData` or to [`encode_png`] unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    side: u32,
    pixels: Vec<u8>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_SIDE)
    }
}

impl Surface {
    /// Create a transparent surface.
    ///
    /// A zero side is bumped to 1 and sides above [`MAX_SURFACE_SIDE`] are
    /// clamped.
    pub fn new(side: u32) -> Self {
        let side = clamp_side(side);
        Self {
            side,
            pixels: vec![0; buffer_len(side)],
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Geometric center, in pixel coordinates.
    pub fn center(&self) -> Point {
        let half = self.side as f64 / 2.0;
        Point::new(half, half)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let idx = self.index(x, y);
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Resize to `side x side`, clearing the contents.
    ///
    /// Returns `true` if the side actually changed.
    pub fn resize(&mut self, side: u32) -> bool {
        let side = clamp_side(side);
        if side == self.side {
            return false;
        }
        debug!("surface resized {} -> {}", self.side, side);
        self.side = side;
        self.pixels = vec![0; buffer_len(side)];
        true
    }

    /// Resize to a square whose side equals the container width.
    ///
    /// Fractional widths are truncated the way a canvas `width` attribute is.
    /// A width that is not a positive finite number means the container size
    /// is unknown and selects [`DEFAULT_SURFACE_SIDE`]. Widths beyond
    /// [`MAX_SURFACE_SIDE`] are clamped.
    pub fn resize_to_container(&mut self, container_width: f64) -> bool {
        let side = if container_width.is_finite() && container_width > 0.0 {
            (container_width.floor() as u32).max(1)
        } else {
            DEFAULT_SURFACE_SIDE
        };
        self.resize(side)
    }

    /// Fill every pixel with `background`, or make it transparent.
    pub fn clear(&mut self, background: Option<[u8; 4]>) {
        match background {
            None => self.pixels.fill(0),
            Some(rgba) => {
                for px in self.pixels.chunks_exact_mut(4) {
                    px.copy_from_slice(&rgba);
                }
            }
        }
    }

    /// Composite a premultiplied sample over the pixel at `(x, y)`.
    #[inline]
    pub(crate) fn blend(&mut self, x: u32, y: u32, src: Premultiplied) {
        let src_a = src[3];
        if src_a <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx..idx + 4];

        // Source-over in premultiplied space, stored back as straight alpha.
        let dst_a = dst[3] as f64;
        let k = dst_a / 255.0;
        let inv_src = 1.0 - src_a / 255.0;
        let out_a = src_a + dst_a * inv_src;
        if out_a <= 0.0 {
            return;
        }
        for i in 0..3 {
            let out_c = src[i] + dst[i] as f64 * k * inv_src;
            dst[i] = (out_c * 255.0 / out_a).clamp(0.0, 255.0).round() as u8;
        }
        dst[3] = out_a.clamp(0.0, 255.0).round() as u8;
    }

    /// Encode the current contents as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        encode_png(&self.pixels, self.side, self.side)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.side as usize) + x as usize) * 4
    }
}

#[inline]
fn clamp_side(side: u32) -> u32 {
    side.clamp(1, MAX_SURFACE_SIDE)
}

#[inline]
fn buffer_len(side: u32) -> usize {
    (side as usize) * (side as usize) * 4
}
