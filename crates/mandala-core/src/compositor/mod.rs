//! Radial compositing: the clock/mandala render pass.
//!
//! The bitmap is drawn `copies` times around the surface center. Copy `i`
//! lives in a frame built the same way a canvas context would be:
//!
//! ```text
//! translate(center)               anchor at the surface center
//! rotate(i * 360 / copies)        fixed radial placement
//! translate(transform.x, .y)      user pan
//! rotate(transform.rotation)      user twist
//! scale(transform.scale)          user pinch
//! translate(-width/2, -height/2)  bitmap centered on the local origin
//! ```
//!
//! Because the user transform sits inside the radial rotation, a pan moves
//! every copy outward along its own spoke instead of shifting the whole
//! pattern.
//!
//! # Algorithm
//!
//! Each copy is drawn by inverse mapping: the frame is inverted, the
//! transformed bitmap's bounding box is clipped to the surface, and every
//! covered surface pixel center is mapped back into bitmap space, sampled and
//! composited source-over. Copies are composited in index order, so later
//! copies sit on top of earlier ones.
//!
//! Every call clears the surface and redraws all copies; there is no
//! incremental redraw.

mod sample;
mod surface;

pub use sample::InterpolationFilter;
pub use surface::{Surface, DEFAULT_SURFACE_SIDE, MAX_SURFACE_SIDE};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;
use crate::geometry::{Affine, Point};
use crate::transform::Transform;

/// Number of radial copies in a clock face.
pub const DEFAULT_COPIES: u32 = 12;

/// Render configuration.
///
/// Missing fields deserialize to their defaults, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Number of radial copies (0 is treated as 1).
    pub copies: u32,
    /// Interpolation filter used for drawing.
    pub filter: InterpolationFilter,
    /// Optional RGBA fill drawn before the copies; transparent when absent.
    pub background: Option<[u8; 4]>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            copies: DEFAULT_COPIES,
            filter: InterpolationFilter::default(),
            background: None,
        }
    }
}

impl RenderOptions {
    /// Copy count actually drawn.
    pub fn effective_copies(&self) -> u32 {
        self.copies.max(1)
    }
}

/// Forward frames (bitmap space to surface space) for every radial copy.
pub fn radial_frames(
    side: u32,
    bitmap_size: (u32, u32),
    transform: &Transform,
    copies: u32,
) -> Vec<Affine> {
    let copies = copies.max(1);
    let center = side as f64 / 2.0;
    let step = 360.0 / copies as f64;
    let (w, h) = (bitmap_size.0 as f64, bitmap_size.1 as f64);

    (0..copies)
        .map(|i| {
            Affine::IDENTITY
                .translate(center, center)
                .rotate((i as f64 * step).to_radians())
                .translate(transform.x, transform.y)
                .rotate(transform.rotation.to_radians())
                .scale(transform.scale)
                .translate(-w / 2.0, -h / 2.0)
        })
        .collect()
}

/// Clear `surface` and draw the radial composite of `bitmap`.
///
/// Without a bitmap, or with one whose buffer does not match its dimensions,
/// nothing is drawn and the surface is left as it was. Returns the number of copies drawn.
pub fn render_radial(
    surface: &mut Surface,
    bitmap: Option<&Bitmap>,
    transform: &Transform,
    options: &RenderOptions,
) -> u32 {
    let Some(bitmap) = bitmap else {
        return 0;
    };
    if !bitmap.is_valid() {
        warn!(
            "skipping {}x{} bitmap with {} byte buffer",
            bitmap.width,
            bitmap.height,
            bitmap.pixels.len()
        );
        return 0;
    }

    surface.clear(options.background);

    let frames = radial_frames(
        surface.side(),
        (bitmap.width, bitmap.height),
        transform,
        options.effective_copies(),
    );
    let mut drawn = 0;
    for frame in &frames {
        if draw_frame(surface, bitmap, frame, options.filter) {
            drawn += 1;
        }
    }

    debug!(
        "rendered {}/{} copies of {}x{} bitmap on {}px surface",
        drawn,
        frames.len(),
        bitmap.width,
        bitmap.height,
        surface.side()
    );
    drawn
}

/// Draw one copy. Returns `false` if the frame is degenerate.
fn draw_frame(
    surface: &mut Surface,
    bitmap: &Bitmap,
    frame: &Affine,
    filter: InterpolationFilter,
) -> bool {
    let Some(inverse) = frame.invert() else {
        debug!("skipping copy with singular frame {:?}", frame);
        return false;
    };

    let Some((x0, y0, x1, y1)) = covered_pixels(surface.side(), bitmap, frame, filter) else {
        // Entirely off-surface; nothing to do but not an error.
        return true;
    };

    for sy in y0..y1 {
        for sx in x0..x1 {
            let p = inverse.apply(Point::new(sx as f64 + 0.5, sy as f64 + 0.5));
            let sample = sample::sample(bitmap, p.x - 0.5, p.y - 0.5, filter);
            surface.blend(sx, sy, sample);
        }
    }
    true
}

/// Surface pixel range `[x0, x1) x [y0, y1)` that the framed bitmap can touch.
fn covered_pixels(
    side: u32,
    bitmap: &Bitmap,
    frame: &Affine,
    filter: InterpolationFilter,
) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = (bitmap.width as f64, bitmap.height as f64);
    let corners = [
        frame.apply(Point::new(0.0, 0.0)),
        frame.apply(Point::new(w, 0.0)),
        frame.apply(Point::new(0.0, h)),
        frame.apply(Point::new(w, h)),
    ];

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in &corners {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }

    // Filter footprint, converted from bitmap pixels to surface pixels.
    let margin = filter.support() * frame.determinant().abs().sqrt() + 1.0;
    let bounds = [min_x - margin, min_y - margin, max_x + margin, max_y + margin];
    if bounds.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let limit = side as f64;
    let x0 = bounds[0].clamp(0.0, limit).floor() as u32;
    let y0 = bounds[1].clamp(0.0, limit).floor() as u32;
    let x1 = bounds[2].clamp(0.0, limit).ceil() as u32;
    let y1 = bounds[3].clamp(0.0, limit).ceil() as u32;

    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}
