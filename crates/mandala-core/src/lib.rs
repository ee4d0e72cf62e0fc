//! Mandala Core - gesture-driven radial compositing
//!
//! This crate turns pointer and multi-touch input into a persistent image
//! transform (pan, uniform scale, rotation) and renders the transformed image
//! twelve times around the center of a square surface, producing a
//! clock-face / mandala pattern that can be exported as PNG.
//!
//! # Pipeline
//!
//! ```text
//! contacts -> gesture::GestureInterpreter -> GestureDelta
//!          -> transform::TransformAccumulator -> Transform
//!          -> compositor::render_radial -> Surface -> encode::encode_png
//! ```
//!
//! [`session::MandalaSession`] bundles the whole pipeline behind a handful of
//! input handlers and an explicit `render()` call.
//!
//! All operations are synchronous and single-threaded; nothing blocks.

pub mod compositor;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod gesture;
pub mod session;
pub mod transform;

pub use compositor::{
    radial_frames, render_radial, InterpolationFilter, RenderOptions, Surface, DEFAULT_COPIES,
    DEFAULT_SURFACE_SIDE, MAX_SURFACE_SIDE,
};
pub use decode::{decode_png, is_png, Bitmap, DecodeError};
pub use encode::{encode_png, EncodeError};
pub use geometry::{angle, distance, midpoint, Affine, Point};
pub use gesture::{Contact, GestureDelta, GestureInterpreter, GestureMode, ZoomDirection};
pub use session::{MandalaSession, SessionError};
pub use transform::{Transform, TransformAccumulator, TransformError};
