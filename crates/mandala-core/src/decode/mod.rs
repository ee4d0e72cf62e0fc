//! Source image decoding.
//!
//! The mandala maker accepts PNG uploads only; transparency in the source is
//! what lets the radial copies overlap into a pattern instead of covering
//! each other with opaque rectangles. Decoded images are always RGBA8.
//!
//! # Examples
//!
//! ```ignore
//! use mandala_core::decode::decode_png;
//!
//! let png_bytes = std::fs::read("petal.png").unwrap();
//! let bitmap = decode_png(&png_bytes).unwrap();
//! println!("Decoded {}x{} image", bitmap.width, bitmap.height);
//! ```

mod png;
mod types;

pub use png::{decode_png, is_png};
pub use types::{Bitmap, DecodeError};
