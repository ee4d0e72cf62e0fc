//! Export encoding.
//!
//! Rendered surfaces are exported as RGBA PNG so the transparent background
//! around the mandala survives the download.
//!
//! # Examples
//!
//! ```ignore
//! use mandala_core::encode::encode_png;
//!
//! let pixels = vec![0u8; 500 * 500 * 4]; // Transparent surface
//! let png_bytes = encode_png(&pixels, 500, 500).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
