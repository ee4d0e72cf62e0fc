//! Mandala WASM - WebAssembly bindings for the mandala maker
//!
//! This crate exposes the mandala-core pipeline to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `session` - [`MandalaApplet`], the stateful interactive editor
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - PNG decoding bindings
//! - `encode` - PNG encoding bindings
//! - `compositor` - One-shot radial rendering
//! - `logger` - Forwards `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { MandalaApplet, set_log_level } from '@mandala/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const applet = new MandalaApplet(undefined);
//! applet.load_png(new Uint8Array(await file.arrayBuffer()));
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod compositor;
mod decode;
mod encode;
mod logger;
mod session;
mod types;

// Re-export public types
pub use compositor::render_radial;
pub use decode::{decode_png, is_png_file};
pub use encode::{encode_png, encode_png_from_bitmap};
pub use session::MandalaApplet;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(LevelFilter::Warn);
}

/// Set the console log level: "off", "error", "warn", "info", "debug" or "trace".
///
/// Unknown values are rejected and leave the level unchanged.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::init(filter);
    Ok(())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    level.parse().ok()
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
