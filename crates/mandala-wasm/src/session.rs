//! Interactive applet binding.
//!
//! [`MandalaApplet`] owns one [`MandalaSession`]. The host forwards DOM events
//! to it and redraws its canvas from `render()` whenever an input handler
//! returns `true`.
//!
//! # Example
//!
//! ```typescript
//! import { MandalaApplet } from '@mandala/wasm';
//!
//! const applet = new MandalaApplet(undefined);
//! applet.resize(container.clientWidth);
//! applet.load_png(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.addEventListener('touchmove', (e) => {
//!   const flat = [...e.touches].flatMap((t) => [t.identifier, t.clientX - left, t.clientY - top]);
//!   if (applet.on_touches(new Float64Array(flat))) draw();
//! });
//!
//! function draw() {
//!   const side = applet.side;
//!   const data = new ImageData(new Uint8ClampedArray(applet.render()), side, side);
//!   ctx.putImageData(data, 0, 0);
//! }
//! ```

use crate::types::{contacts_from_flat, JsBitmap};
use mandala_core::{MandalaSession, RenderOptions, ZoomDirection};
use wasm_bindgen::prelude::*;

fn options_from_js(value: JsValue) -> Result<RenderOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid render options: {}", e)))
}

/// A gesture-driven mandala editor.
#[wasm_bindgen]
pub struct MandalaApplet {
    inner: MandalaSession,
}

#[wasm_bindgen]
impl MandalaApplet {
    /// Create an applet.
    ///
    /// # Arguments
    /// * `options` - `{ copies?: number, filter?: "nearest" | "bilinear" | "lanczos3",
    ///   background?: [r, g, b, a] }`, or `undefined` for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MandalaApplet, JsValue> {
        Ok(MandalaApplet {
            inner: MandalaSession::new(options_from_js(options)?),
        })
    }

    /// Replace the render options.
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.inner.set_options(options_from_js(options)?);
        Ok(())
    }

    /// Current render options as a plain object.
    pub fn options(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.options())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode and load a PNG upload. On error the previous image is kept.
    pub fn load_png(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .load_png(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load an already-decoded bitmap.
    pub fn load_bitmap(&mut self, bitmap: &JsBitmap) -> Result<(), JsValue> {
        let bitmap = bitmap
            .to_bitmap()
            .ok_or_else(|| JsValue::from_str("Invalid bitmap: pixel buffer does not match dimensions"))?;
        self.inner
            .load_bitmap(bitmap)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Current gesture mode: "idle", "panning" or "pinch-rotate".
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().as_str().to_string()
    }

    /// Current transform as `{ x, y, scale, rotation }`.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.transform())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Feed the full list of active touches as `[id, x, y, id, x, y, ...]`.
    ///
    /// Returns `true` if the transform changed.
    pub fn on_touches(&mut self, flat: &[f64]) -> bool {
        self.inner.on_contacts_changed(&contacts_from_flat(flat))
    }

    pub fn on_mouse_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.on_pointer_down(x, y)
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.on_pointer_move(x, y)
    }

    /// Mouse released or left the canvas.
    pub fn on_mouse_up(&mut self) -> bool {
        self.inner.on_pointer_up()
    }

    /// Wheel event; negative `delta_y` zooms in by 10%, anything else zooms out.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        self.inner.on_wheel(delta_y)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.inner.on_discrete_zoom(ZoomDirection::In)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.inner.on_discrete_zoom(ZoomDirection::Out)
    }

    /// Size the surface to the container width (500 when unknown).
    pub fn resize(&mut self, container_width: f64) -> bool {
        self.inner.resize(container_width)
    }

    /// Surface side length in pixels.
    #[wasm_bindgen(getter)]
    pub fn side(&self) -> u32 {
        self.inner.surface().side()
    }

    /// Redraw and return the surface's RGBA pixels (a copy).
    pub fn render(&mut self) -> Vec<u8> {
        self.inner.render().pixels().to_vec()
    }

    /// Render at export quality and encode as PNG for download.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
