//! The interactive editing session.
//!
//! [`MandalaSession`] owns every piece of mutable state: the gesture
//! interpreter, the transform accumulator, the live bitmap and the render
//! surface. Input handlers return whether the transform changed; rendering is
//! a separate, explicit call so the caller decides when to redraw (for
//! example once per animation frame).
//!
//! ```ignore
//! let mut session = MandalaSession::new(RenderOptions::default());
//! session.load_png(&bytes)?;
//! if session.on_contacts_changed(&contacts) {
//!     let pixels = session.render().pixels();
//!     // hand pixels to the canvas
//! }
//! ```

use log::{debug, warn};
use thiserror::Error;

use crate::compositor::{render_radial, InterpolationFilter, RenderOptions, Surface};
use crate::decode::{decode_png, Bitmap, DecodeError};
use crate::encode::EncodeError;
use crate::gesture::{Contact, GestureDelta, GestureInterpreter, GestureMode, ZoomDirection};
use crate::transform::{Transform, TransformAccumulator};

/// Contact id used for the mouse pointer.
pub const MOUSE_CONTACT_ID: u32 = u32::MAX;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loading the source image failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Encoding the export failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The bitmap's buffer does not hold `width * height` RGBA pixels.
    #[error("Invalid bitmap: {width}x{height} with {len} byte buffer")]
    InvalidBitmap { width: u32, height: u32, len: usize },

    /// Export was requested before any image was loaded.
    #[error("No image loaded")]
    NoImage,
}

/// Gesture, transform, bitmap and surface for one editing session.
#[derive(Debug, Clone, Default)]
pub struct MandalaSession {
    interpreter: GestureInterpreter,
    accumulator: TransformAccumulator,
    bitmap: Option<Bitmap>,
    surface: Surface,
    options: RenderOptions,
    mouse_down: bool,
}

impl MandalaSession {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn transform(&self) -> Transform {
        self.accumulator.transform()
    }

    pub fn mode(&self) -> GestureMode {
        self.interpreter.mode()
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.bitmap.is_some()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Replace the live bitmap and start over from the identity transform.
    ///
    /// A bitmap that is empty or whose buffer length disagrees with its
    /// dimensions is rejected and the previous state is kept.
    pub fn load_bitmap(&mut self, bitmap: Bitmap) -> Result<(), SessionError> {
        if !bitmap.is_valid() {
            return Err(SessionError::InvalidBitmap {
                width: bitmap.width,
                height: bitmap.height,
                len: bitmap.pixels.len(),
            });
        }
        debug!("loaded {}x{} bitmap", bitmap.width, bitmap.height);
        self.bitmap = Some(bitmap);
        self.accumulator.reset();
        self.interpreter.reset();
        self.mouse_down = false;
        Ok(())
    }

    /// Decode PNG bytes and load the result.
    ///
    /// On failure the previous bitmap and transform are kept.
    pub fn load_png(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let bitmap = decode_png(bytes)?;
        self.load_bitmap(bitmap)
    }

    /// Feed the complete list of active touch contacts.
    ///
    /// Returns `true` if the transform changed.
    pub fn on_contacts_changed(&mut self, contacts: &[Contact]) -> bool {
        let delta = self.interpreter.on_contacts_changed(contacts);
        self.apply(delta)
    }

    /// Discrete zoom step. Returns `true` if the transform changed.
    pub fn on_discrete_zoom(&mut self, direction: ZoomDirection) -> bool {
        let delta = self.interpreter.on_discrete_zoom(direction);
        self.apply(Some(delta))
    }

    /// Mouse wheel; negative `delta_y` zooms in.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        self.on_discrete_zoom(ZoomDirection::from_wheel_delta(delta_y))
    }

    /// Mouse button pressed: a single contact appears.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.mouse_down = true;
        self.on_contacts_changed(&[Contact::new(MOUSE_CONTACT_ID, x, y)])
    }

    /// Mouse moved; ignored unless the button is held.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.mouse_down {
            return false;
        }
        self.on_contacts_changed(&[Contact::new(MOUSE_CONTACT_ID, x, y)])
    }

    /// Mouse released or left the surface.
    pub fn on_pointer_up(&mut self) -> bool {
        if !self.mouse_down {
            return false;
        }
        self.mouse_down = false;
        self.on_contacts_changed(&[])
    }

    /// Match the surface to its container's width.
    ///
    /// Returns `true` if the surface side changed (and so needs a redraw).
    pub fn resize(&mut self, container_width: f64) -> bool {
        self.surface.resize_to_container(container_width)
    }

    /// Redraw the surface from scratch with the current state.
    ///
    /// Without a bitmap the surface is left untouched.
    pub fn render(&mut self) -> &Surface {
        let transform = self.accumulator.transform();
        render_radial(
            &mut self.surface,
            self.bitmap.as_ref(),
            &transform,
            &self.options,
        );
        &self.surface
    }

    /// Render at export quality and encode as PNG.
    ///
    /// Uses a fresh surface of the current side with the Lanczos3 filter;
    /// the interactive surface is not modified.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        let bitmap = self.bitmap.as_ref().ok_or(SessionError::NoImage)?;
        let options = RenderOptions {
            filter: InterpolationFilter::Lanczos3,
            ..self.options
        };

        let mut surface = Surface::new(self.surface.side());
        render_radial(
            &mut surface,
            Some(bitmap),
            &self.accumulator.transform(),
            &options,
        );
        let png = surface.to_png()?;
        debug!("exported {} byte PNG", png.len());
        Ok(png)
    }

    fn apply(&mut self, delta: Option<GestureDelta>) -> bool {
        let Some(delta) = delta else {
            return false;
        };
        match self.accumulator.apply(delta) {
            Ok(()) => true,
            Err(e) => {
                warn!("dropped gesture delta {:?}: {}", delta, e);
                false
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any drag moves the image by exactly the pointer displacement.
        #[test]
        fn prop_drag_translates_exactly(
            start in (-1000i32..1000, -1000i32..1000),
            moves in prop::collection::vec((-50i32..=50, -50i32..=50), 1..30),
        ) {
            let mut session = MandalaSession::default();
            let (mut x, mut y) = (start.0 as f64, start.1 as f64);
            session.on_pointer_down(x, y);
            for &(dx, dy) in &moves {
                x += dx as f64;
                y += dy as f64;
                session.on_pointer_move(x, y);
            }
            session.on_pointer_up();

            let t = session.transform();
            prop_assert_eq!(t.x, x - start.0 as f64);
            prop_assert_eq!(t.y, y - start.1 as f64);
            prop_assert_eq!(t.scale, 1.0);
            prop_assert_eq!(t.rotation, 0.0);
        }

        /// Property: Arbitrary contact streams never corrupt the transform.
        #[test]
        fn prop_transform_stays_valid(
            events in prop::collection::vec(
                prop::collection::vec((0.0f64..50.0, 0.0f64..50.0), 0..4),
                1..60,
            ),
        ) {
            let mut session = MandalaSession::default();
            for contacts in &events {
                // Coarse grid makes coincident contacts likely.
                let contacts: Vec<Contact> = contacts
                    .iter()
                    .enumerate()
                    .map(|(i, &(x, y))| Contact::new(i as u32, x.floor(), y.floor()))
                    .collect();
                session.on_contacts_changed(&contacts);
                prop_assert!(session.transform().is_valid());
            }
        }
    }
}
