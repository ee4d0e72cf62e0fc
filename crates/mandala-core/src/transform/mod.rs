//! The persistent image transform and its accumulator.
//!
//! # Transform Order
//!
//! The transform describes the image pose relative to the surface center and
//! is applied inside each radial copy's frame in this order:
//! 1. Translate by `(x, y)`
//! 2. Rotate by `rotation` degrees
//! 3. Scale uniformly by `scale`
//!
//! # Coordinate System
//!
//! - Translation is in surface pixels, y grows downwards
//! - Rotation is in degrees, positive = clockwise on screen, never wrapped
//! - Scale is a positive multiplier, 1.0 = native bitmap size

mod accumulator;

pub use accumulator::TransformAccumulator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a delta would corrupt the transform.
///
/// These never reach the user: the offending delta is dropped and the
/// previous transform is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The scale factor would make the scale zero, negative or non-finite.
    #[error("Degenerate scale factor {factor} (scale would become {result})")]
    DegenerateScale { factor: f64, result: f64 },

    /// A translation or rotation component is NaN or infinite.
    #[error("Non-finite {component} delta: {value}")]
    NonFiniteDelta { component: &'static str, value: f64 },
}

/// Pose of the loaded image: translation, uniform scale and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal offset from the surface center, in pixels.
    pub x: f64,
    /// Vertical offset from the surface center, in pixels.
    pub y: f64,
    /// Uniform scale factor (always > 0).
    pub scale: f64,
    /// Rotation in degrees (unbounded).
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
    };

    pub fn new(x: f64, y: f64, scale: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            scale,
            rotation,
        }
    }

    /// Check if this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// All fields finite and scale strictly positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }
}
