//! Pointer and multi-touch gesture interpretation.
//!
//! The interpreter receives the full list of active contacts on every input
//! event (not a diff) and turns consecutive lists into transform deltas:
//!
//! - **One contact**: pan. Each move emits the offset from the previous
//!   position.
//! - **Two contacts**: pinch and rotate. Each move emits the ratio of finger
//!   distances, the change in finger angle and the offset of the midpoint,
//!   all relative to the previous event (rolling baseline).
//! - **More than two**: handled as two, using the first two contacts in the
//!   order given.
//!
//! The first event of any one- or two-contact interaction only records a
//! baseline and emits nothing. Lifting all contacts returns to idle.
//!
//! Discrete zoom (mouse wheel) bypasses the state machine entirely; see
//! [`ZoomDirection`].

mod interpreter;

pub use interpreter::{GestureInterpreter, GestureState, PinchBaseline};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Scale factor applied by one discrete zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Scale factor applied by one discrete zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// A single active finger or pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier, stable while the contact stays down.
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Contact {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Which kind of interaction is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    /// No active contact.
    #[default]
    Idle,
    /// Exactly one contact; translation only.
    Panning,
    /// Two or more contacts; scale, rotation and midpoint translation.
    PinchRotate,
}

impl GestureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureMode::Idle => "idle",
            GestureMode::Panning => "panning",
            GestureMode::PinchRotate => "pinch-rotate",
        }
    }
}

/// A change to apply to the persistent transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDelta {
    /// One-finger drag.
    Translate { dx: f64, dy: f64 },
    /// Two-finger pinch/twist, including the midpoint's movement.
    Pinch {
        scale_factor: f64,
        rotation_delta_degrees: f64,
        dx: f64,
        dy: f64,
    },
    /// Wheel-style zoom step.
    Zoom { scale_factor: f64 },
}

/// Direction of a discrete zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a vertical wheel delta to a zoom direction.
    ///
    /// Scrolling up (negative delta) zooms in; anything else, including a
    /// zero delta, zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }

    pub fn scale_factor(self) -> f64 {
        match self {
            ZoomDirection::In => ZOOM_IN_FACTOR,
            ZoomDirection::Out => ZOOM_OUT_FACTOR,
        }
    }
}
