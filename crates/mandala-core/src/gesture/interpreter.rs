//! The gesture state machine.
//!
//! [`GestureState`] carries both the mode and the baseline of the current
//! interaction, so a mode can never be paired with the wrong session data.
//! [`GestureState::advance`] is a pure transition; [`GestureInterpreter`]
//! owns the state between events.

use log::debug;

use super::{Contact, GestureDelta, GestureMode, ZoomDirection};
use crate::geometry::{angle, distance, midpoint, Point};

/// Baseline of a two-contact interaction, refreshed after every event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    /// Distance between the two contacts.
    pub distance: f64,
    /// Angle from the first contact to the second, in radians.
    pub angle: f64,
    /// Midpoint of the two contacts.
    pub midpoint: Point,
}

impl PinchBaseline {
    pub fn capture(first: Point, second: Point) -> Self {
        Self {
            distance: distance(first, second),
            angle: angle(first, second),
            midpoint: midpoint(first, second),
        }
    }

    /// Delta that takes this baseline to `current`.
    ///
    /// A zero baseline distance yields an infinite or NaN scale factor; the
    /// transform accumulator is responsible for rejecting it.
    fn delta_to(&self, current: &PinchBaseline) -> GestureDelta {
        GestureDelta::Pinch {
            scale_factor: current.distance / self.distance,
            rotation_delta_degrees: (current.angle - self.angle).to_degrees(),
            dx: current.midpoint.x - self.midpoint.x,
            dy: current.midpoint.y - self.midpoint.y,
        }
    }
}

/// Gesture mode together with its session data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Panning {
        /// Last seen position of the single contact.
        anchor: Point,
    },
    PinchRotate(PinchBaseline),
}

impl GestureState {
    pub fn mode(&self) -> GestureMode {
        match self {
            GestureState::Idle => GestureMode::Idle,
            GestureState::Panning { .. } => GestureMode::Panning,
            GestureState::PinchRotate(_) => GestureMode::PinchRotate,
        }
    }

    /// Compute the next state and the delta (if any) for the given contacts.
    ///
    /// `contacts` is the complete ordered list of currently active contacts.
    /// Only the first two are ever considered.
    pub fn advance(self, contacts: &[Contact]) -> (GestureState, Option<GestureDelta>) {
        match contacts {
            [] => (GestureState::Idle, None),
            [only] => self.single(only.position()),
            [first, second, ..] => self.pair(first.position(), second.position()),
        }
    }

    fn single(self, current: Point) -> (GestureState, Option<GestureDelta>) {
        let next = GestureState::Panning { anchor: current };
        match self {
            GestureState::Panning { anchor } => (
                next,
                Some(GestureDelta::Translate {
                    dx: current.x - anchor.x,
                    dy: current.y - anchor.y,
                }),
            ),
            // Fresh touch, or dropping down from two contacts: new baseline.
            _ => (next, None),
        }
    }

    fn pair(self, first: Point, second: Point) -> (GestureState, Option<GestureDelta>) {
        let current = PinchBaseline::capture(first, second);
        let next = GestureState::PinchRotate(current);
        match self {
            GestureState::PinchRotate(previous) => (next, Some(previous.delta_to(&current))),
            _ => (next, None),
        }
    }
}

/// Owns the gesture state across input events.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    state: GestureState,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn mode(&self) -> GestureMode {
        self.state.mode()
    }

    /// Feed the full set of currently active contacts.
    ///
    /// Returns the delta to apply to the transform, or `None` when this event
    /// only established (or discarded) a baseline.
    pub fn on_contacts_changed(&mut self, contacts: &[Contact]) -> Option<GestureDelta> {
        let previous = self.state.mode();
        let (next, delta) = self.state.advance(contacts);
        if next.mode() != previous {
            debug!(
                "gesture mode {} -> {} ({} contacts)",
                previous.as_str(),
                next.mode().as_str(),
                contacts.len()
            );
        }
        self.state = next;
        delta
    }

    /// Discrete zoom step; independent of any in-progress gesture.
    pub fn on_discrete_zoom(&self, direction: ZoomDirection) -> GestureDelta {
        GestureDelta::Zoom {
            scale_factor: direction.scale_factor(),
        }
    }

    /// Drop any in-progress gesture.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(id: u32, x: f64, y: f64) -> Contact {
        Contact::new(id, x, y)
    }

    #[test]
    fn test_starts_idle() {
        let interp = GestureInterpreter::new();
        assert_eq!(interp.mode(), GestureMode::Idle);
    }

    #[test]
    fn test_first_contact_emits_nothing() {
        let mut interp = GestureInterpreter::new();
        assert_eq!(interp.on_contacts_changed(&[c(0, 100.0, 100.0)]), None);
        assert_eq!(interp.mode(), GestureMode::Panning);
    }

    #[test]
    fn test_pan_then_second_finger_scenario() {
        let mut interp = GestureInterpreter::new();

        assert_eq!(interp.on_contacts_changed(&[c(0, 100.0, 100.0)]), None);
        assert_eq!(
            interp.on_contacts_changed(&[c(0, 130.0, 115.0)]),
            Some(GestureDelta::Translate { dx: 30.0, dy: 15.0 })
        );

        // Second finger lands: switch modes, capture baseline, no delta.
        assert_eq!(
            interp.on_contacts_changed(&[c(0, 130.0, 115.0), c(1, 200.0, 100.0)]),
            None
        );
        assert_eq!(interp.mode(), GestureMode::PinchRotate);
    }

    #[test]
    fn test_pan_anchor_rolls() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0)]);
        interp.on_contacts_changed(&[c(0, 10.0, 5.0)]);
        assert_eq!(
            interp.on_contacts_changed(&[c(0, 12.0, 1.0)]),
            Some(GestureDelta::Translate { dx: 2.0, dy: -4.0 })
        );
    }

    #[test]
    fn test_pinch_scale_and_rotation() {
        let mut interp = GestureInterpreter::new();

        // Distance 100, angle 0.
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 100.0, 0.0)]);

        // Distance 150, angle 0.2 rad, same first contact.
        let theta: f64 = 0.2;
        let second = (150.0 * theta.cos(), 150.0 * theta.sin());
        let delta = interp
            .on_contacts_changed(&[c(0, 0.0, 0.0), c(1, second.0, second.1)])
            .unwrap();

        match delta {
            GestureDelta::Pinch {
                scale_factor,
                rotation_delta_degrees,
                dx,
                dy,
            } => {
                assert!((scale_factor - 1.5).abs() < 1e-12);
                assert!((rotation_delta_degrees - 11.459_155_902_616_464).abs() < 1e-9);
                assert!((dx - (second.0 / 2.0 - 50.0)).abs() < 1e-12);
                assert!((dy - second.1 / 2.0).abs() < 1e-12);
            }
            other => panic!("expected pinch delta, got {:?}", other),
        }
    }

    #[test]
    fn test_pinch_baseline_rolls() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 100.0, 0.0)]);
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 200.0, 0.0)]);

        // Relative to the previous event (200), not the gesture start (100).
        let delta = interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 300.0, 0.0)]);
        match delta {
            Some(GestureDelta::Pinch { scale_factor, .. }) => {
                assert!((scale_factor - 1.5).abs() < 1e-12)
            }
            other => panic!("expected pinch delta, got {:?}", other),
        }
    }

    #[test]
    fn test_pure_midpoint_translation_during_pinch() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 100.0, 0.0)]);
        let delta = interp.on_contacts_changed(&[c(0, 20.0, 10.0), c(1, 120.0, 10.0)]);
        assert_eq!(
            delta,
            Some(GestureDelta::Pinch {
                scale_factor: 1.0,
                rotation_delta_degrees: 0.0,
                dx: 20.0,
                dy: 10.0,
            })
        );
    }

    #[test]
    fn test_extra_contacts_ignored() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 100.0, 0.0), c(2, 500.0, 500.0)]);
        assert_eq!(interp.mode(), GestureMode::PinchRotate);

        // Third contact moves wildly; first two are still.
        let delta = interp.on_contacts_changed(&[
            c(0, 0.0, 0.0),
            c(1, 100.0, 0.0),
            c(2, -900.0, 40.0),
        ]);
        assert_eq!(
            delta,
            Some(GestureDelta::Pinch {
                scale_factor: 1.0,
                rotation_delta_degrees: 0.0,
                dx: 0.0,
                dy: 0.0,
            })
        );
    }

    #[test]
    fn test_two_to_one_restarts_pan_session() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 100.0, 0.0)]);

        // Lift one finger: new pan baseline, no jump.
        assert_eq!(interp.on_contacts_changed(&[c(1, 100.0, 0.0)]), None);
        assert_eq!(interp.mode(), GestureMode::Panning);
        assert_eq!(
            interp.on_contacts_changed(&[c(1, 105.0, 3.0)]),
            Some(GestureDelta::Translate { dx: 5.0, dy: 3.0 })
        );
    }

    #[test]
    fn test_release_returns_to_idle() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0)]);
        assert_eq!(interp.on_contacts_changed(&[]), None);
        assert_eq!(interp.mode(), GestureMode::Idle);

        // Next touch starts fresh even at a distant position.
        assert_eq!(interp.on_contacts_changed(&[c(0, 400.0, 400.0)]), None);
    }

    #[test]
    fn test_coincident_pinch_produces_non_finite_scale() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 50.0, 50.0), c(1, 50.0, 50.0)]);
        match interp.on_contacts_changed(&[c(0, 40.0, 50.0), c(1, 60.0, 50.0)]) {
            Some(GestureDelta::Pinch { scale_factor, .. }) => assert!(!scale_factor.is_finite()),
            other => panic!("expected pinch delta, got {:?}", other),
        }

        // The baseline rolled to the new, non-degenerate pair.
        match interp.on_contacts_changed(&[c(0, 30.0, 50.0), c(1, 70.0, 50.0)]) {
            Some(GestureDelta::Pinch { scale_factor, .. }) => {
                assert!((scale_factor - 2.0).abs() < 1e-12)
            }
            other => panic!("expected pinch delta, got {:?}", other),
        }
    }

    #[test]
    fn test_discrete_zoom_leaves_state_alone() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 1.0, 1.0)]);
        assert_eq!(
            interp.on_discrete_zoom(ZoomDirection::In),
            GestureDelta::Zoom { scale_factor: 1.1 }
        );
        assert_eq!(interp.mode(), GestureMode::Panning);
    }

    #[test]
    fn test_advance_is_pure() {
        let state = GestureState::Panning {
            anchor: Point::new(1.0, 2.0),
        };
        let contacts = [c(0, 4.0, 6.0)];
        assert_eq!(state.advance(&contacts), state.advance(&contacts));
    }

    #[test]
    fn test_reset() {
        let mut interp = GestureInterpreter::new();
        interp.on_contacts_changed(&[c(0, 0.0, 0.0), c(1, 1.0, 1.0)]);
        interp.reset();
        assert_eq!(interp.state(), GestureState::Idle);
    }
}
