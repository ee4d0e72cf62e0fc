//! Accumulates gesture deltas into the persistent transform.
//!
//! Every update builds a candidate transform, validates it and only then
//! replaces the stored one, so readers never observe a half-applied pinch and
//! a rejected delta leaves the previous state untouched.

use super::{Transform, TransformError};
use crate::gesture::GestureDelta;

/// Owner of the single live [`Transform`].
#[derive(Debug, Clone, Default)]
pub struct TransformAccumulator {
    transform: Transform,
}

impl TransformAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// `x += dx; y += dy`.
    pub fn apply_translation(&mut self, dx: f64, dy: f64) -> Result<(), TransformError> {
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;

        let mut next = self.transform;
        next.x += dx;
        next.y += dy;
        self.commit(next)
    }

    /// Multiply scale, add rotation and translate, as one step.
    pub fn apply_pinch(
        &mut self,
        scale_factor: f64,
        rotation_delta_degrees: f64,
        dx: f64,
        dy: f64,
    ) -> Result<(), TransformError> {
        check_finite("rotation", rotation_delta_degrees)?;
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;

        let scale = self.transform.scale * scale_factor;
        if !scale_factor.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Err(TransformError::DegenerateScale {
                factor: scale_factor,
                result: scale,
            });
        }

        let next = Transform {
            x: self.transform.x + dx,
            y: self.transform.y + dy,
            scale,
            rotation: self.transform.rotation + rotation_delta_degrees,
        };
        self.commit(next)
    }

    /// Scale only; used by discrete (wheel) zoom.
    pub fn apply_zoom(&mut self, scale_factor: f64) -> Result<(), TransformError> {
        self.apply_pinch(scale_factor, 0.0, 0.0, 0.0)
    }

    /// Apply any gesture delta.
    pub fn apply(&mut self, delta: GestureDelta) -> Result<(), TransformError> {
        match delta {
            GestureDelta::Translate { dx, dy } => self.apply_translation(dx, dy),
            GestureDelta::Pinch {
                scale_factor,
                rotation_delta_degrees,
                dx,
                dy,
            } => self.apply_pinch(scale_factor, rotation_delta_degrees, dx, dy),
            GestureDelta::Zoom { scale_factor } => self.apply_zoom(scale_factor),
        }
    }

    /// Back to `{0, 0, 1, 0}`.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    fn commit(&mut self, next: Transform) -> Result<(), TransformError> {
        // Sums of finite values can still overflow to infinity.
        check_finite("x", next.x)?;
        check_finite("y", next.y)?;
        check_finite("rotation", next.rotation)?;
        self.transform = next;
        Ok(())
    }
}

#[inline]
fn check_finite(component: &'static str, value: f64) -> Result<(), TransformError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransformError::NonFiniteDelta { component, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation() {
        let mut acc = TransformAccumulator::new();
        acc.apply_translation(30.0, 15.0).unwrap();
        assert_eq!(acc.transform(), Transform::new(30.0, 15.0, 1.0, 0.0));
    }

    #[test]
    fn test_pinch_updates_all_fields() {
        let mut acc = TransformAccumulator::new();
        acc.apply_pinch(2.0, 45.0, -3.0, 4.0).unwrap();
        assert_eq!(acc.transform(), Transform::new(-3.0, 4.0, 2.0, 45.0));
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let mut acc = TransformAccumulator::new();
        acc.apply_pinch(1.0, 370.0, 0.0, 0.0).unwrap();
        acc.apply_pinch(1.0, -10.0, 0.0, 0.0).unwrap();
        assert_eq!(acc.transform().rotation, 360.0);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut acc = TransformAccumulator::new();
        acc.apply_translation(5.0, 5.0).unwrap();
        let before = acc.transform();

        let err = acc.apply_pinch(0.0, 10.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, TransformError::DegenerateScale { .. }));
        assert_eq!(acc.transform(), before);
    }

    #[test]
    fn test_negative_scale_rejected() {
        let mut acc = TransformAccumulator::new();
        assert!(acc.apply_zoom(-2.0).is_err());
        assert_eq!(acc.transform().scale, 1.0);
    }

    #[test]
    fn test_infinite_scale_rejected() {
        // Coincident-contact baseline: d1 / 0.
        let mut acc = TransformAccumulator::new();
        assert!(acc.apply_pinch(f64::INFINITY, 0.0, 0.0, 0.0).is_err());
        assert!(acc.apply_pinch(f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(acc.transform().is_identity());
    }

    #[test]
    fn test_non_finite_translation_rejected() {
        let mut acc = TransformAccumulator::new();
        let err = acc.apply_translation(f64::NAN, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            TransformError::NonFiniteDelta {
                component: "dx",
                value: f64::NAN
            }
            .to_string()
        );
        assert!(acc.transform().is_identity());
    }

    #[test]
    fn test_pinch_rejects_non_finite_rotation_atomically() {
        let mut acc = TransformAccumulator::new();
        assert!(acc.apply_pinch(2.0, f64::INFINITY, 5.0, 5.0).is_err());
        // Neither scale nor translation leaked through.
        assert!(acc.transform().is_identity());
    }

    #[test]
    fn test_overflow_rejected() {
        let mut acc = TransformAccumulator::new();
        acc.apply_translation(f64::MAX, 0.0).unwrap();
        assert!(acc.apply_translation(f64::MAX, 0.0).is_err());
        assert_eq!(acc.transform().x, f64::MAX);
    }

    #[test]
    fn test_scale_underflow_rejected() {
        let mut acc = TransformAccumulator::new();
        acc.apply_zoom(f64::MIN_POSITIVE).unwrap();
        // MIN_POSITIVE^2 underflows to zero.
        assert!(acc.apply_zoom(f64::MIN_POSITIVE).is_err());
        assert_eq!(acc.transform().scale, f64::MIN_POSITIVE);
    }

    #[test]
    fn test_apply_dispatch() {
        let mut acc = TransformAccumulator::new();
        acc.apply(GestureDelta::Translate { dx: 1.0, dy: 2.0 }).unwrap();
        acc.apply(GestureDelta::Zoom { scale_factor: 1.1 }).unwrap();
        acc.apply(GestureDelta::Pinch {
            scale_factor: 2.0,
            rotation_delta_degrees: 90.0,
            dx: 1.0,
            dy: 1.0,
        })
        .unwrap();

        let t = acc.transform();
        assert_eq!((t.x, t.y), (2.0, 3.0));
        assert!((t.scale - 2.2).abs() < 1e-12);
        assert_eq!(t.rotation, 90.0);
    }

    #[test]
    fn test_reset() {
        let mut acc = TransformAccumulator::new();
        acc.apply_pinch(3.0, 33.0, 10.0, 10.0).unwrap();
        acc.reset();
        assert!(acc.transform().is_identity());
    }
}
