//! A single Gaussian deformation term.

use crate::math::Point3;
use serde::{Deserialize, Serialize};

use super::FieldError;

/// A localized Gaussian bump (positive strength) or dent (negative strength).
///
/// Fields are public so presets and config files can describe them as plain
/// data; [`ControlPoint::new`] and [`super::FeatureField::new`] reject a
/// width that is zero, negative or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Center of influence.
    pub center: Point3,
    /// Signed amplitude at the center.
    pub strength: f32,
    /// Gaussian spread. Divides the squared distance, so must be > 0.
    pub width: f32,
}

impl ControlPoint {
    /// Create a validated control point.
    pub fn new(center: Point3, strength: f32, width: f32) -> Result<Self, FieldError> {
        let cp = Self { center, strength, width };
        cp.validate(0)?;
        Ok(cp)
    }

    /// Shorthand used by the preset tables.
    pub(crate) const fn raw(x: f32, y: f32, z: f32, strength: f32, width: f32) -> Self {
        Self {
            center: Point3::new(x, y, z),
            strength,
            width,
        }
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), FieldError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FieldError::InvalidWidth {
                index,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Contribution of this term at `point`.
    #[inline]
    pub fn influence(&self, point: &Point3) -> f32 {
        self.strength * (-point.distance_to_squared(&self.center) / self.width).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_width() {
        for w in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(ControlPoint::new(Point3::ZERO, 1.0, w).is_err(), "width {w}");
        }
        assert!(ControlPoint::new(Point3::ZERO, 1.0, 0.01).is_ok());
    }

    #[test]
    fn test_influence_decays_with_distance() {
        let cp = ControlPoint::raw(0.0, 0.0, 0.0, -0.3, 0.005);
        let near = cp.influence(&Point3::new(0.01, 0.0, 0.0));
        let far = cp.influence(&Point3::new(0.2, 0.0, 0.0));
        assert!(near < far && far <= 0.0);
        assert!(far.abs() < 1e-3);
    }
}
