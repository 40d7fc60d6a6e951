//! Axis-aligned bounding box implementation.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    /// Minimum corner.
    pub min: Vector3,
    /// Maximum corner.
    pub max: Vector3,
}

impl Default for Box3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Box3 {
    /// Empty box (inverted, ready to expand).
    pub const EMPTY: Self = Self {
        min: Vector3 { x: f32::INFINITY, y: f32::INFINITY, z: f32::INFINITY },
        max: Vector3 { x: f32::NEG_INFINITY, y: f32::NEG_INFINITY, z: f32::NEG_INFINITY },
    };

    /// Create a box from the finite points of a slice. Points with any
    /// NaN or infinite component are skipped.
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut result = Self::EMPTY;
        for p in points.iter().filter(|p| p.is_finite()) {
            result.expand_by_point(p);
        }
        result
    }

    /// Check if the box is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vector3 {
        if self.is_empty() {
            Vector3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Get the size of the box.
    #[inline]
    pub fn size(&self) -> Vector3 {
        if self.is_empty() {
            Vector3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Half of the largest edge.
    #[inline]
    pub fn max_half_extent(&self) -> f32 {
        self.size().max_element() * 0.5
    }

    /// Expand to include a point.
    #[inline]
    pub fn expand_by_point(&mut self, point: &Vector3) -> &mut Self {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_nan() {
        let b = Box3::from_points(&[
            Vector3::new(-1.0, 0.0, 2.0),
            Vector3::NAN,
            Vector3::new(1.0, 4.0, -2.0),
        ]);
        assert_eq!(b.min, Vector3::new(-1.0, 0.0, -2.0));
        assert_eq!(b.max, Vector3::new(1.0, 4.0, 2.0));
        assert_eq!(b.max_half_extent(), 2.0);
    }

    #[test]
    fn test_empty() {
        let b = Box3::from_points(&[Vector3::NAN]);
        assert!(b.is_empty());
        assert_eq!(b.center(), Vector3::ZERO);
    }
}
