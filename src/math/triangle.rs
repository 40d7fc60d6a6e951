//! Triangle implementation.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// A triangle defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vector3,
    /// Second vertex.
    pub b: Vector3,
    /// Third vertex.
    pub c: Vector3,
}

impl Triangle {
    /// Create a new triangle.
    #[inline]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Get the area of the triangle.
    pub fn area(&self) -> f32 {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac).length() * 0.5
    }

    /// Get the centroid (center) of the triangle.
    #[inline]
    pub fn centroid(&self) -> Vector3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Map two uniform samples in [0, 1) to a point uniformly distributed
    /// over the triangle's area.
    pub fn sample_point(&self, r1: f32, r2: f32) -> Vector3 {
        let s = r1.sqrt();
        let wa = 1.0 - s;
        let wb = s * (1.0 - r2);
        let wc = s * r2;
        self.a * wa + self.b * wb + self.c * wc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right() -> Triangle {
        Triangle::new(
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_area() {
        assert!((unit_right().area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_centroid() {
        let c = unit_right().centroid();
        assert!(c.approx_eq(&Vector3::new(1.0 / 3.0, 1.0 / 3.0, 0.0), 1e-6));
    }

    #[test]
    fn test_sample_point_stays_inside() {
        let t = unit_right();
        for i in 0..10 {
            for j in 0..10 {
                let p = t.sample_point(i as f32 / 10.0, j as f32 / 10.0);
                // On the unit right triangle the weights of b and c are x and y.
                let (wb, wc) = (p.x, p.y);
                let wa = 1.0 - wb - wc;
                assert!(wa >= -1e-6 && wb >= -1e-6 && wc >= -1e-6, "{:?} escaped", p);
                assert_eq!(p.z, 0.0);
            }
        }
        assert_eq!(t.sample_point(0.0, 0.5), t.a);
    }
}
