//! # Math Module
//!
//! Vectors, colors and the small set of geometric primitives the surface
//! and particle code is built from.

mod box3;
mod color;
mod triangle;
mod vector3;

pub use box3::Box3;
pub use color::{Color, Rgba};
pub use triangle::Triangle;
pub use vector3::{Point3, Vector3};

/// Common math constants and utilities.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f32 = PI * 2.0;
    /// Half of Pi.
    pub const HALF_PI: f32 = PI / 2.0;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `count` evenly spaced samples from `start` to `end`, both inclusive.
///
/// The last sample is exactly `end`. `count` below 2 yields `[start]`
/// or nothing.
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (count - 1) as f32;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        lerp(start, end, i as f32 / last)
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let s = linspace(-1.0, 1.0, 5);
        assert_eq!(s, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
