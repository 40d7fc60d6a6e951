//! Camera sweeps as a pure function of the frame index.

use serde::{Deserialize, Serialize};

use crate::math::deg_to_rad;

/// Camera angles for one frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Frame these angles belong to.
    pub frame: usize,
    /// Rotation about the vertical axis, in [-180, 180).
    pub azimuth: f32,
    /// Angle above the horizontal plane.
    pub elevation: f32,
}

/// A linear azimuth sweep with an optional sinusoidal elevation wobble:
///
/// ```text
/// azimuth(f)   = start_azimuth + azimuth_step * f
/// elevation(f) = elevation + elevation_amplitude * sin(elevation_frequency * f°)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSweep {
    /// Azimuth at frame 0.
    pub start_azimuth: f32,
    /// Azimuth change per frame.
    pub azimuth_step: f32,
    /// Base elevation.
    pub elevation: f32,
    /// Peak elevation offset.
    pub elevation_amplitude: f32,
    /// Degrees of wobble phase per frame.
    pub elevation_frequency: f32,
}

impl Default for ViewSweep {
    fn default() -> Self {
        Self::orbit()
    }
}

impl ViewSweep {
    /// One degree per frame around the subject, bobbing between 10° and 20°.
    pub fn orbit() -> Self {
        Self {
            start_azimuth: 0.0,
            azimuth_step: 1.0,
            elevation: 15.0,
            elevation_amplitude: 5.0,
            elevation_frequency: 1.0,
        }
    }

    /// Swing from -30° to 30° across `frame_count` frames at 10° elevation.
    pub fn frontal(frame_count: usize) -> Self {
        let step = if frame_count > 1 {
            60.0 / (frame_count - 1) as f32
        } else {
            0.0
        };
        Self {
            start_azimuth: -30.0,
            azimuth_step: step,
            elevation: 10.0,
            elevation_amplitude: 0.0,
            elevation_frequency: 0.0,
        }
    }

    /// Two degrees per frame at a fixed 30° elevation.
    pub fn turntable() -> Self {
        Self {
            start_azimuth: 0.0,
            azimuth_step: 2.0,
            elevation: 30.0,
            elevation_amplitude: 0.0,
            elevation_frequency: 0.0,
        }
    }

    /// Angles for `frame`. Deterministic in the frame index alone.
    pub fn view_at(&self, frame: usize) -> ViewParams {
        let f = frame as f32;
        let azimuth = wrap_degrees(self.start_azimuth + self.azimuth_step * f);
        let elevation =
            self.elevation + self.elevation_amplitude * deg_to_rad(self.elevation_frequency * f).sin();
        ViewParams {
            frame,
            azimuth,
            elevation,
        }
    }

    /// Check that every field is finite.
    pub fn is_valid(&self) -> bool {
        [
            self.start_azimuth,
            self.azimuth_step,
            self.elevation,
            self.elevation_amplitude,
            self.elevation_frequency,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Wrap an angle into [-180, 180).
pub fn wrap_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit() {
        let sweep = ViewSweep::orbit();
        let v0 = sweep.view_at(0);
        assert_eq!(v0.azimuth, 0.0);
        assert_eq!(v0.elevation, 15.0);
        let v90 = sweep.view_at(90);
        assert!((v90.elevation - 20.0).abs() < 1e-4);
        assert!((sweep.view_at(360).azimuth - 0.0).abs() < 1e-3);
    }

    #[test]
    fn test_frontal_endpoints() {
        let sweep = ViewSweep::frontal(60);
        assert!((sweep.view_at(0).azimuth + 30.0).abs() < 1e-4);
        assert!((sweep.view_at(59).azimuth - 30.0).abs() < 1e-3);
        assert_eq!(sweep.view_at(30).elevation, 10.0);
        assert_eq!(ViewSweep::frontal(1).view_at(0).azimuth, -30.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(45.0), 45.0);
    }

    #[test]
    fn test_same_frame_same_view() {
        let sweep = ViewSweep::turntable();
        assert_eq!(sweep.view_at(17), sweep.view_at(17));
        assert_eq!(sweep.view_at(17).azimuth, 34.0);
    }
}
