//! Particle system tuning.

use serde::{Deserialize, Serialize};

use super::ParticleError;

/// Shell particles are placed between these multiples of the system's
/// maximum radius.
pub const SHELL_RADIUS_RANGE: (f32, f32) = (0.9, 1.1);

/// Spawn and dynamics parameters for a [`super::ParticleSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Fraction of particles spawned on the outer shell; the rest hug the surface.
    pub shell_fraction: f32,
    /// Minimum base size.
    pub size_min: f32,
    /// Maximum base size.
    pub size_max: f32,
    /// Initial velocity is uniform in ±this per axis.
    pub initial_speed: f32,
    /// Per-step velocity noise, uniform in ±this per axis.
    pub perturbation_scale: f32,
    /// Velocity multiplier applied every step, in (0, 1).
    pub damping_factor: f32,
    /// Containment starts at this multiple of the maximum radius (> 1).
    pub containment_radius_factor: f32,
    /// Inward velocity change per step for particles beyond containment.
    pub containment_pull_strength: f32,
    /// Alpha of rendered particles.
    pub alpha: f32,
    /// Relative amplitude of the per-frame size pulse, in [0, 1).
    pub size_pulse: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            shell_fraction: 0.5,
            size_min: 5.0,
            size_max: 25.0,
            initial_speed: 0.005,
            perturbation_scale: 0.001,
            damping_factor: 0.98,
            containment_radius_factor: 1.3,
            containment_pull_strength: 0.01,
            alpha: 0.6,
            size_pulse: 0.2,
        }
    }
}

impl ParticleSettings {
    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ParticleError> {
        let check = |name: &'static str, value: f32, ok: bool| {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(ParticleError::InvalidParameter { name, value })
            }
        };
        let s = self;
        check("shell_fraction", s.shell_fraction, (0.0..=1.0).contains(&s.shell_fraction))?;
        check("size_min", s.size_min, s.size_min > 0.0)?;
        check("size_max", s.size_max, s.size_max >= s.size_min)?;
        check("initial_speed", s.initial_speed, s.initial_speed >= 0.0)?;
        check("perturbation_scale", s.perturbation_scale, s.perturbation_scale >= 0.0)?;
        check(
            "damping_factor",
            s.damping_factor,
            s.damping_factor > 0.0 && s.damping_factor < 1.0,
        )?;
        check(
            "containment_radius_factor",
            s.containment_radius_factor,
            s.containment_radius_factor > 1.0,
        )?;
        check(
            "containment_pull_strength",
            s.containment_pull_strength,
            s.containment_pull_strength >= 0.0,
        )?;
        check("alpha", s.alpha, (0.0..=1.0).contains(&s.alpha))?;
        check("size_pulse", s.size_pulse, (0.0..1.0).contains(&s.size_pulse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ParticleSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let cases = [
            ParticleSettings { damping_factor: 1.0, ..Default::default() },
            ParticleSettings { damping_factor: 0.0, ..Default::default() },
            ParticleSettings { containment_radius_factor: 1.0, ..Default::default() },
            ParticleSettings { containment_pull_strength: -0.1, ..Default::default() },
            ParticleSettings { perturbation_scale: f32::NAN, ..Default::default() },
            ParticleSettings { size_min: 30.0, ..Default::default() },
            ParticleSettings { shell_fraction: 1.5, ..Default::default() },
        ];
        for settings in cases {
            assert!(settings.validate().is_err(), "{:?}", settings);
        }
    }
}
