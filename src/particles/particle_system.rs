//! Stochastic particle halo around a surface.

use rand::Rng;

use crate::color::ColorMapper;
use crate::geometry::Surface;
use crate::math::{deg_to_rad, Point3, Rgba};

use super::particle::{Particle, ParticleInstance, ParticleOrigin};
use super::sampling::{shell_point, symmetric_vector, SurfaceSampler};
use super::settings::{ParticleSettings, SHELL_RADIUS_RANGE};
use super::ParticleError;

/// A fixed-size set of particles sampled on and around a surface.
///
/// Particles are created once by [`ParticleSystem::initialize`] and then
/// advanced in place by [`ParticleSystem::step`]. The particle count never
/// changes after construction.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    center: Point3,
    max_radius: f32,
    damping_factor: f32,
    perturbation_scale: f32,
    containment_radius_factor: f32,
    containment_pull_strength: f32,
    steps: u64,
}

impl ParticleSystem {
    /// Sample `count` particles from `surface`.
    ///
    /// `round(count * shell_fraction)` particles go on a spherical shell of
    /// radius `[0.9, 1.1] * max_radius` around the surface's bounding-box
    /// center; the rest are placed on the surface, picking triangles by area.
    pub fn initialize<R: Rng + ?Sized>(
        surface: &Surface,
        count: usize,
        settings: &ParticleSettings,
        rng: &mut R,
    ) -> Result<Self, ParticleError> {
        if count == 0 {
            return Err(ParticleError::InvalidCount { count });
        }
        settings.validate()?;

        let bounds = surface.bounds();
        if bounds.is_empty() {
            return Err(ParticleError::EmptySurface);
        }
        let center = bounds.center();
        let max_radius = bounds.max_half_extent();
        if !(max_radius.is_finite() && max_radius > 0.0) {
            return Err(ParticleError::DegenerateBounds { max_radius });
        }

        let sampler = SurfaceSampler::new(surface)?;
        let shell_count = ((count as f32 * settings.shell_fraction).round() as usize).min(count);
        let surface_count = count - shell_count;

        let color = Rgba::new(1.0, 1.0, 1.0, settings.alpha);
        let (shell_min, shell_max) = SHELL_RADIUS_RANGE;
        let mut particles = Vec::with_capacity(count);

        for i in 0..count {
            let (position, origin) = if i < surface_count {
                (sampler.sample(rng), ParticleOrigin::Surface)
            } else {
                (
                    shell_point(rng, center, shell_min * max_radius, shell_max * max_radius),
                    ParticleOrigin::Shell,
                )
            };
            particles.push(Particle {
                position,
                velocity: symmetric_vector(rng, settings.initial_speed),
                size: rng.gen_range(settings.size_min..=settings.size_max),
                color,
                origin,
            });
        }

        log::debug!(
            "Initialized {} particles ({} surface, {} shell) around {:?}, radius {}",
            count,
            surface_count,
            shell_count,
            center,
            max_radius
        );

        Ok(Self {
            particles,
            center,
            max_radius,
            damping_factor: settings.damping_factor,
            perturbation_scale: settings.perturbation_scale,
            containment_radius_factor: settings.containment_radius_factor,
            containment_pull_strength: settings.containment_pull_strength,
            steps: 0,
        })
    }

    /// Advance every particle by one step.
    ///
    /// Per particle, in order: move by the velocity, perturb the velocity,
    /// damp it, then pull it toward the center if the particle lies beyond
    /// the containment radius.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let limit = self.containment_radius();
        let center = self.center;

        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity += symmetric_vector(rng, self.perturbation_scale);
            p.velocity *= self.damping_factor;

            let offset = p.position - center;
            if offset.length() > limit {
                p.velocity -= offset.normalized() * self.containment_pull_strength;
            }
        }
        self.steps += 1;
    }

    /// Number of completed steps.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// All particles.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle count.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false for a constructed system.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Center of the surface's bounding box.
    #[inline]
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Half the largest bounding-box extent.
    #[inline]
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Distance beyond which containment applies.
    #[inline]
    pub fn containment_radius(&self) -> f32 {
        self.containment_radius_factor * self.max_radius
    }

    /// Largest possible displacement in one step.
    ///
    /// Speed never exceeds `√3 · max(v, s·d / (1 - d)) + pull / (1 - d)`,
    /// with `d` the damping, `s` the perturbation scale and `v` the initial
    /// per-axis speed.
    pub fn max_step_displacement(&self, initial_speed: f32) -> f32 {
        let d = self.damping_factor;
        let per_axis = initial_speed.max(self.perturbation_scale * d / (1.0 - d));
        per_axis * 3f32.sqrt() + self.containment_pull_strength / (1.0 - d)
    }

    /// Recolor every particle by its height.
    pub fn recolor(&mut self, mapper: &ColorMapper, alpha: f32) {
        for p in &mut self.particles {
            p.color = mapper.map(p.position.z, alpha);
        }
    }

    /// Per-frame sizes: `size * (1 - a + a * sin(2 * frame° + jitter))`, with
    /// `jitter` uniform in [0, 1) per particle and `a` the pulse amplitude.
    pub fn pulsed_sizes<R: Rng + ?Sized>(&self, frame: usize, amplitude: f32, rng: &mut R) -> Vec<f32> {
        let phase = deg_to_rad(frame as f32 * 2.0);
        self.particles
            .iter()
            .map(|p| {
                let jitter: f32 = rng.gen();
                p.size * (1.0 - amplitude + amplitude * (phase + jitter).sin())
            })
            .collect()
    }

    /// Render instances for this frame. Falls back to base sizes when
    /// `sizes` does not match the particle count.
    pub fn instances(&self, sizes: &[f32]) -> Vec<ParticleInstance> {
        if sizes.len() != self.particles.len() {
            return self
                .particles
                .iter()
                .map(|p| ParticleInstance::new(p, p.size))
                .collect();
        }
        self.particles
            .iter()
            .zip(sizes)
            .map(|(p, &s)| ParticleInstance::new(p, s))
            .collect()
    }
}
