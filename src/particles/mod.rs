//! Particle halo module.
//!
//! Particles are sampled once on a reference surface and on a spherical
//! shell around it, then advanced every frame by a damped random walk with
//! radial containment.

mod particle;
mod particle_system;
mod sampling;
mod settings;

pub use particle::{instance_bytes, Particle, ParticleInstance, ParticleOrigin};
pub use particle_system::ParticleSystem;
pub use settings::{ParticleSettings, SHELL_RADIUS_RANGE};

use thiserror::Error;

/// Errors raised while building a particle system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// Particle count must be positive.
    #[error("particle count must be positive, got {count}")]
    InvalidCount {
        /// Requested count.
        count: usize,
    },

    /// A tuning parameter was out of range.
    #[error("particle parameter `{name}` is out of range: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Supplied value.
        value: f32,
    },

    /// The surface has no finite vertex to sample from.
    #[error("surface has no finite vertices to sample")]
    EmptySurface,

    /// The surface's bounding box has no extent.
    #[error("surface bounds are degenerate (max radius {max_radius})")]
    DegenerateBounds {
        /// Computed half extent.
        max_radius: f32,
    },
}
