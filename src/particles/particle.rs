//! Particle data structures.

use bytemuck::{Pod, Zeroable};

use crate::math::{Point3, Rgba, Vector3};

/// Where a particle was spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleOrigin {
    /// Sampled on the surface, weighted by triangle area.
    Surface,
    /// Sampled on a spherical shell around the surface.
    Shell,
}

/// One simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position.
    pub position: Point3,
    /// Displacement applied on the next step.
    pub velocity: Vector3,
    /// Base size before any pulsing.
    pub size: f32,
    /// Current color.
    pub color: Rgba,
    /// Spawn region.
    pub origin: ParticleOrigin,
}

/// Per-particle render data, laid out for direct upload as an instance buffer.
/// 32 bytes per particle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Position in world space.
    pub position: [f32; 3],
    /// Size for this frame.
    pub size: f32,
    /// Color for this frame (rgba).
    pub color: [f32; 4],
}

impl ParticleInstance {
    /// Build from a particle and this frame's size.
    #[inline]
    pub fn new(particle: &Particle, size: f32) -> Self {
        Self {
            position: particle.position.to_array(),
            size,
            color: particle.color.to_array(),
        }
    }

    /// Position as a vector.
    #[inline]
    pub fn position(&self) -> Point3 {
        Point3::from_array(self.position)
    }

    /// Color as a struct.
    #[inline]
    pub fn color(&self) -> Rgba {
        let [r, g, b, a] = self.color;
        Rgba::new(r, g, b, a)
    }
}

/// View an instance slice as raw bytes.
pub fn instance_bytes(instances: &[ParticleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        let p = Particle {
            position: Point3::new(1.0, 2.0, 3.0),
            velocity: Vector3::ZERO,
            size: 5.0,
            color: Rgba::new(0.1, 0.2, 0.3, 0.6),
            origin: ParticleOrigin::Shell,
        };
        let inst = [ParticleInstance::new(&p, 4.0)];
        assert_eq!(instance_bytes(&inst).len(), 32);
        assert_eq!(inst[0].position(), p.position);
        assert_eq!(inst[0].color(), p.color);
    }
}
