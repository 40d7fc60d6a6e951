//! Per-run animation state and the driver's lifecycle states.

use rand::rngs::StdRng;

use crate::color::ColorMapper;
use crate::geometry::Surface;
use crate::math::{deg_to_rad, Rgba};
use crate::particles::{ParticleInstance, ParticleSystem};
use crate::render::FrameSnapshot;

use super::view::{ViewParams, ViewSweep};

/// Lifecycle of an [`super::AnimationDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Created, nothing built yet.
    Idle,
    /// Surface and particles built; no frame rendered.
    Initialized,
    /// Rendering; `frame` is the next frame to produce.
    Running {
        /// Next frame index.
        frame: usize,
    },
    /// All frames rendered; waiting for export.
    Finalizing,
    /// Finished, either exported or cancelled.
    Done,
    /// Stopped by an unrecoverable error.
    Failed,
}

/// Per-frame visual modulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    /// Base surface alpha.
    pub surface_alpha: f32,
    /// Amplitude of the surface alpha pulse.
    pub surface_alpha_pulse: f32,
    /// Particle alpha.
    pub particle_alpha: f32,
    /// Relative amplitude of the particle size pulse.
    pub size_pulse: f32,
}

impl Modulation {
    /// `surface_alpha + pulse * sin(2 * frame°)`.
    pub fn surface_alpha_at(&self, frame: usize) -> f32 {
        let phase = deg_to_rad(frame as f32 * 2.0);
        (self.surface_alpha + self.surface_alpha_pulse * phase.sin()).clamp(0.0, 1.0)
    }
}

/// The one live surface and particle system of a run, with the view and
/// random generator that drive them. Owned exclusively by the driver.
#[derive(Debug)]
pub struct AnimationState {
    frame: usize,
    view: ViewParams,
    surface: Surface,
    particles: Option<ParticleSystem>,
    mapper: ColorMapper,
    rng: StdRng,
    face_colors: Vec<Rgba>,
    instances: Vec<ParticleInstance>,
}

impl AnimationState {
    /// Bundle a freshly built surface and particle system.
    pub fn new(
        surface: Surface,
        particles: Option<ParticleSystem>,
        mapper: ColorMapper,
        rng: StdRng,
        sweep: &ViewSweep,
    ) -> Self {
        Self {
            frame: 0,
            view: sweep.view_at(0),
            surface,
            particles,
            mapper,
            rng,
            face_colors: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Index of the most recently prepared frame.
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current camera angles.
    #[inline]
    pub fn view(&self) -> ViewParams {
        self.view
    }

    /// The surface.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The particle system, when enabled.
    #[inline]
    pub fn particles(&self) -> Option<&ParticleSystem> {
        self.particles.as_ref()
    }

    /// The height-to-color mapping.
    #[inline]
    pub fn mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    /// Face colors of the most recently prepared frame.
    #[inline]
    pub fn face_colors(&self) -> &[Rgba] {
        &self.face_colors
    }

    /// Prepare `frame`: set the view, step every particle once, then
    /// recompute surface and particle colors and sizes.
    pub fn advance(&mut self, frame: usize, sweep: &ViewSweep, modulation: &Modulation) {
        self.frame = frame;
        self.view = sweep.view_at(frame);

        if let Some(system) = self.particles.as_mut() {
            system.step(&mut self.rng);
            system.recolor(&self.mapper, modulation.particle_alpha);
            let sizes = system.pulsed_sizes(frame, modulation.size_pulse, &mut self.rng);
            self.instances = system.instances(&sizes);
        }

        self.face_colors = self
            .mapper
            .face_colors(&self.surface, modulation.surface_alpha_at(frame));
    }

    /// Borrow the prepared frame for rendering.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            view: self.view,
            surface: &self.surface,
            face_colors: &self.face_colors,
            particles: self.particles.as_ref().map(|_| self.instances.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GradientChoice;
    use crate::geometry::default_primitive;
    use crate::particles::ParticleSettings;
    use rand::SeedableRng;

    fn modulation() -> Modulation {
        Modulation {
            surface_alpha: 0.3,
            surface_alpha_pulse: 0.1,
            particle_alpha: 0.6,
            size_pulse: 0.2,
        }
    }

    #[test]
    fn test_surface_alpha_pulse() {
        let m = modulation();
        assert!((m.surface_alpha_at(0) - 0.3).abs() < 1e-6);
        assert!((m.surface_alpha_at(45) - 0.4).abs() < 1e-6);
        assert!((m.surface_alpha_at(135) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_advance_prepares_snapshot() {
        let surface = default_primitive();
        let mut rng = StdRng::seed_from_u64(2);
        let system = ParticleSystem::initialize(&surface, 40, &ParticleSettings::default(), &mut rng).unwrap();
        let mapper = ColorMapper::for_elevation(GradientChoice::Default.gradient(), &surface);
        let sweep = ViewSweep::orbit();
        let mut state = AnimationState::new(surface, Some(system), mapper, rng, &sweep);

        state.advance(5, &sweep, &modulation());
        assert_eq!(state.frame(), 5);
        assert_eq!(state.view(), sweep.view_at(5));
        assert_eq!(state.particles().map(|p| p.steps()), Some(1));

        let snap = state.snapshot();
        assert_eq!(snap.face_colors.len(), 8);
        assert_eq!(snap.particles.map(|p| p.len()), Some(40));
        assert!(snap.particles.unwrap().iter().all(|p| p.color[3] == 0.6));
    }

    #[test]
    fn test_without_particles() {
        let surface = default_primitive();
        let mapper = ColorMapper::for_elevation(GradientChoice::RedEmphasis.gradient(), &surface);
        let sweep = ViewSweep::turntable();
        let mut state = AnimationState::new(surface, None, mapper, StdRng::seed_from_u64(0), &sweep);
        state.advance(0, &sweep, &modulation());
        assert!(state.snapshot().particles.is_none());
    }
}
