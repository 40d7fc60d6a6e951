//! The frame loop: build, render every frame, export.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::color::ColorMapper;
use crate::config::{ConfigError, HologramConfig};
use crate::core::{CancelToken, Clock};
use crate::geometry::{GeometryError, Surface};
use crate::loaders::{load_or_default, MeshLoader, MeshSource};
use crate::particles::{ParticleError, ParticleSystem};
use crate::render::{ExportError, ExportSettings, FrameExporter, FrameRenderer, RenderError, RenderedFrame};

use super::state::{AnimationState, DriverState, Modulation};

/// Errors that stop an animation run.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Surface generation failed.
    #[error("surface build failed: {0}")]
    Geometry(#[from] GeometryError),

    /// Particle system construction failed.
    #[error("particle system build failed: {0}")]
    Particles(#[from] ParticleError),

    /// The renderer failed or returned a malformed frame.
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Writing the frames failed. The frames are kept for a retry.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    /// An operation was called in the wrong lifecycle state.
    #[error("cannot {operation} while {state:?}")]
    InvalidTransition {
        /// Attempted operation.
        operation: &'static str,
        /// State at the time.
        state: DriverState,
    },
}

/// How the frame loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every frame was rendered.
    Completed {
        /// Frames rendered.
        frames: usize,
    },
    /// Cancellation was observed between frames.
    Cancelled {
        /// Frames rendered before the cancel.
        frames: usize,
    },
}

/// Summary of a full [`AnimationDriver::execute`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// How the loop ended.
    pub outcome: RunOutcome,
    /// Whether the built-in primitive replaced a mesh file.
    pub used_fallback_mesh: bool,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

/// Owns one run from configuration to exported artifact.
///
/// The lifecycle is `Idle → Initialized → Running → Finalizing → Done`;
/// any unrecoverable error moves the driver to `Failed`. An export failure
/// keeps the rendered frames so [`AnimationDriver::retry_export`] can try
/// again with another exporter.
pub struct AnimationDriver {
    config: HologramConfig,
    state: DriverState,
    animation: Option<AnimationState>,
    frames: Vec<RenderedFrame>,
    mesh_source: Option<MeshSource>,
    export_failed: bool,
}

impl AnimationDriver {
    /// Create an idle driver for a validated configuration.
    pub fn new(config: HologramConfig) -> Result<Self, AnimationError> {
        config.validate()?;
        Ok(Self {
            config,
            state: DriverState::Idle,
            animation: None,
            frames: Vec::new(),
            mesh_source: None,
            export_failed: false,
        })
    }

    /// The run's configuration.
    #[inline]
    pub fn config(&self) -> &HologramConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Live surface, particles and view, once initialized.
    #[inline]
    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Where the surface came from when a mesh file was configured.
    #[inline]
    pub fn mesh_source(&self) -> Option<&MeshSource> {
        self.mesh_source.as_ref()
    }

    fn expect_state(&self, operation: &'static str, ok: bool) -> Result<(), AnimationError> {
        if ok {
            Ok(())
        } else {
            Err(AnimationError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn fail<T>(&mut self, err: impl Into<AnimationError>) -> Result<T, AnimationError> {
        let err = err.into();
        log::error!("Animation failed: {}", err);
        self.state = DriverState::Failed;
        Err(err)
    }

    /// Build the surface and, if enabled, the particle system.
    ///
    /// A configured mesh file that cannot be loaded is replaced by the
    /// built-in primitive with a warning; the procedural surface is used when
    /// no mesh is configured. An error here leaves the driver `Idle`.
    pub fn initialize<L: MeshLoader + ?Sized>(&mut self, loader: &L) -> Result<(), AnimationError> {
        self.expect_state("initialize", self.state == DriverState::Idle)?;

        let surface = match &self.config.mesh_path {
            Some(path) => {
                let (surface, source) = load_or_default(loader, path);
                self.mesh_source = Some(source);
                surface
            }
            None => self.config.surface.build()?,
        };
        log::info!(
            "Surface ready: {} vertices, {} faces",
            surface.vertex_count(),
            surface.face_count()
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let particles = if self.config.particles_enabled {
            let system = ParticleSystem::initialize(
                &surface,
                self.config.particle_count,
                &self.config.particles,
                &mut rng,
            )?;
            log::info!("Particle system ready: {} particles", system.len());
            Some(system)
        } else {
            None
        };

        let mapper = ColorMapper::for_elevation(self.config.color_gradient.gradient(), &surface);
        self.animation = Some(AnimationState::new(
            surface,
            particles,
            mapper,
            rng,
            &self.config.view,
        ));
        self.state = DriverState::Initialized;
        Ok(())
    }

    fn modulation(&self) -> Modulation {
        Modulation {
            surface_alpha: self.config.surface_alpha,
            surface_alpha_pulse: self.config.surface_alpha_pulse,
            particle_alpha: self.config.particles.alpha,
            size_pulse: self.config.particles.size_pulse,
        }
    }

    /// Render every frame, checking `cancel` before each one.
    ///
    /// A completed loop leaves the driver in `Finalizing`; a cancelled loop
    /// goes straight to `Done` and keeps the frames rendered so far.
    pub fn run<R: FrameRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, AnimationError> {
        self.expect_state("run", self.state == DriverState::Initialized)?;

        let expected = (self.config.width, self.config.height);
        if renderer.frame_size() != expected {
            let actual = renderer.frame_size();
            return self.fail(RenderError::SizeMismatch {
                index: 0,
                expected,
                actual,
            });
        }

        let Some(mut animation) = self.animation.take() else {
            return Err(AnimationError::InvalidTransition {
                operation: "run",
                state: self.state,
            });
        };
        let result = self.render_frames(&mut animation, renderer, cancel, expected);
        self.animation = Some(animation);
        match result {
            Ok(outcome) => Ok(outcome),
            Err(err) => self.fail(err),
        }
    }

    fn render_frames<R: FrameRenderer + ?Sized>(
        &mut self,
        animation: &mut AnimationState,
        renderer: &mut R,
        cancel: &CancelToken,
        expected: (u32, u32),
    ) -> Result<RunOutcome, RenderError> {
        let modulation = self.modulation();
        let sweep = self.config.view;
        let frame_count = self.config.frame_count;
        self.frames.reserve(frame_count);

        for frame in 0..frame_count {
            if cancel.is_cancelled() {
                log::info!("Cancelled after {} of {} frames", frame, frame_count);
                self.state = DriverState::Done;
                return Ok(RunOutcome::Cancelled { frames: frame });
            }
            self.state = DriverState::Running { frame };

            animation.advance(frame, &sweep, &modulation);
            let rendered = renderer.render(&animation.snapshot())?;

            if rendered.size() != expected {
                return Err(RenderError::SizeMismatch {
                    index: frame,
                    expected,
                    actual: rendered.size(),
                });
            }
            if rendered.index != frame {
                return Err(RenderError::IndexMismatch {
                    expected: frame,
                    actual: rendered.index,
                });
            }
            self.frames.push(rendered);

            if (frame + 1) % 30 == 0 || frame + 1 == frame_count {
                log::debug!("Rendered {}/{} frames", frame + 1, frame_count);
            }
        }

        self.state = DriverState::Finalizing;
        Ok(RunOutcome::Completed {
            frames: self.frames.len(),
        })
    }

    fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            frame_rate: self.config.frame_rate,
            output_path: self.config.output_path.clone(),
        }
    }

    fn export_with<E: FrameExporter + ?Sized>(&mut self, exporter: &mut E) -> Result<(), AnimationError> {
        let settings = self.export_settings();
        match exporter.export(&self.frames, &settings) {
            Ok(()) => {
                log::info!(
                    "Exported {} frames to {}",
                    self.frames.len(),
                    settings.output_path.display()
                );
                self.export_failed = false;
                self.state = DriverState::Done;
                Ok(())
            }
            Err(err) => {
                self.export_failed = true;
                self.fail(err)
            }
        }
    }

    /// Hand all rendered frames to the exporter.
    pub fn finalize<E: FrameExporter + ?Sized>(&mut self, exporter: &mut E) -> Result<(), AnimationError> {
        self.expect_state("finalize", self.state == DriverState::Finalizing)?;
        self.export_with(exporter)
    }

    /// Try the export again after a failed [`AnimationDriver::finalize`].
    pub fn retry_export<E: FrameExporter + ?Sized>(&mut self, exporter: &mut E) -> Result<(), AnimationError> {
        self.expect_state(
            "retry export",
            self.state == DriverState::Failed && self.export_failed,
        )?;
        log::info!("Retrying export of {} frames", self.frames.len());
        self.export_with(exporter)
    }

    /// Initialize, run and finalize in one call, timing the whole run.
    /// A cancelled run is not exported.
    pub fn execute<L, R, E>(
        &mut self,
        loader: &L,
        renderer: &mut R,
        exporter: &mut E,
        cancel: &CancelToken,
    ) -> Result<RunReport, AnimationError>
    where
        L: MeshLoader + ?Sized,
        R: FrameRenderer + ?Sized,
        E: FrameExporter + ?Sized,
    {
        let mut clock = Clock::start_new();
        self.initialize(loader)?;
        let outcome = self.run(renderer, cancel)?;
        if let RunOutcome::Completed { .. } = outcome {
            self.finalize(exporter)?;
        }
        let elapsed = clock.stop();
        log::info!("Animation finished in {:.2}s", elapsed.as_secs_f64());

        Ok(RunReport {
            outcome,
            used_fallback_mesh: matches!(self.mesh_source, Some(MeshSource::Fallback(_))),
            elapsed,
        })
    }

    /// The surface of an initialized run.
    pub fn surface(&self) -> Option<&Surface> {
        self.animation.as_ref().map(AnimationState::surface)
    }
}
