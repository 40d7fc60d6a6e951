//! Run configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "particle_count": 1500, "color_gradient": "blue-emphasis", "seed": 7 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::ViewSweep;
use crate::color::GradientChoice;
use crate::geometry::{GeometryError, SurfaceSpec};
use crate::particles::{ParticleError, ParticleSettings};

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON was malformed or had wrong types.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value was out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Particle settings were out of range.
    #[error(transparent)]
    Particles(#[from] ParticleError),

    /// The procedural surface parameters were rejected.
    #[error("invalid surface: {0}")]
    Surface(#[from] GeometryError),
}

/// Everything one animation run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HologramConfig {
    /// Particles in the halo.
    pub particle_count: usize,
    /// Frames to render.
    pub frame_count: usize,
    /// Playback rate of the export.
    pub frame_rate: u32,
    /// Where the export goes.
    pub output_path: PathBuf,
    /// Color ramp preset.
    pub color_gradient: GradientChoice,
    /// Whether to simulate the particle halo.
    pub particles_enabled: bool,
    /// Seed for the run's random generator; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Optional mesh file replacing the procedural surface.
    pub mesh_path: Option<PathBuf>,
    /// Procedural surface parameters.
    pub surface: SurfaceSpec,
    /// Particle tuning.
    pub particles: ParticleSettings,
    /// Camera sweep.
    pub view: ViewSweep,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Base surface alpha.
    pub surface_alpha: f32,
    /// Amplitude of the surface alpha pulse.
    pub surface_alpha_pulse: f32,
}

impl Default for HologramConfig {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            frame_count: 180,
            frame_rate: 30,
            output_path: PathBuf::from("hologram_face.gif"),
            color_gradient: GradientChoice::Default,
            particles_enabled: true,
            seed: None,
            mesh_path: None,
            surface: SurfaceSpec::default(),
            particles: ParticleSettings::default(),
            view: ViewSweep::default(),
            width: 480,
            height: 480,
            surface_alpha: 0.3,
            surface_alpha_pulse: 0.1,
        }
    }
}

impl HologramConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest accepted frame width or height, in pixels.
    pub const MAX_FRAME_SIDE: u32 = 8192;

    /// Check counts, sizes, nested settings and the surface parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.particle_count == 0 {
            return Err(invalid("particle_count", "must be positive"));
        }
        if self.frame_count == 0 {
            return Err(invalid("frame_count", "must be positive"));
        }
        if self.frame_rate == 0 {
            return Err(invalid("frame_rate", "must be positive"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(invalid("output_path", "must not be empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(
                "width",
                format!("frame size {}x{} is empty", self.width, self.height),
            ));
        }
        if self.width > Self::MAX_FRAME_SIDE || self.height > Self::MAX_FRAME_SIDE {
            return Err(invalid(
                "width",
                format!(
                    "frame size {}x{} exceeds {} pixels per side",
                    self.width,
                    self.height,
                    Self::MAX_FRAME_SIDE
                ),
            ));
        }
        if !self.view.is_valid() {
            return Err(invalid("view", "angles must be finite"));
        }
        let lo = self.surface_alpha - self.surface_alpha_pulse.abs();
        let hi = self.surface_alpha + self.surface_alpha_pulse.abs();
        if !(lo.is_finite() && hi.is_finite() && lo >= 0.0 && hi <= 1.0) {
            return Err(invalid(
                "surface_alpha",
                format!("pulse range [{}, {}] leaves [0, 1]", lo, hi),
            ));
        }
        self.particles.validate()?;
        self.surface.generator()?;
        Ok(())
    }
}
