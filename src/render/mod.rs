//! Rendering and export collaborators.
//!
//! The animation driver hands one [`FrameSnapshot`] per frame to a
//! [`FrameRenderer`], collects the [`RenderedFrame`]s, and passes the whole
//! sequence to a [`FrameExporter`] once the run ends.

mod export;
mod software;

pub use export::{GifExporter, PngSequenceExporter};
pub use software::SoftwareRenderer;

use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

use crate::animation::ViewParams;
use crate::geometry::Surface;
use crate::math::Rgba;
use crate::particles::ParticleInstance;

/// Everything needed to draw one frame. Borrowed from the driver's state for
/// the duration of a single render call.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Camera angles and frame index.
    pub view: ViewParams,
    /// The surface being shown.
    pub surface: &'a Surface,
    /// One color per surface face.
    pub face_colors: &'a [Rgba],
    /// Particle instances, when particles are enabled.
    pub particles: Option<&'a [ParticleInstance]>,
}

/// One rasterized frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Frame index.
    pub index: usize,
    /// Pixels.
    pub image: RgbaImage,
}

impl RenderedFrame {
    /// Pixel dimensions.
    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Produces one image per snapshot.
pub trait FrameRenderer {
    /// Size of the frames this renderer produces.
    fn frame_size(&self) -> (u32, u32);

    /// Draw one frame.
    fn render(&mut self, snapshot: &FrameSnapshot<'_>) -> Result<RenderedFrame, RenderError>;
}

/// Output settings for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Playback rate, frames per second.
    pub frame_rate: u32,
    /// Target file or directory.
    pub output_path: PathBuf,
}

/// Writes a frame sequence somewhere.
pub trait FrameExporter {
    /// Write all frames, in order.
    fn export(&mut self, frames: &[RenderedFrame], settings: &ExportSettings) -> Result<(), ExportError>;
}

/// Errors raised while rendering a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Zero-sized output requested.
    #[error("invalid frame size {width}x{height}")]
    InvalidSize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// The face color buffer does not match the surface.
    #[error("expected {faces} face colors, got {colors}")]
    ColorCountMismatch {
        /// Faces on the surface.
        faces: usize,
        /// Colors supplied.
        colors: usize,
    },

    /// A renderer returned a frame of the wrong size.
    #[error("frame {index} is {actual:?}, expected {expected:?}")]
    SizeMismatch {
        /// Frame index.
        index: usize,
        /// Configured size.
        expected: (u32, u32),
        /// Size returned.
        actual: (u32, u32),
    },

    /// A renderer returned a frame labelled with another index.
    #[error("renderer returned frame {actual} for frame {expected}")]
    IndexMismatch {
        /// Requested frame.
        expected: usize,
        /// Index returned.
        actual: usize,
    },

    /// Backend-specific failure.
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Errors raised while exporting frames.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to write.
    #[error("no frames to export")]
    NoFrames,

    /// Frame rate must be positive.
    #[error("invalid frame rate {0}")]
    InvalidFrameRate(u32),

    /// Filesystem failure.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Encoder failure.
    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Collaborator-specific failure.
    #[error("export failed: {0}")]
    Backend(String),
}
