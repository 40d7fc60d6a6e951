//! # holoface - Procedural Holographic Face Animation
//!
//! holoface sculpts a face-like surface from a base primitive and a sum of
//! Gaussian control points, surrounds it with a drifting particle halo, and
//! renders a rotating, height-colored animation to a looping GIF or a PNG
//! sequence.
//!
//! ## Features
//!
//! - **Field**: Gaussian radial-basis feature fields and control-point presets
//! - **Geometry**: grid-sampled ellipsoid, layered-polar and flat surfaces
//! - **Particles**: area-weighted surface and shell sampling, damped random walk
//!   with radial containment
//! - **Color**: gradient lookup by height with clamping and fallback
//! - **Animation**: seeded, cancellable frame loop with a strict renderer and
//!   exporter interface
//!
//! ## Example
//!
//! ```no_run
//! use holoface::prelude::*;
//!
//! let config = HologramConfig { frame_count: 60, seed: Some(7), ..Default::default() };
//! let mut driver = AnimationDriver::new(config)?;
//! let mut renderer = SoftwareRenderer::new(480, 480)?;
//! driver.execute(
//!     &FileMeshLoader::new(),
//!     &mut renderer,
//!     &mut GifExporter::new(),
//!     &CancelToken::new(),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod animation;
pub mod color;
pub mod config;
pub mod core;
pub mod field;
pub mod geometry;
pub mod loaders;
pub mod math;
pub mod particles;
pub mod render;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::animation::*;
    pub use crate::color::*;
    pub use crate::config::*;
    pub use crate::core::*;
    pub use crate::field::*;
    pub use crate::geometry::*;
    pub use crate::loaders::*;
    pub use crate::math::*;
    pub use crate::particles::*;
    pub use crate::render::*;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "holoface";
