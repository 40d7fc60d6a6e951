//! Geometry module: surfaces, their generators, and fallback primitives.

mod primitives;
mod surface;
mod surface_generator;

pub use primitives::{default_primitive, octahedron};
pub use surface::{GridShape, Surface};
pub use surface_generator::{BaseShape, ParamRange, SurfaceGenerator, SurfaceSpec};

use crate::field::FieldError;
use thiserror::Error;

/// Errors raised while constructing a surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer than two samples along an axis.
    #[error("grid resolution {resolution_u}x{resolution_v} is degenerate (both must be >= 2)")]
    InvalidResolution {
        /// Requested samples along `u`.
        resolution_u: usize,
        /// Requested samples along `v`.
        resolution_v: usize,
    },

    /// A radius or mask semi-axis was not a positive finite number.
    #[error("{name} must be finite and > 0, got {value}")]
    InvalidRadius {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A parameter range was empty or not finite.
    #[error("{axis} range [{start}, {end}] is empty or not finite")]
    InvalidRange {
        /// `"u"` or `"v"`.
        axis: &'static str,
        /// Range start.
        start: f32,
        /// Range end.
        end: f32,
    },

    /// A mesh had no vertices or no faces.
    #[error("mesh has no vertices or no faces")]
    EmptyMesh,

    /// A face referenced a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfBounds {
        /// Offending face.
        face: usize,
        /// Offending index.
        index: u32,
        /// Number of vertices available.
        vertex_count: usize,
    },

    /// The feature field could not be built.
    #[error(transparent)]
    Field(#[from] FieldError),
}
