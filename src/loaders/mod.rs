//! Mesh loaders for replacing the procedural surface with a file.

mod loader;
mod obj_loader;
mod stl_loader;

pub use loader::*;
pub use obj_loader::*;
pub use stl_loader::*;

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::GeometryError;

/// Error type for loading operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("mesh file not found: {}", path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Requested path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension is not a known mesh format.
    #[error("unsupported mesh format: {}", path.display())]
    UnsupportedFormat {
        /// Requested path.
        path: PathBuf,
    },

    /// Malformed content.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line, or 0 for binary data.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The file parsed but held no triangles.
    #[error("mesh file has no faces: {}", path.display())]
    EmptyMesh {
        /// Requested path.
        path: PathBuf,
    },

    /// The mesh data failed surface validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
