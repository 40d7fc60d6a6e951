//! Mesh loader trait and common types.

use std::path::{Path, PathBuf};

use crate::geometry::{default_primitive, Surface};
use crate::math::Point3;

use super::{LoadError, ObjLoader, StlLoader};

/// Triangle mesh data read from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle vertex indices.
    pub faces: Vec<[u32; 3]>,
}

impl LoadedMesh {
    /// Create empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Validate indices and convert into a surface.
    pub fn into_surface(self) -> Result<Surface, LoadError> {
        Ok(Surface::from_mesh(self.vertices, self.faces)?)
    }
}

/// Something that turns a path into mesh data.
pub trait MeshLoader {
    /// Read and parse the mesh at `path`.
    fn load(&self, path: &Path) -> Result<LoadedMesh, LoadError>;
}

/// Mesh file formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Wavefront OBJ.
    Obj,
    /// STL, ASCII or binary.
    Stl,
}

impl MeshFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "obj" => Ok(MeshFormat::Obj),
            "stl" => Ok(MeshFormat::Stl),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Loads OBJ and STL files from disk, picking the parser by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMeshLoader;

impl FileMeshLoader {
    /// Create a new file loader.
    pub fn new() -> Self {
        Self
    }
}

impl MeshLoader for FileMeshLoader {
    fn load(&self, path: &Path) -> Result<LoadedMesh, LoadError> {
        let format = MeshFormat::from_path(path)?;
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());

        let mesh = match format {
            MeshFormat::Obj => ObjLoader::new().load_from_bytes(&data)?,
            MeshFormat::Stl => StlLoader::new().load_from_bytes(&data)?,
        };
        if mesh.faces.is_empty() {
            return Err(LoadError::EmptyMesh {
                path: path.to_path_buf(),
            });
        }
        Ok(mesh)
    }
}

/// Where the surface of a run came from.
#[derive(Debug)]
pub enum MeshSource {
    /// Loaded from this file.
    File(PathBuf),
    /// The built-in primitive, substituted after a load failure.
    Fallback(LoadError),
}

/// Load `path` into a surface, substituting the built-in primitive when the
/// file is missing or malformed. The failure is logged and returned
/// alongside the fallback surface.
pub fn load_or_default<L: MeshLoader + ?Sized>(loader: &L, path: &Path) -> (Surface, MeshSource) {
    match loader.load(path).and_then(LoadedMesh::into_surface) {
        Ok(surface) => {
            log::info!(
                "Loaded mesh {} ({} vertices, {} faces)",
                path.display(),
                surface.vertex_count(),
                surface.face_count()
            );
            (surface, MeshSource::File(path.to_path_buf()))
        }
        Err(err) => {
            log::warn!("{}; using the default primitive", err);
            (default_primitive(), MeshSource::Fallback(err))
        }
    }
}
