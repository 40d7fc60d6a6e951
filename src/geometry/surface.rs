//! Vertex buffer plus triangle topology for a generated or loaded surface.

use crate::math::{Box3, Point3, Triangle};

use super::GeometryError;

/// Dimensions of a parameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Samples along the first parameter (`u`).
    pub rows: usize,
    /// Samples along the second parameter (`v`).
    pub cols: usize,
}

impl GridShape {
    /// Flat vertex index of grid cell `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// A surface ready for coloring and rendering.
///
/// Grid surfaces may carry NaN vertices for masked samples; those vertices
/// never appear in `faces` and are ignored by [`Surface::bounds`] and
/// [`Surface::elevation_range`].
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    vertices: Vec<Point3>,
    faces: Vec<[u32; 3]>,
    grid: Option<GridShape>,
}

impl Surface {
    /// Wrap grid-sampled vertices and triangulate every cell.
    ///
    /// Each cell becomes two triangles; a triangle touching a NaN vertex is
    /// dropped.
    pub(crate) fn from_grid(vertices: Vec<Point3>, shape: GridShape) -> Self {
        debug_assert_eq!(vertices.len(), shape.rows * shape.cols);

        let mut faces = Vec::with_capacity(2 * shape.rows.saturating_sub(1) * shape.cols.saturating_sub(1));
        for i in 0..shape.rows.saturating_sub(1) {
            for j in 0..shape.cols.saturating_sub(1) {
                let a = shape.index(i, j) as u32;
                let b = shape.index(i + 1, j) as u32;
                let c = shape.index(i + 1, j + 1) as u32;
                let d = shape.index(i, j + 1) as u32;

                for tri in [[a, b, c], [a, c, d]] {
                    if tri.iter().all(|&idx| vertices[idx as usize].is_finite()) {
                        faces.push(tri);
                    }
                }
            }
        }

        Self {
            vertices,
            faces,
            grid: Some(shape),
        }
    }

    /// Build a surface from an explicit triangle mesh, checking every index.
    pub fn from_mesh(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self, GeometryError> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }
        let vertex_count = vertices.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&idx| idx as usize >= vertex_count) {
                return Err(GeometryError::FaceIndexOutOfBounds {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            faces,
            grid: None,
        })
    }

    /// Wrap mesh data whose indices are known to be in range.
    pub(crate) fn from_trusted_mesh(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Self {
        debug_assert!(faces.iter().flatten().all(|&i| (i as usize) < vertices.len()));
        Self {
            vertices,
            faces,
            grid: None,
        }
    }

    /// All vertices, including masked NaN samples.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangle indices into [`Surface::vertices`].
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Grid dimensions when the surface came from a parameter grid.
    #[inline]
    pub fn grid(&self) -> Option<GridShape> {
        self.grid
    }

    /// Get the vertex count.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the triangle count.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex at grid cell `(i, j)`. `None` for mesh surfaces or out of range.
    pub fn vertex(&self, i: usize, j: usize) -> Option<Point3> {
        let shape = self.grid?;
        if i >= shape.rows || j >= shape.cols {
            return None;
        }
        self.vertices.get(shape.index(i, j)).copied()
    }

    /// Resolve face `index` to its corner positions.
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(index)?;
        Some(Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ))
    }

    /// Iterate over every face as a [`Triangle`].
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(move |&[a, b, c]| {
            Triangle::new(
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            )
        })
    }

    /// Vertices with every component finite.
    pub fn finite_vertices(&self) -> impl Iterator<Item = &Point3> + '_ {
        self.vertices.iter().filter(|v| v.is_finite())
    }

    /// Bounding box of the finite vertices.
    pub fn bounds(&self) -> Box3 {
        Box3::from_points(&self.vertices)
    }

    /// Minimum and maximum `z` over finite vertices, or `None` if there are none.
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        let bounds = self.bounds();
        if bounds.is_empty() {
            None
        } else {
            Some((bounds.min.z, bounds.max.z))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x3(masked: Option<usize>) -> Surface {
        let mut vertices = Vec::new();
        for i in 0..2 {
            for j in 0..3 {
                vertices.push(Point3::new(i as f32, j as f32, (i + j) as f32));
            }
        }
        if let Some(m) = masked {
            vertices[m] = Point3::NAN;
        }
        Surface::from_grid(vertices, GridShape { rows: 2, cols: 3 })
    }

    #[test]
    fn test_grid_triangulation() {
        let s = grid_2x3(None);
        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.face_count(), 4);
        assert_eq!(s.vertex(1, 2), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(s.vertex(2, 0), None);
    }

    #[test]
    fn test_masked_vertex_excluded() {
        // Vertex (0, 1) is shared by three of the four triangles.
        let s = grid_2x3(Some(1));
        assert_eq!(s.face_count(), 1);
        for face in s.faces() {
            assert!(!face.contains(&1));
        }
        assert_eq!(s.elevation_range(), Some((0.0, 3.0)));
    }

    #[test]
    fn test_mesh_index_validation() {
        let verts = vec![Point3::ZERO, Point3::UNIT_X, Point3::UNIT_Y];
        assert!(Surface::from_mesh(verts.clone(), vec![[0, 1, 2]]).is_ok());
        assert_eq!(
            Surface::from_mesh(verts.clone(), vec![[0, 1, 3]]),
            Err(GeometryError::FaceIndexOutOfBounds {
                face: 0,
                index: 3,
                vertex_count: 3
            })
        );
        assert_eq!(Surface::from_mesh(verts, vec![]), Err(GeometryError::EmptyMesh));
    }
}
