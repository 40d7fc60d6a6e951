//! Wavefront OBJ file loader.

use super::{LoadError, LoadedMesh};
use crate::math::Point3;

/// Wavefront OBJ loader. Reads vertex positions and faces; normals, texture
/// coordinates, groups and materials are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl ObjLoader {
    /// Create a new OBJ loader.
    pub fn new() -> Self {
        Self
    }

    /// Load an OBJ file from string content.
    pub fn load_from_str(&self, content: &str) -> Result<LoadedMesh, LoadError> {
        let mut mesh = LoadedMesh::new();

        for (line_no, line) in content.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => {
                    if parts.len() < 4 {
                        return Err(parse_error(line_no, "vertex needs 3 coordinates"));
                    }
                    let mut xyz = [0.0f32; 3];
                    for (slot, text) in xyz.iter_mut().zip(&parts[1..4]) {
                        *slot = text
                            .parse::<f32>()
                            .map_err(|e| parse_error(line_no, format!("bad coordinate `{}`: {}", text, e)))?;
                    }
                    mesh.vertices.push(Point3::from_array(xyz));
                }
                "f" => {
                    if parts.len() < 4 {
                        return Err(parse_error(line_no, "face needs at least 3 vertices"));
                    }
                    let corners = parts[1..]
                        .iter()
                        .map(|p| self.parse_face_vertex(p, mesh.vertices.len(), line_no))
                        .collect::<Result<Vec<u32>, _>>()?;

                    // Fan triangulation for convex polygons
                    for i in 1..corners.len() - 1 {
                        mesh.faces.push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {
                    // vn, vt, o, g, s, usemtl, mtllib: not needed for a point surface
                }
            }
        }

        log::debug!(
            "Parsed OBJ: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    /// Load an OBJ file from bytes.
    pub fn load_from_bytes(&self, data: &[u8]) -> Result<LoadedMesh, LoadError> {
        let content = std::str::from_utf8(data).map_err(|e| LoadError::Parse {
            line: 0,
            message: format!("invalid UTF-8: {}", e),
        })?;
        self.load_from_str(content)
    }

    /// Parse the position index of a face vertex (`v`, `v/vt`, `v//vn` or
    /// `v/vt/vn`). Negative indices count back from the latest vertex.
    fn parse_face_vertex(&self, s: &str, vertex_count: usize, line: usize) -> Result<u32, LoadError> {
        let head = s.split('/').next().unwrap_or_default();
        let raw: i64 = head
            .parse()
            .map_err(|_| parse_error(line, format!("bad face vertex `{}`", s)))?;

        let index = match raw {
            0 => None,
            r if r > 0 => Some(r - 1),
            r => Some(vertex_count as i64 + r),
        };
        match index {
            Some(i) if i >= 0 && (i as usize) < vertex_count => Ok(i as u32),
            _ => Err(parse_error(
                line,
                format!("face index {} out of range ({} vertices so far)", raw, vertex_count),
            )),
        }
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_fan_triangulated() {
        let src = "# quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n";
        let mesh = ObjLoader::new().load_from_str(src).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = ObjLoader::new().load_from_str(src).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        let err = ObjLoader::new().load_from_str(src).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_bad_coordinate_is_error() {
        let err = ObjLoader::new().load_from_str("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(ObjLoader::new().load_from_bytes(&[0xff, 0xfe, b'v']).is_err());
    }
}
