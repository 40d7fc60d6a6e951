//! STL file loader (ASCII and binary).

use std::collections::HashMap;

use super::{LoadError, LoadedMesh};
use crate::math::Point3;

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

/// STL loader. Shared corners are merged so the mesh comes out indexed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlLoader;

impl StlLoader {
    /// Create a new STL loader.
    pub fn new() -> Self {
        Self
    }

    /// Load either flavor, detected from the data.
    ///
    /// Data whose length matches the binary layout for its declared triangle
    /// count is read as binary, anything else as ASCII.
    pub fn load_from_bytes(&self, data: &[u8]) -> Result<LoadedMesh, LoadError> {
        if Self::is_binary(data) {
            self.load_binary(data)
        } else {
            let content = std::str::from_utf8(data).map_err(|e| LoadError::Parse {
                line: 0,
                message: format!("invalid UTF-8 in ASCII STL: {}", e),
            })?;
            self.load_from_str(content)
        }
    }

    fn is_binary(data: &[u8]) -> bool {
        if data.len() < HEADER_LEN + 4 {
            return false;
        }
        let count = read_u32(data, HEADER_LEN) as usize;
        data.len() == HEADER_LEN + 4 + count * TRIANGLE_LEN
    }

    /// Load a binary STL.
    pub fn load_binary(&self, data: &[u8]) -> Result<LoadedMesh, LoadError> {
        if data.len() < HEADER_LEN + 4 {
            return Err(LoadError::Parse {
                line: 0,
                message: "binary STL shorter than its header".into(),
            });
        }
        let count = read_u32(data, HEADER_LEN) as usize;
        let expected = HEADER_LEN + 4 + count * TRIANGLE_LEN;
        if data.len() < expected {
            return Err(LoadError::Parse {
                line: 0,
                message: format!(
                    "binary STL declares {} triangles but has {} bytes (need {})",
                    count,
                    data.len(),
                    expected
                ),
            });
        }

        let mut builder = MeshBuilder::default();
        for t in 0..count {
            // Skip the 12-byte facet normal; the 2-byte attribute follows the corners.
            let base = HEADER_LEN + 4 + t * TRIANGLE_LEN + 12;
            let mut face = [0u32; 3];
            for (k, slot) in face.iter_mut().enumerate() {
                let off = base + k * 12;
                let p = Point3::new(read_f32(data, off), read_f32(data, off + 4), read_f32(data, off + 8));
                *slot = builder.vertex(p);
            }
            builder.mesh.faces.push(face);
        }

        log::debug!("Parsed binary STL: {} triangles", count);
        Ok(builder.mesh)
    }

    /// Load an ASCII STL from string content.
    pub fn load_from_str(&self, content: &str) -> Result<LoadedMesh, LoadError> {
        let mut builder = MeshBuilder::default();
        let mut corners: Vec<u32> = Vec::with_capacity(3);

        for (line_no, line) in content.lines().enumerate() {
            let line_no = line_no + 1;
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.first().copied() {
                Some("outer") => corners.clear(),
                Some("vertex") => {
                    if parts.len() < 4 {
                        return Err(parse_error(line_no, "vertex needs 3 coordinates"));
                    }
                    let mut xyz = [0.0f32; 3];
                    for (slot, text) in xyz.iter_mut().zip(&parts[1..4]) {
                        *slot = text
                            .parse::<f32>()
                            .map_err(|e| parse_error(line_no, format!("bad coordinate `{}`: {}", text, e)))?;
                    }
                    corners.push(builder.vertex(Point3::from_array(xyz)));
                }
                Some("endloop") => {
                    if corners.len() != 3 {
                        return Err(parse_error(
                            line_no,
                            format!("facet has {} vertices, expected 3", corners.len()),
                        ));
                    }
                    builder.mesh.faces.push([corners[0], corners[1], corners[2]]);
                    corners.clear();
                }
                _ => {}
            }
        }

        log::debug!("Parsed ASCII STL: {} triangles", builder.mesh.face_count());
        Ok(builder.mesh)
    }
}

/// Accumulates vertices, merging bit-identical positions.
#[derive(Default)]
struct MeshBuilder {
    mesh: LoadedMesh,
    cache: HashMap<[u32; 3], u32>,
}

impl MeshBuilder {
    fn vertex(&mut self, p: Point3) -> u32 {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let vertices = &mut self.mesh.vertices;
        *self.cache.entry(key).or_insert_with(|| {
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32(data, offset))
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

    const TETRA: [[f32; 3]; 4] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    const FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

    fn binary_tetra() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(FACES.len() as u32).to_le_bytes());
        for face in FACES {
            data.extend_from_slice(&[0u8; 12]);
            for &v in &face {
                for c in TETRA[v] {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            data.extend_from_slice(&[0u8; 2]);
        }
        data
    }

    #[test]
    fn test_binary_merges_shared_corners() {
        let mesh = StlLoader::new().load_from_bytes(&binary_tetra()).unwrap();
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertices[0], Point3::ZERO);
    }

    #[test]
    fn test_truncated_binary_is_error() {
        let mut data = binary_tetra();
        data.truncate(data.len() - 10);
        assert!(StlLoader::new().load_binary(&data).is_err());
    }

    #[test]
    fn test_ascii() {
        let src = "solid t
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid t
";
        let mesh = StlLoader::new().load_from_bytes(src.as_bytes()).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces[1], [1, 3, 2]);
    }

    #[test]
    fn test_ascii_short_facet_is_error() {
        let src = "solid t\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendsolid\n";
        let err = StlLoader::new().load_from_str(src).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 5, .. }));
    }
}
