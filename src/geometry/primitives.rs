//! Built-in fallback geometry.

use crate::math::Point3;

use super::Surface;

/// A closed octahedron with the given circumradius, centered at the origin.
///
/// Used in place of a source mesh that could not be loaded.
pub fn octahedron(radius: f32) -> Surface {
    let r = radius;
    let vertices = vec![
        Point3::new(r, 0.0, 0.0),
        Point3::new(-r, 0.0, 0.0),
        Point3::new(0.0, r, 0.0),
        Point3::new(0.0, -r, 0.0),
        Point3::new(0.0, 0.0, r),
        Point3::new(0.0, 0.0, -r),
    ];
    // Counter-clockwise when seen from outside.
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    Surface::from_trusted_mesh(vertices, faces)
}

/// The primitive substituted for a missing or corrupt source mesh.
pub fn default_primitive() -> Surface {
    octahedron(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_octahedron_is_closed() {
        let s = default_primitive();
        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.face_count(), 8);

        // Every undirected edge of a closed manifold is shared by exactly two faces.
        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for &[a, b, c] in s.faces() {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *edges.entry((p.min(q), p.max(q))).or_default() += 1;
            }
        }
        assert_eq!(edges.len(), 12);
        assert!(edges.values().all(|&n| n == 2));
    }

    #[test]
    fn test_outward_winding() {
        let s = octahedron(2.0);
        for tri in s.triangles() {
            let n = (tri.b - tri.a).cross(&(tri.c - tri.a));
            assert!(n.dot(&tri.centroid()) > 0.0);
        }
    }
}
