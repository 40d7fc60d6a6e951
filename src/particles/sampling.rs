//! Random point sampling on surfaces and spherical shells.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::geometry::Surface;
use crate::math::{consts, Point3, Triangle, Vector3};

use super::ParticleError;

/// Draws points on a surface, with each triangle chosen in proportion to its
/// area. Surfaces without any triangle of positive area fall back to
/// picking finite vertices uniformly.
pub(crate) enum SurfaceSampler {
    Area {
        triangles: Vec<Triangle>,
        index: WeightedIndex<f32>,
    },
    Vertices(Vec<Point3>),
}

impl SurfaceSampler {
    pub(crate) fn new(surface: &Surface) -> Result<Self, ParticleError> {
        let triangles: Vec<Triangle> = surface
            .triangles()
            .filter(|t| {
                let area = t.area();
                area.is_finite() && area > 0.0
            })
            .collect();

        if !triangles.is_empty() {
            if let Ok(index) = WeightedIndex::new(triangles.iter().map(Triangle::area)) {
                return Ok(SurfaceSampler::Area { triangles, index });
            }
        }

        let vertices: Vec<Point3> = surface.finite_vertices().copied().collect();
        if vertices.is_empty() {
            return Err(ParticleError::EmptySurface);
        }
        log::debug!(
            "Surface has no triangle with positive area; sampling {} vertices uniformly",
            vertices.len()
        );
        Ok(SurfaceSampler::Vertices(vertices))
    }

    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        match self {
            SurfaceSampler::Area { triangles, index } => {
                let tri = &triangles[index.sample(rng)];
                tri.sample_point(rng.gen::<f32>(), rng.gen::<f32>())
            }
            SurfaceSampler::Vertices(vertices) => vertices[rng.gen_range(0..vertices.len())],
        }
    }
}

/// A point at a uniformly random radius in `[r_min, r_max]` from `center`,
/// with azimuth uniform in [0, 2π) and polar angle uniform in [0, π].
pub(crate) fn shell_point<R: Rng + ?Sized>(rng: &mut R, center: Point3, r_min: f32, r_max: f32) -> Point3 {
    let theta = rng.gen_range(0.0..consts::TWO_PI);
    let phi = rng.gen_range(0.0..=consts::PI);
    let r = rng.gen_range(r_min..=r_max);
    center
        + Vector3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
}

/// A vector with each component uniform in `[-scale, scale]`.
pub(crate) fn symmetric_vector<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Vector3 {
    if scale == 0.0 {
        return Vector3::ZERO;
    }
    Vector3::new(
        rng.gen_range(-scale..=scale),
        rng.gen_range(-scale..=scale),
        rng.gen_range(-scale..=scale),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{default_primitive, Surface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_area_weighting_prefers_large_faces() {
        // One big and one tiny triangle sharing no vertices.
        let surface = Surface::from_mesh(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
                Point3::new(0.0, 0.0, 5.0),
                Point3::new(0.1, 0.0, 5.0),
                Point3::new(0.0, 0.1, 5.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        )
        .unwrap();
        let sampler = SurfaceSampler::new(&surface).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let on_small = (0..2000).filter(|_| sampler.sample(&mut rng).z > 1.0).count();
        // Expected share is 1e-4, so a handful at most.
        assert!(on_small < 10, "{} samples hit the tiny face", on_small);
    }

    #[test]
    fn test_degenerate_faces_fall_back_to_vertices() {
        let surface = Surface::from_mesh(
            vec![Point3::ZERO, Point3::UNIT_X, Point3::new(2.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let sampler = SurfaceSampler::new(&surface).unwrap();
        assert!(matches!(sampler, SurfaceSampler::Vertices(_)));
        let mut rng = StdRng::seed_from_u64(1);
        let p = sampler.sample(&mut rng);
        assert!(surface.vertices().contains(&p));
    }

    #[test]
    fn test_shell_radius_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = Point3::new(1.0, -2.0, 0.5);
        for _ in 0..500 {
            let d = shell_point(&mut rng, center, 0.9, 1.1).distance_to(&center);
            assert!((0.9 - 1e-5..=1.1 + 1e-5).contains(&d), "{}", d);
        }
    }

    #[test]
    fn test_octahedron_samples_lie_on_faces() {
        let surface = default_primitive();
        let sampler = SurfaceSampler::new(&surface).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = sampler.sample(&mut rng);
            // |x| + |y| + |z| = 1 on the unit octahedron.
            assert!((p.x.abs() + p.y.abs() + p.z.abs() - 1.0).abs() < 1e-5);
        }
    }
}
