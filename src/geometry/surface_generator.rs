//! Grid-sampled surface synthesis from a base primitive plus a feature field.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::field::{FeatureField, FeatureSet};
use crate::math::{consts, linspace, Point3};

use super::{GeometryError, GridShape, Surface};

/// The undeformed primitive a surface is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BaseShape {
    /// `(a·cos u·cos v, b·sin u·cos v, c·sin v)`. The field is added to `z`.
    Ellipsoid {
        /// X radius.
        a: f32,
        /// Y radius.
        b: f32,
        /// Z radius.
        c: f32,
    },
    /// Circular cross-sections stacked along `z`; `u` is the polar angle and
    /// `v` the layer height. The field is added to each layer's radius.
    LayeredPolar {
        /// Radius of the middle layer.
        mid_radius: f32,
        /// Radius of the first and last layers.
        end_radius: f32,
    },
    /// `x = u`, `y = v`, `z = field(x, y, 0)`.
    FlatGrid {
        /// Semi-axes `(rx, ry)` of an elliptical footprint. Samples outside
        /// become NaN.
        mask: Option<[f32; 2]>,
    },
}

impl BaseShape {
    fn validate(&self) -> Result<(), GeometryError> {
        let positive = |name: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GeometryError::InvalidRadius { name, value })
            }
        };
        match *self {
            BaseShape::Ellipsoid { a, b, c } => {
                positive("a", a)?;
                positive("b", b)?;
                positive("c", c)
            }
            BaseShape::LayeredPolar { mid_radius, end_radius } => {
                positive("mid_radius", mid_radius)?;
                positive("end_radius", end_radius)
            }
            BaseShape::FlatGrid { mask: Some([rx, ry]) } => {
                positive("mask.rx", rx)?;
                positive("mask.ry", ry)
            }
            BaseShape::FlatGrid { mask: None } => Ok(()),
        }
    }
}

/// An inclusive parameter interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    /// First sample.
    pub start: f32,
    /// Last sample.
    pub end: f32,
}

impl ParamRange {
    /// Create a new range.
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// `[-π/2, π/2]`, the frontal half of an angular parameter.
    pub const fn frontal() -> Self {
        Self::new(-consts::HALF_PI, consts::HALF_PI)
    }

    fn validate(&self, axis: &'static str) -> Result<(), GeometryError> {
        if self.start.is_finite() && self.end.is_finite() && self.start != self.end {
            Ok(())
        } else {
            Err(GeometryError::InvalidRange {
                axis,
                start: self.start,
                end: self.end,
            })
        }
    }
}

/// Everything needed to build one surface. Deserializable from config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSpec {
    /// Primitive to deform.
    pub base_shape: BaseShape,
    /// Range of the first parameter.
    pub u_range: ParamRange,
    /// Range of the second parameter.
    pub v_range: ParamRange,
    /// Samples along `u`.
    pub resolution_u: usize,
    /// Samples along `v`.
    pub resolution_v: usize,
    /// Control points sculpting the primitive.
    pub features: FeatureSet,
}

impl Default for SurfaceSpec {
    /// Frontal half of a deformed ellipsoid with humanoid landmarks.
    fn default() -> Self {
        Self {
            base_shape: BaseShape::Ellipsoid { a: 0.8, b: 0.8, c: 1.3 },
            u_range: ParamRange::frontal(),
            v_range: ParamRange::frontal(),
            resolution_u: 200,
            resolution_v: 200,
            features: FeatureSet::Humanoid,
        }
    }
}

impl SurfaceSpec {
    /// Validate every parameter and build the field.
    pub fn generator(&self) -> Result<SurfaceGenerator, GeometryError> {
        let field = self.features.build()?;
        SurfaceGenerator::new(
            self.base_shape,
            self.u_range,
            self.v_range,
            self.resolution_u,
            self.resolution_v,
            field,
        )
    }

    /// Validate, build the field, and generate the surface.
    pub fn build(&self) -> Result<Surface, GeometryError> {
        Ok(self.generator()?.generate())
    }
}

/// A validated generator. Construction checks every parameter so that
/// [`SurfaceGenerator::generate`] cannot fail.
#[derive(Debug, Clone)]
pub struct SurfaceGenerator {
    base_shape: BaseShape,
    u_range: ParamRange,
    v_range: ParamRange,
    shape: GridShape,
    field: FeatureField,
}

impl SurfaceGenerator {
    /// Create a generator.
    pub fn new(
        base_shape: BaseShape,
        u_range: ParamRange,
        v_range: ParamRange,
        resolution_u: usize,
        resolution_v: usize,
        field: FeatureField,
    ) -> Result<Self, GeometryError> {
        if resolution_u < 2 || resolution_v < 2 {
            return Err(GeometryError::InvalidResolution {
                resolution_u,
                resolution_v,
            });
        }
        base_shape.validate()?;
        u_range.validate("u")?;
        v_range.validate("v")?;

        Ok(Self {
            base_shape,
            u_range,
            v_range,
            shape: GridShape {
                rows: resolution_u,
                cols: resolution_v,
            },
            field,
        })
    }

    /// Grid dimensions of generated surfaces.
    #[inline]
    pub fn grid_shape(&self) -> GridShape {
        self.shape
    }

    /// The undeformed primitive at parameters `(u, v)`, or `None` when the
    /// sample falls outside a flat grid's mask.
    pub fn base_point(&self, u: f32, v: f32) -> Option<Point3> {
        match self.base_shape {
            BaseShape::Ellipsoid { a, b, c } => Some(Point3::new(
                a * u.cos() * v.cos(),
                b * u.sin() * v.cos(),
                c * v.sin(),
            )),
            BaseShape::LayeredPolar { .. } => {
                let r = self.layer_radius(v);
                Some(Point3::new(r * u.cos(), r * u.sin(), v))
            }
            BaseShape::FlatGrid { mask } => {
                if let Some([rx, ry]) = mask {
                    let e = (u / rx).powi(2) + (v / ry).powi(2);
                    if e > 1.0 {
                        return None;
                    }
                }
                Some(Point3::new(u, v, 0.0))
            }
        }
    }

    /// The deformed surface point at `(u, v)`. Masked samples are NaN.
    pub fn point_at(&self, u: f32, v: f32) -> Point3 {
        let Some(base) = self.base_point(u, v) else {
            return Point3::NAN;
        };
        let offset = self.field.evaluate(&base);

        match self.base_shape {
            BaseShape::LayeredPolar { .. } => {
                let r = self.layer_radius(v) + offset;
                Point3::new(r * u.cos(), r * u.sin(), base.z)
            }
            BaseShape::Ellipsoid { .. } | BaseShape::FlatGrid { .. } => {
                Point3::new(base.x, base.y, base.z + offset)
            }
        }
    }

    /// Vertex `(i, j)` of the generated grid. Same output as
    /// `generate().vertex(i, j)`.
    pub fn vertex(&self, i: usize, j: usize) -> Option<Point3> {
        if i >= self.shape.rows || j >= self.shape.cols {
            return None;
        }
        Some(self.point_at(self.u_at(i), self.v_at(j)))
    }

    /// Sample the whole grid. Rows are computed in parallel into disjoint
    /// slices of the output buffer.
    pub fn generate(&self) -> Surface {
        let us = linspace(self.u_range.start, self.u_range.end, self.shape.rows);
        let vs = linspace(self.v_range.start, self.v_range.end, self.shape.cols);

        let mut vertices = vec![Point3::ZERO; self.shape.rows * self.shape.cols];
        vertices
            .par_chunks_mut(self.shape.cols)
            .zip(us.par_iter())
            .for_each(|(row, &u)| {
                for (slot, &v) in row.iter_mut().zip(vs.iter()) {
                    *slot = self.point_at(u, v);
                }
            });

        let surface = Surface::from_grid(vertices, self.shape);
        log::debug!(
            "Generated {}x{} surface: {} vertices, {} faces",
            self.shape.rows,
            self.shape.cols,
            surface.vertex_count(),
            surface.face_count()
        );
        surface
    }

    fn u_at(&self, i: usize) -> f32 {
        sample_at(self.u_range, self.shape.rows, i)
    }

    fn v_at(&self, j: usize) -> f32 {
        sample_at(self.v_range, self.shape.cols, j)
    }

    /// Base radius of the layer at height `v`: `mid_radius` at the middle of
    /// the range, `end_radius` at both ends, quadratic in between.
    fn layer_radius(&self, v: f32) -> f32 {
        let BaseShape::LayeredPolar { mid_radius, end_radius } = self.base_shape else {
            return 0.0;
        };
        let span = self.v_range.end - self.v_range.start;
        let t = 2.0 * (v - self.v_range.start) / span - 1.0;
        end_radius + (mid_radius - end_radius) * (1.0 - t * t)
    }
}

/// Sample `index` of an inclusive `linspace` without allocating it.
fn sample_at(range: ParamRange, count: usize, index: usize) -> f32 {
    if index + 1 == count {
        range.end
    } else {
        crate::math::lerp(range.start, range.end, index as f32 / (count - 1) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ControlPoint;

    fn ellipsoid(field: FeatureField, res_u: usize, res_v: usize) -> SurfaceGenerator {
        SurfaceGenerator::new(
            BaseShape::Ellipsoid { a: 1.2, b: 1.0, c: 1.3 },
            ParamRange::new(0.0, consts::TWO_PI),
            ParamRange::new(0.0, consts::HALF_PI),
            res_u,
            res_v,
            field,
        )
        .unwrap()
    }

    #[test]
    fn test_ellipsoid_origin_vertex() {
        let surface = ellipsoid(FeatureField::empty(), 60, 30).generate();
        assert_eq!(surface.vertex_count(), 60 * 30);
        let v = surface.vertex(0, 0).unwrap();
        assert!(v.approx_eq(&Point3::new(1.2, 0.0, 0.0), 1e-6), "{:?}", v);
    }

    #[test]
    fn test_empty_field_matches_closed_form() {
        let generator = ellipsoid(FeatureField::empty(), 12, 7);
        let surface = generator.generate();
        let us = linspace(0.0, consts::TWO_PI, 12);
        let vs = linspace(0.0, consts::HALF_PI, 7);
        for (i, &u) in us.iter().enumerate() {
            for (j, &v) in vs.iter().enumerate() {
                let expected = Point3::new(1.2 * u.cos() * v.cos(), 1.0 * u.sin() * v.cos(), 1.3 * v.sin());
                assert_eq!(surface.vertex(i, j).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_parallel_generation_matches_vertex_query() {
        let field = FeatureSet::Humanoid.build().unwrap();
        let generator = ellipsoid(field, 17, 9);
        let surface = generator.generate();
        for i in 0..17 {
            for j in 0..9 {
                assert_eq!(surface.vertex(i, j), generator.vertex(i, j));
            }
        }
        assert_eq!(generator.generate(), surface);
    }

    #[test]
    fn test_field_added_to_elevation() {
        let cp = ControlPoint::new(Point3::new(1.2, 0.0, 0.0), 0.5, 0.1).unwrap();
        let generator = ellipsoid(FeatureField::new(vec![cp]).unwrap(), 4, 4);
        let v = generator.vertex(0, 0).unwrap();
        assert!(v.approx_eq(&Point3::new(1.2, 0.0, 0.5), 1e-6));
    }

    #[test]
    fn test_rejects_degenerate_grid_and_radii() {
        let r = ParamRange::new(0.0, 1.0);
        let shape = BaseShape::Ellipsoid { a: 1.0, b: 1.0, c: 1.0 };
        assert!(matches!(
            SurfaceGenerator::new(shape, r, r, 1, 5, FeatureField::empty()),
            Err(GeometryError::InvalidResolution { .. })
        ));
        assert!(matches!(
            SurfaceGenerator::new(shape, r, r, 5, 0, FeatureField::empty()),
            Err(GeometryError::InvalidResolution { .. })
        ));
        let flat = BaseShape::Ellipsoid { a: 1.0, b: 0.0, c: 1.0 };
        assert!(matches!(
            SurfaceGenerator::new(flat, r, r, 5, 5, FeatureField::empty()),
            Err(GeometryError::InvalidRadius { name: "b", .. })
        ));
        let empty = ParamRange::new(1.0, 1.0);
        assert!(matches!(
            SurfaceGenerator::new(shape, empty, r, 5, 5, FeatureField::empty()),
            Err(GeometryError::InvalidRange { axis: "u", .. })
        ));
    }

    #[test]
    fn test_flat_grid_mask() {
        let generator = SurfaceGenerator::new(
            BaseShape::FlatGrid { mask: Some([1.0, 0.5]) },
            ParamRange::new(-1.0, 1.0),
            ParamRange::new(-1.0, 1.0),
            5,
            5,
            FeatureField::empty(),
        )
        .unwrap();
        let surface = generator.generate();
        assert_eq!(surface.vertex_count(), 25);
        // Corner lies outside the footprint, center inside.
        assert!(!surface.vertex(0, 0).unwrap().is_finite());
        assert_eq!(surface.vertex(2, 2), Some(Point3::ZERO));
        for tri in surface.triangles() {
            assert!(tri.a.is_finite() && tri.b.is_finite() && tri.c.is_finite());
        }
        let (lo, hi) = surface.elevation_range().unwrap();
        assert_eq!((lo, hi), (0.0, 0.0));
    }

    #[test]
    fn test_layered_polar_taper() {
        let generator = SurfaceGenerator::new(
            BaseShape::LayeredPolar { mid_radius: 1.0, end_radius: 0.25 },
            ParamRange::new(0.0, consts::TWO_PI),
            ParamRange::new(-1.0, 1.0),
            8,
            3,
            FeatureField::empty(),
        )
        .unwrap();
        let bottom = generator.vertex(0, 0).unwrap();
        let middle = generator.vertex(0, 1).unwrap();
        let top = generator.vertex(0, 2).unwrap();
        assert!(bottom.approx_eq(&Point3::new(0.25, 0.0, -1.0), 1e-6));
        assert!(middle.approx_eq(&Point3::new(1.0, 0.0, 0.0), 1e-6));
        assert!(top.approx_eq(&Point3::new(0.25, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn test_layered_polar_field_moves_radius() {
        let cp = ControlPoint::new(Point3::new(1.0, 0.0, 0.0), 0.5, 0.05).unwrap();
        let generator = SurfaceGenerator::new(
            BaseShape::LayeredPolar { mid_radius: 1.0, end_radius: 0.25 },
            ParamRange::new(0.0, consts::TWO_PI),
            ParamRange::new(-1.0, 1.0),
            8,
            3,
            FeatureField::new(vec![cp]).unwrap(),
        )
        .unwrap();
        let middle = generator.vertex(0, 1).unwrap();
        assert!(middle.approx_eq(&Point3::new(1.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_default_spec_builds() {
        let spec = SurfaceSpec {
            resolution_u: 20,
            resolution_v: 20,
            ..SurfaceSpec::default()
        };
        let surface = spec.build().unwrap();
        assert_eq!(surface.vertex_count(), 400);
        assert_eq!(surface.face_count(), 2 * 19 * 19);
    }
}
