//! Scalar-to-color mapping over a normalization domain.

use rayon::prelude::*;

use crate::geometry::Surface;
use crate::math::{Color, Point3, Rgba};

use super::{ColorError, ColorGradient};

/// Map `value` through `gradient` after normalizing it into
/// `[domain_min, domain_max]`. The normalized value is clamped, so the color
/// channels always lie in [0, 1]; `alpha` is passed through untouched.
///
/// Fails when the domain is empty or not finite.
pub fn color_for(
    value: f32,
    domain_min: f32,
    domain_max: f32,
    gradient: &ColorGradient,
    alpha: f32,
) -> Result<Rgba, ColorError> {
    let span = domain_max - domain_min;
    if !(span.is_finite() && span != 0.0) {
        return Err(ColorError::DegenerateDomain {
            min: domain_min,
            max: domain_max,
        });
    }
    let t = ((value - domain_min) / span).clamp(0.0, 1.0);
    Ok(gradient.sample(t).with_alpha(alpha))
}

/// A gradient bound to one domain, with a fixed fallback for degenerate
/// domains so batch coloring never fails.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    gradient: ColorGradient,
    domain_min: f32,
    domain_max: f32,
    fallback: Color,
}

impl ColorMapper {
    /// Create a mapper. A degenerate domain is accepted here and every lookup
    /// then yields the gradient's midpoint color.
    pub fn new(gradient: ColorGradient, domain_min: f32, domain_max: f32) -> Self {
        let fallback = gradient.midpoint();
        if !(domain_max - domain_min).is_finite() || domain_max == domain_min {
            log::debug!(
                "Color domain [{}, {}] is degenerate; using fallback color",
                domain_min,
                domain_max
            );
        }
        Self {
            gradient,
            domain_min,
            domain_max,
            fallback,
        }
    }

    /// Mapper over a surface's elevation range. Empty surfaces get a
    /// degenerate domain.
    pub fn for_elevation(gradient: ColorGradient, surface: &Surface) -> Self {
        let (lo, hi) = surface.elevation_range().unwrap_or((0.0, 0.0));
        Self::new(gradient, lo, hi)
    }

    /// The bound gradient.
    #[inline]
    pub fn gradient(&self) -> &ColorGradient {
        &self.gradient
    }

    /// The normalization domain.
    #[inline]
    pub fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    /// Color used when the domain is degenerate.
    #[inline]
    pub fn fallback(&self) -> Color {
        self.fallback
    }

    /// Color for one value, falling back on a degenerate domain.
    pub fn map(&self, value: f32, alpha: f32) -> Rgba {
        color_for(value, self.domain_min, self.domain_max, &self.gradient, alpha)
            .unwrap_or_else(|_| self.fallback.with_alpha(alpha))
    }

    /// Color every point by its height.
    pub fn map_heights(&self, points: &[Point3], alpha: f32) -> Vec<Rgba> {
        points.iter().map(|p| self.map(p.z, alpha)).collect()
    }

    /// One color per surface face, keyed on the mean height of its corners.
    pub fn face_colors(&self, surface: &Surface, alpha: f32) -> Vec<Rgba> {
        let vertices = surface.vertices();
        surface
            .faces()
            .par_iter()
            .map(|&[a, b, c]| {
                let z = (vertices[a as usize].z + vertices[b as usize].z + vertices[c as usize].z) / 3.0;
                self.map(z, alpha)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GradientChoice;
    use crate::geometry::default_primitive;

    #[test]
    fn test_lower_clamp_matches_minimum() {
        let g = GradientChoice::Default.gradient();
        let below = color_for(-100.0, 0.0, 2.0, &g, 1.0).unwrap();
        let at_min = color_for(0.0, 0.0, 2.0, &g, 1.0).unwrap();
        assert_eq!(below, at_min);
        let above = color_for(50.0, 0.0, 2.0, &g, 1.0).unwrap();
        assert_eq!(above, color_for(2.0, 0.0, 2.0, &g, 1.0).unwrap());
    }

    #[test]
    fn test_alpha_is_independent() {
        let g = GradientChoice::BlueEmphasis.gradient();
        let a = color_for(0.3, 0.0, 1.0, &g, 0.25).unwrap();
        let b = color_for(0.3, 0.0, 1.0, &g, 0.9).unwrap();
        assert_eq!(a.rgb(), b.rgb());
        assert_eq!(a.a, 0.25);
    }

    #[test]
    fn test_degenerate_domain() {
        let g = GradientChoice::Default.gradient();
        assert_eq!(
            color_for(1.0, 1.0, 1.0, &g, 1.0),
            Err(ColorError::DegenerateDomain { min: 1.0, max: 1.0 })
        );
        let mapper = ColorMapper::new(g.clone(), 1.0, 1.0);
        assert_eq!(mapper.map(5.0, 0.5), g.midpoint().with_alpha(0.5));
    }

    #[test]
    fn test_face_colors_per_face() {
        let surface = default_primitive();
        let mapper = ColorMapper::for_elevation(GradientChoice::Default.gradient(), &surface);
        assert_eq!(mapper.domain(), (-1.0, 1.0));
        let colors = mapper.face_colors(&surface, 0.4);
        assert_eq!(colors.len(), surface.face_count());
        // Upper faces and lower faces land on opposite halves of the ramp.
        assert_ne!(colors[0], colors[4]);
        assert!(colors.iter().all(|c| c.a == 0.4 && c.rgb().is_normalized()));
    }
}
