//! CPU rasterizer: orthographic projection and painter's-algorithm
//! compositing onto a solid background.

use glam::{Mat3, Vec3};
use image::{Rgba as Pixel, RgbaImage};

use crate::animation::ViewParams;
use crate::math::{deg_to_rad, Point3, Rgba};

use super::{FrameRenderer, FrameSnapshot, RenderError, RenderedFrame};

/// Reference width for particle sizes; sizes scale with the frame width.
const SIZE_REFERENCE_WIDTH: f32 = 480.0;

/// Draws surfaces and particles with alpha blending, far to near.
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    background: [f32; 3],
    /// Visible half-extent as a multiple of the surface's bounding radius.
    zoom_out: f32,
}

impl SoftwareRenderer {
    /// Create a renderer for `width` x `height` frames on a black background.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            background: [0.0; 3],
            zoom_out: 1.6,
        })
    }

    /// Use a different background color.
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = [color.r, color.g, color.b];
        self
    }

    /// World-to-camera rotation. Columns of the camera basis are right, up and
    /// toward-viewer; z is the world's vertical axis.
    fn view_matrix(view: &ViewParams) -> Mat3 {
        let (sa, ca) = deg_to_rad(view.azimuth).sin_cos();
        let (se, ce) = deg_to_rad(view.elevation).sin_cos();
        let right = Vec3::new(-sa, ca, 0.0);
        let up = Vec3::new(-se * ca, -se * sa, ce);
        let toward = Vec3::new(ce * ca, ce * sa, se);
        Mat3::from_cols(right, up, toward).transpose()
    }
}

/// Projects world points to pixel coordinates plus a depth (larger is nearer).
struct Projector {
    rotation: Mat3,
    center: Vec3,
    scale: f32,
    half_w: f32,
    half_h: f32,
}

impl Projector {
    fn project(&self, p: Point3) -> Vec3 {
        let v = self.rotation * (Vec3::from(p) - self.center);
        Vec3::new(self.half_w + v.x * self.scale, self.half_h - v.y * self.scale, v.z)
    }
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: [f32; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let a = color.a.clamp(0.0, 1.0);
        let px = &mut self.pixels[y as usize * self.width as usize + x as usize];
        px[0] = color.r * a + px[0] * (1.0 - a);
        px[1] = color.g * a + px[1] * (1.0 - a);
        px[2] = color.b * a + px[2] * (1.0 - a);
    }

    fn fill_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Rgba) {
        let area = edge(a, b, c);
        if area.abs() < f32::EPSILON {
            return;
        }
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(self.width as f32 - 1.0);
        let max_y = a.y.max(b.y).max(c.y).ceil().min(self.height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }

        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_disc(&mut self, center: Vec3, radius: f32, color: Rgba) {
        let r2 = radius * radius;
        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn into_image(self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (px, out) in self.pixels.iter().zip(image.pixels_mut()) {
            let bytes = Rgba::new(px[0], px[1], px[2], 1.0).to_rgba_bytes();
            *out = Pixel(bytes);
        }
        image
    }
}

fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl FrameRenderer for SoftwareRenderer {
    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, snapshot: &FrameSnapshot<'_>) -> Result<RenderedFrame, RenderError> {
        let surface = snapshot.surface;
        if snapshot.face_colors.len() != surface.face_count() {
            return Err(RenderError::ColorCountMismatch {
                faces: surface.face_count(),
                colors: snapshot.face_colors.len(),
            });
        }

        let bounds = surface.bounds();
        let (center, radius) = if bounds.is_empty() {
            (Point3::ZERO, 1.0)
        } else {
            (bounds.center(), bounds.max_half_extent().max(f32::EPSILON))
        };
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        let projector = Projector {
            rotation: Self::view_matrix(&snapshot.view),
            center: Vec3::from(center),
            scale: half_w.min(half_h) / (radius * self.zoom_out),
            half_w,
            half_h,
        };

        let mut canvas = Canvas::new(self.width, self.height, self.background);

        let vertices: Vec<Vec3> = surface.vertices().iter().map(|&v| projector.project(v)).collect();
        let mut faces: Vec<(f32, usize)> = surface
            .faces()
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let depth = f.iter().map(|&k| vertices[k as usize].z).sum::<f32>() / 3.0;
                (depth, i)
            })
            .filter(|(depth, _)| depth.is_finite())
            .collect();
        faces.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, i) in faces {
            let [a, b, c] = surface.faces()[i];
            canvas.fill_triangle(
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
                snapshot.face_colors[i],
            );
        }

        if let Some(particles) = snapshot.particles {
            let size_scale = self.width as f32 / SIZE_REFERENCE_WIDTH;
            let mut projected: Vec<(Vec3, f32, Rgba)> = particles
                .iter()
                .map(|p| {
                    let radius = (0.5 * p.size.max(0.0).sqrt() * size_scale).max(0.5);
                    (projector.project(p.position()), radius, p.color())
                })
                .filter(|(pos, _, _)| pos.is_finite())
                .collect();
            projected.sort_by(|a, b| a.0.z.total_cmp(&b.0.z));
            for (pos, radius, color) in projected {
                canvas.fill_disc(pos, radius, color);
            }
        }

        log::trace!(
            "Rendered frame {} at azimuth {:.1}, elevation {:.1}",
            snapshot.view.frame,
            snapshot.view.azimuth,
            snapshot.view.elevation
        );

        Ok(RenderedFrame {
            index: snapshot.view.frame,
            image: canvas.into_image(),
        })
    }
}
