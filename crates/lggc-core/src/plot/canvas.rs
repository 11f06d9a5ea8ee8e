//! Software drawing surface for the curve display.
//!
//! Curves are composited additively: each stroked path adds its colour,
//! weighted by coverage, to what is already on the surface. Where two
//! channel curves overlap the result brightens instead of occluding.
//! A single path is rasterized to a coverage mask first, so its own
//! overlapping segments do not add up.

use glam::Vec2;

use crate::grading::params::Channel;
use crate::plot::curve::{CurvePlot, CurvePoint, channel_color};

/// Stroke width of the channel curves, in pixels.
pub const LINE_WIDTH: f32 = 2.0;

/// Background the display is cleared to before plotting.
pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// RGBA f32 surface, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveCanvas {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Pixel data, `width × height` entries.
    pub pixels: Vec<[f32; 4]>,
}

impl CurveCanvas {
    /// A transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        }
    }

    /// Clear the display and draw all three channel curves.
    pub fn render(plot: &CurvePlot) -> Self {
        let mut canvas = Self::new(plot.width, plot.height);
        canvas.clear(BACKGROUND);
        for &channel in Channel::all() {
            canvas.stroke_polyline(plot.points(channel), channel_color(channel), LINE_WIDTH);
        }
        canvas
    }

    /// Replace every pixel with `color`.
    pub fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Pixel at `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Stroke an open polyline through `points` and add it to the surface.
    ///
    /// The first point starts the path; every following point adds a line
    /// segment. Fewer than two points draw nothing.
    pub fn stroke_polyline(&mut self, points: &[CurvePoint], color: [f32; 4], width: f32) {
        if points.len() < 2 || self.width == 0 || self.height == 0 {
            return;
        }

        let mut coverage = vec![0.0_f32; self.pixels.len()];
        let half = width * 0.5;
        for seg in points.windows(2) {
            self.rasterize_segment(&mut coverage, seg[0].into(), seg[1].into(), half);
        }

        for (px, &cov) in self.pixels.iter_mut().zip(&coverage) {
            if cov <= 0.0 {
                continue;
            }
            let weight = color[3] * cov;
            for c in 0..3 {
                px[c] = (px[c] + color[c] * weight).min(1.0);
            }
            px[3] = (px[3] + weight).min(1.0);
        }
    }

    /// Accumulate (by max) the coverage of a thick segment into `coverage`.
    fn rasterize_segment(&self, coverage: &mut [f32], a: Vec2, b: Vec2, half: f32) {
        // One pixel of antialiasing falloff beyond the stroke edge.
        let reach = half + 0.5;
        let min = a.min(b) - Vec2::splat(reach);
        let max = a.max(b) + Vec2::splat(reach);

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width - 1);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height - 1);

        let ab = b - a;
        let len_sq = ab.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = p.distance(a + ab * t);
                let cov = (reach - dist).clamp(0.0, 1.0);
                let idx = (y * self.width + x) as usize;
                if cov > coverage[idx] {
                    coverage[idx] = cov;
                }
            }
        }
    }

    /// Quantize to an 8-bit image for saving or display.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let px = self.pixels[(y * self.width + x) as usize];
            image::Rgba(px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        })
    }
}
