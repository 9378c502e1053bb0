//! RGBA8 pixel buffer that rasterises field strokes on the CPU.
//!
//! Always available (no feature gate) so callers can get at the raw buffer
//! without pulling in an image encoder.

use flow_title_core::error::TitleError;
use flow_title_core::field::SurfaceSize;
use flow_title_core::surface::StrokeSurface;
use flow_title_core::{LineStyle, Rgba};
use glam::DVec2;

/// A CPU stroke target. `clear` paints the background, strokes are blended
/// source-over with one pixel of anti-aliasing at their edges.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    background: Rgba,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Allocates a surface filled with `background`.
    ///
    /// Returns `TitleError::InvalidDimensions` for an empty size, when
    /// `width * height * 4` overflows `usize`, or when the buffer cannot be
    /// allocated.
    pub fn new(size: SurfaceSize, background: Rgba) -> Result<Self, TitleError> {
        let (width, height) = (size.width as usize, size.height as usize);
        if size.is_empty() {
            return Err(TitleError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(TitleError::InvalidDimensions)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| TitleError::InvalidDimensions)?;
        pixels.resize(len, 0);
        let mut surface = Self {
            width,
            height,
            background,
            pixels,
        };
        surface.fill_background();
        Ok(surface)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA bytes at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn fill_background(&mut self) {
        let bg = self.background;
        let a = (bg.a * 255.0).round() as u8;
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[bg.r, bg.g, bg.b, a]);
        }
    }

    /// Source-over blend of `color` at `coverage` into the pixel at `index`.
    fn blend(&mut self, index: usize, color: Rgba, coverage: f64) {
        let src_a = color.a * coverage;
        if src_a <= 0.0 {
            return;
        }
        let px = &mut self.pixels[index..index + 4];
        let dst_a = f64::from(px[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |src: u8, dst: u8| {
            let c = (f64::from(src) * src_a + f64::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        px[0] = mix(color.r, px[0]);
        px[1] = mix(color.g, px[1]);
        px[2] = mix(color.b, px[2]);
        px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl StrokeSurface for RasterSurface {
    fn clear(&mut self, size: SurfaceSize) {
        let (width, height) = (size.width as usize, size.height as usize);
        if !size.is_empty() && (width, height) != (self.width, self.height) {
            if let Some(len) = width.checked_mul(height).and_then(|n| n.checked_mul(4)) {
                self.width = width;
                self.height = height;
                self.pixels = vec![0; len];
            }
        }
        self.fill_background();
    }

    fn stroke_segment(&mut self, from: DVec2, to: DVec2, style: LineStyle) {
        let half = style.width.max(0.0) / 2.0;
        let pad = half + 1.0;
        let lo = from.min(to) - DVec2::splat(pad);
        let hi = from.max(to) + DVec2::splat(pad);
        if !(lo.is_finite() && hi.is_finite()) {
            return;
        }
        let x0 = lo.x.floor().max(0.0) as usize;
        let y0 = lo.y.floor().max(0.0) as usize;
        let x1 = (hi.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (hi.y.ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (half + 0.5 - segment_distance(center, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend((y * self.width + x) * 4, style.color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: f64) -> LineStyle {
        LineStyle {
            color: Rgba::WHITE,
            width,
        }
    }

    #[test]
    fn new_rejects_empty_sizes() {
        assert!(matches!(
            RasterSurface::new(SurfaceSize::new(0, 10), Rgba::BLACK),
            Err(TitleError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_fills_background_with_opaque_alpha() {
        let surface = RasterSurface::new(SurfaceSize::new(4, 3), Rgba::BLACK).unwrap();
        assert_eq!(surface.pixels().len(), 4 * 3 * 4);
        assert_eq!(surface.pixel(3, 2), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn horizontal_stroke_covers_its_row_only() {
        let mut surface = RasterSurface::new(SurfaceSize::new(20, 10), Rgba::BLACK).unwrap();
        surface.stroke_segment(DVec2::new(2.0, 5.0), DVec2::new(18.0, 5.0), solid(2.0));
        assert_eq!(surface.pixel(10, 5), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(10, 4), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(10, 0), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(10, 9), Some([0, 0, 0, 255]));
    }

    #[test]
    fn translucent_stroke_blends_with_background() {
        let mut surface = RasterSurface::new(SurfaceSize::new(10, 10), Rgba::BLACK).unwrap();
        let style = LineStyle {
            color: Rgba::white(0.5),
            width: 4.0,
        };
        surface.stroke_segment(DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0), style);
        let [r, g, b, a] = surface.pixel(5, 5).unwrap();
        assert_eq!((r, g, b, a), (128, 128, 128, 255));
    }

    #[test]
    fn strokes_outside_the_surface_are_clipped() {
        let mut surface = RasterSurface::new(SurfaceSize::new(10, 10), Rgba::BLACK).unwrap();
        surface.stroke_segment(DVec2::new(-50.0, -50.0), DVec2::new(-40.0, -40.0), solid(2.0));
        surface.stroke_segment(DVec2::new(5.0, 5.0), DVec2::new(500.0, 5.0), solid(2.0));
        surface.stroke_segment(DVec2::new(f64::NAN, 0.0), DVec2::new(1.0, 1.0), solid(2.0));
        assert_eq!(surface.pixel(9, 5), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn clear_restores_background_and_adopts_new_size() {
        let mut surface = RasterSurface::new(SurfaceSize::new(10, 10), Rgba::BLACK).unwrap();
        surface.stroke_segment(DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0), solid(3.0));
        surface.clear(SurfaceSize::new(6, 4));
        assert_eq!((surface.width(), surface.height()), (6, 4));
        assert!(surface.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn segment_distance_handles_points_and_ends() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        assert_eq!(segment_distance(DVec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(segment_distance(DVec2::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(segment_distance(DVec2::new(3.0, 4.0), a, a), 5.0);
    }
}
