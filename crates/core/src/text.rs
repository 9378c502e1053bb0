//! Placement and glow of the masking text.

use glam::DVec2;

use crate::color::Rgba;
use crate::field::SurfaceSize;

/// Font size relative to surface width.
const WIDTH_RATIO: f64 = 0.15;
/// Font size relative to surface height.
const HEIGHT_RATIO: f64 = 0.8;

/// Font size in pixels: the smaller of 15% of the width and 80% of the height.
pub fn font_size(size: SurfaceSize) -> f64 {
    let extent = size.as_dvec2();
    (extent.x * WIDTH_RATIO).min(extent.y * HEIGHT_RATIO)
}

/// Where and how wide the text is drawn on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayout {
    pub font_size: f64,
    /// Horizontal scale in (0, 1]; text is shrunk to fit, never stretched.
    pub scale: f64,
    /// Text center in the scaled coordinate space.
    pub anchor: DVec2,
}

impl TextLayout {
    /// Lays out text whose unscaled advance width is `text_width`.
    pub fn new(size: SurfaceSize, font_size: f64, text_width: f64) -> Self {
        let extent = size.as_dvec2();
        let scale = if text_width > 0.0 {
            (extent.x / text_width).min(1.0)
        } else {
            1.0
        };
        // an empty surface would give scale 0 and an infinite anchor
        let scale = if scale > 0.0 { scale } else { 1.0 };
        Self {
            font_size,
            scale,
            anchor: DVec2::new(extent.x / 2.0 / scale, extent.y / 2.0),
        }
    }
}

/// Breathing glow drawn over the masked field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub shadow: Rgba,
    pub blur: f64,
    pub fill: Rgba,
}

impl Glow {
    pub fn at(time: u64) -> Self {
        let t = time as f64;
        Self {
            shadow: Rgba::white(0.1 + (t * 0.002).sin() * 0.05),
            blur: 10.0 + (t * 0.003).sin() * 5.0,
            fill: Rgba::white(0.2),
        }
    }
}
