//! Drawing interface the effect renders through.
//!
//! [`StrokeSurface`] is the part every backend supports (the CPU preview
//! raster included); [`Surface`] adds the transform, text, and compositing
//! operations of a 2D canvas context. Operations the host may reject return
//! `Result`; the rest are infallible.

use glam::DVec2;

use crate::animate::LineStyle;
use crate::color::Rgba;
use crate::error::TitleError;
use crate::field::SurfaceSize;

/// Clearing and stroking, enough to draw the bare field.
pub trait StrokeSurface {
    /// Resets every pixel of a `size` surface.
    fn clear(&mut self, size: SurfaceSize);

    /// Strokes a straight segment from `from` to `to`.
    fn stroke_segment(&mut self, from: DVec2, to: DVec2, style: LineStyle);
}

/// How newly drawn pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Paint over.
    SourceOver,
    /// Keep existing pixels only where the new shape is opaque.
    DestinationIn,
}

impl Composite {
    /// Canvas `globalCompositeOperation` keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::DestinationIn => "destination-in",
        }
    }
}

/// A full 2D drawing context.
pub trait Surface: StrokeSurface {
    /// Pushes transform, composite, and shadow state.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Multiplies the current transform by a scale.
    fn scale(&mut self, x: f64, y: f64) -> Result<(), TitleError>;

    /// Sets the CSS `font` shorthand used by text operations.
    fn set_font(&mut self, font: &str);

    /// Advance width of `text` in the current font, ignoring the transform.
    fn measure_text(&mut self, text: &str) -> Result<f64, TitleError>;

    fn set_composite(&mut self, mode: Composite) -> Result<(), TitleError>;

    /// Shadow applied to subsequent fills.
    fn set_shadow(&mut self, color: Rgba, blur: f64);

    /// Fills `text` centered horizontally and vertically on `at`.
    fn fill_text(&mut self, text: &str, at: DVec2, color: Rgba) -> Result<(), TitleError>;
}
