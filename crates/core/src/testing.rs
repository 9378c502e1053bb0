//! Recording [`Surface`] for asserting on the exact drawing sequence.

use glam::DVec2;

use crate::animate::LineStyle;
use crate::color::Rgba;
use crate::error::TitleError;
use crate::field::SurfaceSize;
use crate::surface::{Composite, StrokeSurface, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear(SurfaceSize),
    Stroke { from: DVec2, to: DVec2, style: LineStyle },
    Save,
    Restore,
    Scale(f64, f64),
    Font(String),
    Measure(String),
    Composite(Composite),
    Shadow(Rgba, f64),
    FillText { text: String, at: DVec2, color: Rgba },
}

/// Logs every call. Text advance is `char count * font_px * 0.6`, a
/// monospace approximation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    pub font_px: f64,
    /// When set, `fill_text` fails with this message.
    pub reject_text: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Stroke { .. }))
            .count()
    }
}

impl StrokeSurface for RecordingSurface {
    fn clear(&mut self, size: SurfaceSize) {
        self.calls.push(Call::Clear(size));
    }

    fn stroke_segment(&mut self, from: DVec2, to: DVec2, style: LineStyle) {
        self.calls.push(Call::Stroke { from, to, style });
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), TitleError> {
        self.calls.push(Call::Scale(x, y));
        Ok(())
    }

    fn set_font(&mut self, font: &str) {
        self.font_px = font
            .split_whitespace()
            .find_map(|part| part.strip_suffix("px")?.parse().ok())
            .unwrap_or(10.0);
        self.calls.push(Call::Font(font.to_owned()));
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, TitleError> {
        self.calls.push(Call::Measure(text.to_owned()));
        Ok(text.chars().count() as f64 * self.font_px * 0.6)
    }

    fn set_composite(&mut self, mode: Composite) -> Result<(), TitleError> {
        self.calls.push(Call::Composite(mode));
        Ok(())
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.calls.push(Call::Shadow(color, blur));
    }

    fn fill_text(&mut self, text: &str, at: DVec2, color: Rgba) -> Result<(), TitleError> {
        if let Some(msg) = &self.reject_text {
            return Err(TitleError::Surface(msg.clone()));
        }
        self.calls.push(Call::FillText {
            text: text.to_owned(),
            at,
            color,
        });
        Ok(())
    }
}
