//! [`Surface`] over a browser `CanvasRenderingContext2d`.

use flow_title_core::error::TitleError;
use flow_title_core::field::SurfaceSize;
use flow_title_core::surface::{Composite, StrokeSurface, Surface};
use flow_title_core::{LineStyle, Rgba};
use glam::DVec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

fn js_error(context: &str, err: JsValue) -> TitleError {
    TitleError::Surface(format!("{context}: {err:?}"))
}

/// Borrowed 2D context for the duration of one frame.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl StrokeSurface for CanvasSurface<'_> {
    fn clear(&mut self, size: SurfaceSize) {
        let extent = size.as_dvec2();
        self.ctx.clear_rect(0.0, 0.0, extent.x, extent.y);
    }

    fn stroke_segment(&mut self, from: DVec2, to: DVec2, style: LineStyle) {
        self.ctx.set_stroke_style_str(&style.color.css());
        self.ctx.set_line_width(style.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

impl Surface for CanvasSurface<'_> {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), TitleError> {
        self.ctx.scale(x, y).map_err(|e| js_error("scale", e))
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, TitleError> {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .map_err(|e| js_error("measureText", e))
    }

    fn set_composite(&mut self, mode: Composite) -> Result<(), TitleError> {
        self.ctx
            .set_global_composite_operation(mode.as_css())
            .map_err(|e| js_error("globalCompositeOperation", e))
    }

    fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.ctx.set_shadow_color(&color.css());
        self.ctx.set_shadow_blur(blur);
    }

    fn fill_text(&mut self, text: &str, at: DVec2, color: Rgba) -> Result<(), TitleError> {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_text(text, at.x, at.y)
            .map_err(|e| js_error("fillText", e))
    }
}
