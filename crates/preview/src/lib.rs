#![deny(unsafe_code)]
//! Off-browser rendering of the flow field.
//!
//! The browser masks the field with text; this crate draws the bare field
//! into a CPU [`RasterSurface`] so the CLI can write previews without a
//! canvas. Both the CLI and tests depend on it.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use flow_title_core::error::TitleError;
use flow_title_core::field::{FlowField, SurfaceSize};
use flow_title_core::render::draw_field;
use flow_title_core::{FlowConfig, Pointer, Rgba, StrokeSurface, Xorshift64};

pub use raster::RasterSurface;

/// Builds a field for `size`, animates it `frames` times against a fixed
/// `pointer`, and rasterises the final frame over a black background.
///
/// The same `config`, `seed`, `pointer`, and `frames` always produce the same
/// pixels.
pub fn render_preview(
    config: &FlowConfig,
    size: SurfaceSize,
    seed: u64,
    pointer: Pointer,
    frames: u64,
) -> Result<RasterSurface, TitleError> {
    config.validate()?;
    let mut rng = Xorshift64::new(seed);
    let mut field = FlowField::build(size, config, &mut rng)?;
    let mut surface = RasterSurface::new(size, Rgba::BLACK)?;

    for time in 0..frames {
        field.advance(pointer, time, config);
    }

    surface.clear(size);
    draw_field(&field, &mut surface, frames.saturating_sub(1), config);
    Ok(surface)
}
