//! PNG output for [`RasterSurface`].
//!
//! Feature-gated behind `png` (default on) so the raster can be used without
//! the `image` crate.

use flow_title_core::error::TitleError;
use std::path::Path;

use crate::raster::RasterSurface;

/// Writes the surface as an RGBA PNG.
///
/// Returns `TitleError::InvalidDimensions` if the size overflows `u32`, or
/// `TitleError::Io` on encode or write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), TitleError> {
    let w = u32::try_from(surface.width()).map_err(|_| TitleError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| TitleError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_vec())
        .ok_or_else(|| TitleError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| TitleError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_title_core::{Pointer, Rgba, SurfaceSize};

    #[test]
    fn write_png_round_trip() {
        let surface = RasterSurface::new(SurfaceSize::new(16, 8), Rgba::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");

        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn preview_png_has_lit_pixels() {
        let surface = crate::render_preview(
            &flow_title_core::FlowConfig::default(),
            SurfaceSize::new(120, 40),
            42,
            Pointer::new(60.0, 20.0),
            10,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert!(img.pixels().any(|p| p.0[0] > 0));
    }

    #[test]
    fn write_png_into_missing_directory_is_io_error() {
        let surface = RasterSurface::new(SurfaceSize::new(2, 2), Rgba::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        assert!(matches!(write_png(&surface, &path), Err(TitleError::Io(_))));
    }
}
