//! Draws one frame of the effect onto a [`Surface`].
//!
//! Order per frame: clear, stroke the field under the text's horizontal
//! scale, punch it out with the text (`destination-in`), then paint a soft
//! glowing copy of the text on top.

use crate::animate::{LineStyle, Pointer};
use crate::color::Rgba;
use crate::config::FlowConfig;
use crate::error::TitleError;
use crate::field::FlowField;
use crate::surface::{Composite, StrokeSurface, Surface};
use crate::text::{font_size, Glow, TextLayout};

/// Strokes every line of `field` with its shimmer style for frame `time`.
pub fn draw_field<S: StrokeSurface + ?Sized>(
    field: &FlowField,
    surface: &mut S,
    time: u64,
    config: &FlowConfig,
) {
    for line in field.lines() {
        let style = LineStyle::at(time, line.phase(), config);
        surface.stroke_segment(line.position(), line.tip(), style);
    }
}

/// Advances `field` toward `pointer` and renders the complete frame `time`.
pub fn draw_frame<S: Surface + ?Sized>(
    field: &mut FlowField,
    pointer: Pointer,
    time: u64,
    config: &FlowConfig,
    surface: &mut S,
) -> Result<(), TitleError> {
    let size = field.size();
    surface.clear(size);

    let px = font_size(size);
    surface.set_font(&config.font.css(px));
    let measured = surface.measure_text(&config.text)?;
    let layout = TextLayout::new(size, px, measured);

    field.advance(pointer, time, config);

    surface.save();
    let drawn = draw_masked(field, &layout, time, config, surface);
    surface.restore();
    drawn
}

fn draw_masked<S: Surface + ?Sized>(
    field: &FlowField,
    layout: &TextLayout,
    time: u64,
    config: &FlowConfig,
    surface: &mut S,
) -> Result<(), TitleError> {
    surface.scale(layout.scale, 1.0)?;
    draw_field(field, surface, time, config);

    surface.set_composite(Composite::DestinationIn)?;
    surface.fill_text(&config.text, layout.anchor, Rgba::WHITE)?;
    surface.set_composite(Composite::SourceOver)?;

    let glow = Glow::at(time);
    surface.set_shadow(glow.shadow, glow.blur);
    surface.fill_text(&config.text, layout.anchor, glow.fill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SurfaceSize;
    use crate::prng::Xorshift64;
    use crate::testing::{Call, RecordingSurface};
    use glam::DVec2;

    fn field(width: u32, height: u32) -> FlowField {
        let mut rng = Xorshift64::new(17);
        FlowField::build(
            SurfaceSize::new(width, height),
            &FlowConfig::default(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn frame_follows_clear_stroke_mask_glow_order() {
        let config = FlowConfig::default();
        let mut f = field(100, 30);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut f, Pointer::default(), 0, &config, &mut surface).unwrap();

        let calls = &surface.calls;
        assert_eq!(calls[0], Call::Clear(SurfaceSize::new(100, 30)));
        assert_eq!(surface.strokes(), f.len());

        let first_stroke = calls
            .iter()
            .position(|c| matches!(c, Call::Stroke { .. }))
            .unwrap();
        let mask = calls
            .iter()
            .position(|c| *c == Call::Composite(Composite::DestinationIn))
            .unwrap();
        let reset = calls
            .iter()
            .position(|c| *c == Call::Composite(Composite::SourceOver))
            .unwrap();
        let shadow = calls
            .iter()
            .position(|c| matches!(c, Call::Shadow(..)))
            .unwrap();
        assert!(first_stroke < mask && mask < reset && reset < shadow);
        assert_eq!(calls.last(), Some(&Call::Restore));
    }

    #[test]
    fn text_is_filled_twice_with_mask_then_glow() {
        let config = FlowConfig::default();
        let mut f = field(800, 240);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut f, Pointer::default(), 0, &config, &mut surface).unwrap();

        let fills: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::FillText { text, at, color } => Some((text.clone(), *at, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].0, "0NLY.AI");
        assert_eq!(fills[0].2, Rgba::WHITE);
        assert!((fills[1].2.a - 0.2).abs() < 1e-12);
        // 7 glyphs * 120px * 0.6 = 504 < 800, so no squeeze
        assert_eq!(fills[0].1, DVec2::new(400.0, 120.0));
        assert!(surface
            .calls
            .contains(&Call::Font("100 120px \"Roboto Mono\", monospace".into())));
    }

    #[test]
    fn wide_text_is_squeezed_never_stretched() {
        let config = FlowConfig {
            text: "A MUCH LONGER TITLE THAN FITS".into(),
            ..FlowConfig::default()
        };
        let mut f = field(400, 240);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut f, Pointer::default(), 0, &config, &mut surface).unwrap();
        let scale = surface
            .calls
            .iter()
            .find_map(|c| match c {
                Call::Scale(x, y) => Some((*x, *y)),
                _ => None,
            })
            .unwrap();
        assert!(scale.0 < 1.0, "expected squeeze, got {scale:?}");
        assert_eq!(scale.1, 1.0);
    }

    #[test]
    fn stroke_ends_follow_current_angle() {
        let config = FlowConfig::default();
        let mut f = field(20, 10);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut f, Pointer::new(500.0, 500.0), 3, &config, &mut surface).unwrap();
        let strokes: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Stroke { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        for (line, (from, to)) in f.lines().iter().zip(strokes) {
            assert_eq!(from, line.position());
            assert_eq!(to, line.tip());
        }
    }

    #[test]
    fn failed_text_still_restores_state() {
        let config = FlowConfig::default();
        let mut f = field(100, 30);
        let mut surface = RecordingSurface {
            reject_text: Some("text refused".into()),
            ..RecordingSurface::new()
        };
        let err = draw_frame(&mut f, Pointer::default(), 0, &config, &mut surface).unwrap_err();
        assert!(matches!(err, TitleError::Surface(_)));
        assert_eq!(surface.calls.last(), Some(&Call::Restore));
    }

    #[test]
    fn draw_field_uses_shimmer_style() {
        let config = FlowConfig::default();
        let f = field(10, 5);
        let mut surface = RecordingSurface::new();
        draw_field(&f, &mut surface, 42, &config);
        for (line, call) in f.lines().iter().zip(&surface.calls) {
            match call {
                Call::Stroke { style, .. } => {
                    assert_eq!(*style, LineStyle::at(42, line.phase(), &config));
                }
                other => panic!("unexpected call {other:?}"),
            }
        }
    }
}
