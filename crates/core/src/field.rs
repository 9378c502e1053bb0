//! The flow field: a regular grid of short line segments whose rest angle and
//! length come from superposed sinusoids of the grid coordinate.
//!
//! A [`FlowField`] is built for one surface size and never patched: a resize
//! discards it and builds a new one, dropping any pointer deflection.

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::error::TitleError;
use crate::prng::Xorshift64;

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Full viewport width by `fraction` of its height, truncated to whole
    /// pixels the way canvas `width`/`height` assignment does.
    pub fn from_viewport(width: f64, height: f64, fraction: f64) -> Self {
        let px = |v: f64| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
        Self {
            width: px(width),
            height: px(height * fraction),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Number of grid samples along an axis of `extent` units: `ceil(extent / density)`.
pub fn grid_extent(extent: u32, density: usize) -> usize {
    (extent as usize).div_ceil(density.max(1))
}

/// Rest direction at `position`: three sine/cosine octaves weighted 1, 0.5
/// and 0.3, with the x/y frequency ratios swapped between the upper two.
pub fn field_angle(position: DVec2, zoom: f64) -> f64 {
    let z = position * zoom;
    (z.x.sin() * z.y.cos()) * PI
        + ((z.x * 0.7).sin() * (z.y * 1.3).cos()) * PI * 0.5
        + ((z.x * 1.3).sin() * (z.y * 0.7).cos()) * PI * 0.3
}

/// Segment length at `position`, in `[base, 3 * base]`.
pub fn field_length(position: DVec2, zoom: f64, base: f64) -> f64 {
    let z = position * zoom;
    ((z.x * 0.8).sin() * (z.y * 1.2).cos() + 2.0) * base
}

/// One segment of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLine {
    position: DVec2,
    initial_angle: f64,
    pub(crate) current_angle: f64,
    pub(crate) target_angle: f64,
    length: f64,
    phase: f64,
}

impl FlowLine {
    /// Creates a line at rest: current and target both equal the field angle.
    pub fn new(position: DVec2, zoom: f64, base_length: f64, phase: f64) -> Self {
        let angle = field_angle(position, zoom);
        Self {
            position,
            initial_angle: angle,
            current_angle: angle,
            target_angle: angle,
            length: field_length(position, zoom, base_length),
            phase,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Undisturbed field direction.
    pub fn initial_angle(&self) -> f64 {
        self.initial_angle
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    /// Direction the line was steering toward on the last frame.
    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Per-line oscillation offset in [0, 2π).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// End point of the segment along the current angle.
    pub fn tip(&self) -> DVec2 {
        self.position + DVec2::from_angle(self.current_angle) * self.length
    }
}

/// Summary of a built field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub width: u32,
    pub height: u32,
    pub columns: usize,
    pub rows: usize,
    pub lines: usize,
    pub min_angle: f64,
    pub max_angle: f64,
    pub min_length: f64,
    pub max_length: f64,
}

/// All lines for one surface size, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowField {
    size: SurfaceSize,
    density: usize,
    lines: Vec<FlowLine>,
}

impl FlowField {
    /// Builds the grid for `size`, sampling a line every `config.density`
    /// units on both axes starting at the origin.
    ///
    /// An empty surface yields an empty field. A zero density is treated
    /// as 1; [`FlowConfig::validate`] rejects it earlier.
    ///
    /// Returns `TitleError::InvalidDimensions` if the line count overflows
    /// `usize` or the line buffer cannot be allocated.
    pub fn build(
        size: SurfaceSize,
        config: &FlowConfig,
        rng: &mut Xorshift64,
    ) -> Result<Self, TitleError> {
        let density = config.density.max(1);
        let columns = grid_extent(size.width, density);
        let rows = grid_extent(size.height, density);
        let count = columns
            .checked_mul(rows)
            .ok_or(TitleError::InvalidDimensions)?;
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(count)
            .map_err(|_| TitleError::InvalidDimensions)?;
        for y in (0..size.height).step_by(density) {
            for x in (0..size.width).step_by(density) {
                let position = DVec2::new(f64::from(x), f64::from(y));
                lines.push(FlowLine::new(
                    position,
                    config.zoom,
                    config.line_length,
                    rng.next_phase(),
                ));
            }
        }
        log::debug!(
            "built flow field {}x{} ({} lines, {columns}x{rows} grid)",
            size.width,
            size.height,
            lines.len()
        );
        Ok(Self {
            size,
            density,
            lines,
        })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn density(&self) -> usize {
        self.density
    }

    /// Grid samples per row.
    pub fn columns(&self) -> usize {
        grid_extent(self.size.width, self.density)
    }

    /// Grid samples per column.
    pub fn rows(&self) -> usize {
        grid_extent(self.size.height, self.density)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[FlowLine] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [FlowLine] {
        &mut self.lines
    }

    /// Grid shape and the spread of rest angles and lengths.
    pub fn stats(&self) -> FieldStats {
        let range = |value: fn(&FlowLine) -> f64| {
            self.lines
                .iter()
                .map(value)
                .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                    None => Some((v, v)),
                })
                .unwrap_or((0.0, 0.0))
        };
        let angle = range(FlowLine::initial_angle);
        let length = range(FlowLine::length);
        FieldStats {
            width: self.size.width,
            height: self.size.height,
            columns: self.columns(),
            rows: self.rows(),
            lines: self.lines.len(),
            min_angle: angle.0,
            max_angle: angle.1,
            min_length: length.0,
            max_length: length.1,
        }
    }

    /// Line whose origin is grid cell `(column, row)`, if in range.
    pub fn line_at(&self, column: usize, row: usize) -> Option<&FlowLine> {
        if column >= self.columns() {
            return None;
        }
        self.lines.get(row * self.columns() + column)
    }
}
