//! Frame-to-frame motion of the field.
//!
//! Each frame every line picks a target (the pointer when it is inside the
//! gravity radius, its rest angle otherwise), eases toward it, and then gets a
//! small sinusoidal wobble so the field never freezes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::config::FlowConfig;
use crate::field::{FlowField, FlowLine};

/// Last known pointer position in surface-local units.
///
/// Starts at the origin until the first pointer event arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub position: DVec2,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }

    /// Converts a viewport (client) position into surface coordinates by
    /// subtracting the surface's top-left viewport offset.
    pub fn from_client(client: DVec2, surface_origin: DVec2) -> Self {
        Self {
            position: client - surface_origin,
        }
    }
}

/// Fraction of the remaining angle covered this frame when the pointer is at
/// `distance`: `min(max, (r - d) / r * max) * blend`. Zero outside the radius.
pub fn pointer_blend(distance: f64, config: &FlowConfig) -> f64 {
    let radius = config.gravity_radius;
    if distance >= radius {
        return 0.0;
    }
    let proximity = (radius - distance) / radius;
    config
        .max_angle_change
        .min(proximity * config.max_angle_change)
        * config.pointer_blend
}

/// Advances one line by one frame.
pub fn steer(line: &mut FlowLine, pointer: Pointer, time: u64, config: &FlowConfig) {
    let delta = pointer.position - line.position();
    let distance = delta.length();

    if distance < config.gravity_radius {
        line.target_angle = delta.y.atan2(delta.x);
        line.current_angle +=
            (line.target_angle - line.current_angle) * pointer_blend(distance, config);
    } else {
        line.target_angle = line.initial_angle();
        line.current_angle += (line.target_angle - line.current_angle) * config.relax_rate;
    }

    line.current_angle += wave(time, config.wobble_frequency, line.phase()) * config.wobble_amplitude;
}

/// `sin(time * frequency + phase)`.
fn wave(time: u64, frequency: f64, phase: f64) -> f64 {
    (time as f64 * frequency + phase).sin()
}

/// Stroke appearance of one line on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f64,
}

impl LineStyle {
    /// Shimmer: opacity swings over [0, opacity], width over [0.6, 1.0] of the
    /// stroke width, at different frequencies and each offset by `phase`.
    pub fn at(time: u64, phase: f64, config: &FlowConfig) -> Self {
        let alpha = config.opacity * (0.5 + wave(time, config.opacity_frequency, phase) * 0.5);
        let width = config.stroke_width * (0.8 + wave(time, config.width_frequency, phase) * 0.2);
        Self {
            color: Rgba::white(alpha),
            width,
        }
    }
}

impl FlowField {
    /// Steers every line toward the pointer or back to rest for frame `time`.
    pub fn advance(&mut self, pointer: Pointer, time: u64, config: &FlowConfig) {
        for line in self.lines_mut() {
            steer(line, pointer, time, config);
        }
    }
}
