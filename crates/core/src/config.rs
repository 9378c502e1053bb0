//! Tunable constants of the title effect.
//!
//! [`FlowConfig::default`] reproduces the production look. Every value can be
//! overridden from a JSON object (CLI `--params`, wasm `mount_title_with`)
//! using the forgiving [`crate::params`] helpers.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TitleError;
use crate::params::{param_f64, param_string, param_usize};

/// Grid spacing in surface units.
const DEFAULT_DENSITY: usize = 5;
/// Coordinate scale applied before sampling the sinusoidal field.
const DEFAULT_ZOOM: f64 = 0.005;
/// Base segment length; the field scales it into [9, 27].
const DEFAULT_LINE_LENGTH: f64 = 9.0;
const DEFAULT_STROKE_WIDTH: f64 = 2.2;
const DEFAULT_OPACITY: f64 = 0.35;
/// Pointer distance under which lines turn toward the pointer.
const DEFAULT_GRAVITY_RADIUS: f64 = 100.0;
const DEFAULT_MAX_ANGLE_CHANGE: f64 = FRAC_PI_2;
const DEFAULT_POINTER_BLEND: f64 = 0.2;
const DEFAULT_RELAX_RATE: f64 = 0.1;
const DEFAULT_WOBBLE_AMPLITUDE: f64 = 0.05;
const DEFAULT_WOBBLE_FREQUENCY: f64 = 0.001;
const DEFAULT_OPACITY_FREQUENCY: f64 = 0.01;
const DEFAULT_WIDTH_FREQUENCY: f64 = 0.02;
/// Share of the viewport height given to the drawing surface.
const DEFAULT_HEIGHT_FRACTION: f64 = 0.3;
const DEFAULT_TEXT: &str = "0NLY.AI";

/// Roboto Mono Thin served by Google Fonts.
pub const ROBOTO_MONO_THIN_URL: &str =
    "https://fonts.gstatic.com/s/robotomono/v22/L0xuDF4xlVMF-BfR8bXMIhJHg45mwgGEFl0_3vq_ROW4.woff2";

/// The web font the title text is set in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    /// CSS font weight, e.g. `"100"`.
    pub weight: String,
    pub url: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Roboto Mono".to_owned(),
            weight: "100".to_owned(),
            url: ROBOTO_MONO_THIN_URL.to_owned(),
        }
    }
}

impl FontSpec {
    /// The `src` descriptor for a CSS `FontFace`.
    pub fn source(&self) -> String {
        format!("url({})", self.url)
    }

    /// CSS `font` shorthand at `size_px`, falling back to generic monospace.
    pub fn css(&self, size_px: f64) -> String {
        format!("{} {}px \"{}\", monospace", self.weight, size_px, self.family)
    }
}

/// Every constant of the field, its motion, and the text overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Grid spacing between line origins.
    pub density: usize,
    pub zoom: f64,
    pub line_length: f64,
    pub stroke_width: f64,
    /// Peak line opacity.
    pub opacity: f64,
    pub gravity_radius: f64,
    /// Largest per-frame pointer step, scaled by proximity.
    pub max_angle_change: f64,
    /// Damping applied on top of the proximity step.
    pub pointer_blend: f64,
    /// Per-frame rate at which free lines return to their field angle.
    pub relax_rate: f64,
    pub wobble_amplitude: f64,
    pub wobble_frequency: f64,
    pub opacity_frequency: f64,
    pub width_frequency: f64,
    pub height_fraction: f64,
    pub text: String,
    pub font: FontSpec,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            zoom: DEFAULT_ZOOM,
            line_length: DEFAULT_LINE_LENGTH,
            stroke_width: DEFAULT_STROKE_WIDTH,
            opacity: DEFAULT_OPACITY,
            gravity_radius: DEFAULT_GRAVITY_RADIUS,
            max_angle_change: DEFAULT_MAX_ANGLE_CHANGE,
            pointer_blend: DEFAULT_POINTER_BLEND,
            relax_rate: DEFAULT_RELAX_RATE,
            wobble_amplitude: DEFAULT_WOBBLE_AMPLITUDE,
            wobble_frequency: DEFAULT_WOBBLE_FREQUENCY,
            opacity_frequency: DEFAULT_OPACITY_FREQUENCY,
            width_frequency: DEFAULT_WIDTH_FREQUENCY,
            height_fraction: DEFAULT_HEIGHT_FRACTION,
            text: DEFAULT_TEXT.to_owned(),
            font: FontSpec::default(),
        }
    }
}

impl FlowConfig {
    /// Reads overrides from a JSON object, falling back to defaults per key.
    ///
    /// The result is not validated; call [`FlowConfig::validate`].
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            density: param_usize(params, "density", d.density),
            zoom: param_f64(params, "zoom", d.zoom),
            line_length: param_f64(params, "line_length", d.line_length),
            stroke_width: param_f64(params, "stroke_width", d.stroke_width),
            opacity: param_f64(params, "opacity", d.opacity),
            gravity_radius: param_f64(params, "gravity_radius", d.gravity_radius),
            max_angle_change: param_f64(params, "max_angle_change", d.max_angle_change),
            pointer_blend: param_f64(params, "pointer_blend", d.pointer_blend),
            relax_rate: param_f64(params, "relax_rate", d.relax_rate),
            wobble_amplitude: param_f64(params, "wobble_amplitude", d.wobble_amplitude),
            wobble_frequency: param_f64(params, "wobble_frequency", d.wobble_frequency),
            opacity_frequency: param_f64(params, "opacity_frequency", d.opacity_frequency),
            width_frequency: param_f64(params, "width_frequency", d.width_frequency),
            height_fraction: param_f64(params, "height_fraction", d.height_fraction),
            text: param_string(params, "text", &d.text),
            font: FontSpec {
                family: param_string(params, "font_family", &d.font.family),
                weight: param_string(params, "font_weight", &d.font.weight),
                url: param_string(params, "font_url", &d.font.url),
            },
        }
    }

    /// Parses and validates overrides in one step.
    pub fn from_json_validated(params: &Value) -> Result<Self, TitleError> {
        let config = Self::from_json(params);
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would produce an empty or degenerate effect.
    pub fn validate(&self) -> Result<(), TitleError> {
        if self.density == 0 {
            return Err(TitleError::invalid_param("density", "must be non-zero"));
        }
        let positive = [
            ("zoom", self.zoom),
            ("line_length", self.line_length),
            ("stroke_width", self.stroke_width),
            ("gravity_radius", self.gravity_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TitleError::invalid_param(
                    name,
                    format!("must be a positive number, got {value}"),
                ));
            }
        }
        if !(self.height_fraction > 0.0 && self.height_fraction <= 1.0) {
            return Err(TitleError::invalid_param(
                "height_fraction",
                format!("must be in (0, 1], got {}", self.height_fraction),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(TitleError::invalid_param(
                "opacity",
                format!("must be in [0, 1], got {}", self.opacity),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_matches_production_constants() {
        let c = FlowConfig::default();
        assert_eq!(c.density, 5);
        assert!((c.zoom - 0.005).abs() < f64::EPSILON);
        assert!((c.line_length - 9.0).abs() < f64::EPSILON);
        assert!((c.gravity_radius - 100.0).abs() < f64::EPSILON);
        assert!((c.max_angle_change - FRAC_PI_2).abs() < f64::EPSILON);
        assert!((c.pointer_blend - 0.2).abs() < f64::EPSILON);
        assert!((c.relax_rate - 0.1).abs() < f64::EPSILON);
        assert!((c.height_fraction - 0.3).abs() < f64::EPSILON);
        assert_eq!(c.text, "0NLY.AI");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_empty_object_is_default() {
        assert_eq!(FlowConfig::from_json(&json!({})), FlowConfig::default());
    }

    #[test]
    fn from_json_applies_overrides() {
        let c = FlowConfig::from_json(&json!({
            "density": 10,
            "gravity_radius": 50.0,
            "text": "HI",
            "font_weight": "300"
        }));
        assert_eq!(c.density, 10);
        assert!((c.gravity_radius - 50.0).abs() < f64::EPSILON);
        assert_eq!(c.text, "HI");
        assert_eq!(c.font.weight, "300");
        assert_eq!(c.font.family, "Roboto Mono");
    }

    #[test]
    fn from_json_validated_rejects_zero_density() {
        let err = FlowConfig::from_json_validated(&json!({"density": 0})).unwrap_err();
        assert!(err.to_string().contains("density"), "got: {err}");
    }

    #[test]
    fn validate_rejects_non_positive_radius() {
        let c = FlowConfig {
            gravity_radius: 0.0,
            ..FlowConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(TitleError::InvalidParam { ref name, .. }) if name == "gravity_radius"
        ));
    }

    #[test]
    fn validate_rejects_height_fraction_out_of_range() {
        for bad in [0.0, -0.3, 1.5, f64::NAN] {
            let c = FlowConfig {
                height_fraction: bad,
                ..FlowConfig::default()
            };
            assert!(c.validate().is_err(), "height_fraction {bad} accepted");
        }
    }

    #[test]
    fn font_css_matches_canvas_shorthand() {
        let font = FontSpec::default();
        assert_eq!(font.css(36.0), "100 36px \"Roboto Mono\", monospace");
        assert!(font.source().starts_with("url(https://fonts.gstatic.com/"));
    }

    #[test]
    fn serde_round_trip_with_partial_json() {
        let c: FlowConfig = serde_json::from_str(r#"{"density": 7}"#).unwrap();
        assert_eq!(c.density, 7);
        assert_eq!(c.text, "0NLY.AI");
        let back: FlowConfig = serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert_eq!(c, back);
    }
}
