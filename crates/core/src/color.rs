//! CSS colors as used by the 2D canvas: 8-bit channels with a float alpha.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TitleError;

/// An sRGB color with straight (non-premultiplied) alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// White at the given alpha, clamped to [0, 1].
    pub fn white(alpha: f64) -> Self {
        Self::WHITE.with_alpha(alpha)
    }

    /// Same color with a new alpha, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parses `#rrggbb` or `#rgb` (leading `#` optional). Alpha is 1.
    pub fn from_hex(hex: &str) -> Result<Self, TitleError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || TitleError::InvalidColor(hex.to_owned());
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::rgb(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb`, dropping alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string for canvas style properties.
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formats_like_canvas_style_strings() {
        assert_eq!(Rgba::white(0.2).css(), "rgba(255, 255, 255, 0.2)");
        assert_eq!(Rgba::BLACK.css(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::white(1.7).a, 1.0);
        assert_eq!(Rgba::white(-0.1).a, 0.0);
    }

    #[test]
    fn from_hex_long_and_short_forms() {
        assert_eq!(Rgba::from_hex("#000000").unwrap(), Rgba::BLACK);
        assert_eq!(Rgba::from_hex("fff").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::from_hex("#1a2b3c").unwrap(), Rgba::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        for bad in ["", "#12", "#12345", "#gggggg", "#ÿÿÿ"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(TitleError::InvalidColor(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn to_hex_round_trips() {
        let c = Rgba::rgb(12, 200, 255);
        assert_eq!(Rgba::from_hex(&c.to_hex()).unwrap(), c);
    }
}
