//! Error types for the flow-title core.

use thiserror::Error;

/// Errors produced while configuring, building, or drawing the title effect.
#[derive(Debug, Error)]
pub enum TitleError {
    /// A configuration value was outside its accepted range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A surface or field was requested with a zero or unallocatable size.
    #[error("invalid dimensions: width and height must be non-zero and fit in memory")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The title font could not be fetched or registered.
    #[error("font loading failed: {0}")]
    FontLoad(String),

    /// A drawing call was rejected by the host surface.
    #[error("surface error: {0}")]
    Surface(String),

    /// Writing an output file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl TitleError {
    /// Shorthand for [`TitleError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        TitleError::InvalidParam {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
