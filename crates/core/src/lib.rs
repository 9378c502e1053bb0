#![deny(unsafe_code)]
//! Core of the flow-title effect: an animated "flow field" masked by a line
//! of text and steered by the pointer.
//!
//! Provides the [`FlowField`] grid, per-frame motion ([`animate`]), text
//! layout, the drawing [`Surface`] abstraction, the [`Title`] lifecycle state
//! machine, [`FlowConfig`], and the static page shell. Everything here is
//! host-independent; the browser and CPU backends live in sibling crates.

pub mod animate;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod params;
pub mod prng;
pub mod render;
pub mod shell;
pub mod surface;
pub mod text;
pub mod title;

#[cfg(test)]
mod testing;

pub use animate::{LineStyle, Pointer};
pub use color::Rgba;
pub use config::{FlowConfig, FontSpec};
pub use error::TitleError;
pub use field::{FieldStats, FlowField, FlowLine, SurfaceSize};
pub use prng::Xorshift64;
pub use shell::PageMetadata;
pub use surface::{Composite, StrokeSurface, Surface};
pub use title::{Title, TitleState};
