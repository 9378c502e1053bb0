//! Lifecycle of one mounted title: font loading, field (re)builds, frames,
//! and teardown.
//!
//! [`Title`] owns every piece of mutable state the effect has (field,
//! pointer, frame counter, PRNG) and is driven by its host: the wasm bindings
//! forward browser events to it, tests drive it directly. Events that do not
//! apply to the current [`TitleState`] are ignored, so a font that resolves
//! after teardown or a resize before the font arrives is harmless.

use glam::DVec2;

use crate::animate::Pointer;
use crate::config::{FlowConfig, FontSpec};
use crate::error::TitleError;
use crate::field::{FlowField, SurfaceSize};
use crate::prng::Xorshift64;
use crate::render::draw_frame;
use crate::surface::Surface;

/// Where a [`Title`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleState {
    /// Created, not yet mounted.
    Idle,
    /// Waiting for the font. Also the terminal state after a failed load.
    FontLoading,
    /// Field built, frames not yet requested.
    Ready,
    /// Drawing on every frame callback.
    Animating,
    /// Torn down; nothing draws again.
    Disposed,
}

/// One title instance.
#[derive(Debug)]
pub struct Title {
    config: FlowConfig,
    state: TitleState,
    field: FlowField,
    pointer: Pointer,
    time: u64,
    rng: Xorshift64,
    font_error: Option<String>,
}

impl Title {
    /// Creates an idle title. `rng` supplies the per-line phases.
    pub fn new(config: FlowConfig, rng: Xorshift64) -> Self {
        Self {
            config,
            state: TitleState::Idle,
            field: FlowField::default(),
            pointer: Pointer::default(),
            time: 0,
            rng,
            font_error: None,
        }
    }

    pub fn state(&self) -> TitleState {
        self.state
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Frames drawn so far.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Message of the last font failure, if loading failed.
    pub fn font_error(&self) -> Option<&str> {
        self.font_error.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.state == TitleState::Animating
    }

    /// `Idle → FontLoading`. Returns the font the host should start loading,
    /// or `None` if the title was already mounted.
    pub fn mount(&mut self) -> Option<&FontSpec> {
        if self.state != TitleState::Idle {
            return None;
        }
        self.transition(TitleState::FontLoading);
        Some(&self.config.font)
    }

    /// `FontLoading → Ready`: sizes the surface from `viewport` and builds the
    /// field. Returns the surface size the host must apply to its canvas, or
    /// `None` if the event does not apply to the current state.
    ///
    /// If the field cannot be built for `viewport` the title stays in
    /// `FontLoading` and the error is returned.
    pub fn font_loaded(&mut self, viewport: DVec2) -> Result<Option<SurfaceSize>, TitleError> {
        if self.state != TitleState::FontLoading {
            log::debug!("ignoring font load in state {:?}", self.state);
            return Ok(None);
        }
        let size = self.rebuild(viewport)?;
        self.font_error = None;
        self.transition(TitleState::Ready);
        Ok(Some(size))
    }

    /// Records a failed font load. The title stays in `FontLoading` and
    /// never draws.
    ///
    /// Emits one diagnostic per mount. Returns `false` if the failure was
    /// ignored, either because a failure is already recorded or because the
    /// title is not waiting for a font.
    pub fn font_failed(&mut self, error: &TitleError) -> bool {
        if self.state != TitleState::FontLoading || self.font_error.is_some() {
            return false;
        }
        log::error!("{error}");
        self.font_error = Some(error.to_string());
        true
    }

    /// `Ready → Animating`. Returns `true` if the host should request the
    /// first frame.
    pub fn start(&mut self) -> bool {
        if self.state != TitleState::Ready {
            return false;
        }
        self.transition(TitleState::Animating);
        true
    }

    /// Rebuilds the field for a new viewport, discarding all deflection.
    /// Ignored until the font has loaded.
    ///
    /// On error the previous field and surface size are kept.
    pub fn resize(&mut self, viewport: DVec2) -> Result<Option<SurfaceSize>, TitleError> {
        match self.state {
            TitleState::Ready | TitleState::Animating => self.rebuild(viewport).map(Some),
            _ => Ok(None),
        }
    }

    /// Stores the latest pointer position for the next frame.
    pub fn pointer_moved(&mut self, pointer: Pointer) {
        if self.state != TitleState::Disposed {
            self.pointer = pointer;
        }
    }

    /// Draws one frame if animating and advances the frame counter.
    ///
    /// Returns `Ok(false)` without touching `surface` in any other state.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<bool, TitleError> {
        if self.state != TitleState::Animating {
            return Ok(false);
        }
        let drawn = draw_frame(
            &mut self.field,
            self.pointer,
            self.time,
            &self.config,
            surface,
        );
        self.time += 1;
        drawn.map(|()| true)
    }

    /// Moves to `Disposed` from any state and drops the field. Returns
    /// `false` if it was already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.state == TitleState::Disposed {
            return false;
        }
        self.field = FlowField::default();
        self.transition(TitleState::Disposed);
        true
    }

    fn rebuild(&mut self, viewport: DVec2) -> Result<SurfaceSize, TitleError> {
        let size = SurfaceSize::from_viewport(viewport.x, viewport.y, self.config.height_fraction);
        self.field = FlowField::build(size, &self.config, &mut self.rng)?;
        Ok(size)
    }

    fn transition(&mut self, next: TitleState) {
        log::debug!("title {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
