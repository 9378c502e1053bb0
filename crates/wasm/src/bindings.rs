//! Frame-request and event-listener bookkeeping for one mounted title.
//!
//! [`Bindings`] owns every callback handed to the host and remembers which
//! ones are registered, so [`Bindings::release`] can undo all of them in one
//! step. The browser implements [`Host`] over `window` and the canvas; tests
//! use an in-memory host.

use std::cell::{Cell, RefCell};
use std::fmt;

/// Event a title listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Window `resize`.
    Resize,
    /// Canvas `mousemove`.
    PointerMove,
}

impl Target {
    pub fn event_name(self) -> &'static str {
        match self {
            Target::Resize => "resize",
            Target::PointerMove => "mousemove",
        }
    }
}

/// The scheduling and event APIs a mounted title needs from its host.
pub trait Host {
    /// Callback object that must stay alive while registered.
    type Callback;
    type Error: fmt::Debug;

    fn request_frame(&self, callback: &Self::Callback) -> Result<i32, Self::Error>;
    fn cancel_frame(&self, id: i32) -> Result<(), Self::Error>;
    fn listen(&self, target: Target, callback: &Self::Callback) -> Result<(), Self::Error>;
    fn unlisten(&self, target: Target, callback: &Self::Callback) -> Result<(), Self::Error>;
}

pub struct Bindings<H: Host> {
    host: H,
    frame_request: Cell<Option<i32>>,
    on_frame: RefCell<Option<H::Callback>>,
    listeners: RefCell<Vec<(Target, H::Callback)>>,
}

impl<H: Host> Bindings<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            frame_request: Cell::new(None),
            on_frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Registers the frame callback and every listener. If any listener is
    /// refused, everything registered so far is released before the error
    /// is returned.
    pub fn attach(
        &self,
        on_frame: H::Callback,
        listeners: Vec<(Target, H::Callback)>,
    ) -> Result<(), H::Error> {
        *self.on_frame.borrow_mut() = Some(on_frame);
        for (target, callback) in listeners {
            if let Err(e) = self.host.listen(target, &callback) {
                self.release();
                return Err(e);
            }
            self.listeners.borrow_mut().push((target, callback));
        }
        Ok(())
    }

    /// Asks the host for the next frame. Returns `false` once released or
    /// when the host refuses.
    pub fn request_frame(&self) -> bool {
        let on_frame = self.on_frame.borrow();
        let Some(callback) = on_frame.as_ref() else {
            return false;
        };
        match self.host.request_frame(callback) {
            Ok(id) => {
                self.frame_request.set(Some(id));
                true
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                false
            }
        }
    }

    /// Marks the pending request as consumed; called at the top of a frame.
    pub fn frame_fired(&self) {
        self.frame_request.set(None);
    }

    #[cfg(test)]
    pub fn pending_frame(&self) -> Option<i32> {
        self.frame_request.get()
    }

    #[cfg(test)]
    pub fn is_listening(&self, target: Target) -> bool {
        self.listeners.borrow().iter().any(|(t, _)| *t == target)
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.on_frame.borrow().is_none() && self.listeners.borrow().is_empty()
    }

    /// Cancels the pending frame, detaches every listener, and drops all
    /// callbacks. Idempotent.
    pub fn release(&self) {
        if let Some(id) = self.frame_request.take() {
            if let Err(e) = self.host.cancel_frame(id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (target, callback) in &listeners {
            if let Err(e) = self.host.unlisten(*target, callback) {
                log::warn!("removing {} listener failed: {e:?}", target.event_name());
            }
        }
        self.on_frame.borrow_mut().take();
    }
}
