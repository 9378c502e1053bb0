#![deny(unsafe_code)]
//! WASM bindings: mounts the flow title on a `<canvas>`.
//!
//! `mount_title` wires the browser to a core [`Title`]: it loads the font,
//! forwards `resize` and `mousemove` events, and drives frames with
//! `requestAnimationFrame`. All state lives in one [`Runtime`] owned by the
//! returned [`TitleHandle`]; callbacks hold only `Weak` references to it, so
//! disposing (or freeing) the handle cancels the pending frame and detaches
//! both listeners in one synchronous step.

mod bindings;
mod canvas;
mod font;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use flow_title_core::field::SurfaceSize;
use flow_title_core::{FlowConfig, FontSpec, Pointer, Title, TitleError, Xorshift64};
use glam::DVec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::bindings::{Bindings, Host, Target};
use crate::canvas::CanvasSurface;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Parses an optional JSON override object into a validated config.
fn parse_config(params: Option<&str>) -> Result<FlowConfig, TitleError> {
    let value = match params {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| TitleError::invalid_param("params", e.to_string()))?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };
    FlowConfig::from_json_validated(&value)
}

fn to_js(err: TitleError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

type Callback = Closure<dyn FnMut(JsValue)>;

/// `window` for frames and `resize`, the canvas for `mousemove`.
struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
}

impl BrowserHost {
    fn target(&self, target: Target) -> &web_sys::EventTarget {
        match target {
            Target::Resize => &self.window,
            Target::PointerMove => &self.canvas,
        }
    }
}

impl Host for BrowserHost {
    type Callback = Callback;
    type Error = JsValue;

    fn request_frame(&self, callback: &Callback) -> Result<i32, JsValue> {
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
    }

    fn cancel_frame(&self, id: i32) -> Result<(), JsValue> {
        self.window.cancel_animation_frame(id)
    }

    fn listen(&self, target: Target, callback: &Callback) -> Result<(), JsValue> {
        self.target(target)
            .add_event_listener_with_callback(target.event_name(), callback.as_ref().unchecked_ref())
    }

    fn unlisten(&self, target: Target, callback: &Callback) -> Result<(), JsValue> {
        self.target(target).remove_event_listener_with_callback(
            target.event_name(),
            callback.as_ref().unchecked_ref(),
        )
    }
}

/// Everything one mounted title owns.
struct Runtime {
    title: RefCell<Title>,
    ctx: CanvasRenderingContext2d,
    bindings: Bindings<BrowserHost>,
}

impl Runtime {
    fn viewport(&self) -> DVec2 {
        let window = &self.bindings.host().window;
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        DVec2::new(read(window.inner_width()), read(window.inner_height()))
    }

    fn apply_size(&self, size: SurfaceSize) {
        let canvas = &self.bindings.host().canvas;
        canvas.set_width(size.width);
        canvas.set_height(size.height);
    }

    /// Creates the frame, resize, and pointer callbacks and attaches the two
    /// listeners. Nothing stays registered if either listener is refused.
    fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        let callback = |on_event: fn(&Runtime, JsValue)| {
            let weak = Rc::downgrade(self);
            Callback::new(move |event: JsValue| {
                if let Some(rt) = weak.upgrade() {
                    on_event(&rt, event);
                }
            })
        };
        self.bindings.attach(
            callback(|rt, _| rt.frame()),
            vec![
                (Target::Resize, callback(|rt, _| rt.resized())),
                (Target::PointerMove, callback(Runtime::pointer_moved)),
            ],
        )
    }

    fn font_ready(&self) {
        let loaded = self.title.borrow_mut().font_loaded(self.viewport());
        match loaded {
            Ok(Some(size)) => self.apply_size(size),
            Ok(None) => {}
            Err(err) => {
                log::error!("cannot size title for this viewport: {err}");
                return;
            }
        }
        let started = self.title.borrow_mut().start();
        if started {
            self.bindings.request_frame();
        }
    }

    fn frame(&self) {
        self.bindings.frame_fired();
        let mut surface = CanvasSurface::new(&self.ctx);
        let drawn = self.title.borrow_mut().frame(&mut surface);
        match drawn {
            Ok(true) => {
                self.bindings.request_frame();
            }
            Ok(false) => {}
            Err(err) => {
                log::warn!("frame {} failed: {err}", self.title.borrow().time());
                self.bindings.request_frame();
            }
        }
    }

    fn resized(&self) {
        let resized = self.title.borrow_mut().resize(self.viewport());
        match resized {
            Ok(Some(size)) => self.apply_size(size),
            Ok(None) => {}
            Err(err) => log::warn!("keeping previous field: {err}"),
        }
    }

    fn pointer_moved(&self, event: JsValue) {
        let Ok(event) = event.dyn_into::<MouseEvent>() else {
            return;
        };
        let rect = self.bindings.host().canvas.get_bounding_client_rect();
        let pointer = Pointer::from_client(
            DVec2::new(f64::from(event.client_x()), f64::from(event.client_y())),
            DVec2::new(rect.left(), rect.top()),
        );
        self.title.borrow_mut().pointer_moved(pointer);
    }

    /// Cancels the pending frame and detaches both listeners. Idempotent.
    fn dispose(&self) {
        self.title.borrow_mut().dispose();
        self.bindings.release();
    }
}

async fn load_and_start(runtime: Weak<Runtime>, font: FontSpec) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document to register the title font in");
        return;
    };
    let loaded = font::load_font(&document, &font).await;
    // the view may have been torn down while the font was in flight
    let Some(rt) = runtime.upgrade() else {
        return;
    };
    match loaded {
        Ok(()) => rt.font_ready(),
        Err(err) => {
            rt.title.borrow_mut().font_failed(&err);
        }
    }
}

/// A mounted title. Call `dispose()` (or `free()`) when the canvas goes away.
#[wasm_bindgen]
pub struct TitleHandle {
    runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl TitleHandle {
    /// Stops the animation and detaches all listeners.
    pub fn dispose(&self) {
        self.runtime.dispose();
    }

    /// Lifecycle state name, e.g. `"Animating"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        format!("{:?}", self.runtime.title.borrow().state())
    }

    /// Frames drawn so far.
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.runtime.title.borrow().time() as f64
    }
}

impl Drop for TitleHandle {
    fn drop(&mut self) {
        self.runtime.dispose();
    }
}

/// Mounts the title with the default look.
#[wasm_bindgen]
pub fn mount_title(canvas: HtmlCanvasElement) -> Result<TitleHandle, JsValue> {
    mount_title_with(canvas, None)
}

/// Mounts the title with a JSON object of config overrides,
/// e.g. `'{"text": "HELLO", "density": 6}'`.
#[wasm_bindgen]
pub fn mount_title_with(
    canvas: HtmlCanvasElement,
    params: Option<String>,
) -> Result<TitleHandle, JsValue> {
    let config = parse_config(params.as_deref()).map_err(to_js)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let runtime = Rc::new(Runtime {
        title: RefCell::new(Title::new(
            config,
            Xorshift64::from_unit(js_sys::Math::random()),
        )),
        ctx,
        bindings: Bindings::new(BrowserHost { window, canvas }),
    });
    if let Err(e) = runtime.attach() {
        runtime.dispose();
        return Err(e);
    }

    let font = runtime.title.borrow_mut().mount().cloned();
    if let Some(font) = font {
        spawn_local(load_and_start(Rc::downgrade(&runtime), font));
    }
    Ok(TitleHandle { runtime })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_defaults_without_params() {
        assert_eq!(parse_config(None).unwrap(), FlowConfig::default());
    }

    #[test]
    fn parse_config_applies_overrides() {
        let config = parse_config(Some(r#"{"text": "HELLO", "density": 6}"#)).unwrap();
        assert_eq!(config.text, "HELLO");
        assert_eq!(config.density, 6);
    }

    #[test]
    fn parse_config_rejects_bad_json_and_bad_values() {
        assert!(matches!(
            parse_config(Some("{not json")),
            Err(TitleError::InvalidParam { .. })
        ));
        assert!(parse_config(Some(r#"{"density": 0}"#)).is_err());
    }
}
