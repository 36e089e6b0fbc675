//! Browser binding: drives a panel element and a backdrop element from JS.
//!
//! The host wires DOM pointer events and `requestAnimationFrame` to the
//! methods below. Every method that can change the picture returns an
//! [`Outcome`]: whether to keep requesting animation frames, and how many
//! close requests the call raised.
//!
//! A registered `onClose` handler runs as a microtask once the current call
//! has returned, so it may call straight back into the slider (typically
//! `setOpen(false)`).

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::SliderConfig;
use crate::consts::EMPTY_PLACEHOLDER;
use crate::controller::{Action, SliderCore};
use crate::hit::{HitPart, hit_test};
use crate::input::{Gesture, PanRecognizer};
use crate::render;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Module init: route panics and `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if tracing_wasm::try_set_as_global_default().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Result of one input or frame call.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    animating: bool,
    close_requests: u32,
}

impl Outcome {
    fn from_actions(actions: &[Action], animating: bool) -> Self {
        let closes = actions.iter().filter(|a| **a == Action::CloseRequested).count();
        Self { animating, close_requests: u32::try_from(closes).unwrap_or(u32::MAX) }
    }
}

#[wasm_bindgen]
impl Outcome {
    /// Keep requesting animation frames.
    #[wasm_bindgen(getter)]
    pub fn animating(&self) -> bool {
        self.animating
    }

    /// Close requests raised by the call (drag dismissal or backdrop tap).
    #[wasm_bindgen(getter, js_name = closeRequests)]
    pub fn close_requests(&self) -> u32 {
        self.close_requests
    }
}

/// The full slider. Wraps `SliderCore` and owns the DOM elements it moves.
#[wasm_bindgen]
pub struct WebSlider {
    core: SliderCore,
    recognizer: PanRecognizer,
    panel: HtmlElement,
    backdrop: HtmlElement,
    viewport_width: f64,
    on_close: Option<Function>,
    last_frame_ms: Option<f64>,
}

#[wasm_bindgen]
impl WebSlider {
    /// Bind to `panel` and `backdrop`. Throws when `width` is not positive.
    #[wasm_bindgen(constructor)]
    pub fn new(panel: HtmlElement, backdrop: HtmlElement, width: f64, viewport_width: f64) -> Result<WebSlider, JsValue> {
        let config = SliderConfig::new(width).map_err(js_error)?;
        let core = SliderCore::new(config).map_err(js_error)?;
        let slider = Self {
            recognizer: PanRecognizer::new(config.activation_slop),
            core,
            panel,
            backdrop,
            viewport_width,
            on_close: None,
            last_frame_ms: None,
        };
        slider.ensure_placeholder();
        slider.paint()?;
        Ok(slider)
    }

    /// Register (or clear) the JS close handler. It is deferred to a
    /// microtask, never called while a slider method is on the stack.
    #[wasm_bindgen(js_name = setOnClose)]
    pub fn set_on_close(&mut self, callback: Option<Function>) {
        self.on_close = callback;
    }

    #[wasm_bindgen(js_name = setViewportWidth)]
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width;
    }

    /// Apply the owner's directive.
    #[wasm_bindgen(js_name = setOpen)]
    pub fn set_open(&mut self, open: bool) -> Result<Outcome, JsValue> {
        let actions = self.core.set_open(open);
        self.dispatch(&actions)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64) -> Result<Outcome, JsValue> {
        let hit = self.hit(x);
        let gestures = self.recognizer.pointer_down(x, hit);
        self.feed(gestures)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64) -> Result<Outcome, JsValue> {
        let gestures = self.recognizer.pointer_move(x);
        self.feed(gestures)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64) -> Result<Outcome, JsValue> {
        let hit = self.hit(x);
        let gestures = self.recognizer.pointer_up(x, hit);
        self.feed(gestures)
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<Outcome, JsValue> {
        let gestures = self.recognizer.pointer_cancel();
        self.feed(gestures)
    }

    /// Advance the animation to `now_ms` (a `requestAnimationFrame` timestamp).
    pub fn frame(&mut self, now_ms: f64) -> Result<Outcome, JsValue> {
        let dt_ms = self.last_frame_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);
        let dt = std::time::Duration::try_from_secs_f64(dt_ms / 1000.0).unwrap_or_default();
        let actions = self.core.tick(dt);
        let outcome = self.dispatch(&actions)?;
        if !outcome.animating {
            self.last_frame_ms = None;
        }
        Ok(outcome)
    }

    /// Current offset in CSS pixels.
    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.core.offset()
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }
}

impl WebSlider {
    fn hit(&self, x: f64) -> Option<HitPart> {
        let scene = self.core.scene::<()>(None);
        hit_test(x, &scene.panel, scene.backdrop.as_ref(), self.viewport_width)
    }

    fn feed(&mut self, gestures: Vec<Gesture>) -> Result<Outcome, JsValue> {
        let mut actions = Vec::new();
        for gesture in gestures {
            actions.extend(self.core.on_gesture(gesture));
        }
        self.dispatch(&actions)
    }

    fn dispatch(&mut self, actions: &[Action]) -> Result<Outcome, JsValue> {
        for action in actions {
            match action {
                Action::CloseRequested => self.schedule_close(),
                Action::RenderNeeded => self.paint()?,
            }
        }
        Ok(Outcome::from_actions(actions, self.core.is_animating()))
    }

    fn schedule_close(&self) {
        let Some(callback) = self.on_close.clone() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window to schedule onClose on; poll Outcome.closeRequests instead");
            return;
        };
        let deferred = Closure::once_into_js(move || {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                tracing::warn!(error = ?err, "onClose handler threw");
            }
        });
        window.queue_microtask(deferred.unchecked_ref());
    }

    fn paint(&self) -> Result<(), JsValue> {
        let scene = self.core.scene::<()>(None);
        self.panel
            .style()
            .set_property("transform", &render::transform_css(scene.panel.translate_x))?;
        let display = if scene.backdrop.is_some() { "block" } else { "none" };
        self.backdrop.style().set_property("display", display)?;
        Ok(())
    }

    fn ensure_placeholder(&self) {
        let has_text = self.panel.text_content().is_some_and(|t| !t.trim().is_empty());
        if self.panel.child_element_count() == 0 && !has_text {
            self.panel.set_text_content(Some(EMPTY_PLACEHOLDER));
        }
    }
}
