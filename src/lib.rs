//! Gesture-controlled slide-in panel.
//!
//! The panel's horizontal offset is continuous animated state. The owner
//! opens and closes it with a boolean directive; the user can also drag it
//! shut. Releasing a drag past one third of the panel width asks the owner
//! to close, anything shorter springs back open. A transparent backdrop
//! beside the open panel turns taps into the same close request.
//!
//! Everything except [`web`] is free of UI-runtime dependencies and is driven
//! by explicit events and time deltas, so it runs the same under tests, the
//! CLI simulator, and the browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::SliderCore`] owns the offset; [`controller::Slider`] adds the close callback |
//! | [`machine`] | Pure panel state machine: `(state, event) -> (state, effects)` |
//! | [`animator`] | `Animator` trait and the damped spring |
//! | [`input`] | Drag events, drag sources, and the pointer pan recognizer |
//! | [`hit`] | Panel / backdrop hit-testing |
//! | [`render`] | Framework-neutral scene description |
//! | [`config`] | Validated configuration from code, env, or JSON |
//! | [`web`] | `wasm-bindgen` binding onto DOM elements |
//! | [`consts`] | Shared numeric constants (spring tuning, threshold, slop) |

pub mod animator;
pub mod config;
pub mod consts;
pub mod controller;
pub mod hit;
pub mod input;
pub mod machine;
pub mod render;
pub mod web;

pub use animator::{Animator, Sample, SpringAnimator, SpringParams};
pub use config::{ConfigError, SliderConfig};
pub use controller::{Action, Slider, SliderCore};
pub use input::{DragEvent, DragSource, Gesture, PanRecognizer, ScriptedDrag};
pub use machine::{Effect, Event, Geometry, PanelState, Phase};
