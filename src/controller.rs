use std::time::Duration;

use crate::animator::{Animator, SpringAnimator};
use crate::config::{ConfigError, SliderConfig};
use crate::input::{DragEvent, DragSource, Gesture};
use crate::machine::{self, Effect, Event, Geometry, PanelState, Phase};
use crate::render::{self, Scene};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The user asked to close the panel (drag dismissal or backdrop tap).
    /// The owner decides whether to flip its `is_open` flag.
    CloseRequested,
    /// The offset or backdrop changed; redraw.
    RenderNeeded,
}

/// Core slider state: all logic that doesn't depend on a UI runtime.
///
/// Owns the offset and the animator. Every mutation goes through
/// [`machine::transition`], whose effects are applied here.
pub struct SliderCore<A = SpringAnimator> {
    config: SliderConfig,
    geometry: Geometry,
    state: PanelState,
    offset: f64,
    animator: A,
}

impl SliderCore<SpringAnimator> {
    /// Create a closed slider driven by a spring.
    ///
    /// # Errors
    ///
    /// Refuses to build from a config that fails validation (e.g. width <= 0).
    pub fn new(config: SliderConfig) -> Result<Self, ConfigError> {
        Self::with_animator(config, SpringAnimator::new())
    }
}

impl<A: Animator> SliderCore<A> {
    /// Create a closed slider driven by a custom animator.
    ///
    /// # Errors
    ///
    /// Refuses to build from a config that fails validation (e.g. width <= 0).
    pub fn with_animator(config: SliderConfig, animator: A) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let geometry = Geometry { width: config.width, close_threshold: config.close_threshold() };
        Ok(Self { config, geometry, state: PanelState::default(), offset: geometry.closed(), animator })
    }

    // --- Inputs ---

    /// Apply the owner's open/closed directive.
    pub fn set_open(&mut self, open: bool) -> Vec<Action> {
        self.handle(Event::Directive { open })
    }

    /// Feed one drag event.
    pub fn on_drag(&mut self, event: DragEvent) -> Vec<Action> {
        self.handle(event.into())
    }

    /// Feed one recognized pointer gesture.
    pub fn on_gesture(&mut self, gesture: Gesture) -> Vec<Action> {
        self.handle(gesture.into())
    }

    /// The backdrop was tapped.
    pub fn on_backdrop_tap(&mut self) -> Vec<Action> {
        self.handle(Event::BackdropTap)
    }

    /// Drain every queued event from `source`.
    pub fn pump(&mut self, source: &mut impl DragSource) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(event) = source.next_event() {
            actions.extend(self.on_drag(event));
        }
        actions
    }

    /// Run one event through the state machine and apply its effects.
    pub fn handle(&mut self, event: Event) -> Vec<Action> {
        let backdrop_was_visible = self.state.backdrop_visible();
        let (next, effects) = machine::transition(self.state, event, &self.geometry);
        self.state = next;
        let mut actions = Vec::new();
        for effect in effects {
            self.apply(effect, &mut actions);
        }
        if self.state.backdrop_visible() != backdrop_was_visible {
            push_render(&mut actions);
        }
        actions
    }

    /// Advance the animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Vec<Action> {
        match self.animator.step(dt) {
            Some(sample) => {
                self.offset = self.geometry.clamp(sample.value);
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    fn apply(&mut self, effect: Effect, actions: &mut Vec<Action>) {
        match effect {
            Effect::CancelAnimation => self.animator.cancel(),
            Effect::AnimateTo { target } => {
                self.animator.animate(self.offset, target, self.config.spring);
                if !self.animator.is_running() {
                    self.offset = target;
                }
                push_render(actions);
            }
            Effect::Track { offset } => {
                self.animator.cancel();
                self.offset = self.geometry.clamp(offset);
                push_render(actions);
            }
            Effect::RequestClose => {
                tracing::debug!("close requested");
                actions.push(Action::CloseRequested);
            }
        }
    }

    // --- Queries ---

    /// Current offset in `[-W, 0]`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The owner's last directive.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.commanded_open
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    #[must_use]
    pub fn backdrop_visible(&self) -> bool {
        self.state.backdrop_visible()
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Describe the current frame, with `content` inside the panel.
    #[must_use]
    pub fn scene<'a, C>(&self, content: Option<&'a C>) -> Scene<'a, C> {
        render::scene(self.offset, self.geometry.width, self.backdrop_visible(), content)
    }
}

fn push_render(actions: &mut Vec<Action>) {
    if !actions.contains(&Action::RenderNeeded) {
        actions.push(Action::RenderNeeded);
    }
}

/// Slider with an optional close callback. Wraps `SliderCore`.
///
/// Each [`Action::CloseRequested`] produced by the core invokes the callback
/// once; the actions are still returned so hosts can schedule redraws.
pub struct Slider<A = SpringAnimator> {
    pub core: SliderCore<A>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl Slider<SpringAnimator> {
    /// # Errors
    ///
    /// Refuses to build from a config that fails validation.
    pub fn new(config: SliderConfig) -> Result<Self, ConfigError> {
        Ok(Self { core: SliderCore::new(config)?, on_close: None })
    }
}

impl<A: Animator> Slider<A> {
    #[must_use]
    pub fn from_core(core: SliderCore<A>) -> Self {
        Self { core, on_close: None }
    }

    /// Register the owner's close handler.
    #[must_use]
    pub fn with_on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn set_on_close(&mut self, on_close: Option<Box<dyn FnMut()>>) {
        self.on_close = on_close;
    }

    // --- Delegated inputs ---

    pub fn set_open(&mut self, open: bool) -> Vec<Action> {
        let actions = self.core.set_open(open);
        self.dispatch(actions)
    }

    pub fn on_drag(&mut self, event: DragEvent) -> Vec<Action> {
        let actions = self.core.on_drag(event);
        self.dispatch(actions)
    }

    pub fn on_gesture(&mut self, gesture: Gesture) -> Vec<Action> {
        let actions = self.core.on_gesture(gesture);
        self.dispatch(actions)
    }

    pub fn on_backdrop_tap(&mut self) -> Vec<Action> {
        let actions = self.core.on_backdrop_tap();
        self.dispatch(actions)
    }

    pub fn pump(&mut self, source: &mut impl DragSource) -> Vec<Action> {
        let actions = self.core.pump(source);
        self.dispatch(actions)
    }

    pub fn tick(&mut self, dt: Duration) -> Vec<Action> {
        self.core.tick(dt)
    }

    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if let Some(on_close) = self.on_close.as_mut() {
            for _ in actions.iter().filter(|a| **a == Action::CloseRequested) {
                on_close();
            }
        }
        actions
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.core.offset()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    #[must_use]
    pub fn scene<'a, C>(&self, content: Option<&'a C>) -> Scene<'a, C> {
        self.core.scene(content)
    }
}
